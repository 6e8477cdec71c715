//! The RPC seam the engine drives.
//!
//! NDR marshaling, pipe transport, and binding mechanics live behind
//! [`NetlogonRpc`]; the engine only produces and consumes the fixed-size
//! fields below. Negotiation binds anonymously over the `NETLOGON` named
//! pipe, so no credentials appear at this interface.
//!
//! A transport-level failure is an `Err`; a call the DC answered with a
//! non-success NT status comes back as `Ok` with that status in the reply,
//! and the engine decides what it means for the channel.

use nrpc_core::nt_status::NTStatus;
use nrpc_core::NrpcResult;

use crate::protocol::{
    Authenticator, Challenge, Credential, NegotiateFlags, NetrOpnum, NetrSecureChannelType,
};

/// `ServerReqChallenge` (opnum 4).
#[derive(Debug)]
pub struct ReqChallengeRequest<'a> {
    pub server_unc: &'a str,
    pub computer_name: &'a str,
    pub client_challenge: Challenge,
}

impl ReqChallengeRequest<'_> {
    pub const OPNUM: NetrOpnum = NetrOpnum::ServerReqChallenge;
}

#[derive(Debug)]
pub struct ReqChallengeReply {
    pub status: NTStatus,
    pub server_challenge: Challenge,
}

/// `ServerAuthenticate2` (opnum 15).
#[derive(Debug)]
pub struct Authenticate2Request<'a> {
    pub server_unc: &'a str,
    pub account_name: &'a str,
    pub channel_type: NetrSecureChannelType,
    pub computer_name: &'a str,
    pub client_credential: Credential,
    pub negotiate_flags: NegotiateFlags,
}

impl Authenticate2Request<'_> {
    pub const OPNUM: NetrOpnum = NetrOpnum::ServerAuthenticate2;
}

#[derive(Debug)]
pub struct Authenticate2Reply {
    pub status: NTStatus,
    pub server_credential: Credential,
    pub negotiate_flags: NegotiateFlags,
}

/// `ServerPasswordSet` (opnum 6).
#[derive(Debug)]
pub struct PasswordSetRequest<'a> {
    pub server_unc: &'a str,
    pub account_name: &'a str,
    pub channel_type: NetrSecureChannelType,
    pub computer_name: &'a str,
    pub authenticator: Authenticator,
    pub owf_password: [u8; 16],
}

impl PasswordSetRequest<'_> {
    pub const OPNUM: NetrOpnum = NetrOpnum::ServerPasswordSet;
}

#[derive(Debug)]
pub struct PasswordSetReply {
    pub status: NTStatus,
    pub return_authenticator: Authenticator,
}

pub trait NetlogonRpc {
    /// Open the transport and bind to the NRPC interface on `server_unc`
    /// as an anonymous named-pipe client.
    fn bind(&mut self, server_unc: &str, domain: &str) -> NrpcResult<()>;

    fn server_req_challenge(
        &mut self,
        req: &ReqChallengeRequest<'_>,
    ) -> NrpcResult<ReqChallengeReply>;

    fn server_authenticate2(
        &mut self,
        req: &Authenticate2Request<'_>,
    ) -> NrpcResult<Authenticate2Reply>;

    fn server_password_set(
        &mut self,
        req: &PasswordSetRequest<'_>,
    ) -> NrpcResult<PasswordSetReply>;

    /// Release the binding. Infallible by contract; a transport that fails
    /// to close cleanly has nothing useful to tell the engine.
    fn unbind(&mut self);
}
