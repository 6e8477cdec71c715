//! The session-key negotiation state machine.
//!
//! `ReqChallenge` then `Authenticate2`, with the client challenge rejection
//! sampled until it passes the hardened-DC nonce filter. The machine
//! password is read once, consumed by the key derivation, and scrubbed
//! before this module returns on any path.

use nrpc_core::error::NrpcError;
use nrpc_core::logging::{debug, info, warn};
use nrpc_core::NrpcResult;

use crate::channel::policy::{global_policy, GlobalPolicy};
use crate::channel::SecureChannel;
use crate::protocol::{NegotiateFlags, NetrSecureChannelType};
use crate::transport::{Authenticate2Request, NetlogonRpc, ReqChallengeRequest};
use crate::util::config::{MachineConfig, MachineIdentity};
use crate::util::crypto::credentials::{compute_credential, random_challenge};
use crate::util::crypto::session_key::derive_session_key;

#[derive(Copy, Clone, PartialEq, Debug)]
enum NegotiationState {
    Idle,
    Bound,
    Challenged,
    Authenticated,
    Closed,
}

/// One run of the challenge/response handshake against a single DC.
pub struct Negotiation<'a, T: NetlogonRpc, C: MachineConfig> {
    transport: &'a mut T,
    config: &'a C,
    policy: GlobalPolicy,
    state: NegotiationState,
}

impl<'a, T: NetlogonRpc, C: MachineConfig> Negotiation<'a, T, C> {
    pub fn new(transport: &'a mut T, config: &'a C) -> Self {
        Self::with_policy(transport, config, global_policy())
    }

    pub fn with_policy(transport: &'a mut T, config: &'a C, policy: GlobalPolicy) -> Self {
        Self {
            transport,
            config,
            policy,
            state: NegotiationState::Idle,
        }
    }

    /// Run open-negotiate-close and return the established channel.
    ///
    /// `extra_flags` is OR'd into the default proposal. `seqnum_sync` is the
    /// kpasswd sequence-number hook, invoked exactly once on success.
    pub fn run(
        mut self,
        server_fqdn: &str,
        domain: &str,
        extra_flags: NegotiateFlags,
        seqnum_sync: impl FnMut(),
    ) -> NrpcResult<SecureChannel> {
        let result = self.establish(server_fqdn, domain, extra_flags, seqnum_sync);
        if self.state != NegotiationState::Idle {
            self.transport.unbind();
        }
        self.state = NegotiationState::Closed;
        result
    }

    fn establish(
        &mut self,
        server_fqdn: &str,
        domain: &str,
        extra_flags: NegotiateFlags,
        mut seqnum_sync: impl FnMut(),
    ) -> NrpcResult<SecureChannel> {
        let mut identity = MachineIdentity::from_config(self.config, server_fqdn)?;
        let account_name = identity.account_name();
        debug!(
            server = %identity.server_unc,
            account = %account_name,
            "negotiating secure channel"
        );

        self.transport.bind(&identity.server_unc, domain)?;
        self.state = NegotiationState::Bound;

        let client_challenge = random_challenge()?;
        let challenge_reply = self.transport.server_req_challenge(&ReqChallengeRequest {
            server_unc: &identity.server_unc,
            computer_name: &identity.netbios_hostname,
            client_challenge,
        })?;
        if !challenge_reply.status.is_success() {
            return Err(NrpcError::remote_status(challenge_reply.status));
        }
        self.state = NegotiationState::Challenged;
        let server_challenge = challenge_reply.server_challenge;

        let mut proposal = NegotiateFlags::proposal() | extra_flags;
        if !self.policy.use_secure_rpc {
            proposal.remove(NegotiateFlags::SECURE_RPC);
        }

        let session_key = derive_session_key(
            &mut identity.password,
            &client_challenge,
            &server_challenge,
            proposal,
        )?;
        let client_credential =
            compute_credential(&session_key, client_challenge.as_bytes(), 0)?;
        let expected_server_credential =
            compute_credential(&session_key, server_challenge.as_bytes(), 0)?;

        let auth_reply = self.transport.server_authenticate2(&Authenticate2Request {
            server_unc: &identity.server_unc,
            account_name: &account_name,
            channel_type: NetrSecureChannelType::Workstation,
            computer_name: &identity.netbios_hostname,
            client_credential,
            negotiate_flags: proposal,
        })?;
        if !auth_reply.status.is_success() {
            return Err(NrpcError::remote_status(auth_reply.status));
        }
        if auth_reply.server_credential != expected_server_credential {
            warn!(
                server = %identity.server_unc,
                "DC failed to prove knowledge of the machine secret"
            );
            return Err(NrpcError::credential_mismatch("ServerAuthenticate2"));
        }
        self.state = NegotiationState::Authenticated;
        info!(
            server = %identity.server_unc,
            flags = auth_reply.negotiate_flags.bits(),
            "secure channel established"
        );

        seqnum_sync();

        Ok(SecureChannel::established(
            &identity,
            session_key,
            client_credential,
            expected_server_credential,
            auth_reply.negotiate_flags,
            self.policy,
        ))
    }
}

/// Negotiate a trust channel with `server_fqdn` under the process-wide
/// policy. `flags` extends the default proposal; pass
/// `NegotiateFlags::empty()` for the stock handshake.
pub fn negotiate<T: NetlogonRpc, C: MachineConfig>(
    transport: &mut T,
    config: &C,
    server_fqdn: &str,
    domain: &str,
    flags: NegotiateFlags,
    seqnum_sync: impl FnMut(),
) -> NrpcResult<SecureChannel> {
    Negotiation::new(transport, config).run(server_fqdn, domain, flags, seqnum_sync)
}
