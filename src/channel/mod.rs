//! The trust channel and the operations that run over it.
//!
//! A [`SecureChannel`] is an explicit value owned by the caller; nothing
//! about the chain lives in process globals. The channel is a single-writer
//! resource: every authenticated call must pair `setup_authenticator` with
//! `validate_chain` before the next call starts, because both mutate the
//! rolling seeds.

use nrpc_core::error::NrpcError;
use nrpc_core::logging::debug;
use nrpc_core::NrpcResult;

use crate::protocol::{Credential, NegotiateFlags, SessionKey};
use crate::util::config::MachineIdentity;

mod chain;
mod negotiation;
mod password;
mod policy;

pub use negotiation::{negotiate, Negotiation};
pub use policy::{
    global_policy, init_global_policy, GlobalPolicy, POLICY_DISABLE_LOGON_EX,
    POLICY_DISABLE_RESPONSE_VERIFICATION, POLICY_DISABLE_SECURE_RPC,
};

/// An established secure channel: the session key, the rolling credential
/// seeds, and the negotiated capability set.
pub struct SecureChannel {
    server_unc: String,
    account_name: String,
    computer_name: String,
    session_key: SessionKey,
    client_credential: Credential,
    server_credential: Credential,
    negotiated_flags: NegotiateFlags,
    policy: GlobalPolicy,
    timestamp: u32,
    valid: bool,
}

impl std::fmt::Debug for SecureChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureChannel")
            .field("server_unc", &self.server_unc)
            .field("account_name", &self.account_name)
            .field("computer_name", &self.computer_name)
            .field("session_key", &"<redacted>")
            .field("negotiated_flags", &self.negotiated_flags)
            .field("policy", &self.policy)
            .field("timestamp", &self.timestamp)
            .field("valid", &self.valid)
            .finish()
    }
}

impl SecureChannel {
    pub(crate) fn established(
        identity: &MachineIdentity,
        session_key: SessionKey,
        client_credential: Credential,
        server_credential: Credential,
        negotiated_flags: NegotiateFlags,
        policy: GlobalPolicy,
    ) -> Self {
        Self {
            server_unc: identity.server_unc.clone(),
            account_name: identity.account_name(),
            computer_name: identity.netbios_hostname.clone(),
            session_key,
            client_credential,
            server_credential,
            negotiated_flags,
            policy,
            timestamp: 0,
            valid: true,
        }
    }

    pub fn server_unc(&self) -> &str {
        &self.server_unc
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn computer_name(&self) -> &str {
        &self.computer_name
    }

    pub fn negotiated_flags(&self) -> NegotiateFlags {
        self.negotiated_flags
    }

    /// The derived session key, exposed for the RPC protection layer that
    /// seals post-negotiation traffic when SECURE_RPC was negotiated.
    pub fn session_key(&self) -> &SessionKey {
        &self.session_key
    }

    /// Timestamp committed by the most recent `setup_authenticator`.
    pub fn last_timestamp(&self) -> u32 {
        self.timestamp
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Mark the channel unusable. Called on chain-validation failure and on
    /// any call whose outcome left the seeds indeterminate; the only way
    /// back is a fresh negotiation.
    pub fn invalidate(&mut self) {
        if self.valid {
            debug!(server = %self.server_unc, "invalidating secure channel");
        }
        self.valid = false;
    }

    /// Tear the channel down: invalidate and scrub all key material.
    pub fn teardown(&mut self) {
        self.invalidate();
        self.scrub();
    }

    pub(crate) fn ensure_valid(&self) -> NrpcResult<()> {
        if self.valid {
            Ok(())
        } else {
            Err(NrpcError::transport_error(
                "Secure channel is not established; renegotiate",
            ))
        }
    }

    fn scrub(&mut self) {
        use zeroize::Zeroize;
        self.session_key.zeroize();
        self.client_credential.zeroize();
        self.server_credential.zeroize();
    }
}

impl Drop for SecureChannel {
    fn drop(&mut self) {
        self.valid = false;
        self.scrub();
    }
}
