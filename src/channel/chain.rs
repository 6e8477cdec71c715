//! The rolling credential chain carried across authenticated calls.
//!
//! Both sides hold a pair of stored credentials seeded at negotiation. Each
//! call folds the client's timestamp into both seeds; the request and reply
//! authenticators prove each side still derives the same values. Seeds
//! commit only after a candidate credential clears the DC nonce filter, so
//! a filtered retry never desynchronizes the chain.

use std::time::{SystemTime, UNIX_EPOCH};

use nrpc_core::error::NrpcError;
use nrpc_core::logging::{debug, warn};
use nrpc_core::NrpcResult;

use crate::byte_helper::{load_le_u32, store_le_u32};
use crate::channel::SecureChannel;
use crate::protocol::{Authenticator, Credential, CREDENTIAL_SIZE};
use crate::util::crypto::credentials::{
    compute_credential, compute_credential_filtered, CredentialOutcome, MAX_MITIGATION_ATTEMPTS,
};

fn advance_seed(seed: &[u8; CREDENTIAL_SIZE], timestamp: u32) -> [u8; CREDENTIAL_SIZE] {
    let mut out = *seed;
    store_le_u32(
        load_le_u32(&out[..4]).wrapping_add(timestamp),
        &mut out[..4],
    );
    out
}

impl SecureChannel {
    /// Build the authenticator for the next outgoing call.
    ///
    /// Advances the stored client seed by `timestamp` and derives the call
    /// credential from it. When the derived value fails the DC filter the
    /// timestamp is bumped and the advance recomputed from the committed
    /// seed; nothing is stored until a candidate passes.
    pub fn setup_authenticator(&mut self, timestamp: u32) -> NrpcResult<Authenticator> {
        self.ensure_valid()?;

        let mut candidate_ts = timestamp;
        for _ in 0..MAX_MITIGATION_ATTEMPTS {
            let seed = advance_seed(self.client_credential.as_bytes(), candidate_ts);
            match compute_credential_filtered(&self.session_key, &seed, 0)? {
                CredentialOutcome::Passed(credential) => {
                    self.client_credential = Credential::from(seed);
                    self.timestamp = candidate_ts;
                    return Ok(Authenticator {
                        credential,
                        timestamp: candidate_ts,
                    });
                }
                CredentialOutcome::Retry => {
                    debug!(timestamp = candidate_ts, "credential failed DC filter, bumping timestamp");
                    candidate_ts = candidate_ts.wrapping_add(1);
                }
            }
        }
        Err(NrpcError::mitigation_exhausted(MAX_MITIGATION_ATTEMPTS))
    }

    /// Check the authenticator the DC returned for the call most recently
    /// prepared with [`setup_authenticator`], and advance the server seed.
    ///
    /// A mismatch invalidates the channel unless policy disabled response
    /// verification, in which case the seed still advances and the mismatch
    /// is only logged.
    pub fn validate_chain(&mut self, reply_auth: &Authenticator) -> NrpcResult<()> {
        self.ensure_valid()?;

        let seed = advance_seed(self.server_credential.as_bytes(), self.timestamp);
        let expected = compute_credential(&self.session_key, &seed, 0)?;
        if expected != reply_auth.credential {
            if self.policy.verify_rpc_responses {
                warn!(server = %self.server_unc, "reply credential mismatch, dropping channel");
                self.invalidate();
                return Err(NrpcError::credential_mismatch("authenticated reply"));
            }
            warn!(
                server = %self.server_unc,
                "reply credential mismatch ignored per policy"
            );
        }
        self.server_credential = Credential::from(seed);
        Ok(())
    }

    /// Timestamp for the next call: wall-clock seconds, clamped to stay
    /// strictly ahead of the last committed value. Only the client's
    /// monotonicity matters to the DC.
    pub(crate) fn next_timestamp(&self) -> u32 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        now.max(self.timestamp.wrapping_add(1))
    }
}
