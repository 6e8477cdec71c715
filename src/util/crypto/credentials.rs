//! Credential derivation, password re-encryption, and the DC nonce filter.

use zeroize::Zeroize;

use nrpc_core::error::NrpcError;
use nrpc_core::NrpcResult;

use crate::byte_helper::{load_le_u32, store_le_u32};
use crate::protocol::{Challenge, Credential, SessionKey, CHALLENGE_SIZE, CREDENTIAL_SIZE};
use crate::util::crypto::{des_block, random_bytes};

/// Cap on every rejection-sampling loop that feeds the DC filter.
pub(crate) const MAX_MITIGATION_ATTEMPTS: usize = 64;

/// Internal outcome of a filtered derivation. The retry signal never leaves
/// the modules that resample on it.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CredentialOutcome {
    Passed(Credential),
    Retry,
}

/// Nonce filter hardened DCs apply to client challenges and credentials:
/// among the first five bytes, at least one value must appear exactly once.
pub fn passes_dc_filter(buf: &[u8; 8]) -> bool {
    let head = &buf[..5];
    head.iter()
        .enumerate()
        .any(|(i, byte)| head.iter().enumerate().all(|(j, other)| i == j || byte != other))
}

/// Two-stage DES credential: add `timestamp` into the low u32 of the input
/// (little-endian, wrapping), then encrypt under `key[0..7]` and `key[7..14]`
/// of the zero-padded session key.
pub fn compute_credential(
    session_key: &SessionKey,
    input: &[u8; CHALLENGE_SIZE],
    timestamp: u32,
) -> NrpcResult<Credential> {
    let mut salted = [0u8; CHALLENGE_SIZE];
    store_le_u32(
        load_le_u32(&input[..4]).wrapping_add(timestamp),
        &mut salted[..4],
    );
    salted[4..].copy_from_slice(&input[4..]);

    let mut key = session_key.padded();
    let first = des_block(&key[0..7], &salted);
    salted.zeroize();
    let credential = match first {
        Ok(mut block) => {
            let second = des_block(&key[7..14], &block);
            block.zeroize();
            second
        }
        Err(e) => Err(e),
    };
    key.zeroize();

    Ok(Credential::from(credential?))
}

/// `compute_credential` plus the DC filter. Callers that may resample their
/// input pass through here; everyone else takes the unfiltered value.
pub(crate) fn compute_credential_filtered(
    session_key: &SessionKey,
    input: &[u8; CHALLENGE_SIZE],
    timestamp: u32,
) -> NrpcResult<CredentialOutcome> {
    let credential = compute_credential(session_key, input, timestamp)?;
    if passes_dc_filter(credential.as_bytes()) {
        Ok(CredentialOutcome::Passed(credential))
    } else {
        Ok(CredentialOutcome::Retry)
    }
}

/// Sample a client challenge until it passes the DC filter.
pub fn random_challenge() -> NrpcResult<Challenge> {
    let mut buf = [0u8; CHALLENGE_SIZE];
    for _ in 0..MAX_MITIGATION_ATTEMPTS {
        random_bytes(&mut buf)?;
        if passes_dc_filter(&buf) {
            return Ok(Challenge::from(buf));
        }
    }
    Err(NrpcError::mitigation_exhausted(MAX_MITIGATION_ATTEMPTS))
}

/// Re-encrypt a 16-byte machine secret under the session key: one DES block
/// per half, keyed from `key[0..7]` and `key[7..14]`.
pub fn gen_password(session_key: &SessionKey, old: &[u8; 16]) -> NrpcResult<[u8; 16]> {
    let mut key = session_key.padded();
    let mut half = [0u8; CREDENTIAL_SIZE];

    half.copy_from_slice(&old[..8]);
    let front = des_block(&key[0..7], &half);
    half.copy_from_slice(&old[8..]);
    let back = des_block(&key[7..14], &half);
    half.zeroize();
    key.zeroize();

    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&front?);
    out[8..].copy_from_slice(&back?);
    Ok(out)
}
