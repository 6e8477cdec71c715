//! Session-key derivation for the trust channel.
//!
//! Two algorithms, selected by the STRONG_KEY negotiate flag. Both consume
//! the machine password destructively: the caller's buffer and every
//! intermediate hash are scrubbed before the function returns, success or
//! not.

use zeroize::Zeroize;

use nrpc_core::NrpcResult;

use crate::byte_helper::{load_le_u32, store_le_u32};
use crate::protocol::{Challenge, NegotiateFlags, SessionKey};
use crate::util::crypto::{des_block, hmac_md5, md5_digest, ntlm_hash};

const ZERO_PREFIX: [u8; 4] = [0u8; 4];

/// Derive the session key for the given proposed flags, dispatching on
/// STRONG_KEY. Zeroizes `password` in place.
pub fn derive_session_key(
    password: &mut [u8],
    client_challenge: &Challenge,
    server_challenge: &Challenge,
    flags: NegotiateFlags,
) -> NrpcResult<SessionKey> {
    if flags.contains(NegotiateFlags::STRONG_KEY) {
        skey128(password, client_challenge, server_challenge)
    } else {
        skey64(password, client_challenge, server_challenge)
    }
}

/// 128-bit strong-key path: `HMAC_MD5(NTLM(password), MD5(0^4 || cc || sc))`.
pub fn skey128(
    password: &mut [u8],
    client_challenge: &Challenge,
    server_challenge: &Challenge,
) -> NrpcResult<SessionKey> {
    let mut owf = ntlm_hash(password);
    password.zeroize();

    let mut digest = md5_digest(&[
        &ZERO_PREFIX,
        client_challenge.as_bytes(),
        server_challenge.as_bytes(),
    ]);
    let key = hmac_md5(&owf, &digest);
    owf.zeroize();
    digest.zeroize();

    Ok(SessionKey::strong(key?))
}

/// Legacy 64-bit path: two-stage DES over the little-endian pairwise sum of
/// the challenges. The second stage keys from `H[9..16]`, skipping byte 8;
/// DCs compute it the same way, so both offsets are load-bearing.
pub fn skey64(
    password: &mut [u8],
    client_challenge: &Challenge,
    server_challenge: &Challenge,
) -> NrpcResult<SessionKey> {
    let mut owf = ntlm_hash(password);
    password.zeroize();

    let cc = client_challenge.as_bytes();
    let sc = server_challenge.as_bytes();
    let mut sum = [0u8; 8];
    store_le_u32(
        load_le_u32(&cc[..4]).wrapping_add(load_le_u32(&sc[..4])),
        &mut sum[..4],
    );
    store_le_u32(
        load_le_u32(&cc[4..]).wrapping_add(load_le_u32(&sc[4..])),
        &mut sum[4..],
    );

    let first = des_block(&owf[0..7], &sum);
    sum.zeroize();
    let key = match first {
        Ok(mut block) => {
            let second = des_block(&owf[9..16], &block);
            block.zeroize();
            second
        }
        Err(e) => Err(e),
    };
    owf.zeroize();

    Ok(SessionKey::legacy(key?))
}
