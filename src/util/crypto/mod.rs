//! Crypto primitives behind the trust-channel engine.
//!
//! Everything here wraps a RustCrypto implementation with the fixed
//! byte-level contract Netlogon needs; any failure inside the primitive
//! collapses to the single `Crypto` error kind.

use digest::Digest;
use hmac::{Hmac, Mac};
use md4::Md4;
use md5::Md5;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use nrpc_core::error::NrpcError;
use nrpc_core::NrpcResult;

use crate::byte_helper::u16_to_bytes;

pub mod credentials;
pub mod session_key;

mod des;

pub use des::{des_block, DES_BLOCK_SIZE, DES_KEY_SIZE};

pub const HASH_SIZE: usize = 16;

/// NTLM one-way function: MD4 over the UTF-16LE encoding of the password.
///
/// The stored machine password is opaque bytes; non-UTF-8 content is folded
/// through the replacement character so the derivation stays total.
pub fn ntlm_hash(password: &[u8]) -> [u8; HASH_SIZE] {
    let mut encoded = String::from_utf8_lossy(password)
        .encode_utf16()
        .map(u16_to_bytes)
        .collect::<Vec<[u8; 2]>>()
        .concat();
    let hash = Md4::digest(&encoded);
    encoded.zeroize();
    hash.into()
}

/// MD5 over a sequence of chunks, digested in order.
pub fn md5_digest(chunks: &[&[u8]]) -> [u8; HASH_SIZE] {
    let mut md5 = Md5::new();
    for chunk in chunks {
        md5.update(chunk);
    }
    md5.finalize().into()
}

pub fn hmac_md5(key: &[u8], data: &[u8]) -> NrpcResult<[u8; HASH_SIZE]> {
    let mut mac = <Hmac<Md5>>::new_from_slice(key)
        .map_err(|_| NrpcError::crypto_error("Invalid HMAC-MD5 key length"))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

/// Fill `buf` from the OS CSPRNG.
pub fn random_bytes(buf: &mut [u8]) -> NrpcResult<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|_| NrpcError::crypto_error("OS entropy source unavailable"))
}
