use des::cipher::{BlockEncrypt, KeyInit};
use des::Des;
use zeroize::Zeroize;

use nrpc_core::error::NrpcError;
use nrpc_core::NrpcResult;

pub const DES_KEY_SIZE: usize = 7;
pub const DES_BLOCK_SIZE: usize = 8;

/// Encrypt one 8-byte block under a 7-byte Netlogon key.
///
/// The key crosses the wire as 56 bits; DES wants 64 with a parity bit per
/// byte. Netlogon spreads the 56 bits over the high seven bits of each key
/// byte and leaves the parity bit clear, which the cipher ignores anyway.
pub fn des_block(key: &[u8], input: &[u8; DES_BLOCK_SIZE]) -> NrpcResult<[u8; DES_BLOCK_SIZE]> {
    if key.len() != DES_KEY_SIZE {
        return Err(NrpcError::crypto_error("Invalid DES key length"));
    }
    let mut expanded = expand_des_key(key);
    let des = Des::new_from_slice(&expanded).map_err(|_| {
        expanded.zeroize();
        NrpcError::crypto_error("DES key schedule rejected the key")
    })?;
    expanded.zeroize();

    let mut output = [0u8; DES_BLOCK_SIZE];
    des.encrypt_block_b2b(input.into(), (&mut output).into());
    Ok(output)
}

fn expand_des_key(key: &[u8]) -> [u8; 8] {
    let mut result = [0u8; 8];

    result[0] = key[0] >> 1;
    result[1] = ((key[0] & 0x01) << 6) | (key[1] >> 2);
    result[2] = ((key[1] & 0x03) << 5) | (key[2] >> 3);
    result[3] = ((key[2] & 0x07) << 4) | (key[3] >> 4);
    result[4] = ((key[3] & 0x0F) << 3) | (key[4] >> 5);
    result[5] = ((key[4] & 0x1F) << 2) | (key[5] >> 6);
    result[6] = ((key[5] & 0x3F) << 1) | (key[6] >> 7);
    result[7] = key[6] & 0x7F;

    for byte in result.iter_mut() {
        *byte <<= 1;
    }

    result
}
