use std::fmt::{Debug, Formatter};

use zeroize::Zeroize;

use crate::byte_helper::{load_le_u32, store_le_u32};

pub const CHALLENGE_SIZE: usize = 8;
pub const CREDENTIAL_SIZE: usize = 8;
pub const SESSION_KEY_MAX_SIZE: usize = 16;
pub const AUTHENTICATOR_SIZE: usize = CREDENTIAL_SIZE + 4;

/// An 8-byte nonce: either a locally sampled client challenge or the
/// challenge the DC returned from `ServerReqChallenge`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Challenge([u8; CHALLENGE_SIZE]);

impl Challenge {
    pub fn as_bytes(&self) -> &[u8; CHALLENGE_SIZE] {
        &self.0
    }
}

impl From<[u8; CHALLENGE_SIZE]> for Challenge {
    fn from(bytes: [u8; CHALLENGE_SIZE]) -> Self {
        Self(bytes)
    }
}

/// An 8-byte derived credential. The same type carries the one-shot values
/// exchanged during negotiation and the rolling chain seeds.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Credential([u8; CREDENTIAL_SIZE]);

impl Credential {
    pub fn as_bytes(&self) -> &[u8; CREDENTIAL_SIZE] {
        &self.0
    }

    pub(crate) fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl From<[u8; CREDENTIAL_SIZE]> for Credential {
    fn from(bytes: [u8; CREDENTIAL_SIZE]) -> Self {
        Self(bytes)
    }
}

/// The channel session key: 16 bytes on the strong-key path, 8 on the
/// legacy DES path. Exclusively owned by the channel state and scrubbed
/// on teardown.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct SessionKey {
    bytes: [u8; SESSION_KEY_MAX_SIZE],
    length: usize,
}

impl SessionKey {
    pub fn strong(bytes: [u8; SESSION_KEY_MAX_SIZE]) -> Self {
        Self { bytes, length: 16 }
    }

    pub fn legacy(half: [u8; 8]) -> Self {
        let mut bytes = [0u8; SESSION_KEY_MAX_SIZE];
        bytes[..8].copy_from_slice(&half);
        Self { bytes, length: 8 }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.length]
    }

    /// Key material zero-padded to the full 16 bytes, as the credential
    /// DES schedule slices it.
    pub(crate) fn padded(&self) -> [u8; SESSION_KEY_MAX_SIZE] {
        self.bytes
    }
}

impl Debug for SessionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionKey({} bytes, redacted)", self.length)
    }
}

/// Per-call authenticator: `credential || LE u32 timestamp`, 12 bytes on
/// the wire. Single use; the timestamp only ever moves forward.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Authenticator {
    pub credential: Credential,
    pub timestamp: u32,
}

impl Authenticator {
    pub fn as_bytes(&self) -> [u8; AUTHENTICATOR_SIZE] {
        let mut out = [0u8; AUTHENTICATOR_SIZE];
        out[..CREDENTIAL_SIZE].copy_from_slice(self.credential.as_bytes());
        store_le_u32(self.timestamp, &mut out[CREDENTIAL_SIZE..]);
        out
    }

    pub fn from_bytes(bytes: &[u8; AUTHENTICATOR_SIZE]) -> Self {
        let mut credential = [0u8; CREDENTIAL_SIZE];
        credential.copy_from_slice(&bytes[..CREDENTIAL_SIZE]);
        Self {
            credential: Credential::from(credential),
            timestamp: load_le_u32(&bytes[CREDENTIAL_SIZE..]),
        }
    }
}
