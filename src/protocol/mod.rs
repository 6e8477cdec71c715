//! NRPC wire-facing types.
//!
//! Only the fixed-size fields the trust-channel engine produces and consumes
//! live here; NDR framing of the surrounding structures is the transport's
//! concern. All multi-byte integers crossing the wire are little-endian.
//!
//! - `flags`: the negotiate-flags bitfield exchanged during `ServerAuthenticate2`.
//! - `authenticator`: challenges, credentials, session keys, and the 12-byte
//!   per-call authenticator.
//! - `opnum`: opnum and secure-channel-type catalogues.

mod authenticator;
mod flags;
mod opnum;

pub use authenticator::{
    Authenticator, Challenge, Credential, SessionKey, AUTHENTICATOR_SIZE, CHALLENGE_SIZE,
    CREDENTIAL_SIZE, SESSION_KEY_MAX_SIZE,
};
pub use flags::NegotiateFlags;
pub use opnum::{NetrOpnum, NetrSecureChannelType};
