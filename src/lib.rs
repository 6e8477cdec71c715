//! Client side of the Netlogon (NRPC) secure-channel establishment protocol.
//!
//! A member server proves possession of its machine-account password to a
//! domain controller by deriving a shared session key from both sides'
//! challenges, then carries a rolling credential chain across every
//! authenticated call. This crate owns the key derivations, the negotiation
//! state machine, the chain, and trust-password rotation; the RPC transport,
//! NDR marshaling, and configuration store are injected behind traits.

pub mod channel;
pub mod protocol;
pub mod transport;
pub mod util;

mod byte_helper;

pub use channel::{global_policy, init_global_policy, negotiate, GlobalPolicy, SecureChannel};
pub use nrpc_core::error::NrpcError;
pub use nrpc_core::nt_status::NTStatus;
pub use nrpc_core::NrpcResult;

/// Install a `tracing` subscriber reading `RUST_LOG`, for binaries and
/// tests that want the engine's events on stderr.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
