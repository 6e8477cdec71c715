use bitflags::bitflags;

bitflags! {
    /// Negotiate-flags bitfield proposed in `ServerAuthenticate2` and echoed
    /// back (intersected) by the DC.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NegotiateFlags: u32 {
        /// Baseline capability set every supported DC accepts.
        const BASE = 0x0000_01FF;

        /// DC supports the 128-bit HMAC-MD5 session-key derivation.
        const STRONG_KEY = 0x0000_4000;

        /// DC supports (and after the Zerologon hardening, requires)
        /// RPC-level message protection on the established channel.
        const SECURE_RPC = 0x4000_0000;
    }
}

impl NegotiateFlags {
    /// The default client proposal.
    pub fn proposal() -> Self {
        Self::BASE | Self::STRONG_KEY | Self::SECURE_RPC
    }
}
