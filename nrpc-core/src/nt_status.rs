use num_enum::{FromPrimitive, IntoPrimitive};

/// NT status codes a Netlogon trust-channel operation can surface.
///
/// Values outside the catalogue collapse to `UnknownError`; the raw code is
/// still what crossed the wire, so callers needing it should convert before
/// the enum conversion loses it.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, IntoPrimitive)]
pub enum NTStatus {
    Success = 0x0000_0000,
    Unsuccessful = 0xC000_0001,
    InvalidParameter = 0xC000_000D,
    AccessDenied = 0xC000_0022,
    NoLogonServers = 0xC000_005E,
    WrongPassword = 0xC000_006A,
    NoTrustLsaSecret = 0xC000_018A,
    NoTrustSamAccount = 0xC000_018B,
    DowngradeDetected = 0xC000_0388,
    #[num_enum(default)]
    UnknownError = 0xFFFF_FFFF,
}

impl NTStatus {
    pub fn is_success(&self) -> bool {
        *self == Self::Success
    }
}
