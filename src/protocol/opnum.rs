use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Opnums on the Netlogon RPC interface that the trust-channel engine
/// drives. `SamLogonEx` is listed because global policy gates its use by
/// the logon layer above; this crate never issues it.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum NetrOpnum {
    ServerReqChallenge = 4,
    ServerPasswordSet = 6,
    ServerAuthenticate2 = 15,
    SamLogonEx = 39,
}

/// NETLOGON_SECURE_CHANNEL_TYPE. A member server always authenticates its
/// workstation trust account, so `Workstation` is the only value sent.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum NetrSecureChannelType {
    Null = 0,
    MsvAp = 1,
    Workstation = 2,
    TrustedDnsDomain = 3,
    TrustedDomain = 4,
    UasServer = 5,
    Server = 6,
    CdcServer = 7,
}
