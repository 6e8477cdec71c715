use once_cell::sync::OnceCell;

/// Configuration bit: never propose SECURE_RPC.
pub const POLICY_DISABLE_SECURE_RPC: u32 = 1 << 0;
/// Configuration bit: accept authenticated replies without verifying the
/// returned credential.
pub const POLICY_DISABLE_RESPONSE_VERIFICATION: u32 = 1 << 1;
/// Configuration bit: the logon layer must use plain SamLogon rather than
/// SamLogonEx.
pub const POLICY_DISABLE_LOGON_EX: u32 = 1 << 2;

/// Process-wide policy knobs, read once from configuration. Immutable after
/// [`init_global_policy`]; reads take no lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalPolicy {
    pub use_secure_rpc: bool,
    pub use_logon_ex: bool,
    pub verify_rpc_responses: bool,
}

impl Default for GlobalPolicy {
    fn default() -> Self {
        Self {
            use_secure_rpc: true,
            use_logon_ex: true,
            verify_rpc_responses: true,
        }
    }
}

impl GlobalPolicy {
    pub fn from_flags(flags: u32) -> Self {
        Self {
            use_secure_rpc: flags & POLICY_DISABLE_SECURE_RPC == 0,
            use_logon_ex: flags & POLICY_DISABLE_LOGON_EX == 0,
            verify_rpc_responses: flags & POLICY_DISABLE_RESPONSE_VERIFICATION == 0,
        }
    }
}

static GLOBAL_POLICY: OnceCell<GlobalPolicy> = OnceCell::new();

/// Install the process-wide policy from raw configuration flags. First call
/// wins; later calls return the already-installed policy unchanged.
pub fn init_global_policy(flags: u32) -> GlobalPolicy {
    *GLOBAL_POLICY.get_or_init(|| GlobalPolicy::from_flags(flags))
}

/// The installed policy, or the permissive default when nothing was
/// installed.
pub fn global_policy() -> GlobalPolicy {
    GLOBAL_POLICY.get().copied().unwrap_or_default()
}
