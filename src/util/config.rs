use std::fmt::{Debug, Formatter};

use zeroize::Zeroizing;

use nrpc_core::error::NrpcError;
use nrpc_core::NrpcResult;

/// NetBIOS computer names top out at 15 bytes; the 16th is the suffix.
pub const MAX_NETBIOS_NAME_LEN: usize = 15;

/// Configuration store the engine reads machine identity from.
///
/// Failures surface as the `Config` error kind. The password accessor hands
/// out a self-scrubbing buffer; the setter exists so a completed
/// `ServerPasswordSet` can persist the rotated secret.
pub trait MachineConfig {
    fn machine_password(&self) -> NrpcResult<Zeroizing<Vec<u8>>>;

    fn set_machine_password(&mut self, password: &[u8]) -> NrpcResult<()>;

    fn netbios_hostname(&self) -> NrpcResult<String>;

    fn nb_domain(&self) -> NrpcResult<String>;

    fn fqdn_domain(&self) -> NrpcResult<String>;
}

/// The identity a negotiation authenticates: names from configuration plus
/// the machine password, held only for the lifetime of the handshake.
pub struct MachineIdentity {
    pub netbios_hostname: String,
    pub nb_domain: String,
    pub fqdn_domain: String,
    pub server_unc: String,
    pub password: Zeroizing<Vec<u8>>,
}

impl MachineIdentity {
    pub fn from_config<C: MachineConfig>(config: &C, server_fqdn: &str) -> NrpcResult<Self> {
        let netbios_hostname = config.netbios_hostname()?;
        if netbios_hostname.is_empty() || netbios_hostname.len() > MAX_NETBIOS_NAME_LEN {
            return Err(NrpcError::config_error(format!(
                "NetBIOS hostname must be 1-{} bytes, got {}",
                MAX_NETBIOS_NAME_LEN,
                netbios_hostname.len()
            )));
        }
        let password = config.machine_password()?;
        if password.is_empty() {
            return Err(NrpcError::config_error("No machine password stored"));
        }

        Ok(Self {
            netbios_hostname,
            nb_domain: config.nb_domain()?,
            fqdn_domain: config.fqdn_domain()?,
            server_unc: format!("\\\\{}", server_fqdn),
            password,
        })
    }

    /// The trust account name: the NetBIOS hostname with the `$` suffix.
    pub fn account_name(&self) -> String {
        format!("{}$", self.netbios_hostname)
    }
}

impl Debug for MachineIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MachineIdentity")
            .field("netbios_hostname", &self.netbios_hostname)
            .field("nb_domain", &self.nb_domain)
            .field("fqdn_domain", &self.fqdn_domain)
            .field("server_unc", &self.server_unc)
            .field("password", &"<redacted>")
            .finish()
    }
}
