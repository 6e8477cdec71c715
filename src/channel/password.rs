//! Trust-account password rotation over an established channel.

use zeroize::Zeroize;

use nrpc_core::error::NrpcError;
use nrpc_core::logging::{info, warn};
use nrpc_core::NrpcResult;

use crate::channel::SecureChannel;
use crate::protocol::NetrSecureChannelType;
use crate::transport::{NetlogonRpc, PasswordSetRequest};
use crate::util::config::MachineConfig;
use crate::util::crypto::credentials::gen_password;

impl SecureChannel {
    /// Rotate the machine-account password via `ServerPasswordSet`.
    ///
    /// The new secret is the current one re-encrypted under the session
    /// key. It is persisted to configuration only after the DC accepted the
    /// call and the reply authenticator validated; on any failure the
    /// stored password is untouched. A failure after the request went out
    /// leaves the chain indeterminate, so those paths also drop the
    /// channel.
    pub fn change_machine_password<T: NetlogonRpc, C: MachineConfig>(
        &mut self,
        transport: &mut T,
        config: &mut C,
    ) -> NrpcResult<()> {
        self.ensure_valid()?;

        let old_password = config.machine_password()?;
        let mut old_secret = [0u8; 16];
        let take = old_password.len().min(old_secret.len());
        old_secret[..take].copy_from_slice(&old_password[..take]);
        drop(old_password);

        let timestamp = self.next_timestamp();
        let authenticator = match self.setup_authenticator(timestamp) {
            Ok(auth) => auth,
            Err(e) => {
                old_secret.zeroize();
                return Err(e);
            }
        };
        let new_secret = gen_password(&self.session_key, &old_secret);
        old_secret.zeroize();
        let mut new_secret = new_secret?;

        let reply = transport.server_password_set(&PasswordSetRequest {
            server_unc: &self.server_unc,
            account_name: &self.account_name,
            channel_type: NetrSecureChannelType::Workstation,
            computer_name: &self.computer_name,
            authenticator,
            owf_password: new_secret,
        });

        let result = match reply {
            Err(e) => {
                warn!(server = %self.server_unc, "password set did not complete, dropping channel");
                self.invalidate();
                Err(e)
            }
            Ok(reply) if !reply.status.is_success() => {
                warn!(server = %self.server_unc, status = ?reply.status, "DC rejected password set");
                self.invalidate();
                Err(NrpcError::remote_status(reply.status))
            }
            Ok(reply) => self
                .validate_chain(&reply.return_authenticator)
                .and_then(|()| {
                    config.set_machine_password(&new_secret)?;
                    info!(account = %self.account_name, "machine password rotated");
                    Ok(())
                }),
        };
        new_secret.zeroize();
        result
    }
}
