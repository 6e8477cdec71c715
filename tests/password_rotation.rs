//! `ServerPasswordSet` rotation: all-or-nothing from the client's view.

mod common;

use netlogon_client::protocol::NegotiateFlags;
use netlogon_client::util::crypto::credentials::gen_password;
use netlogon_client::{negotiate, NrpcError, NTStatus, SecureChannel};

use common::{MemoryConfig, MockDc, DC_FQDN, NB_DOMAIN, PASSWORD};

fn establish(dc: &mut MockDc, config: &MemoryConfig) -> SecureChannel {
    negotiate(dc, config, DC_FQDN, NB_DOMAIN, NegotiateFlags::empty(), || {}).unwrap()
}

/// The 16-byte DES input the rotation derives from a stored password.
fn padded_secret(password: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    let take = password.len().min(16);
    out[..take].copy_from_slice(&password[..take]);
    out
}

#[test]
fn successful_rotation_persists_the_new_secret() {
    let mut dc = MockDc::new();
    let mut config = MemoryConfig::new();
    let mut channel = establish(&mut dc, &config);

    let expected = gen_password(channel.session_key(), &padded_secret(PASSWORD)).unwrap();
    channel.change_machine_password(&mut dc, &mut config).unwrap();

    assert_eq!(config.password, expected.to_vec());
    assert_eq!(dc.stored_owf, Some(expected));
    assert!(channel.is_valid());
}

#[test]
fn rotated_secret_differs_from_the_old_one() {
    let mut dc = MockDc::new();
    let mut config = MemoryConfig::new();
    let mut channel = establish(&mut dc, &config);

    channel.change_machine_password(&mut dc, &mut config).unwrap();
    assert_ne!(config.password, PASSWORD.to_vec());
    assert_eq!(config.password.len(), 16);
}

#[test]
fn remote_rejection_keeps_the_old_password() {
    let mut dc = MockDc::new();
    dc.password_set_status = NTStatus::AccessDenied;
    let mut config = MemoryConfig::new();
    let mut channel = establish(&mut dc, &config);

    let err = channel
        .change_machine_password(&mut dc, &mut config)
        .unwrap_err();
    assert_eq!(err.remote_nt_status(), Some(NTStatus::AccessDenied));
    assert_eq!(config.password, PASSWORD.to_vec());
    assert!(!channel.is_valid());
}

#[test]
fn transport_failure_keeps_the_old_password() {
    let mut dc = MockDc::new();
    dc.fail_password_set_transport = true;
    let mut config = MemoryConfig::new();
    let mut channel = establish(&mut dc, &config);

    let err = channel
        .change_machine_password(&mut dc, &mut config)
        .unwrap_err();
    assert!(matches!(err, NrpcError::Transport(_)));
    assert_eq!(config.password, PASSWORD.to_vec());
    assert!(!channel.is_valid());
}

#[test]
fn bad_return_authenticator_keeps_the_old_password() {
    let mut dc = MockDc::new();
    dc.perturb_return_authenticator = true;
    let mut config = MemoryConfig::new();
    let mut channel = establish(&mut dc, &config);

    let err = channel
        .change_machine_password(&mut dc, &mut config)
        .unwrap_err();
    assert!(matches!(err, NrpcError::CredentialMismatch(_)));
    assert_eq!(config.password, PASSWORD.to_vec());
    assert!(!channel.is_valid());
}

#[test]
fn rotation_requires_a_valid_channel() {
    let mut dc = MockDc::new();
    let mut config = MemoryConfig::new();
    let mut channel = establish(&mut dc, &config);

    channel.teardown();
    assert!(channel
        .change_machine_password(&mut dc, &mut config)
        .is_err());
    assert_eq!(config.password, PASSWORD.to_vec());
}
