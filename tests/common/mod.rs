//! Shared fixtures: an in-memory configuration store and a mock DC that
//! runs the server half of the handshake with the crate's own derivations.

use zeroize::Zeroizing;

use netlogon_client::protocol::{
    Authenticator, Challenge, Credential, NegotiateFlags, SessionKey,
};
use netlogon_client::transport::{
    Authenticate2Reply, Authenticate2Request, NetlogonRpc, PasswordSetReply, PasswordSetRequest,
    ReqChallengeReply, ReqChallengeRequest,
};
use netlogon_client::util::config::MachineConfig;
use netlogon_client::util::crypto::credentials::compute_credential;
use netlogon_client::util::crypto::session_key::derive_session_key;
use netlogon_client::{NTStatus, NrpcError, NrpcResult};

pub const HOSTNAME: &str = "MEMBER01";
pub const NB_DOMAIN: &str = "EXAMPLE";
pub const FQDN_DOMAIN: &str = "example.test";
pub const DC_FQDN: &str = "dc01.example.test";
pub const PASSWORD: &[u8] = b"Pw!";
pub const SERVER_CHALLENGE: [u8; 8] = [0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17];

pub struct MemoryConfig {
    pub password: Vec<u8>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self {
            password: PASSWORD.to_vec(),
        }
    }
}

impl MachineConfig for MemoryConfig {
    fn machine_password(&self) -> NrpcResult<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(self.password.clone()))
    }

    fn set_machine_password(&mut self, password: &[u8]) -> NrpcResult<()> {
        self.password = password.to_vec();
        Ok(())
    }

    fn netbios_hostname(&self) -> NrpcResult<String> {
        Ok(HOSTNAME.into())
    }

    fn nb_domain(&self) -> NrpcResult<String> {
        Ok(NB_DOMAIN.into())
    }

    fn fqdn_domain(&self) -> NrpcResult<String> {
        Ok(FQDN_DOMAIN.into())
    }
}

fn advance(seed: [u8; 8], timestamp: u32) -> [u8; 8] {
    let mut out = seed;
    let low = u32::from_le_bytes([out[0], out[1], out[2], out[3]]).wrapping_add(timestamp);
    out[..4].copy_from_slice(&low.to_le_bytes());
    out
}

/// Server half of the trust channel, driven by the same derivations the
/// client uses so the two ends can only agree when the math is right.
pub struct MockDc {
    pub password: Vec<u8>,
    pub supported_flags: NegotiateFlags,

    pub fail_bind: bool,
    pub req_challenge_status: NTStatus,
    pub auth2_status: NTStatus,
    pub perturb_server_credential: bool,
    pub password_set_status: NTStatus,
    pub fail_password_set_transport: bool,
    pub perturb_return_authenticator: bool,

    pub bind_calls: usize,
    pub unbind_calls: usize,
    pub seen_client_challenge: Option<Challenge>,
    pub seen_proposal: Option<NegotiateFlags>,
    pub stored_owf: Option<[u8; 16]>,

    pub session_key: Option<SessionKey>,
    client_seed: Option<[u8; 8]>,
    server_seed: Option<[u8; 8]>,
}

impl MockDc {
    pub fn new() -> Self {
        Self {
            password: PASSWORD.to_vec(),
            supported_flags: NegotiateFlags::BASE | NegotiateFlags::STRONG_KEY,
            fail_bind: false,
            req_challenge_status: NTStatus::Success,
            auth2_status: NTStatus::Success,
            perturb_server_credential: false,
            password_set_status: NTStatus::Success,
            fail_password_set_transport: false,
            perturb_return_authenticator: false,
            bind_calls: 0,
            unbind_calls: 0,
            seen_client_challenge: None,
            seen_proposal: None,
            stored_owf: None,
            session_key: None,
            client_seed: None,
            server_seed: None,
        }
    }

    fn key(&self) -> &SessionKey {
        self.session_key.as_ref().expect("no negotiated channel")
    }

    /// Serve one generic authenticated call: check the request authenticator
    /// against this side's chain, advance both seeds, return the reply
    /// authenticator.
    pub fn answer_authenticated_call(&mut self, auth: &Authenticator) -> Authenticator {
        let client_seed = advance(self.client_seed.expect("chain not seeded"), auth.timestamp);
        let expected = compute_credential(self.key(), &client_seed, 0).unwrap();
        assert_eq!(
            expected, auth.credential,
            "DC rejected the request authenticator"
        );
        self.answer_authenticated_call_unchecked(auth)
    }

    /// Advance the chain and answer without checking the request credential,
    /// for tests that deliberately desynchronize the two sides.
    pub fn answer_authenticated_call_unchecked(&mut self, auth: &Authenticator) -> Authenticator {
        let client_seed = advance(self.client_seed.expect("chain not seeded"), auth.timestamp);
        self.client_seed = Some(client_seed);

        let server_seed = advance(self.server_seed.unwrap(), auth.timestamp);
        let credential = compute_credential(self.key(), &server_seed, 0).unwrap();
        self.server_seed = Some(server_seed);
        Authenticator {
            credential,
            timestamp: 0,
        }
    }
}

impl NetlogonRpc for MockDc {
    fn bind(&mut self, server_unc: &str, _domain: &str) -> NrpcResult<()> {
        assert_eq!(server_unc, format!("\\\\{}", DC_FQDN));
        if self.fail_bind {
            return Err(NrpcError::transport_error("pipe open refused"));
        }
        self.bind_calls += 1;
        Ok(())
    }

    fn server_req_challenge(
        &mut self,
        req: &ReqChallengeRequest<'_>,
    ) -> NrpcResult<ReqChallengeReply> {
        assert_eq!(req.computer_name, HOSTNAME);
        self.seen_client_challenge = Some(req.client_challenge);
        Ok(ReqChallengeReply {
            status: self.req_challenge_status,
            server_challenge: Challenge::from(SERVER_CHALLENGE),
        })
    }

    fn server_authenticate2(
        &mut self,
        req: &Authenticate2Request<'_>,
    ) -> NrpcResult<Authenticate2Reply> {
        assert_eq!(req.account_name, format!("{}$", HOSTNAME));
        self.seen_proposal = Some(req.negotiate_flags);

        let client_challenge = self.seen_client_challenge.expect("challenge not exchanged");
        let mut password = self.password.clone();
        let key = derive_session_key(
            &mut password,
            &client_challenge,
            &Challenge::from(SERVER_CHALLENGE),
            req.negotiate_flags,
        )
        .unwrap();

        let expected_client = compute_credential(&key, client_challenge.as_bytes(), 0).unwrap();
        if expected_client != req.client_credential {
            return Ok(Authenticate2Reply {
                status: NTStatus::AccessDenied,
                server_credential: Credential::default(),
                negotiate_flags: NegotiateFlags::empty(),
            });
        }

        let server_credential = compute_credential(&key, &SERVER_CHALLENGE, 0).unwrap();
        self.client_seed = Some(*expected_client.as_bytes());
        self.server_seed = Some(*server_credential.as_bytes());
        self.session_key = Some(key);

        let mut credential_bytes = *server_credential.as_bytes();
        if self.perturb_server_credential {
            credential_bytes[0] ^= 0xFF;
        }

        Ok(Authenticate2Reply {
            status: self.auth2_status,
            server_credential: Credential::from(credential_bytes),
            negotiate_flags: req.negotiate_flags & self.supported_flags,
        })
    }

    fn server_password_set(
        &mut self,
        req: &PasswordSetRequest<'_>,
    ) -> NrpcResult<PasswordSetReply> {
        if self.fail_password_set_transport {
            return Err(NrpcError::transport_error("connection reset"));
        }
        if !self.password_set_status.is_success() {
            return Ok(PasswordSetReply {
                status: self.password_set_status,
                return_authenticator: Authenticator {
                    credential: Credential::default(),
                    timestamp: 0,
                },
            });
        }

        let mut reply_auth = self.answer_authenticated_call(&req.authenticator);
        self.stored_owf = Some(req.owf_password);
        if self.perturb_return_authenticator {
            let mut bytes = *reply_auth.credential.as_bytes();
            bytes[3] ^= 0x55;
            reply_auth.credential = Credential::from(bytes);
        }
        Ok(PasswordSetReply {
            status: NTStatus::Success,
            return_authenticator: reply_auth,
        })
    }

    fn unbind(&mut self) {
        self.unbind_calls += 1;
    }
}
