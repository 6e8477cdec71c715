use std::fmt::{Display, Formatter};

use crate::nt_status::NTStatus;

#[derive(Debug)]
pub enum NrpcError {
    Config(NrpcConfigError),
    Crypto(NrpcCryptoError),
    Transport(NrpcTransportError),
    Remote(NrpcRemoteError),
    CredentialMismatch(NrpcCredentialMismatchError),
    MitigationExhausted(NrpcMitigationExhaustedError),
}

impl NrpcError {
    pub fn config_error<T: Into<NrpcConfigError>>(error: T) -> Self {
        Self::Config(error.into())
    }

    pub fn crypto_error<T: Into<NrpcCryptoError>>(error: T) -> Self {
        Self::Crypto(error.into())
    }

    pub fn transport_error<T: Into<NrpcTransportError>>(error: T) -> Self {
        Self::Transport(error.into())
    }

    pub fn remote_status(status: NTStatus) -> Self {
        Self::Remote(NrpcRemoteError { status })
    }

    pub fn credential_mismatch<T: Into<NrpcCredentialMismatchError>>(context: T) -> Self {
        Self::CredentialMismatch(context.into())
    }

    pub fn mitigation_exhausted(attempts: usize) -> Self {
        Self::MitigationExhausted(NrpcMitigationExhaustedError { attempts })
    }

    /// The NT status the DC returned, when this error carries one.
    pub fn remote_nt_status(&self) -> Option<NTStatus> {
        match self {
            Self::Remote(x) => Some(x.status),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct NrpcConfigError {
    message: String,
}

impl<T: Into<String>> From<T> for NrpcConfigError {
    fn from(value: T) -> Self {
        Self {
            message: value.into(),
        }
    }
}

impl Display for NrpcConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Machine configuration unavailable: {}", self.message)
    }
}

#[derive(Debug)]
pub struct NrpcCryptoError {
    message: String,
}

impl<T: Into<String>> From<T> for NrpcCryptoError {
    fn from(value: T) -> Self {
        Self {
            message: value.into(),
        }
    }
}

impl Display for NrpcCryptoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Crypto operation failed with error: {}", self.message)
    }
}

#[derive(Debug)]
pub struct NrpcTransportError {
    message: String,
}

impl<T: Into<String>> From<T> for NrpcTransportError {
    fn from(value: T) -> Self {
        Self {
            message: value.into(),
        }
    }
}

impl Display for NrpcTransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RPC transport failed with error: {}", self.message)
    }
}

#[derive(Debug)]
pub struct NrpcRemoteError {
    status: NTStatus,
}

impl NrpcRemoteError {
    pub fn status(&self) -> NTStatus {
        self.status
    }
}

impl Display for NrpcRemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DC returned {:?} (0x{:08X})",
            self.status,
            u32::from(self.status)
        )
    }
}

#[derive(Debug)]
pub struct NrpcCredentialMismatchError {
    context: String,
}

impl<T: Into<String>> From<T> for NrpcCredentialMismatchError {
    fn from(value: T) -> Self {
        Self {
            context: value.into(),
        }
    }
}

impl Display for NrpcCredentialMismatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Server credential mismatch during {}", self.context)
    }
}

#[derive(Debug)]
pub struct NrpcMitigationExhaustedError {
    attempts: usize,
}

impl NrpcMitigationExhaustedError {
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl Display for NrpcMitigationExhaustedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "No credential passed the DC filter after {} attempts",
            self.attempts
        )
    }
}

impl Display for NrpcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(x) => write!(f, "{}", x),
            Self::Crypto(x) => write!(f, "{}", x),
            Self::Transport(x) => write!(f, "{}", x),
            Self::Remote(x) => write!(f, "{}", x),
            Self::CredentialMismatch(x) => write!(f, "{}", x),
            Self::MitigationExhausted(x) => write!(f, "{}", x),
        }
    }
}

impl std::error::Error for NrpcError {}
