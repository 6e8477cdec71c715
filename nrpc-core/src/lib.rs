use error::NrpcError;

pub mod error;
pub mod logging;
pub mod nt_status;

pub type NrpcResult<T> = Result<T, NrpcError>;
