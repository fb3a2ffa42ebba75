//! Error taxonomy for the enrollment flow.

use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_request::RpcError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrollError {
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("address derivation failed: {0}")]
    AddressDerivationFailure(String),

    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("transaction rejected: {0}")]
    SimulationOrProgramRejection(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid submission state: {0}")]
    InvalidState(String),
}

pub type EnrollResult<T> = std::result::Result<T, EnrollError>;

impl From<ClientError> for EnrollError {
    fn from(err: ClientError) -> Self {
        match err.kind() {
            ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) | ClientErrorKind::Middleware(_) => {
                EnrollError::NetworkFailure(err.to_string())
            }
            // confirmation wait gave up, e.g. the blockhash expired
            ClientErrorKind::RpcError(RpcError::ForUser(msg)) if
                msg.starts_with("unable to confirm transaction")
            => {
                EnrollError::NetworkFailure(err.to_string())
            }
            _ => EnrollError::SimulationOrProgramRejection(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::transaction::TransactionError;

    #[test]
    fn io_errors_are_network_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: EnrollError = ClientError::from(io).into();
        assert!(matches!(err, EnrollError::NetworkFailure(_)));
    }

    #[test]
    fn confirmation_timeouts_are_network_failures() {
        let rpc = RpcError::ForUser(
            "unable to confirm transaction. This can happen in situations such as transaction expiration and insufficient fee-payer funds".to_string()
        );
        let err: EnrollError = ClientError::from(rpc).into();
        assert!(matches!(err, EnrollError::NetworkFailure(_)), "{:?}", err);
    }

    #[test]
    fn other_rpc_errors_are_rejections() {
        let rpc = RpcError::ForUser("AccountNotFound: pubkey=11111111111111111111111111111111".to_string());
        let err: EnrollError = ClientError::from(rpc).into();
        assert!(matches!(err, EnrollError::SimulationOrProgramRejection(_)));
    }

    #[test]
    fn transaction_errors_are_rejections() {
        let err: EnrollError = ClientError::from(TransactionError::AccountInUse).into();
        assert!(matches!(err, EnrollError::SimulationOrProgramRejection(_)));
    }
}
