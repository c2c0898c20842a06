use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletSessionsError {
    #[error("Admin not initialized")]
    AdminNotInitialized,

    #[error("Session configuration not initialized")]
    ConfigNotInitialized,

    #[error("Caller is not authorized for this operation")]
    Unauthorized,

    #[error("Duration must be non-zero")]
    InvalidDuration,

    #[error("Duration exceeds the maximum session duration")]
    DurationExceedsMax,

    #[error("Signature is not a valid 65-byte recoverable ECDSA encoding")]
    InvalidSignatureFormat,

    #[error("Signature was not produced by the claimed wallet key")]
    SignatureMismatch,

    #[error("No currently valid session for this wallet")]
    SessionInvalid,

    #[error("dApp is not connected in the current session")]
    DappNotConnected,
}
