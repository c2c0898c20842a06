use thiserror::Error;

#[derive(Debug, Error)]
pub enum DappRegistryError {
    #[error("Admin not initialized")]
    AdminNotInitialized,

    #[error("Caller is not the registry admin")]
    Unauthorized,

    #[error("dApp id must not be empty")]
    InvalidDappId,

    #[error("dApp is already registered and active")]
    DappAlreadyRegistered,

    #[error("dApp is not registered")]
    DappNotRegistered,

    #[error("dApp is not verified")]
    DappNotVerified,

    #[error("dApp is not active")]
    DappNotActive,
}
