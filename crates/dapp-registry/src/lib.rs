//! dApp registry module.
//!
//! This module defines the `DappRegistry` Sovereign SDK module: the list of
//! applications a wallet single-sign-on session may connect to. It exposes:
//! - Admin-gated registration, deactivation and reactivation of dApps,
//! - Helper methods for sibling modules (e.g. the session module) to check
//!   whether a dApp is eligible for connection.
//!
//! Registration currently implies verification: `is_verified` is set
//! unconditionally when an entry is written. The flag is stored separately
//! so a distinct verification step can be introduced without a migration.

mod call;
mod error;
mod event;
mod types;

pub use call::CallMessage;
pub use error::DappRegistryError;
pub use event::Event;
pub use types::{DappInfo, RegistryConfig};

use sov_modules_api::{
    Context, GenesisState, Module, ModuleId, ModuleInfo, ModuleRestApi, Spec, StateMap,
    StateValue, TxState,
};

/// dApp registry module definition.
///
/// On-chain state:
/// - `admin`: the privileged operator address,
/// - `dapps`: per-id application metadata.
#[derive(Clone, ModuleInfo, ModuleRestApi)]
pub struct DappRegistry<S: Spec> {
    /// Unique identifier of this module in the runtime.
    #[id]
    pub id: ModuleId,

    /// Address allowed to mutate the registry.
    #[state]
    pub admin: StateValue<S::Address>,

    /// Mapping from dApp id to its registered metadata.
    #[state]
    pub dapps: StateMap<String, DappInfo<S>>,
}

impl<S: Spec> Module for DappRegistry<S> {
    type Spec = S;

    type Config = RegistryConfig<S>;

    type CallMessage = CallMessage<S>;

    type Event = Event<S>;

    type Error = anyhow::Error;

    fn genesis(
        &mut self,
        _header: &<S::Da as sov_modules_api::DaSpec>::BlockHeader,
        config: &Self::Config,
        state: &mut impl GenesisState<S>,
    ) -> anyhow::Result<()> {
        self.admin.set(&config.admin, state)?;
        Ok(())
    }

    fn call(
        &mut self,
        msg: Self::CallMessage,
        context: &Context<Self::Spec>,
        state: &mut impl TxState<S>,
    ) -> Result<(), Self::Error> {
        call::execute(self, msg, context, state)
    }
}

impl<S: Spec> DappRegistry<S> {
    /// --- APIs for sibling modules ---

    /// Returns the registered metadata for a dApp id, if any.
    pub fn get_dapp(
        &self,
        dapp_id: &str,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<Option<DappInfo<S>>> {
        Ok(self.dapps.get(&dapp_id.to_string(), state)?)
    }

    /// Returns `true` if the dApp is both verified and active.
    ///
    /// Never fails on unmet conditions: an unknown id is simply not
    /// connectable.
    pub fn is_connectable(
        &self,
        dapp_id: &str,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<bool> {
        Ok(match self.get_dapp(dapp_id, state)? {
            Some(info) => info.is_verified && info.is_active,
            None => false,
        })
    }

    /// Require that the dApp is eligible for connection.
    ///
    /// Verification is checked before activeness, so an unknown id reports
    /// [`DappRegistryError::DappNotVerified`].
    pub fn connectable(
        &self,
        dapp_id: &str,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<()> {
        let info = self.get_dapp(dapp_id, state)?;

        let verified = info.as_ref().is_some_and(|i| i.is_verified);
        if !verified {
            return Err(DappRegistryError::DappNotVerified.into());
        }

        let active = info.as_ref().is_some_and(|i| i.is_active);
        if !active {
            return Err(DappRegistryError::DappNotActive.into());
        }

        Ok(())
    }

    /// --- Helpers ---

    /// Returns `true` if the given sender is the configured admin.
    ///
    /// # Errors
    ///
    /// - Returns an error if the admin has not been initialized in state.
    pub(crate) fn is_admin(
        &self,
        sender: &S::Address,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<bool> {
        let admin = self
            .admin
            .get(state)?
            .ok_or(DappRegistryError::AdminNotInitialized)?;

        Ok(sender == &admin)
    }
}
