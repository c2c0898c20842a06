//! Call messages and execution entrypoint for the `DappRegistry` module.

use schemars::JsonSchema;
use sov_modules_api::macros::serialize;
use sov_modules_api::macros::UniversalWallet;
use sov_modules_api::{Context, EventEmitter, Spec, TxState};

use crate::{DappInfo, DappRegistry, DappRegistryError, Event};

/// Transaction-level messages supported by the `DappRegistry`.
///
/// Every variant is admin-only; access control is enforced in [`execute`].
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema, UniversalWallet)]
#[serialize(Borsh, Serde)]
#[serde(rename_all = "snake_case")]
#[schemars(bound = "S: Spec", rename = "CallMessage")]
pub enum CallMessage<S: Spec> {
    /// Register an application under `dapp_id`.
    ///
    /// The entry is written verified and active. Registration is rejected
    /// while an *active* entry exists for the id; a deactivated id may be
    /// re-registered with fresh metadata.
    RegisterDapp {
        dapp_id: String,
        name: String,
        domain: String,
        owner: S::Address,
    },

    /// Clear the `is_active` flag of a registered application.
    DeactivateDapp { dapp_id: String },

    /// Restore the `is_active` flag of a registered application.
    ReactivateDapp { dapp_id: String },

    /// Hand the registry over to a new admin address.
    SetAdmin { new_admin: S::Address },
}

/// Route a CallMessage to the corresponding `DappRegistry` logic.
pub fn execute<S: Spec>(
    module: &mut DappRegistry<S>,
    msg: CallMessage<S>,
    context: &Context<S>,
    state: &mut impl TxState<S>,
) -> anyhow::Result<()> {
    match msg {
        CallMessage::RegisterDapp {
            dapp_id,
            name,
            domain,
            owner,
        } => {
            if !module.is_admin(context.sender(), state)? {
                return Err(DappRegistryError::Unauthorized.into());
            }

            if dapp_id.is_empty() {
                return Err(DappRegistryError::InvalidDappId.into());
            }

            // Only an *active* entry blocks registration. A deactivated id
            // may be claimed again with new metadata and owner.
            if let Some(existing) = module.dapps.get(&dapp_id, state)? {
                if existing.is_active {
                    return Err(DappRegistryError::DappAlreadyRegistered.into());
                }
            }

            let info = DappInfo {
                name: name.clone(),
                domain: domain.clone(),
                owner: owner.clone(),
                is_verified: true,
                is_active: true,
            };

            module.dapps.set(&dapp_id, &info, state)?;

            module.emit_event(
                state,
                Event::DappRegistered {
                    dapp_id,
                    name,
                    domain,
                    owner,
                },
            );

            Ok(())
        }
        CallMessage::DeactivateDapp { dapp_id } => {
            if !module.is_admin(context.sender(), state)? {
                return Err(DappRegistryError::Unauthorized.into());
            }

            let mut info = module
                .dapps
                .get(&dapp_id, state)?
                .ok_or(DappRegistryError::DappNotRegistered)?;

            info.is_active = false;
            module.dapps.set(&dapp_id, &info, state)?;

            module.emit_event(state, Event::DappDeactivated { dapp_id });

            Ok(())
        }
        CallMessage::ReactivateDapp { dapp_id } => {
            if !module.is_admin(context.sender(), state)? {
                return Err(DappRegistryError::Unauthorized.into());
            }

            let mut info = module
                .dapps
                .get(&dapp_id, state)?
                .ok_or(DappRegistryError::DappNotRegistered)?;

            info.is_active = true;
            module.dapps.set(&dapp_id, &info, state)?;

            module.emit_event(state, Event::DappReactivated { dapp_id });

            Ok(())
        }
        CallMessage::SetAdmin { new_admin } => {
            if !module.is_admin(context.sender(), state)? {
                return Err(DappRegistryError::Unauthorized.into());
            }

            let old_admin = module.admin.get(state)?;

            module.admin.set(&new_admin, state)?;

            module.emit_event(
                state,
                Event::AdminSet {
                    old_admin,
                    new_admin,
                },
            );

            Ok(())
        }
    }
}
