//! Call messages and execution entrypoint for the `WalletSessions` module.

use schemars::JsonSchema;
use sov_modules_api::macros::serialize;
use sov_modules_api::macros::UniversalWallet;
use sov_modules_api::{Context, EventEmitter, Spec, TxState};

use crate::{Event, WalletId, WalletSessions, WalletSessionsError};

/// Transaction-level messages supported by `WalletSessions`.
///
/// Access control is enforced in [`execute`] and the module handlers:
/// - `CreateSession` / `ConnectDapp`: any sender (the signature,
///   respectively the session preconditions, are the gate),
/// - `ExtendSession` / `DisconnectWallet`: only the account that created
///   the session,
/// - `SetSessionDuration` / `SetMaxSessionDuration` / `SetAdmin`: admin-only,
/// - `EnforceSessionValid` / `EnforceDappAccess`: assertion endpoints, any
///   sender.
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema, UniversalWallet)]
#[serialize(Borsh, Serde)]
#[serde(rename_all = "snake_case")]
#[schemars(bound = "S: Spec", rename = "CallMessage")]
pub enum CallMessage<S: Spec> {
    /// Open a session for `wallet`, replacing any previous one wholesale.
    ///
    /// `requested_duration == 0` selects the default duration. The
    /// signature must cover the wallet's current replay nonce; see
    /// [`crate::signature`].
    CreateSession {
        wallet: WalletId,
        requested_duration: u64,
        signature: Vec<u8>,
    },

    /// Record that `wallet` connected to `dapp_id` during its current
    /// session. Idempotent from the caller's perspective; the
    /// `DappConnected` event fires on every successful call.
    ConnectDapp { dapp_id: String, wallet: WalletId },

    /// Push the session expiry further out, capped at
    /// `now + max_session_duration`.
    ExtendSession {
        wallet: WalletId,
        additional_duration: u64,
    },

    /// Explicitly end the session. Connections are kept until the next
    /// creation clears them.
    DisconnectWallet { wallet: WalletId },

    /// Set the default duration applied when a creation requests 0.
    SetSessionDuration { duration: u64 },

    /// Set the duration ceiling. Deliberately unbounded; lowering it below
    /// the current default is allowed and the default is not re-validated.
    SetMaxSessionDuration { duration: u64 },

    /// Hand the duration policy over to a new admin address.
    SetAdmin { new_admin: S::Address },

    /// Assert that the wallet has a currently valid session.
    EnforceSessionValid { wallet: WalletId },

    /// Assert the full pass-through precondition bundle: valid session,
    /// connectable dApp, and the dApp connected in this session.
    EnforceDappAccess { wallet: WalletId, dapp_id: String },
}

/// Route a CallMessage to the corresponding `WalletSessions` logic.
pub fn execute<S: Spec>(
    module: &mut WalletSessions<S>,
    msg: CallMessage<S>,
    context: &Context<S>,
    state: &mut impl TxState<S>,
) -> anyhow::Result<()> {
    match msg {
        CallMessage::CreateSession {
            wallet,
            requested_duration,
            signature,
        } => module.create_session(wallet, requested_duration, &signature, context, state),
        CallMessage::ConnectDapp { dapp_id, wallet } => {
            module.connect_dapp(dapp_id, wallet, state)
        }
        CallMessage::ExtendSession {
            wallet,
            additional_duration,
        } => module.extend_session(wallet, additional_duration, context, state),
        CallMessage::DisconnectWallet { wallet } => {
            module.disconnect_wallet(wallet, context, state)
        }
        CallMessage::SetSessionDuration { duration } => {
            if !module.is_admin(context.sender(), state)? {
                return Err(WalletSessionsError::Unauthorized.into());
            }

            if duration == 0 {
                return Err(WalletSessionsError::InvalidDuration.into());
            }

            // Capped by the ceiling as it stands right now.
            let max = module.current_max_duration(state)?;
            if duration > max {
                return Err(WalletSessionsError::DurationExceedsMax.into());
            }

            module.default_session_duration.set(&duration, state)?;

            module.emit_event(state, Event::SessionDurationSet { duration });

            Ok(())
        }
        CallMessage::SetMaxSessionDuration { duration } => {
            if !module.is_admin(context.sender(), state)? {
                return Err(WalletSessionsError::Unauthorized.into());
            }

            if duration == 0 {
                return Err(WalletSessionsError::InvalidDuration.into());
            }

            module.max_session_duration.set(&duration, state)?;

            module.emit_event(state, Event::MaxSessionDurationSet { duration });

            Ok(())
        }
        CallMessage::SetAdmin { new_admin } => {
            if !module.is_admin(context.sender(), state)? {
                return Err(WalletSessionsError::Unauthorized.into());
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

        // --- Endpoints for direct session checks via transactions ---
        CallMessage::EnforceSessionValid { wallet } => {
            module.enforce_session_valid(&wallet, state)
        }
        CallMessage::EnforceDappAccess { wallet, dapp_id } => {
            module.enforce_dapp_access(&wallet, &dapp_id, state)
        }
    }
}
