//! Wallet session module.
//!
//! This module defines the `WalletSessions` Sovereign SDK module: the
//! single-sign-on core that lets a wallet prove control of its key once and
//! then auto-connect to any registered dApp for the lifetime of the
//! session. It exposes:
//! - Session creation gated by a recoverable ECDSA proof with replay
//!   nonces and a network domain tag,
//! - Session expiry, extension and explicit disconnect,
//! - Per-session dApp connection tracking,
//! - Admin-tuned duration policy,
//! - Helper methods for other modules to gate "act on the wallet's
//!   behalf" operations on session validity and dApp access.
//!
//! All mutating operations run inside the sequential transaction model, so
//! the wholesale-replace-on-create and append-if-absent-on-connect
//! guarantees need no extra locking; no handler performs an external call
//! mid-mutation.

mod call;
mod error;
mod event;
pub mod signature;
mod types;

pub use call::CallMessage;
pub use error::WalletSessionsError;
pub use event::Event;
pub use types::{
    duration_secs, extended_expiry, SessionConfig, SessionInfo, SessionRecord, WalletId,
};

use sov_modules_api::da::Time;
use sov_modules_api::{
    Context, EventEmitter, GenesisState, Module, ModuleId, ModuleInfo, ModuleRestApi, Spec,
    StateMap, StateValue, TxState,
};
use sso_dapp_registry::DappRegistry;

/// Wallet session module definition.
///
/// On-chain state:
/// - `admin`: address allowed to tune the duration policy,
/// - `chain_tag`: domain-separation tag for session proofs,
/// - `default_session_duration` / `max_session_duration`: duration policy,
/// - `session_counter`: global monotonically increasing session id source,
/// - `sessions`: per-wallet session records,
/// - `nonces`: per-wallet replay counters.
#[derive(Clone, ModuleInfo, ModuleRestApi)]
pub struct WalletSessions<S: Spec> {
    /// Unique identifier of this module in the runtime.
    #[id]
    pub id: ModuleId,

    /// Reference to the chain-state module (for time).
    #[module]
    pub chain_state: sov_chain_state::ChainState<S>,

    /// Reference to the dApp registry consulted on every connect.
    #[module]
    pub dapp_registry: DappRegistry<S>,

    /// Address allowed to change durations and hand over adminship.
    #[state]
    pub admin: StateValue<S::Address>,

    /// Domain-separation tag bound into every session proof.
    #[state]
    pub chain_tag: StateValue<u64>,

    /// Session length in seconds when a creation requests duration 0.
    #[state]
    pub default_session_duration: StateValue<u64>,

    /// Ceiling in seconds for requested durations and extension results.
    #[state]
    pub max_session_duration: StateValue<u64>,

    /// Last allocated session id, shared across all wallets.
    #[state]
    pub session_counter: StateValue<u64>,

    /// Mapping from wallet identity to its current session.
    #[state]
    pub sessions: StateMap<WalletId, SessionRecord<S>>,

    /// Mapping from wallet identity to its replay counter. Absent reads
    /// as 0; incremented by exactly 1 on each successful creation.
    #[state]
    pub nonces: StateMap<WalletId, u64>,
}

impl<S: Spec> Module for WalletSessions<S> {
    type Spec = S;

    type Config = SessionConfig<S>;

    type CallMessage = CallMessage<S>;

    type Event = Event<S>;

    type Error = anyhow::Error;

    fn genesis(
        &mut self,
        _header: &<S::Da as sov_modules_api::DaSpec>::BlockHeader,
        config: &Self::Config,
        state: &mut impl GenesisState<S>,
    ) -> anyhow::Result<()> {
        if config.default_session_duration == 0 || config.max_session_duration == 0 {
            anyhow::bail!("session durations must be non-zero at genesis");
        }
        if config.default_session_duration > config.max_session_duration {
            anyhow::bail!("default session duration must not exceed the maximum");
        }

        self.admin.set(&config.admin, state)?;
        self.chain_tag.set(&config.chain_tag, state)?;
        self.default_session_duration
            .set(&config.default_session_duration, state)?;
        self.max_session_duration
            .set(&config.max_session_duration, state)?;
        self.session_counter.set(&0, state)?;
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

impl<S: Spec> WalletSessions<S> {
    /// --- Session lifecycle ---

    /// Open a fresh session for `wallet`.
    ///
    /// Order matters: the duration bound is checked first, the signature is
    /// verified against the wallet's *current* nonce, and only then are the
    /// nonce, the session counter and the record written. Any failure
    /// leaves all three untouched.
    pub fn create_session(
        &mut self,
        wallet: WalletId,
        requested_duration: u64,
        signature: &[u8],
        context: &Context<S>,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<()> {
        let max = self.current_max_duration(state)?;
        if requested_duration > max {
            return Err(WalletSessionsError::DurationExceedsMax.into());
        }

        let effective_duration = if requested_duration == 0 {
            self.default_session_duration
                .get(state)?
                .ok_or(WalletSessionsError::ConfigNotInitialized)?
        } else {
            requested_duration
        };

        let now_ts = self.current_time(state)?;
        let expiry_ts = now_ts.saturating_add(types::duration_secs(effective_duration));

        let chain_tag = self
            .chain_tag
            .get(state)?
            .ok_or(WalletSessionsError::ConfigNotInitialized)?;
        let nonce = self.nonces.get(&wallet, state)?.unwrap_or(0);

        signature::verify_session_signature(
            &wallet,
            nonce,
            requested_duration,
            chain_tag,
            signature,
        )?;

        // The proof bound this exact nonce value; consume it.
        self.nonces.set(&wallet, &(nonce + 1), state)?;

        let session_id = self.session_counter.get(state)?.unwrap_or(0) + 1;
        self.session_counter.set(&session_id, state)?;

        let record = SessionRecord {
            session_id,
            expiry_ts,
            is_active: true,
            connected_dapps: Vec::new(),
            account: context.sender().clone(),
        };
        self.sessions.set(&wallet, &record, state)?;

        self.emit_event(
            state,
            Event::SessionCreated {
                wallet,
                session_id,
                expiry_ts,
            },
        );

        Ok(())
    }

    /// Record that `wallet` connected to `dapp_id`.
    ///
    /// Requires a currently valid session and a verified, active dApp.
    /// Connecting to an already-connected dApp succeeds without touching
    /// the sequence; the event still fires.
    pub fn connect_dapp(
        &mut self,
        dapp_id: String,
        wallet: WalletId,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<()> {
        let now_ts = self.current_time(state)?;

        let mut record = self
            .sessions
            .get(&wallet, state)?
            .ok_or(WalletSessionsError::SessionInvalid)?;

        if !record.is_valid_at(now_ts) {
            return Err(WalletSessionsError::SessionInvalid.into());
        }

        self.dapp_registry.connectable(&dapp_id, state)?;

        if record.connect(&dapp_id) {
            self.sessions.set(&wallet, &record, state)?;
        }

        self.emit_event(state, Event::DappConnected { wallet, dapp_id });

        Ok(())
    }

    /// Push the session expiry further out.
    ///
    /// Only the account that created the session may extend it, and only
    /// while it is currently valid. The resulting expiry is capped at
    /// `now + max_session_duration`, recomputed from the time of this call.
    pub fn extend_session(
        &mut self,
        wallet: WalletId,
        additional_duration: u64,
        context: &Context<S>,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<()> {
        let mut record = self
            .sessions
            .get(&wallet, state)?
            .ok_or(WalletSessionsError::SessionInvalid)?;

        if context.sender() != &record.account {
            return Err(WalletSessionsError::Unauthorized.into());
        }

        let now_ts = self.current_time(state)?;
        if !record.is_valid_at(now_ts) {
            return Err(WalletSessionsError::SessionInvalid.into());
        }

        let max = self.current_max_duration(state)?;
        let new_expiry_ts = extended_expiry(record.expiry_ts, additional_duration, now_ts, max)?;

        record.expiry_ts = new_expiry_ts;
        self.sessions.set(&wallet, &record, state)?;

        self.emit_event(
            state,
            Event::SessionExtended {
                wallet,
                new_expiry_ts,
            },
        );

        Ok(())
    }

    /// Explicitly end the session.
    ///
    /// Expiry is not consulted: a session whose storage bit still reads
    /// active can be disconnected after it expired. Connections stay in
    /// place until the next creation clears them.
    pub fn disconnect_wallet(
        &mut self,
        wallet: WalletId,
        context: &Context<S>,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<()> {
        let mut record = self
            .sessions
            .get(&wallet, state)?
            .ok_or(WalletSessionsError::SessionInvalid)?;

        if context.sender() != &record.account {
            return Err(WalletSessionsError::Unauthorized.into());
        }

        if !record.is_active {
            return Err(WalletSessionsError::SessionInvalid.into());
        }

        record.is_active = false;
        self.sessions.set(&wallet, &record, state)?;

        self.emit_event(state, Event::WalletDisconnected { wallet });

        Ok(())
    }

    /// --- APIs for dApp-facing modules ---

    /// Returns `true` if the wallet's session is currently valid and the
    /// dApp is verified and active. Never errors; every unmet condition,
    /// including an unknown wallet or dApp id, degrades to `false`.
    pub fn can_auto_connect(
        &self,
        wallet: &WalletId,
        dapp_id: &str,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<bool> {
        let Some(record) = self.sessions.get(wallet, state)? else {
            return Ok(false);
        };

        let now_ts = self.current_time(state)?;
        if !record.is_valid_at(now_ts) {
            return Ok(false);
        }

        self.dapp_registry.is_connectable(dapp_id, state)
    }

    /// Read-only snapshot of the wallet's session, with `is_active`
    /// already AND-ed with non-expiry.
    pub fn get_session_info(
        &self,
        wallet: &WalletId,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<Option<SessionInfo>> {
        let Some(record) = self.sessions.get(wallet, state)? else {
            return Ok(None);
        };

        let now_ts = self.current_time(state)?;

        Ok(Some(SessionInfo {
            session_id: record.session_id,
            expiry_ts: record.expiry_ts,
            is_active: record.is_valid_at(now_ts),
            connected_dapps: record.connected_dapps,
        }))
    }

    /// Require a currently valid session for the wallet.
    pub fn enforce_session_valid(
        &self,
        wallet: &WalletId,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<()> {
        let now_ts = self.current_time(state)?;

        let valid = self
            .sessions
            .get(wallet, state)?
            .is_some_and(|record| record.is_valid_at(now_ts));

        if valid {
            Ok(())
        } else {
            Err(WalletSessionsError::SessionInvalid.into())
        }
    }

    /// Require everything a pass-through execution needs: a currently
    /// valid session, a verified and active dApp, and the dApp recorded in
    /// the session's connections.
    ///
    /// Modules forwarding operations on a wallet's behalf must call this
    /// before acting and propagate the wrapped operation's own result
    /// unchanged.
    pub fn enforce_dapp_access(
        &self,
        wallet: &WalletId,
        dapp_id: &str,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<()> {
        let now_ts = self.current_time(state)?;

        let record = self
            .sessions
            .get(wallet, state)?
            .ok_or(WalletSessionsError::SessionInvalid)?;

        if !record.is_valid_at(now_ts) {
            return Err(WalletSessionsError::SessionInvalid.into());
        }

        self.dapp_registry.connectable(dapp_id, state)?;

        if !record.is_connected(dapp_id) {
            return Err(WalletSessionsError::DappNotConnected.into());
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
            .ok_or(WalletSessionsError::AdminNotInitialized)?;

        Ok(sender == &admin)
    }

    pub(crate) fn current_max_duration(
        &self,
        state: &mut impl TxState<S>,
    ) -> anyhow::Result<u64> {
        Ok(self
            .max_session_duration
            .get(state)?
            .ok_or(WalletSessionsError::ConfigNotInitialized)?)
    }

    fn current_time(&self, state: &mut impl TxState<S>) -> anyhow::Result<i64> {
        let now: Time = self.chain_state.get_time(state)?;
        Ok(now.secs())
    }
}
