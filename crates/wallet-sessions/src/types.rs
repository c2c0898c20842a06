//! Types used by the `WalletSessions` module.

use schemars::JsonSchema;
use sov_modules_api::macros::serialize;
use sov_modules_api::macros::UniversalWallet;
use sov_modules_api::Spec;

use crate::WalletSessionsError;

#[derive(Clone, Debug, PartialEq, Eq)]
#[serialize(Serde)]
#[serde(rename_all = "snake_case")]
pub struct SessionConfig<S: Spec> {
    /// Address allowed to tune the duration policy.
    pub admin: S::Address,

    /// Domain-separation tag mixed into every session-proof digest.
    /// Distinct networks must use distinct tags so a proof signed for one
    /// network cannot be replayed on another.
    pub chain_tag: u64,

    /// Session length in seconds applied when a creation request asks
    /// for a duration of 0.
    pub default_session_duration: u64,

    /// Upper bound in seconds for requested durations and extensions.
    pub max_session_duration: u64,
}

/// Wallet identity: 20 bytes derived from a secp256k1 public key.
///
/// See [`crate::signature::wallet_id_of`] for the derivation. This is the
/// key of every session table; it is independent of the chain account that
/// submits transactions on the wallet's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema, UniversalWallet)]
#[serialize(Borsh, Serde)]
pub struct WalletId(pub [u8; 20]);

/// Per-wallet session state, replaced wholesale on every successful
/// session creation.
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serialize(Borsh, Serde)]
#[serde(bound = "S: Spec", rename_all = "snake_case")]
#[schemars(bound = "S: Spec", rename = "SessionRecord")]
pub struct SessionRecord<S: Spec> {
    /// Globally unique, monotonically increasing per creation event.
    pub session_id: u64,

    /// Absolute chain time (seconds) after which the session is invalid.
    pub expiry_ts: i64,

    /// Storage bit flipped only by creation (true) and explicit disconnect
    /// (false). Independent of expiry: validity checks always recompute
    /// expiry instead of trusting this flag.
    pub is_active: bool,

    /// dApp ids connected during this session instance, in connection
    /// order and duplicate-free. Doubles as the membership set; keeping a
    /// single duplicate-free sequence keeps set and sequence identical on
    /// every mutation.
    pub connected_dapps: Vec<String>,

    /// The chain account that created the session. Extension and
    /// disconnect are restricted to this account.
    pub account: S::Address,
}

impl<S: Spec> SessionRecord<S> {
    /// A session is currently valid iff it is active and not yet expired.
    pub fn is_valid_at(&self, now_ts: i64) -> bool {
        self.is_active && self.expiry_ts > now_ts
    }

    /// Membership test over the connection sequence.
    pub fn is_connected(&self, dapp_id: &str) -> bool {
        self.connected_dapps.iter().any(|d| d == dapp_id)
    }

    /// Record a connection. Returns `true` if the dApp was newly added,
    /// `false` if it was already present (the sequence is unchanged).
    pub fn connect(&mut self, dapp_id: &str) -> bool {
        if self.is_connected(dapp_id) {
            return false;
        }
        self.connected_dapps.push(dapp_id.to_string());
        true
    }
}

/// Read-only session snapshot for external queriers.
///
/// Unlike the stored record, `is_active` here is already AND-ed with
/// non-expiry: a merely-expired session reports inactive even while its
/// storage bit still reads true.
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serialize(Borsh, Serde)]
#[serde(rename_all = "snake_case")]
pub struct SessionInfo {
    pub session_id: u64,
    pub expiry_ts: i64,
    pub is_active: bool,
    pub connected_dapps: Vec<String>,
}

/// Convert a duration in seconds to the signed timestamp domain.
///
/// Durations are unbounded u64 (the maximum is an unchecked admin knob),
/// so values above `i64::MAX` clamp instead of wrapping negative.
pub fn duration_secs(duration: u64) -> i64 {
    i64::try_from(duration).unwrap_or(i64::MAX)
}

/// Compute the expiry produced by extending a valid session.
///
/// The cap is recomputed from `now_ts`: the result may not exceed
/// `now_ts + max_duration`, landing exactly on the cap is allowed.
pub fn extended_expiry(
    current_expiry_ts: i64,
    additional_duration: u64,
    now_ts: i64,
    max_duration: u64,
) -> Result<i64, WalletSessionsError> {
    if additional_duration == 0 {
        return Err(WalletSessionsError::InvalidDuration);
    }

    let new_expiry = current_expiry_ts.saturating_add(duration_secs(additional_duration));
    let cap = now_ts.saturating_add(duration_secs(max_duration));

    if new_expiry > cap {
        return Err(WalletSessionsError::DurationExceedsMax);
    }

    Ok(new_expiry)
}
