use schemars::JsonSchema;
use sov_modules_api::macros::serialize;
use sov_modules_api::Spec;

use crate::WalletId;

#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serialize(Borsh, Serde)]
#[serde(bound = "S: Spec", rename_all = "snake_case")]
#[schemars(bound = "S: Spec", rename = "Event")]
pub enum Event<S: Spec> {
    SessionCreated {
        wallet: WalletId,
        session_id: u64,
        expiry_ts: i64,
    },

    /// Emitted on every successful connect call, including repeat
    /// connections to an already-connected dApp. Consumers must not read
    /// this as "a new connection was recorded".
    DappConnected {
        wallet: WalletId,
        dapp_id: String,
    },

    SessionExtended {
        wallet: WalletId,
        new_expiry_ts: i64,
    },

    WalletDisconnected {
        wallet: WalletId,
    },

    SessionDurationSet {
        duration: u64,
    },

    MaxSessionDurationSet {
        duration: u64,
    },

    AdminSet {
        old_admin: Option<S::Address>,
        new_admin: S::Address,
    },
}
