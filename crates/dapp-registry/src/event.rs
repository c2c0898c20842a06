use schemars::JsonSchema;
use sov_modules_api::macros::serialize;
use sov_modules_api::Spec;

#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serialize(Borsh, Serde)]
#[serde(bound = "S: Spec", rename_all = "snake_case")]
#[schemars(bound = "S: Spec", rename = "Event")]
pub enum Event<S: Spec> {
    DappRegistered {
        dapp_id: String,
        name: String,
        domain: String,
        owner: S::Address,
    },

    DappDeactivated {
        dapp_id: String,
    },

    DappReactivated {
        dapp_id: String,
    },

    AdminSet {
        old_admin: Option<S::Address>,
        new_admin: S::Address,
    },
}
