//! Types used by the `DappRegistry` module.

use schemars::JsonSchema;
use sov_modules_api::macros::serialize;
use sov_modules_api::Spec;

#[derive(Clone, Debug, PartialEq, Eq)]
#[serialize(Serde)]
#[serde(rename_all = "snake_case")]
pub struct RegistryConfig<S: Spec> {
    /// Address allowed to register and (de)activate dApps.
    pub admin: S::Address,
}

/// Metadata for a registered application.
///
/// Entries are never physically deleted. "Deletion" is modeled by clearing
/// `is_active`; a deactivated id keeps its slot and may be re-registered.
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serialize(Borsh, Serde)]
#[serde(bound = "S: Spec", rename_all = "snake_case")]
#[schemars(bound = "S: Spec", rename = "DappInfo")]
pub struct DappInfo<S: Spec> {
    /// Display name; not used for access decisions.
    pub name: String,

    /// Origin domain; not used for access decisions.
    pub domain: String,

    /// Address administratively associated with the application.
    pub owner: S::Address,

    /// Set at registration time. Registration currently implies
    /// verification; there is no separate trust-escalation step.
    pub is_verified: bool,

    /// Toggled by the admin without re-registration.
    pub is_active: bool,
}
