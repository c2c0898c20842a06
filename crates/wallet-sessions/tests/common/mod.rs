// Mock dApp backend module used for testing the pass-through gating APIs.
//
// Stands in for any module that forwards operations on a wallet's behalf:
// it must consult `enforce_dapp_access` before acting and propagate the
// wrapped operation's own result unchanged.

mod test_dapp_backend {
    use anyhow::Result;
    use schemars::JsonSchema;
    use sov_modules_api::macros::{serialize, UniversalWallet};
    use sov_modules_api::{
        Context, GenesisState, Module, ModuleId, ModuleInfo, ModuleRestApi, Spec, TxState,
    };

    use sso_wallet_sessions::{WalletId, WalletSessions};

    #[derive(Clone, Debug, PartialEq, Eq)]
    #[serialize(Serde)]
    pub struct BackendConfig {}

    #[derive(Debug, Clone, PartialEq, Eq, JsonSchema, UniversalWallet)]
    #[serialize(Borsh, Serde)]
    #[schemars(rename = "BackendCallMessage")]
    #[serde(rename_all = "snake_case")]
    pub enum BackendCallMessage {
        /// Forward an opaque operation for `wallet`, gated on session
        /// validity and dApp access.
        Execute {
            wallet: WalletId,
            dapp_id: String,
            payload: Vec<u8>,
        },
        /// Check whether the wallet could skip the connect step.
        CheckAutoConnect { wallet: WalletId, dapp_id: String },
        /// Compare the wallet's session snapshot against expectations.
        CheckSessionInfo {
            wallet: WalletId,
            expect_active: bool,
            expected_dapps: Vec<String>,
        },
        /// Assert that the wallet has no session snapshot at all.
        CheckNoSessionInfo { wallet: WalletId },
    }

    #[derive(Clone, ModuleInfo, ModuleRestApi)]
    pub struct TestDappBackend<S: Spec> {
        #[id]
        pub id: ModuleId,

        #[module]
        pub wallet_sessions: WalletSessions<S>,
    }

    impl<S: Spec> Module for TestDappBackend<S> {
        type Spec = S;
        type Config = BackendConfig;
        type CallMessage = BackendCallMessage;
        type Event = ();
        type Error = anyhow::Error;

        fn genesis(
            &mut self,
            _header: &<S::Da as sov_modules_api::DaSpec>::BlockHeader,
            _config: &Self::Config,
            _state: &mut impl GenesisState<S>,
        ) -> Result<()> {
            Ok(())
        }

        fn call(
            &mut self,
            msg: Self::CallMessage,
            _ctx: &Context<S>,
            state: &mut impl TxState<S>,
        ) -> Result<()> {
            match msg {
                BackendCallMessage::Execute {
                    wallet,
                    dapp_id,
                    payload: _payload,
                } => {
                    self.wallet_sessions
                        .enforce_dapp_access(&wallet, &dapp_id, state)?;

                    // The wrapped operation would run here; its result is
                    // passed through untouched. The mock treats it as a
                    // success.
                    Ok(())
                }
                BackendCallMessage::CheckSessionInfo {
                    wallet,
                    expect_active,
                    expected_dapps,
                } => {
                    let info = self
                        .wallet_sessions
                        .get_session_info(&wallet, state)?
                        .ok_or_else(|| anyhow::anyhow!("no session snapshot"))?;

                    if info.session_id == 0 {
                        anyhow::bail!("session ids start at 1");
                    }
                    if info.is_active != expect_active {
                        anyhow::bail!(
                            "snapshot activity mismatch: expected {expect_active}, got {}",
                            info.is_active
                        );
                    }
                    if info.connected_dapps != expected_dapps {
                        anyhow::bail!(
                            "snapshot connections mismatch: expected {expected_dapps:?}, got {:?}",
                            info.connected_dapps
                        );
                    }

                    Ok(())
                }
                BackendCallMessage::CheckNoSessionInfo { wallet } => {
                    if self.wallet_sessions.get_session_info(&wallet, state)?.is_some() {
                        anyhow::bail!("unexpected session snapshot");
                    }
                    Ok(())
                }
                BackendCallMessage::CheckAutoConnect { wallet, dapp_id } => {
                    let allowed = self
                        .wallet_sessions
                        .can_auto_connect(&wallet, &dapp_id, state)?;

                    if allowed {
                        Ok(())
                    } else {
                        Err(anyhow::anyhow!("auto-connect not permitted"))
                    }
                }
            }
        }
    }
}

pub use test_dapp_backend::{BackendCallMessage, BackendConfig, TestDappBackend};
