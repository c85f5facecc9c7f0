use std::str::FromStr;

use alloy::{
    network::TransactionBuilder,
    primitives::{uint, Address, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use eyre::Context;
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    deploy::Deployer,
    system::{env, provider, Wallet, RPC_URL_ENV_VAR_NAME},
};

const MASTER_PRIVATE_KEY: &str =
    "0xb6b15c8cb491557369f3c7d2c287b053eb229daa9c22138887752191c9520659";
const DEFAULT_FUNDING_ETH: U256 = uint!(100_000_000_000_000_000_U256);

/// Type that corresponds to a test account.
#[derive(Clone)]
pub struct Account {
    /// The account's local private key wrapper.
    pub signer: PrivateKeySigner,
    /// The account's wallet -- an `alloy` provider with a `WalletFiller`.
    pub wallet: Wallet,
    url: String,
}

impl Account {
    /// Create a new account with a default funding of [`DEFAULT_FUNDING_ETH`].
    ///
    /// # Errors
    ///
    /// May fail if funding the newly created account fails.
    pub async fn new() -> eyre::Result<Self> {
        AccountFactory::create().await
    }

    /// Wraps an existing, already funded key. Used by the deploy scripts.
    ///
    /// # Errors
    ///
    /// May fail if `private_key` or `rpc_url` cannot be parsed.
    pub fn from_private_key(
        rpc_url: &str,
        private_key: &str,
    ) -> eyre::Result<Self> {
        let signer = PrivateKeySigner::from_str(private_key)
            .wrap_err("failed to parse private key")?;
        let wallet = provider(rpc_url, signer.clone())?;
        Ok(Self { signer, wallet, url: rpc_url.to_owned() })
    }

    /// Get a hex-encoded String representing this account's private key.
    #[must_use]
    pub fn pk(&self) -> String {
        alloy::hex::encode(self.signer.to_bytes())
    }

    /// Retrieve this account's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The rpc endpoint this account's provider is connected to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Create a configurable program deployer on behalf of this account.
    #[must_use]
    pub fn as_deployer(&self) -> Deployer {
        Deployer::new(self.url.clone(), self.pk())
    }

    /// Get gas token balance.
    ///
    /// # Errors
    ///
    /// May fail if the node cannot be reached.
    pub async fn balance(&self) -> eyre::Result<U256> {
        Ok(self.wallet.get_balance(self.address()).await?)
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address())
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// A unit struct used as a synchronization mechanism in
/// [`SYNC_ACCOUNT_FACTORY`].
struct AccountFactory;

impl AccountFactory {
    /// Get access to the factory in a synchronized manner.
    async fn lock() -> MutexGuard<'static, Self> {
        /// Since after wallet generation accounts get funded in the nitro dev
        /// node from a single "god" wallet, we must synchronize account
        /// creation (otherwise the nonce will be too low).
        static SYNC_ACCOUNT_FACTORY: Lazy<Mutex<AccountFactory>> =
            Lazy::new(|| Mutex::new(AccountFactory));

        SYNC_ACCOUNT_FACTORY.lock().await
    }

    /// Create new account and fund it from the master account.
    ///
    /// # Errors
    ///
    /// May fail if `RPC_URL` is unset or if funding the newly created account
    /// fails.
    async fn create() -> eyre::Result<Account> {
        let _lock = AccountFactory::lock().await;

        let rpc_url = env(RPC_URL_ENV_VAR_NAME)?;
        let signer = PrivateKeySigner::random();

        let master = PrivateKeySigner::from_str(MASTER_PRIVATE_KEY)
            .wrap_err("failed to create master signer")?;
        let master_wallet = provider(&rpc_url, master.clone())?;

        let tx = TransactionRequest::default()
            .with_from(master.address())
            .with_to(signer.address())
            .with_value(DEFAULT_FUNDING_ETH);

        master_wallet
            .send_transaction(tx)
            .await?
            .watch()
            .await
            .wrap_err("account's wallet wasn't funded")?;

        let wallet = provider(&rpc_url, signer.clone())?;
        Ok(Account { signer, wallet, url: rpc_url })
    }
}
