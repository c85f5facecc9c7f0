use alloy::{
    network::{Ethereum, EthereumWallet},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use eyre::Context;

/// Environment variable holding the node's rpc endpoint.
pub const RPC_URL_ENV_VAR_NAME: &str = "RPC_URL";

/// Environment variable holding the address of the `StylusDeployer`
/// contract used to deploy programs with a constructor.
pub const DEPLOYER_ADDRESS: &str = "DEPLOYER_ADDRESS";

/// Convenience type alias that represents an Ethereum wallet.
pub type Wallet = DynProvider<Ethereum>;

/// Load the `name` environment variable.
pub(crate) fn env(name: &str) -> eyre::Result<String> {
    std::env::var(name).wrap_err(format!("failed to load {name}"))
}

/// Builds a provider that signs every transaction with `signer`.
///
/// # Errors
///
/// May fail if `rpc_url` is not a valid URL.
pub fn provider(rpc_url: &str, signer: PrivateKeySigner) -> eyre::Result<Wallet> {
    let url: Url = rpc_url
        .parse()
        .wrap_err(format!("failed to parse rpc url {rpc_url}"))?;

    Ok(ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(url)
        .erased())
}
