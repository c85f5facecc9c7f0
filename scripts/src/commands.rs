//! Implementations of the deploy scripts

use alloy::{
    network::ReceiptResponse,
    primitives::{Address, Bytes, B256, U256},
    providers::Provider,
    sol_types::SolCall,
};
use e2e::{constructor, Account, Constructor};
use eyre::{bail, Context};
use marketplace_stylus::proxy::erc1967::utils::IMPLEMENTATION_SLOT;
use tracing::info;

use crate::{
    cli::{DeployFactoryArgs, DeployMarketplaceArgs, UpgradeMarketplaceArgs},
    constants::{FACTORY_PROGRAM, MARKETPLACE_PROGRAM, PROXY_PROGRAM},
    solidity::{Marketplace, UUPSUpgradeable},
};

/// Addresses of an implementation deployed behind a fresh proxy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProxyDeployment {
    /// The ERC-1967 proxy, holding the state.
    pub proxy: Address,
    /// The implementation the proxy delegates to.
    pub implementation: Address,
}

/// Deploys the Marketplace behind a proxy, initialized with the fee address.
pub async fn deploy_marketplace(
    args: DeployMarketplaceArgs,
    account: &Account,
) -> eyre::Result<()> {
    let calldata = marketplace_initialize_calldata(args.fee_address);
    let deployment =
        deploy_proxy(account, MARKETPLACE_PROGRAM, calldata).await?;

    info!("Marketplace deployed to: {}", deployment.proxy);
    Ok(())
}

/// Deploys the Factory with its three addresses.
pub async fn deploy_factory(
    args: DeployFactoryArgs,
    account: &Account,
) -> eyre::Result<()> {
    let address = deploy(
        account,
        FACTORY_PROGRAM,
        constructor!(
            args.deployer_address,
            args.sv_launch_address,
            args.fee_address
        ),
    )
    .await?;

    info!("Factory deployed to: {address}");
    Ok(())
}

/// Upgrades the Marketplace proxy to a fresh deployment of `args.program`,
/// the Marketplace itself unless overridden.
pub async fn upgrade_marketplace(
    args: UpgradeMarketplaceArgs,
    account: &Account,
) -> eyre::Result<()> {
    info!("Preparing upgrade...");
    let implementation =
        upgrade_proxy(account, args.proxy_address, &args.program).await?;

    let version = Marketplace::new(args.proxy_address, &account.wallet)
        .VERSION()
        .call()
        .await
        .wrap_err("failed to read the upgraded version")?;
    info!(
        implementation = %implementation,
        version = %version,
        "V2 at: {}",
        args.proxy_address
    );
    Ok(())
}

/// Calldata running `initialize(fee_address)` on the Marketplace.
#[must_use]
pub fn marketplace_initialize_calldata(fee_address: Address) -> Bytes {
    Marketplace::initializeCall { fee_address }.abi_encode().into()
}

/// Deploys `program` and an ERC-1967 proxy pointing at it, running
/// `initializer` against the proxy's storage.
///
/// `program` must have a constructor without arguments.
///
/// # Errors
///
/// Fails if either deployment fails or if the proxy does not point at the
/// new implementation afterwards.
pub async fn deploy_proxy(
    account: &Account,
    program: &str,
    initializer: Bytes,
) -> eyre::Result<ProxyDeployment> {
    let implementation = deploy(account, program, constructor!()).await?;

    let initializer = stylus_sdk::abi::Bytes::from(initializer.to_vec());
    let proxy = deploy(
        account,
        PROXY_PROGRAM,
        constructor!(implementation, initializer.clone()),
    )
    .await?;

    let stored = read_implementation(account, proxy).await?;
    if stored != implementation {
        bail!(
            "proxy {proxy} points at {stored} instead of {implementation}"
        );
    }

    Ok(ProxyDeployment { proxy, implementation })
}

/// Deploys `program` and upgrades the UUPS `proxy` to it, keeping the
/// proxy's state. Returns the new implementation's address.
///
/// `program` must have a constructor without arguments.
///
/// # Errors
///
/// Fails if the deployment fails, if the new implementation is not UUPS
/// proxiable, or if the upgrade transaction reverts.
pub async fn upgrade_proxy(
    account: &Account,
    proxy: Address,
    program: &str,
) -> eyre::Result<Address> {
    let implementation = deploy(account, program, constructor!()).await?;
    upgrade_proxy_to(account, proxy, implementation).await?;
    Ok(implementation)
}

/// Points the UUPS `proxy` at the already deployed `implementation`.
///
/// # Errors
///
/// Fails if `implementation` is not UUPS proxiable, if the upgrade
/// transaction reverts, or if the proxy does not point at `implementation`
/// afterwards.
pub async fn upgrade_proxy_to(
    account: &Account,
    proxy: Address,
    implementation: Address,
) -> eyre::Result<()> {
    let slot = UUPSUpgradeable::new(implementation, &account.wallet)
        .proxiableUUID()
        .call()
        .await
        .wrap_err(format!("{implementation} is not UUPS proxiable"))?;
    if slot != IMPLEMENTATION_SLOT {
        bail!("{implementation} reports unsupported proxiable UUID {slot}");
    }

    let receipt = UUPSUpgradeable::new(proxy, &account.wallet)
        .upgradeToAndCall(implementation, Bytes::new())
        .send()
        .await
        .wrap_err(format!("failed to upgrade {proxy}"))?
        .get_receipt()
        .await?;
    if !receipt.status() {
        bail!("upgrade of {proxy} reverted in {}", receipt.transaction_hash);
    }
    info!(
        proxy = %proxy,
        implementation = %implementation,
        tx_hash = %receipt.transaction_hash,
        "proxy upgraded"
    );

    let stored = read_implementation(account, proxy).await?;
    if stored != implementation {
        bail!("proxy {proxy} still points at {stored}");
    }

    Ok(())
}

/// Deploys `program` with `ctr`, without any proxy.
///
/// # Errors
///
/// Fails if the deployment fails.
pub async fn deploy(
    account: &Account,
    program: &str,
    ctr: Constructor,
) -> eyre::Result<Address> {
    let receipt = account
        .as_deployer()
        .with_program_name(program)
        .with_constructor(ctr)
        .deploy()
        .await
        .wrap_err(format!("failed to deploy {program}"))?;

    info!(
        program,
        address = %receipt.contract_address,
        tx_hash = %receipt.inner.transaction_hash,
        "program deployed"
    );
    Ok(receipt.contract_address)
}

/// Reads the implementation stored in `proxy`'s ERC-1967 slot.
///
/// # Errors
///
/// Fails if the storage read fails.
pub async fn read_implementation(
    account: &Account,
    proxy: Address,
) -> eyre::Result<Address> {
    let word = account
        .wallet
        .get_storage_at(proxy, U256::from_be_bytes(IMPLEMENTATION_SLOT.0))
        .await
        .wrap_err(format!("failed to read the implementation of {proxy}"))?;
    Ok(Address::from_word(B256::from(word.to_be_bytes::<32>())))
}
