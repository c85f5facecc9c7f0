//! Definitions of CLI arguments and commands for deploy scripts

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};
use e2e::Account;

use crate::{
    commands::{deploy_factory, deploy_marketplace, upgrade_marketplace},
    constants::{
        DEFAULT_FEE_ADDRESS, DEFAULT_PROXY_ADDRESS, DEFAULT_RPC_URL,
        MARKETPLACE_PROGRAM,
    },
};

/// Deploys and upgrades the Marketplace and Factory programs.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Script to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available scripts.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Deploy the Marketplace behind an ERC-1967 proxy
    DeployMarketplace(DeployMarketplaceArgs),
    /// Deploy the Factory
    DeployFactory(DeployFactoryArgs),
    /// Upgrade a deployed Marketplace proxy
    UpgradeMarketplace(UpgradeMarketplaceArgs),
}

impl Command {
    /// Runs the command on behalf of `account`.
    ///
    /// # Errors
    ///
    /// Returns the first failed deployment or transaction.
    pub async fn run(self, account: &Account) -> eyre::Result<()> {
        match self {
            Command::DeployMarketplace(args) => {
                deploy_marketplace(args, account).await
            }
            Command::DeployFactory(args) => deploy_factory(args, account).await,
            Command::UpgradeMarketplace(args) => {
                upgrade_marketplace(args, account).await
            }
        }
    }
}

/// Deploy the Marketplace behind an ERC-1967 proxy and initialize it.
#[derive(Debug, Args)]
pub struct DeployMarketplaceArgs {
    /// Address receiving the DAO fees
    #[arg(long, env = "FEE_ADDRESS", default_value_t = DEFAULT_FEE_ADDRESS)]
    pub fee_address: Address,
}

/// Deploy the Factory.
#[derive(Debug, Args)]
pub struct DeployFactoryArgs {
    /// Deployer address stored by the Factory
    #[arg(
        long,
        env = "FACTORY_DEPLOYER_ADDRESS",
        default_value_t = DEFAULT_FEE_ADDRESS
    )]
    pub deployer_address: Address,

    /// SV launch address stored by the Factory
    #[arg(
        long,
        env = "SV_LAUNCH_ADDRESS",
        default_value_t = DEFAULT_FEE_ADDRESS
    )]
    pub sv_launch_address: Address,

    /// Fee address stored by the Factory
    #[arg(long, env = "FEE_ADDRESS", default_value_t = DEFAULT_FEE_ADDRESS)]
    pub fee_address: Address,
}

/// Upgrade a deployed Marketplace proxy to a new implementation.
#[derive(Debug, Args)]
pub struct UpgradeMarketplaceArgs {
    /// Address of the Marketplace proxy
    #[arg(
        long,
        env = "PROXY_ADDRESS",
        default_value_t = DEFAULT_PROXY_ADDRESS
    )]
    pub proxy_address: Address,

    /// Package name of the new implementation
    #[arg(long, default_value = MARKETPLACE_PROGRAM)]
    pub program: String,
}
