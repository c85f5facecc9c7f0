use std::{process::Command, str::FromStr};

use alloy::{
    hex,
    primitives::{Address, TxHash},
    providers::Provider,
    signers::local::PrivateKeySigner,
    sol,
    sol_types::SolError,
};
use eyre::{Context, ContextCompat};
use regex::Regex;

use crate::{
    project::Program,
    system::{env, provider, DEPLOYER_ADDRESS},
    Constructor, Receipt,
};

sol! {
    /// Raised by the `StylusDeployer` when the constructor of the program it
    /// just deployed reverts.
    #[derive(Debug)]
    error ContractInitializationError(address newContract, bytes data);

    /// Raised when activating a program whose code is already active.
    #[derive(Debug)]
    error ProgramUpToDate();
}

/// StylusDeployer error.
#[derive(Debug)]
pub struct StylusDeployerError {
    /// Deployed contract address.
    pub contract_address: Address,
    /// Hex encoded revert data of the failed constructor.
    pub revert_data: String,
}

impl StylusDeployerError {
    /// Convert [`eyre::Report`] into [`StylusDeployerError`].
    #[must_use]
    pub fn from_report(report: &eyre::Report) -> Option<&Self> {
        report.downcast_ref::<StylusDeployerError>()
    }
}

impl std::fmt::Display for StylusDeployerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.revert_data)
    }
}

impl std::error::Error for StylusDeployerError {}

/// A basic program deployer, driving `cargo stylus deploy`.
pub struct Deployer {
    rpc_url: String,
    private_key: String,
    program_name: Option<String>,
    ctr: Option<Constructor>,
}

impl Deployer {
    /// Deployer signing with `private_key` against `rpc_url`.
    #[must_use]
    pub fn new(rpc_url: String, private_key: String) -> Self {
        Self { rpc_url, private_key, program_name: None, ctr: None }
    }

    /// Add solidity constructor to the deployer.
    #[must_use]
    pub fn with_constructor(mut self, ctr: Constructor) -> Deployer {
        self.ctr = Some(ctr);
        self
    }

    /// Deploy the program package called `name` instead of the crate whose
    /// tests are running.
    #[must_use]
    pub fn with_program_name(mut self, name: &str) -> Deployer {
        self.program_name = Some(name.to_owned());
        self
    }

    /// Deploy and activate the contract implemented as `#[entrypoint]` in the
    /// selected crate.
    /// Consumes currently configured deployer.
    ///
    /// # Errors
    ///
    /// May error if:
    ///
    /// - Unable to locate the program crate.
    /// - `cargo stylus deploy` fails, including when the constructor reverts,
    ///   in which case the error is a [`StylusDeployerError`].
    /// - The deployment receipt cannot be fetched.
    pub async fn deploy(self) -> eyre::Result<Receipt> {
        let program = match &self.program_name {
            Some(name) => Program::by_name(name)?,
            None => Program::current()?,
        };
        tracing::debug!(program = %program.name, "deploying program");

        let mut command = Command::new("cargo");
        command
            .current_dir(&program.manifest_dir)
            .args(["stylus", "deploy"])
            .args(["-e", &self.rpc_url])
            .args(["--private-key", &self.private_key])
            .args(["--no-verify"]);

        if let Some(ctr) = &self.ctr {
            let deployer_address = env(DEPLOYER_ADDRESS)?;

            command
                .args(["--deployer-address", &deployer_address])
                .args(["--constructor-signature", &ctr.signature]);
            if !ctr.args.is_empty() {
                command.arg("--constructor-args").args(&ctr.args);
            }
        }

        let output = command
            .output()
            .context("failed to execute `cargo stylus deploy` command")?;

        if output.status.success() {
            self.get_receipt(&output).await
        } else {
            self.parse_deployment_error(&output).await
        }
    }

    /// Maps a failed `cargo stylus deploy` run to an error.
    ///
    /// The nitro dev node reports `ProgramUpToDate()` when the same wasm was
    /// activated before. The deployment itself still succeeded and is
    /// reported on stdout.
    async fn parse_deployment_error(
        &self,
        output: &std::process::Output,
    ) -> eyre::Result<Receipt> {
        let stderr = String::from_utf8_lossy(&output.stderr);

        let revert_data_regex =
            Regex::new(r#"data: Some\(String\("0x([a-fA-F0-9]+)"\)\)"#)
                .context("failed to create revert data regex")?;

        let Some(hex_str) = revert_data_regex
            .captures(&stderr)
            .and_then(|captures| captures.get(1))
            .map(|hex_data| hex_data.as_str())
        else {
            eyre::bail!("deployment failed: {stderr}");
        };

        let data = hex::decode(hex_str)
            .context(format!("failed to decode hex: {hex_str}"))?;

        if let Ok(err) = ContractInitializationError::abi_decode(&data) {
            return Err(eyre::Report::new(StylusDeployerError {
                contract_address: err.newContract,
                revert_data: hex::encode(&err.data),
            }));
        }

        if data.starts_with(&ProgramUpToDate::SELECTOR) {
            return self.get_receipt(output).await;
        }

        Err(eyre::eyre!("deployment failed with revert data 0x{hex_str}"))
    }

    async fn get_receipt(
        &self,
        output: &std::process::Output,
    ) -> eyre::Result<Receipt> {
        let output_str = String::from_utf8_lossy(&output.stdout);
        let (tx_hash, contract_address) = parse_deploy_output(&output_str)?;

        let signer = self
            .private_key
            .parse::<PrivateKeySigner>()
            .context("failed to parse private key")?;
        let provider = provider(&self.rpc_url, signer)?;

        let inner = provider
            .get_transaction_receipt(tx_hash)
            .await?
            .context("transaction receipt not found")?;

        tracing::debug!(
            address = %contract_address,
            tx_hash = %tx_hash,
            "program deployed"
        );
        Ok(Receipt { inner, contract_address })
    }
}

/// Extracts the deployment transaction hash and the deployed address from
/// the output of `cargo stylus deploy`.
fn parse_deploy_output(output: &str) -> eyre::Result<(TxHash, Address)> {
    // The pattern matches a 0x followed by 64 hex characters
    let tx_hash_regex = Regex::new(r"0x[a-fA-F0-9]{64}")
        .context("failed to create tx hash regex")?;

    // The address is preceded by ANSI escape codes, since
    // `cargo stylus deploy` outputs colored text.
    let contract_addr_regex = Regex::new(
        r"deployed code at address:\s*(?:\x1B\[[0-9;]*[a-zA-Z])*(0x[a-fA-F0-9]{40})",
    )
    .context("failed to create contract addr regex")?;

    let tx_hash = tx_hash_regex
        .find(output)
        .context(format!("no transaction hash found in output {output}"))?
        .as_str();

    let contract_addr = contract_addr_regex
        .captures(output)
        .and_then(|cap| cap.get(1))
        .context(format!("no contract address found in output {output}"))?
        .as_str();

    let contract_address = Address::from_str(contract_addr).context(format!(
        "failed to parse contract address from string: {contract_addr}"
    ))?;
    let tx_hash = TxHash::from_str(tx_hash)
        .context("failed to parse transaction hash")?;

    Ok((tx_hash, contract_address))
}

impl std::fmt::Debug for Deployer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deployer")
            .field("rpc_url", &self.rpc_url)
            .field("program_name", &self.program_name)
            .field("ctr", &self.ctr)
            .finish_non_exhaustive()
    }
}
