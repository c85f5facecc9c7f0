use alloy::{primitives::Address, rpc::types::TransactionReceipt};

/// Outcome of a program deployment.
#[derive(Clone, Debug)]
pub struct Receipt {
    /// Receipt of the deployment transaction.
    pub inner: TransactionReceipt,
    /// Address the program was deployed to.
    pub contract_address: Address,
}
