//! Deployment and end-to-end testing harness for Stylus programs.
//!
//! Programs are deployed with `cargo stylus deploy` against the node at
//! `RPC_URL`, then driven through `alloy` contract bindings.
mod account;
mod constructor_macro;
mod deploy;
mod environment;
mod error;
mod event;
mod project;
mod receipt;
mod system;

pub use account::Account;
pub use constructor_macro::{AbiTypeToString, Constructor};
pub use deploy::{Deployer, StylusDeployerError};
pub use e2e_proc::test;
pub use error::Revert;
pub use event::EventExt;
pub use receipt::Receipt;
pub use system::{provider, Wallet, DEPLOYER_ADDRESS, RPC_URL_ENV_VAR_NAME};

/// Sends a transaction, returning the pending transaction builder.
///
/// Useful for asserting reverts without waiting for inclusion.
#[macro_export]
macro_rules! send {
    ($e:expr) => {
        $e.send().await
    };
}

/// Sends a transaction and waits until it is included, returning its hash.
#[macro_export]
macro_rules! watch {
    ($e:expr) => {
        $e.send().await?.watch().await
    };
}

/// Sends a transaction and waits for its receipt.
#[macro_export]
macro_rules! receipt {
    ($e:expr) => {
        $e.send().await?.get_receipt().await
    };
}
