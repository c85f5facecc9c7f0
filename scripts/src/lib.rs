//! Scripts deploying the Marketplace behind an upgradeable proxy, deploying
//! the Factory, and upgrading a deployed Marketplace.

pub mod cli;
pub mod commands;
pub mod constants;
mod solidity;
