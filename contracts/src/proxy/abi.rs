//! Solidity interfaces the proxy components call into.
//!
//! Defined with `stylus_proc::sol_interface`, so functions can be invoked
//! directly on deployed contracts.

pub use callable::*;

mod callable {
    #![allow(missing_docs)]
    #![cfg_attr(coverage_nightly, coverage(off))]

    use alloc::vec;

    use stylus_sdk::prelude::sol_interface;

    sol_interface! {
        /// ERC-1822 Proxiable interface.
        interface Erc1822ProxiableInterface {
            function proxiableUUID() external view returns (bytes32);
        }
    }
}
