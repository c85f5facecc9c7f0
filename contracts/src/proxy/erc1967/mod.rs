//! An upgradeable proxy whose implementation address lives in the storage
//! slot specified by [ERC-1967], so it never conflicts with the storage
//! layout of the implementation behind the proxy.
//!
//! The implementation can only be changed through the implementation
//! itself, see [`crate::proxy::utils::uups_upgradeable`].
//!
//! [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
use alloc::{vec, vec::Vec};

use alloy_primitives::Address;
pub use sol::*;
use stylus_sdk::{abi::Bytes, prelude::*};

pub mod utils;

pub use utils::{Erc1967Utils, Error};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the implementation is upgraded.
        ///
        /// * `implementation` - Address of the new implementation.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Upgraded(address indexed implementation);
    }
}

/// State of an [`Erc1967Proxy`]. Holds no regular fields, the implementation
/// address is kept at [`utils::IMPLEMENTATION_SLOT`].
#[storage]
pub struct Erc1967Proxy;

/// NOTE: Implementation of [`TopLevelStorage`] to be able to use `&mut self`
/// when delegating the setup call, instead of `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`.
unsafe impl TopLevelStorage for Erc1967Proxy {}

impl Erc1967Proxy {
    /// Initializes the upgradeable proxy with an initial implementation
    /// specified by `implementation`.
    ///
    /// If `data` is non-empty, it's used as data in a delegate call to
    /// `implementation`. This will typically be an encoded function call,
    /// and allows initializing the storage of the proxy like a Solidity
    /// constructor.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `implementation` - Address of the implementation contract.
    /// * `data` - Calldata of the initializer call.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidImplementation`] - If `implementation` has no code.
    /// * [`Error::NonPayable`] - If `data` is empty and `msg.value` is not
    ///   zero.
    /// * [`Error::FailedCallWithReason`] - If the initializer reverts.
    ///
    /// # Events
    ///
    /// * [`Upgraded`].
    pub fn constructor(
        &mut self,
        implementation: Address,
        data: &Bytes,
    ) -> Result<(), Error> {
        Erc1967Utils::upgrade_to_and_call(self, implementation, data)
    }

    /// Returns the current implementation address.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    pub fn implementation(&self) -> Address {
        Erc1967Utils::get_implementation(self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use alloy_sol_macro::sol;
    use alloy_sol_types::{SolCall, SolValue};
    use motsu::prelude::*;
    use stylus_sdk::{
        alloy_primitives::{Address, U256},
        storage::StorageU256,
        ArbResult,
    };

    use super::*;
    use crate::{proxy::IProxy, utils::address::FailedCallWithReason};

    #[storage]
    struct Erc1967Example {
        erc1967: Erc1967Proxy,
    }

    unsafe impl TopLevelStorage for Erc1967Example {}

    #[public]
    impl Erc1967Example {
        #[constructor]
        fn constructor(
            &mut self,
            implementation: Address,
            data: Bytes,
        ) -> Result<(), Error> {
            self.erc1967.constructor(implementation, &data)
        }

        fn implementation(&self) -> Address {
            self.erc1967.implementation()
        }

        #[fallback]
        fn fallback(&mut self, calldata: &[u8]) -> ArbResult {
            self.do_fallback(calldata)
        }
    }

    impl IProxy for Erc1967Example {
        fn implementation(&self) -> Address {
            self.erc1967.implementation()
        }
    }

    #[storage]
    struct FeeConfig {
        fee_pcnt: StorageU256,
    }

    unsafe impl TopLevelStorage for FeeConfig {}

    #[public]
    impl FeeConfig {
        fn initialize(&mut self, fee_pcnt: U256) -> Result<(), Vec<u8>> {
            if fee_pcnt.is_zero() {
                return Err("zero fee".abi_encode());
            }
            self.fee_pcnt.set(fee_pcnt);
            Ok(())
        }

        fn fee_pcnt(&self) -> U256 {
            self.fee_pcnt.get()
        }
    }

    sol! {
        interface IFeeConfig {
            function initialize(uint256 fee_pcnt) external;
            function feePcnt() external view returns (uint256);
        }
    }

    #[motsu::test]
    fn constructs_without_setup_call(
        proxy: Contract<Erc1967Example>,
        config: Contract<FeeConfig>,
        alice: Address,
    ) {
        proxy
            .sender(alice)
            .constructor(config.address(), Bytes::default())
            .motsu_expect("should construct proxy");

        assert_eq!(proxy.sender(alice).implementation(), config.address());
        proxy.assert_emitted(&Upgraded { implementation: config.address() });
    }

    #[motsu::test]
    fn constructs_with_setup_call(
        proxy: Contract<Erc1967Example>,
        config: Contract<FeeConfig>,
        alice: Address,
    ) {
        let fee_pcnt = U256::from(50_000);
        let data = IFeeConfig::initializeCall { fee_pcnt }.abi_encode();
        proxy
            .sender(alice)
            .constructor(config.address(), data.into())
            .motsu_expect("should construct proxy");

        let read = IFeeConfig::feePcntCall {}.abi_encode();
        let stored = proxy
            .sender(alice)
            .fallback(&read)
            .motsu_expect("should read fee through proxy");
        assert_eq!(stored, fee_pcnt.abi_encode());
        assert_eq!(config.sender(alice).fee_pcnt(), U256::ZERO);
    }

    #[motsu::test]
    fn constructor_bubbles_up_setup_revert(
        proxy: Contract<Erc1967Example>,
        config: Contract<FeeConfig>,
        alice: Address,
    ) {
        let data =
            IFeeConfig::initializeCall { fee_pcnt: U256::ZERO }.abi_encode();
        let err = proxy
            .sender(alice)
            .constructor(config.address(), data.into())
            .motsu_expect_err("should revert with setup error");

        assert!(matches!(
            err,
            Error::FailedCallWithReason(FailedCallWithReason { reason })
                if reason.as_ref() == "zero fee".abi_encode().as_slice()
        ));
    }
}
