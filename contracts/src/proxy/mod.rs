//! Proxy patterns used to make the Marketplace upgradeable.
//!
//! * [`IProxy`] forwards every unmatched call to an implementation.
//! * [`erc1967`] keeps the implementation address in the standard ERC-1967
//!   slot, out of the way of the implementation's own storage layout.
//! * [`utils::uups_upgradeable`] puts the upgrade entry point in the
//!   implementation, so the proxy itself stays minimal.
use alloc::vec::Vec;

use alloy_primitives::Address;
use stylus_sdk::{
    call::delegate_call,
    prelude::*,
    stylus_core::calls::Call,
};

pub mod abi;
pub mod erc1967;
pub mod utils;

/// This trait provides a fallback function that delegates all calls to another
/// contract using the EVM instruction `delegatecall`. We refer to the second
/// contract as the _implementation_ behind the proxy, and it has to be
/// specified by overriding the [`IProxy::implementation`] function.
///
/// Delegation to the implementation can be triggered manually through
/// [`IProxy::do_fallback`], or to a different contract through
/// [`IProxy::delegate`].
///
/// The success and return data of the delegated call will be returned back
/// to the caller of the proxy.
pub trait IProxy: TopLevelStorage + HostAccess + Sized {
    /// Delegates the current call to `implementation`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `implementation` - The address of the implementation contract.
    /// * `calldata` - The calldata to delegate to the implementation contract.
    ///
    /// # Errors
    ///
    /// * Revert data of the implementation, if the delegated call reverts.
    fn delegate(
        &mut self,
        implementation: Address,
        calldata: &[u8],
    ) -> Result<Vec<u8>, Vec<u8>> {
        let context = Call::new_mutating(self);
        let result = unsafe {
            delegate_call(self.vm(), context, implementation, calldata)
        };
        Ok(result?)
    }

    /// Returns the address to which the fallback function and
    /// [`IProxy::do_fallback`] should delegate.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn implementation(&self) -> Address;

    /// Fallback function that delegates calls to the address returned
    /// by [`IProxy::implementation`]. Will run if no other function in the
    /// contract matches the call data.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `calldata` - The calldata to delegate to the implementation contract.
    ///
    /// # Errors
    ///
    /// * Revert data of the implementation, if the delegated call reverts.
    fn do_fallback(&mut self, calldata: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        self.delegate(self.implementation(), calldata)
    }
}
