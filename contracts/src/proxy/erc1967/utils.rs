//! Getters and event emitting update functions for [ERC-1967] slots.
//!
//! [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
use alloc::vec::Vec;

use alloy_primitives::{b256, Address, B256};
pub use sol::*;
use stylus_sdk::{
    host::VMAccess, prelude::*, storage::StorageAddress,
    stylus_core::calls::errors::MethodError,
};

use crate::{
    proxy::erc1967::Upgraded,
    utils::{
        address::{self, AddressUtils},
        storage_slot::StorageSlot,
    },
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// The `implementation` of the proxy is invalid.
        ///
        /// * `implementation` - Address of the invalid implementation.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC1967InvalidImplementation(address implementation);

        /// An upgrade function sees `msg.value > 0` that may be lost.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC1967NonPayable();
    }
}

/// An [`Erc1967Utils`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The `implementation` of the proxy is invalid.
    InvalidImplementation(ERC1967InvalidImplementation),
    /// An upgrade function sees `msg.value > 0` that may be lost.
    NonPayable(ERC1967NonPayable),
    /// There's no code at `target` (it is not a contract).
    EmptyCode(address::AddressEmptyCode),
    /// The setup call reverted without a reason.
    FailedCall(address::FailedCall),
    /// The setup call reverted with a reason.
    FailedCallWithReason(address::FailedCallWithReason),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

impl From<address::Error> for Error {
    fn from(e: address::Error) -> Self {
        match e {
            address::Error::EmptyCode(e) => Error::EmptyCode(e),
            address::Error::FailedCall(e) => Error::FailedCall(e),
            address::Error::FailedCallWithReason(e) => {
                Error::FailedCallWithReason(e)
            }
        }
    }
}

/// Storage slot with the address of the current implementation.
/// This is the keccak-256 hash of "eip1967.proxy.implementation" subtracted by
/// 1.
pub const IMPLEMENTATION_SLOT: B256 = b256!(
    "0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc"
);

/// Getters and event emitting update functions for [ERC-1967] slots.
///
/// [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
pub struct Erc1967Utils;

impl Erc1967Utils {
    /// Returns the current implementation address.
    ///
    /// # Arguments
    ///
    /// * `context` - Read access to the proxy's storage.
    pub fn get_implementation(context: &impl VMAccess) -> Address {
        StorageSlot::get_slot::<StorageAddress>(context, IMPLEMENTATION_SLOT)
            .get()
    }

    /// Performs implementation upgrade with additional setup call if
    /// `data` is non-empty. This function is payable only if the setup call
    /// is performed, otherwise `msg.value` is rejected to avoid stuck value
    /// in the contract.
    ///
    /// # Arguments
    ///
    /// * `context` - Mutable access to the proxy's state.
    /// * `new_implementation` - The new implementation address.
    /// * `data` - The calldata of the setup call.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidImplementation`] - If `new_implementation` has no
    ///   code.
    /// * [`Error::NonPayable`] - If `data` is empty and `msg.value` is not
    ///   zero.
    /// * [`Error::EmptyCode`], [`Error::FailedCall`],
    ///   [`Error::FailedCallWithReason`] - If the setup call fails.
    ///
    /// # Events
    ///
    /// * [`Upgraded`].
    pub fn upgrade_to_and_call<T>(
        context: &mut T,
        new_implementation: Address,
        data: &[u8],
    ) -> Result<(), Error>
    where
        T: TopLevelStorage + HostAccess + VMAccess,
    {
        Self::set_implementation(context, new_implementation)?;

        context.vm().log(Upgraded { implementation: new_implementation });

        if data.is_empty() {
            Self::check_non_payable(context)?;
        } else {
            AddressUtils::function_delegate_call(
                context,
                new_implementation,
                data,
            )?;
        }

        Ok(())
    }
}

impl Erc1967Utils {
    fn check_non_payable(context: &impl HostAccess) -> Result<(), Error> {
        if context.vm().msg_value().is_zero() {
            Ok(())
        } else {
            Err(ERC1967NonPayable {}.into())
        }
    }

    fn set_implementation<T: HostAccess + VMAccess>(
        context: &T,
        new_implementation: Address,
    ) -> Result<(), Error> {
        if context.vm().code_size(new_implementation) == 0 {
            return Err(ERC1967InvalidImplementation {
                implementation: new_implementation,
            }
            .into());
        }

        StorageSlot::get_slot::<StorageAddress>(context, IMPLEMENTATION_SLOT)
            .set(new_implementation);

        Ok(())
    }
}
