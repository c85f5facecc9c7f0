//! Fee configuration of the Marketplace.
//!
//! Every sale pays `fee_pcnt / FEE_DENOMINATOR` of its price to the DAO fee
//! address. Both values live in the proxy's storage, so they survive
//! upgrades of the Marketplace implementation.
use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::{uint, Address, U256};
pub use sol::*;
use stylus_sdk::{
    prelude::*,
    storage::{StorageAddress, StorageU256},
    stylus_core::calls::errors::MethodError,
};

/// Fee applied by a freshly initialized Marketplace, in parts per
/// [`FEE_DENOMINATOR`] (5%).
pub const DEFAULT_FEE_PCNT: U256 = uint!(50_000_U256);

/// Denominator of [`MarketplaceFees::fee_pcnt`].
pub const FEE_DENOMINATOR: U256 = uint!(1_000_000_U256);

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the DAO fee address changes.
        ///
        /// * `previous_address` - Address that received fees until now.
        /// * `new_address` - Address receiving fees from now on.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event DaoFeeAddressUpdated(address indexed previous_address, address indexed new_address);

        /// Emitted when the fee percentage changes.
        ///
        /// * `previous_fee_pcnt` - Previous fee, in parts per million.
        /// * `new_fee_pcnt` - New fee, in parts per million.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event FeePcntUpdated(uint256 previous_fee_pcnt, uint256 new_fee_pcnt);
    }

    sol! {
        /// The fee address is not valid (eg. `Address::ZERO`).
        ///
        /// * `fee_address` - The rejected address.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MarketplaceInvalidFeeAddress(address fee_address);

        /// The fee percentage exceeds the fee denominator.
        ///
        /// * `fee_pcnt` - The rejected fee.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MarketplaceInvalidFeePcnt(uint256 fee_pcnt);

        /// Computing the fee of `amount` overflows.
        ///
        /// * `amount` - The amount the fee was computed for.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MarketplaceFeeOverflow(uint256 amount);
    }
}

/// A [`MarketplaceFees`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The fee address is not valid (eg. `Address::ZERO`).
    InvalidFeeAddress(MarketplaceInvalidFeeAddress),
    /// The fee percentage exceeds the fee denominator.
    InvalidFeePcnt(MarketplaceInvalidFeePcnt),
    /// Computing the fee of an amount overflows.
    FeeOverflow(MarketplaceFeeOverflow),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of a [`MarketplaceFees`] component.
#[storage]
pub struct MarketplaceFees {
    /// Recipient of the Marketplace fees.
    pub(crate) dao_fee_address: StorageAddress,
    /// Fee in parts per [`FEE_DENOMINATOR`].
    pub(crate) fee_pcnt: StorageU256,
}

/// Public interface of a Marketplace implementation.
#[public]
pub trait IMarketplace {
    /// The error type associated to the trait implementation.
    type Error: Into<Vec<u8>>;

    /// Version of the implementation currently behind the proxy.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn version(&self) -> String;

    /// Returns the address receiving the Marketplace fees.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn dao_fee_address(&self) -> Address;

    /// Returns the fee, in parts per [`FEE_DENOMINATOR`].
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn fee_pcnt(&self) -> U256;

    /// Returns the fee owed for a sale of `amount`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `amount` - Sale price.
    ///
    /// # Errors
    ///
    /// * [`MarketplaceFeeOverflow`] - If the computation overflows.
    fn fee_for(&self, amount: U256) -> Result<U256, Self::Error>;

    /// Sets the address receiving the Marketplace fees. Owner only.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `dao_fee_address` - The new fee recipient.
    ///
    /// # Errors
    ///
    /// * [`MarketplaceInvalidFeeAddress`] - If `dao_fee_address` is
    ///   [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`DaoFeeAddressUpdated`].
    fn set_dao_fee_address(
        &mut self,
        dao_fee_address: Address,
    ) -> Result<(), Self::Error>;

    /// Sets the fee percentage. Owner only.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `fee_pcnt` - The new fee, in parts per [`FEE_DENOMINATOR`].
    ///
    /// # Errors
    ///
    /// * [`MarketplaceInvalidFeePcnt`] - If `fee_pcnt` exceeds
    ///   [`FEE_DENOMINATOR`].
    ///
    /// # Events
    ///
    /// * [`FeePcntUpdated`].
    fn set_fee_pcnt(&mut self, fee_pcnt: U256) -> Result<(), Self::Error>;
}

impl MarketplaceFees {
    /// Sets the fee recipient and applies [`DEFAULT_FEE_PCNT`].
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `dao_fee_address` - The fee recipient.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidFeeAddress`] - If `dao_fee_address` is
    ///   [`Address::ZERO`].
    pub fn initialize(&mut self, dao_fee_address: Address) -> Result<(), Error> {
        Self::check_fee_address(dao_fee_address)?;
        self.dao_fee_address.set(dao_fee_address);
        self.fee_pcnt.set(DEFAULT_FEE_PCNT);
        Ok(())
    }

    /// See [`IMarketplace::dao_fee_address`].
    #[must_use]
    pub fn dao_fee_address(&self) -> Address {
        self.dao_fee_address.get()
    }

    /// See [`IMarketplace::fee_pcnt`].
    #[must_use]
    pub fn fee_pcnt(&self) -> U256 {
        self.fee_pcnt.get()
    }

    /// See [`IMarketplace::fee_for`].
    ///
    /// # Errors
    ///
    /// * [`Error::FeeOverflow`] - If `amount * fee_pcnt` overflows.
    pub fn fee_for(&self, amount: U256) -> Result<U256, Error> {
        amount
            .checked_mul(self.fee_pcnt.get())
            .map(|scaled| scaled / FEE_DENOMINATOR)
            .ok_or(Error::FeeOverflow(MarketplaceFeeOverflow { amount }))
    }

    /// See [`IMarketplace::set_dao_fee_address`]. Access control is left to
    /// the caller.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidFeeAddress`] - If `dao_fee_address` is
    ///   [`Address::ZERO`].
    pub fn set_dao_fee_address(
        &mut self,
        dao_fee_address: Address,
    ) -> Result<(), Error> {
        Self::check_fee_address(dao_fee_address)?;

        let previous_address = self.dao_fee_address.get();
        self.dao_fee_address.set(dao_fee_address);
        self.vm().log(DaoFeeAddressUpdated {
            previous_address,
            new_address: dao_fee_address,
        });
        Ok(())
    }

    /// See [`IMarketplace::set_fee_pcnt`]. Access control is left to the
    /// caller.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidFeePcnt`] - If `fee_pcnt` exceeds
    ///   [`FEE_DENOMINATOR`].
    pub fn set_fee_pcnt(&mut self, fee_pcnt: U256) -> Result<(), Error> {
        if fee_pcnt > FEE_DENOMINATOR {
            return Err(Error::InvalidFeePcnt(MarketplaceInvalidFeePcnt {
                fee_pcnt,
            }));
        }

        let previous_fee_pcnt = self.fee_pcnt.get();
        self.fee_pcnt.set(fee_pcnt);
        self.vm()
            .log(FeePcntUpdated { previous_fee_pcnt, new_fee_pcnt: fee_pcnt });
        Ok(())
    }

    fn check_fee_address(fee_address: Address) -> Result<(), Error> {
        if fee_address.is_zero() {
            return Err(Error::InvalidFeeAddress(
                MarketplaceInvalidFeeAddress { fee_address },
            ));
        }
        Ok(())
    }
}
