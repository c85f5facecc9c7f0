//! Single-owner access control for contracts living behind a proxy.
//!
//! The owner is written by the implementation's initializer, so it ends up
//! in the proxy's storage. A constructor would only ever write to the logic
//! contract's own storage, which is why [`Ownable`] has no constructor.
//!
//! [`Ownable::only_owner`] gates the privileged entry points of the
//! Marketplace: its fee setters and `upgradeToAndCall`.
use alloc::{vec, vec::Vec};

use alloy_primitives::Address;
pub use sol::*;
use stylus_sdk::{
    prelude::*, storage::StorageAddress,
    stylus_core::calls::errors::MethodError,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when ownership gets transferred between accounts.
        ///
        /// * `previous_owner` - Address of the previous owner.
        /// * `new_owner` - Address of the new owner.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event OwnershipTransferred(address indexed previous_owner, address indexed new_owner);
    }

    sol! {
        /// The caller account is not authorized to perform an operation.
        ///
        /// * `account` - Account that was found to not be authorized.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error OwnableUnauthorizedAccount(address account);
        /// The owner is not a valid owner account. (eg. [`Address::ZERO`])
        ///
        /// * `owner` - Account that's not allowed to become the owner.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error OwnableInvalidOwner(address owner);
    }
}

/// An [`Ownable`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The caller account is not authorized to perform an operation.
    UnauthorizedAccount(OwnableUnauthorizedAccount),
    /// The owner is not a valid owner account. (eg. [`Address::ZERO`])
    InvalidOwner(OwnableInvalidOwner),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of an [`Ownable`] component.
#[storage]
pub struct Ownable {
    /// Account allowed past [`Ownable::only_owner`].
    pub(crate) owner: StorageAddress,
}

/// Ownership surface exposed by the Marketplace programs.
#[public]
pub trait IOwnable {
    /// The error type associated to the trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns the address of the current owner.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn owner(&self) -> Address;

    /// Hands the contract, including its upgrade right, over to
    /// `new_owner`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `new_owner` - The next owner of this contract.
    ///
    /// # Errors
    ///
    /// * [`OwnableUnauthorizedAccount`] - If not called by the owner.
    /// * [`OwnableInvalidOwner`] - If `new_owner` is the [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Self::Error>;

    /// Leaves the contract without owner, which freezes the fees and the
    /// implementation behind the proxy for good.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`OwnableUnauthorizedAccount`] - If not called by the owner.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    fn renounce_ownership(&mut self) -> Result<(), Self::Error>;
}

impl Ownable {
    /// Records `owner` as the first owner. Meant to run inside an
    /// [`initializer`], which makes sure it runs once per proxy.
    ///
    /// [`initializer`]: crate::proxy::utils::initializable::Initializable::initializer
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `owner` - The initial owner, usually the deploying account.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidOwner`] - If `owner` is [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn initialize(&mut self, owner: Address) -> Result<(), Error> {
        Self::check_owner(owner)?;
        self.set_owner(owner);
        Ok(())
    }

    /// Returns the address of the current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    /// See [`IOwnable::transfer_ownership`].
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    /// * [`Error::InvalidOwner`] - If `new_owner` is the [`Address::ZERO`].
    pub fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Error> {
        self.only_owner()?;
        Self::check_owner(new_owner)?;
        self.set_owner(new_owner);
        Ok(())
    }

    /// See [`IOwnable::renounce_ownership`].
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    pub fn renounce_ownership(&mut self) -> Result<(), Error> {
        self.only_owner()?;
        self.set_owner(Address::ZERO);
        Ok(())
    }

    /// Checks that `msg.sender` is the owner. Behind a proxy the check runs
    /// in the delegated frame, so `msg.sender` is the proxy's caller.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If called by any other account,
    ///   including any account once ownership was renounced.
    pub fn only_owner(&self) -> Result<(), Error> {
        let account = self.vm().msg_sender();
        if self.owner() == account {
            Ok(())
        } else {
            Err(OwnableUnauthorizedAccount { account }.into())
        }
    }
}

impl Ownable {
    fn check_owner(owner: Address) -> Result<(), Error> {
        if owner.is_zero() {
            Err(OwnableInvalidOwner { owner }.into())
        } else {
            Ok(())
        }
    }

    fn set_owner(&mut self, new_owner: Address) {
        let previous_owner = self.owner.get();
        self.owner.set(new_owner);
        self.vm().log(OwnershipTransferred { previous_owner, new_owner });
    }
}
