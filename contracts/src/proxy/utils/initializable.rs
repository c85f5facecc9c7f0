//! Guards the initialization of contracts deployed behind a proxy.
//!
//! A proxy never runs its implementation's constructor against its own
//! storage, so the implementation exposes an `initialize` function instead,
//! called once through the proxy. [`Initializable`] makes sure that function
//! runs at most once per version.
//!
//! The implementation contract itself should call
//! [`Initializable::disable_initializers`] in its constructor, so nobody can
//! initialize the logic contract directly.
use alloc::{vec, vec::Vec};

use alloy_primitives::U64;
pub use sol::*;
use stylus_sdk::{
    prelude::*,
    storage::{StorageBool, StorageU64},
    stylus_core::calls::errors::MethodError,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the contract has been initialized or reinitialized.
        ///
        /// * `version` - The version that has been initialized.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Initialized(uint64 version);
    }

    sol! {
        /// The contract is already initialized.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error InvalidInitialization();
    }
}

/// An [`Initializable`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The contract is already initialized.
    InvalidInitialization(InvalidInitialization),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of an [`Initializable`] contract.
#[storage]
pub struct Initializable {
    /// Highest version that has been initialized.
    pub(crate) initialized: StorageU64,
    /// Whether an initializer is currently running.
    pub(crate) initializing: StorageBool,
}

impl Initializable {
    /// Runs `init` as the version 1 initializer.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `init` - Initialization logic, usually touching sibling fields of the
    ///   contract.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidInitialization`] - If the contract was already
    ///   initialized or an initializer is running.
    /// * Any error returned by `init`, in which case the whole call reverts.
    ///
    /// # Events
    ///
    /// * [`Initialized`].
    pub fn initializer<E>(
        &mut self,
        init: impl FnOnce() -> Result<(), E>,
    ) -> Result<(), E>
    where
        E: From<Error>,
    {
        self.reinitializer(1, init)
    }

    /// Runs `init` as the initializer of `version`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `version` - Version being initialized.
    /// * `init` - Initialization logic.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidInitialization`] - If `version` is not greater than
    ///   the initialized version or an initializer is running.
    /// * Any error returned by `init`.
    ///
    /// # Events
    ///
    /// * [`Initialized`].
    pub fn reinitializer<E>(
        &mut self,
        version: u64,
        init: impl FnOnce() -> Result<(), E>,
    ) -> Result<(), E>
    where
        E: From<Error>,
    {
        if self.initializing.get()
            || self.initialized.get() >= U64::from(version)
        {
            return Err(
                Error::InvalidInitialization(InvalidInitialization {}).into()
            );
        }

        self.initialized.set(U64::from(version));
        self.initializing.set(true);
        init()?;
        self.initializing.set(false);

        self.vm().log(Initialized { version });
        Ok(())
    }

    /// Locks the contract, preventing any future (re)initialization.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidInitialization`] - If called while an initializer is
    ///   running.
    ///
    /// # Events
    ///
    /// * [`Initialized`] - Only the first time it locks the contract.
    pub fn disable_initializers(&mut self) -> Result<(), Error> {
        if self.initializing.get() {
            return Err(Error::InvalidInitialization(InvalidInitialization {}));
        }

        if self.initialized.get() != U64::MAX {
            self.initialized.set(U64::MAX);
            self.vm().log(Initialized { version: u64::MAX });
        }

        Ok(())
    }

    /// Returns the highest version that has been initialized.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    pub fn get_initialized_version(&self) -> u64 {
        self.initialized.get().to()
    }
}

#[cfg(test)]
mod tests {
    use motsu::prelude::*;
    use stylus_sdk::alloy_primitives::Address;

    use super::*;

    unsafe impl TopLevelStorage for Initializable {}

    #[motsu::test]
    fn initializes_once(contract: Contract<Initializable>, alice: Address) {
        let mut ran = false;
        contract
            .sender(alice)
            .initializer(|| -> Result<(), Error> {
                ran = true;
                Ok(())
            })
            .motsu_expect("should initialize");

        assert!(ran);
        assert_eq!(contract.sender(alice).get_initialized_version(), 1);
        contract.assert_emitted(&Initialized { version: 1 });

        let err = contract
            .sender(alice)
            .initializer(|| -> Result<(), Error> { Ok(()) })
            .motsu_expect_err("should not initialize twice");
        assert!(matches!(err, Error::InvalidInitialization(_)));
    }

    #[motsu::test]
    fn reinitializes_to_greater_version(
        contract: Contract<Initializable>,
        alice: Address,
    ) {
        contract
            .sender(alice)
            .initializer(|| -> Result<(), Error> { Ok(()) })
            .motsu_expect("should initialize");
        contract
            .sender(alice)
            .reinitializer(2, || -> Result<(), Error> { Ok(()) })
            .motsu_expect("should reinitialize");

        assert_eq!(contract.sender(alice).get_initialized_version(), 2);
        contract.assert_emitted(&Initialized { version: 2 });

        let err = contract
            .sender(alice)
            .reinitializer(2, || -> Result<(), Error> { Ok(()) })
            .motsu_expect_err("should not reinitialize same version");
        assert!(matches!(err, Error::InvalidInitialization(_)));
    }

    #[motsu::test]
    fn disabled_initializers_reject_initialization(
        contract: Contract<Initializable>,
        alice: Address,
    ) {
        contract
            .sender(alice)
            .disable_initializers()
            .motsu_expect("should disable initializers");

        assert_eq!(
            contract.sender(alice).get_initialized_version(),
            u64::MAX
        );
        contract.assert_emitted(&Initialized { version: u64::MAX });

        let err = contract
            .sender(alice)
            .initializer(|| -> Result<(), Error> { Ok(()) })
            .motsu_expect_err("should not initialize locked contract");
        assert!(matches!(err, Error::InvalidInitialization(_)));
    }
}
