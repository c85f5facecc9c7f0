//! An upgradeability mechanism designed for UUPS (Universal Upgradeable Proxy
//! Standard) proxies as defined in [ERC-1822].
//!
//! [ERC-1822]: https://eips.ethereum.org/EIPS/eip-1822
//!
//! The functions included here can perform an upgrade of an
//! [`Erc1967Proxy`], when this contract is set as the implementation
//! behind such a proxy.
//!
//! Stylus has no `immutable` storage, so the logic contract marks itself
//! with a flag at [`LOGIC_FLAG_SLOT`] from its constructor. The flag only
//! exists in the logic contract's own storage: reading it through a proxy
//! yields `false`.
//!
//! [`Erc1967Proxy`]: crate::proxy::erc1967::Erc1967Proxy
use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::{aliases::B256, b256, Address};
pub use sol::*;
use stylus_sdk::{
    prelude::*,
    storage::StorageBool,
    stylus_core::calls::{errors::MethodError, Call},
};

use crate::{
    proxy::{
        erc1967::{
            self,
            utils::{
                ERC1967InvalidImplementation, ERC1967NonPayable, Erc1967Utils,
                IMPLEMENTATION_SLOT,
            },
        },
        utils::erc1822::Erc1822ProxiableInterface,
    },
    utils::{address, storage_slot::StorageSlot},
};

/// The version of the upgrade interface of the contract.
pub const UPGRADE_INTERFACE_VERSION: &str = "5.0.0";

/// Storage slot of the flag marking the logic contract.
/// This is the keccak-256 hash of "Stylus.uups.logic.flag" subtracted by 1.
pub const LOGIC_FLAG_SLOT: B256 = b256!(
    "0x0a8411332becbb7cc656ea31e7b0fe1cc273b9e1f7f36f3708d7f856a1e9d260"
);

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// The call is from an unauthorized context.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error UUPSUnauthorizedCallContext();

        /// The storage `slot` is unsupported as a UUID.
        ///
        /// * `slot` - The unsupported UUID returned by the implementation.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error UUPSUnsupportedProxiableUUID(bytes32 slot);
    }
}

/// An [`UUPSUpgradeable`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The call is from an unauthorized context.
    UnauthorizedCallContext(UUPSUnauthorizedCallContext),
    /// The storage `slot` is unsupported as a UUID.
    UnsupportedProxiableUUID(UUPSUnsupportedProxiableUUID),
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

impl From<erc1967::Error> for Error {
    fn from(e: erc1967::Error) -> Self {
        match e {
            erc1967::Error::InvalidImplementation(e) => {
                Error::InvalidImplementation(e)
            }
            erc1967::Error::NonPayable(e) => Error::NonPayable(e),
            erc1967::Error::EmptyCode(e) => Error::EmptyCode(e),
            erc1967::Error::FailedCall(e) => Error::FailedCall(e),
            erc1967::Error::FailedCallWithReason(e) => {
                Error::FailedCallWithReason(e)
            }
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// Interface for a UUPS (Universal Upgradeable Proxy Standard) upgradeable
/// contract.
#[public]
pub trait IUUPSUpgradeable {
    /// The error type associated to the trait implementation.
    type Error: Into<Vec<u8>>;

    /// The version of the upgrade interface of the contract.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn upgrade_interface_version(&self) -> String;

    /// Upgrade the implementation of the proxy to `new_implementation`, and
    /// subsequently execute the function call encoded in `data`.
    ///
    /// NOTE: Implementations must revert when the caller is not authorized
    /// to upgrade the contract.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `new_implementation` - The address of the new implementation.
    /// * `data` - Additional data to be delegated to the new implementation.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedCallContext`] - If not called through a proxy.
    /// * [`Error::InvalidImplementation`] - If `new_implementation` is not
    ///   proxiable.
    /// * [`Error::UnsupportedProxiableUUID`] - If `new_implementation` reports
    ///   an unexpected UUID.
    ///
    /// # Events
    ///
    /// * [`crate::proxy::erc1967::Upgraded`].
    fn upgrade_to_and_call(
        &mut self,
        new_implementation: Address,
        data: stylus_sdk::abi::Bytes,
    ) -> Result<(), Self::Error>;
}

/// State of a [`UUPSUpgradeable`] contract. Holds no regular fields, see
/// [`LOGIC_FLAG_SLOT`].
#[storage]
pub struct UUPSUpgradeable;

/// NOTE: Implementation of [`TopLevelStorage`] to be able to use `&mut self`
/// when calling other contracts, instead of `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`.
unsafe impl TopLevelStorage for UUPSUpgradeable {}

impl UUPSUpgradeable {
    /// Marks the current contract as the logic contract. Must be called from
    /// the implementation's constructor.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    pub fn constructor(&mut self) {
        self.logic_flag().set(true);
    }

    /// See [`IUUPSUpgradeable::upgrade_interface_version`].
    #[must_use]
    pub fn upgrade_interface_version(&self) -> String {
        String::from(UPGRADE_INTERFACE_VERSION)
    }

    /// Returns the storage slot the implementation address is stored at, as
    /// long as it is not called through a proxy.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedCallContext`] - If called through a proxy.
    pub fn proxiable_uuid(&self) -> Result<B256, Error> {
        self.not_delegated()?;
        Ok(IMPLEMENTATION_SLOT)
    }

    /// Upgrades the proxy to `new_implementation` and delegates `data` to it.
    /// Authorization is left to the caller.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `new_implementation` - The address of the new implementation.
    /// * `data` - Additional data to be delegated to the new implementation.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedCallContext`] - If not called through a proxy.
    /// * [`Error::InvalidImplementation`] - If `new_implementation` does not
    ///   answer `proxiableUUID()` or has no code.
    /// * [`Error::UnsupportedProxiableUUID`] - If it answers with a slot
    ///   other than [`IMPLEMENTATION_SLOT`].
    /// * [`Error::NonPayable`] - If `data` is empty and `msg.value` is not
    ///   zero.
    /// * [`Error::EmptyCode`], [`Error::FailedCall`],
    ///   [`Error::FailedCallWithReason`] - If the setup call fails.
    ///
    /// # Events
    ///
    /// * [`crate::proxy::erc1967::Upgraded`].
    pub fn upgrade_to_and_call(
        &mut self,
        new_implementation: Address,
        data: &[u8],
    ) -> Result<(), Error> {
        self.only_proxy()?;
        self.upgrade_to_and_call_uups(new_implementation, data)
    }

    /// Checks that the execution is performed through a proxy whose
    /// implementation slot is set.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedCallContext`] - If called on the logic contract
    ///   directly, or through a proxy without an implementation.
    pub fn only_proxy(&self) -> Result<(), Error> {
        if self.is_logic() || Erc1967Utils::get_implementation(self).is_zero()
        {
            Err(Error::UnauthorizedCallContext(UUPSUnauthorizedCallContext {}))
        } else {
            Ok(())
        }
    }

    /// Checks that the execution is not performed through a delegate call.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedCallContext`] - If called through a proxy.
    pub fn not_delegated(&self) -> Result<(), Error> {
        if self.is_logic() {
            Ok(())
        } else {
            Err(Error::UnauthorizedCallContext(UUPSUnauthorizedCallContext {}))
        }
    }

    /// Whether the current storage is the logic contract's own storage.
    #[must_use]
    pub fn is_logic(&self) -> bool {
        self.logic_flag().get()
    }

    fn logic_flag(&self) -> StorageBool {
        StorageSlot::get_slot::<StorageBool>(self, LOGIC_FLAG_SLOT)
    }

    fn upgrade_to_and_call_uups(
        &mut self,
        new_implementation: Address,
        data: &[u8],
    ) -> Result<(), Error> {
        let slot = Erc1822ProxiableInterface::new(new_implementation)
            .proxiable_uuid(self.vm(), Call::new())
            .map_err(|_| {
                Error::InvalidImplementation(ERC1967InvalidImplementation {
                    implementation: new_implementation,
                })
            })?;

        if slot != IMPLEMENTATION_SLOT {
            return Err(Error::UnsupportedProxiableUUID(
                UUPSUnsupportedProxiableUUID { slot },
            ));
        }

        Ok(Erc1967Utils::upgrade_to_and_call(self, new_implementation, data)?)
    }
}

#[cfg(test)]
mod tests {
    use alloy_sol_macro::sol;
    use alloy_sol_types::{SolCall, SolValue};
    use motsu::prelude::*;
    use stylus_sdk::{
        abi::Bytes,
        alloy_primitives::{Address, U256},
        storage::StorageU256,
        ArbResult,
    };

    use super::*;
    use crate::proxy::{erc1967::Erc1967Proxy, IProxy};

    #[storage]
    struct ProxyExample {
        erc1967: Erc1967Proxy,
    }

    unsafe impl TopLevelStorage for ProxyExample {}

    #[public]
    impl ProxyExample {
        #[constructor]
        fn constructor(
            &mut self,
            implementation: Address,
            data: Bytes,
        ) -> Result<(), erc1967::Error> {
            self.erc1967.constructor(implementation, &data)
        }

        #[fallback]
        fn fallback(&mut self, calldata: &[u8]) -> ArbResult {
            self.do_fallback(calldata)
        }
    }

    impl IProxy for ProxyExample {
        fn implementation(&self) -> Address {
            self.erc1967.implementation()
        }
    }

    #[storage]
    struct LogicExample {
        uups: UUPSUpgradeable,
        fee_pcnt: StorageU256,
    }

    unsafe impl TopLevelStorage for LogicExample {}

    #[public]
    impl LogicExample {
        #[constructor]
        fn constructor(&mut self) {
            self.uups.constructor();
        }

        fn set_fee_pcnt(&mut self, fee_pcnt: U256) {
            self.fee_pcnt.set(fee_pcnt);
        }

        fn fee_pcnt(&self) -> U256 {
            self.fee_pcnt.get()
        }

        #[selector(name = "proxiableUUID")]
        fn proxiable_uuid(&self) -> Result<B256, Error> {
            self.uups.proxiable_uuid()
        }

        #[selector(name = "upgradeToAndCall")]
        fn upgrade_to_and_call(
            &mut self,
            new_implementation: Address,
            data: Bytes,
        ) -> Result<(), Error> {
            self.uups.upgrade_to_and_call(new_implementation, &data)
        }
    }

    #[storage]
    struct NotProxiable;

    unsafe impl TopLevelStorage for NotProxiable {}

    #[public]
    impl NotProxiable {}

    sol! {
        interface ILogicExample {
            function setFeePcnt(uint256 fee_pcnt) external;
            function feePcnt() external view returns (uint256);
            function proxiableUUID() external view returns (bytes32);
            function upgradeToAndCall(address new_implementation, bytes data) external;
        }
    }

    fn deploy_proxy(
        proxy: &Contract<ProxyExample>,
        logic: &Contract<LogicExample>,
        alice: Address,
    ) {
        logic.sender(alice).constructor();
        proxy
            .sender(alice)
            .constructor(logic.address(), Bytes::default())
            .motsu_expect("should deploy proxy");
    }

    #[motsu::test]
    fn logic_contract_is_proxiable(
        logic: Contract<LogicExample>,
        alice: Address,
    ) {
        logic.sender(alice).constructor();

        let slot = logic
            .sender(alice)
            .proxiable_uuid()
            .motsu_expect("should return implementation slot");
        assert_eq!(slot, IMPLEMENTATION_SLOT);
    }

    #[motsu::test]
    fn proxiable_uuid_reverts_through_proxy(
        proxy: Contract<ProxyExample>,
        logic: Contract<LogicExample>,
        alice: Address,
    ) {
        deploy_proxy(&proxy, &logic, alice);

        let call = ILogicExample::proxiableUUIDCall {}.abi_encode();
        let err = proxy
            .sender(alice)
            .fallback(&call)
            .motsu_expect_err("should reject delegated call");

        assert_eq!(
            err,
            Vec::<u8>::from(Error::UnauthorizedCallContext(
                UUPSUnauthorizedCallContext {}
            ))
        );
    }

    #[motsu::test]
    fn upgrades_through_proxy(
        proxy: Contract<ProxyExample>,
        logic: Contract<LogicExample>,
        next_logic: Contract<LogicExample>,
        alice: Address,
    ) {
        deploy_proxy(&proxy, &logic, alice);
        next_logic.sender(alice).constructor();

        let fee_pcnt = U256::from(50_000);
        let set = ILogicExample::setFeePcntCall { fee_pcnt }.abi_encode();
        proxy.sender(alice).fallback(&set).motsu_expect("should set fee");

        let upgrade = ILogicExample::upgradeToAndCallCall {
            new_implementation: next_logic.address(),
            data: Default::default(),
        }
        .abi_encode();
        proxy
            .sender(alice)
            .fallback(&upgrade)
            .motsu_expect("should upgrade");

        assert_eq!(proxy.sender(alice).implementation(), next_logic.address());

        let read = ILogicExample::feePcntCall {}.abi_encode();
        let stored = proxy
            .sender(alice)
            .fallback(&read)
            .motsu_expect("should read fee");
        assert_eq!(stored, fee_pcnt.abi_encode());
    }

    #[motsu::test]
    fn upgrade_reverts_on_logic_contract(
        logic: Contract<LogicExample>,
        next_logic: Contract<LogicExample>,
        alice: Address,
    ) {
        logic.sender(alice).constructor();
        next_logic.sender(alice).constructor();

        let err = logic
            .sender(alice)
            .upgrade_to_and_call(next_logic.address(), Bytes::default())
            .motsu_expect_err("should reject direct upgrade");

        assert!(matches!(err, Error::UnauthorizedCallContext(_)));
    }

    #[motsu::test]
    fn upgrade_reverts_for_non_proxiable_implementation(
        proxy: Contract<ProxyExample>,
        logic: Contract<LogicExample>,
        not_proxiable: Contract<NotProxiable>,
        alice: Address,
    ) {
        deploy_proxy(&proxy, &logic, alice);

        let upgrade = ILogicExample::upgradeToAndCallCall {
            new_implementation: not_proxiable.address(),
            data: Default::default(),
        }
        .abi_encode();
        let err = proxy
            .sender(alice)
            .fallback(&upgrade)
            .motsu_expect_err("should reject non-proxiable implementation");

        assert_eq!(
            err,
            Vec::<u8>::from(Error::InvalidImplementation(
                ERC1967InvalidImplementation {
                    implementation: not_proxiable.address(),
                }
            ))
        );
        assert_eq!(proxy.sender(alice).implementation(), logic.address());
    }
}
