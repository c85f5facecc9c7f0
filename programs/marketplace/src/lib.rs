#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::{string::String, vec::Vec};

use marketplace_stylus::{
    access::ownable::{self, IOwnable, Ownable},
    marketplace::{self, IMarketplace, MarketplaceFees},
    proxy::utils::{
        erc1822::IErc1822Proxiable,
        initializable::{self, Initializable},
        uups_upgradeable::{IUUPSUpgradeable, UUPSUpgradeable},
    },
};
use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, B256, U256},
    prelude::*,
};

/// Version reported by this implementation.
pub const VERSION: &str = "1";

#[derive(SolidityError, Debug)]
enum Error {
    InvalidInitialization(initializable::InvalidInitialization),
    UnauthorizedAccount(ownable::OwnableUnauthorizedAccount),
    InvalidOwner(ownable::OwnableInvalidOwner),
    InvalidFeeAddress(marketplace::MarketplaceInvalidFeeAddress),
    InvalidFeePcnt(marketplace::MarketplaceInvalidFeePcnt),
    FeeOverflow(marketplace::MarketplaceFeeOverflow),
}

impl From<initializable::Error> for Error {
    fn from(e: initializable::Error) -> Self {
        match e {
            initializable::Error::InvalidInitialization(e) => {
                Error::InvalidInitialization(e)
            }
        }
    }
}

impl From<ownable::Error> for Error {
    fn from(e: ownable::Error) -> Self {
        match e {
            ownable::Error::UnauthorizedAccount(e) => {
                Error::UnauthorizedAccount(e)
            }
            ownable::Error::InvalidOwner(e) => Error::InvalidOwner(e),
        }
    }
}

impl From<marketplace::Error> for Error {
    fn from(e: marketplace::Error) -> Self {
        match e {
            marketplace::Error::InvalidFeeAddress(e) => {
                Error::InvalidFeeAddress(e)
            }
            marketplace::Error::InvalidFeePcnt(e) => Error::InvalidFeePcnt(e),
            marketplace::Error::FeeOverflow(e) => Error::FeeOverflow(e),
        }
    }
}

// Storage layout is shared with every later implementation. Only append.
#[entrypoint]
#[storage]
struct Marketplace {
    initializable: Initializable,
    ownable: Ownable,
    uups: UUPSUpgradeable,
    fees: MarketplaceFees,
}

#[public]
#[implements(
    IMarketplace<Error = Error>,
    IOwnable<Error = ownable::Error>,
    IUUPSUpgradeable<Error = Vec<u8>>,
    IErc1822Proxiable
)]
impl Marketplace {
    /// Runs once, against the logic contract's own storage. Locks the logic
    /// contract so it can only be used through a proxy.
    #[constructor]
    fn constructor(&mut self) -> Result<(), Error> {
        self.uups.constructor();
        self.initializable.disable_initializers()?;
        Ok(())
    }

    /// Initializes the proxy's storage. Called by the proxy's constructor,
    /// which is itself run by the Stylus deployer contract, hence the owner
    /// is the transaction origin.
    fn initialize(&mut self, fee_address: Address) -> Result<(), Error> {
        let owner = self.vm().tx_origin();
        let Self { initializable, ownable, fees, .. } = self;
        initializable.initializer(|| -> Result<(), Error> {
            ownable.initialize(owner)?;
            fees.initialize(fee_address)?;
            Ok(())
        })
    }
}

#[public]
impl IMarketplace for Marketplace {
    type Error = Error;

    #[selector(name = "VERSION")]
    fn version(&self) -> String {
        VERSION.into()
    }

    fn dao_fee_address(&self) -> Address {
        self.fees.dao_fee_address()
    }

    fn fee_pcnt(&self) -> U256 {
        self.fees.fee_pcnt()
    }

    fn fee_for(&self, amount: U256) -> Result<U256, Self::Error> {
        Ok(self.fees.fee_for(amount)?)
    }

    fn set_dao_fee_address(
        &mut self,
        dao_fee_address: Address,
    ) -> Result<(), Self::Error> {
        self.ownable.only_owner()?;
        Ok(self.fees.set_dao_fee_address(dao_fee_address)?)
    }

    fn set_fee_pcnt(&mut self, fee_pcnt: U256) -> Result<(), Self::Error> {
        self.ownable.only_owner()?;
        Ok(self.fees.set_fee_pcnt(fee_pcnt)?)
    }
}

#[public]
impl IOwnable for Marketplace {
    type Error = ownable::Error;

    fn owner(&self) -> Address {
        self.ownable.owner()
    }

    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Self::Error> {
        self.ownable.transfer_ownership(new_owner)
    }

    fn renounce_ownership(&mut self) -> Result<(), Self::Error> {
        self.ownable.renounce_ownership()
    }
}

#[public]
impl IUUPSUpgradeable for Marketplace {
    type Error = Vec<u8>;

    #[selector(name = "UPGRADE_INTERFACE_VERSION")]
    fn upgrade_interface_version(&self) -> String {
        self.uups.upgrade_interface_version()
    }

    #[payable]
    fn upgrade_to_and_call(
        &mut self,
        new_implementation: Address,
        data: Bytes,
    ) -> Result<(), Self::Error> {
        self.uups.only_proxy()?;
        self.ownable.only_owner()?;
        self.uups.upgrade_to_and_call(new_implementation, &data)?;
        Ok(())
    }
}

#[public]
impl IErc1822Proxiable for Marketplace {
    #[selector(name = "proxiableUUID")]
    fn proxiable_uuid(&self) -> Result<B256, Vec<u8>> {
        Ok(self.uups.proxiable_uuid()?)
    }
}
