#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloy_sol_types::sol;
use stylus_sdk::{alloy_primitives::Address, prelude::*, storage::StorageAddress};

sol! {
    /// One of the constructor addresses is not valid (eg. `Address::ZERO`).
    ///
    /// * `account` - The rejected address.
    #[derive(Debug)]
    #[allow(missing_docs)]
    error FactoryInvalidAddress(address account);
}

#[derive(SolidityError, Debug)]
enum Error {
    InvalidAddress(FactoryInvalidAddress),
}

/// Launchpad factory. Its addresses are fixed at construction.
#[entrypoint]
#[storage]
struct Factory {
    deployer_address: StorageAddress,
    sv_launch_address: StorageAddress,
    fee_address: StorageAddress,
}

#[public]
impl Factory {
    #[constructor]
    fn constructor(
        &mut self,
        deployer_address: Address,
        sv_launch_address: Address,
        fee_address: Address,
    ) -> Result<(), Error> {
        for account in [deployer_address, sv_launch_address, fee_address] {
            if account.is_zero() {
                return Err(Error::InvalidAddress(FactoryInvalidAddress {
                    account,
                }));
            }
        }

        self.deployer_address.set(deployer_address);
        self.sv_launch_address.set(sv_launch_address);
        self.fee_address.set(fee_address);
        Ok(())
    }

    fn deployer_address(&self) -> Address {
        self.deployer_address.get()
    }

    fn sv_launch_address(&self) -> Address {
        self.sv_launch_address.get()
    }

    fn fee_address(&self) -> Address {
        self.fee_address.get()
    }
}

#[cfg(test)]
mod tests {
    use motsu::prelude::*;

    use super::*;

    #[motsu::test]
    fn constructs(
        contract: Contract<Factory>,
        alice: Address,
        deployer: Address,
        sv_launch: Address,
        fee: Address,
    ) {
        contract
            .sender(alice)
            .constructor(deployer, sv_launch, fee)
            .motsu_expect("should construct");

        assert_eq!(contract.sender(alice).deployer_address(), deployer);
        assert_eq!(contract.sender(alice).sv_launch_address(), sv_launch);
        assert_eq!(contract.sender(alice).fee_address(), fee);
    }

    #[motsu::test]
    fn accepts_same_address_for_every_role(
        contract: Contract<Factory>,
        alice: Address,
        dao: Address,
    ) {
        contract
            .sender(alice)
            .constructor(dao, dao, dao)
            .motsu_expect("should construct");

        assert_eq!(contract.sender(alice).deployer_address(), dao);
        assert_eq!(contract.sender(alice).sv_launch_address(), dao);
        assert_eq!(contract.sender(alice).fee_address(), dao);
    }

    #[motsu::test]
    fn rejects_zero_addresses(
        contract: Contract<Factory>,
        alice: Address,
        dao: Address,
    ) {
        let cases = [
            (Address::ZERO, dao, dao),
            (dao, Address::ZERO, dao),
            (dao, dao, Address::ZERO),
        ];

        for (deployer, sv_launch, fee) in cases {
            let err = contract
                .sender(alice)
                .constructor(deployer, sv_launch, fee)
                .motsu_expect_err("should reject zero address");
            assert!(matches!(
                err,
                Error::InvalidAddress(FactoryInvalidAddress { account })
                    if account.is_zero()
            ));
        }

        assert_eq!(contract.sender(alice).fee_address(), Address::ZERO);
    }
}
