#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::vec::Vec;

use marketplace_stylus::proxy::{
    erc1967::{self, Erc1967Proxy},
    IProxy,
};
use stylus_sdk::{
    abi::Bytes, alloy_primitives::Address, prelude::*, ArbResult,
};

/// Proxy whose storage holds the Marketplace state. Every call it does not
/// recognize is delegated to the current implementation.
#[entrypoint]
#[storage]
struct Erc1967ProxyProgram {
    erc1967: Erc1967Proxy,
}

#[public]
impl Erc1967ProxyProgram {
    /// Points the proxy at `implementation` and delegates `data` to it, which
    /// is how the implementation's initializer runs against proxy storage.
    #[constructor]
    #[payable]
    fn constructor(
        &mut self,
        implementation: Address,
        data: Bytes,
    ) -> Result<(), erc1967::Error> {
        self.erc1967.constructor(implementation, &data)
    }

    fn implementation(&self) -> Address {
        IProxy::implementation(self)
    }

    #[payable]
    #[fallback]
    fn fallback(&mut self, calldata: &[u8]) -> ArbResult {
        self.do_fallback(calldata)
    }
}

impl IProxy for Erc1967ProxyProgram {
    fn implementation(&self) -> Address {
        self.erc1967.implementation()
    }
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::{sol, SolCall, SolValue};
    use motsu::prelude::*;
    use stylus_sdk::{alloy_primitives::U256, storage::StorageU256};

    use super::*;

    #[storage]
    struct Counter {
        count: StorageU256,
    }

    unsafe impl TopLevelStorage for Counter {}

    #[public]
    impl Counter {
        fn increment(&mut self) {
            self.count.set(self.count.get() + U256::ONE);
        }

        fn count(&self) -> U256 {
            self.count.get()
        }
    }

    sol! {
        interface ICounter {
            function increment() external;
            function count() external view returns (uint256);
        }
    }

    #[motsu::test]
    fn delegates_to_implementation(
        proxy: Contract<Erc1967ProxyProgram>,
        counter: Contract<Counter>,
        alice: Address,
    ) {
        let data: Vec<u8> = ICounter::incrementCall {}.abi_encode();
        proxy
            .sender(alice)
            .constructor(counter.address(), data.into())
            .motsu_expect("should construct proxy");

        assert_eq!(proxy.sender(alice).implementation(), counter.address());

        let increment = ICounter::incrementCall {}.abi_encode();
        proxy
            .sender(alice)
            .fallback(&increment)
            .motsu_expect("should increment through proxy");

        let count = proxy
            .sender(alice)
            .fallback(&ICounter::countCall {}.abi_encode())
            .motsu_expect("should read count through proxy");
        assert_eq!(count, U256::from(2).abi_encode());
        assert_eq!(counter.sender(alice).count(), U256::ZERO);
    }
}
