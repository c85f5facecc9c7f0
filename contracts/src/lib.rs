/*!
# Marketplace Contracts for Stylus

Building blocks for an upgradeable Marketplace written in Rust for
[Arbitrum Stylus](https://docs.arbitrum.io/stylus/stylus-gentle-introduction).

The Marketplace logic lives behind an [ERC-1967] proxy and follows the
[UUPS] upgrade pattern: the proxy only forwards calls, while the
implementation decides who may point the proxy at a new implementation.

[ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
[UUPS]: https://eips.ethereum.org/EIPS/eip-1822

## Usage

Compose the components in a program's `#[entrypoint]` storage and expose
them through the interfaces defined here:

```ignore
use marketplace_stylus::{
    access::ownable::Ownable,
    marketplace::MarketplaceFees,
    proxy::utils::{initializable::Initializable, uups_upgradeable::UUPSUpgradeable},
};

#[entrypoint]
#[storage]
struct Marketplace {
    initializable: Initializable,
    ownable: Ownable,
    uups: UUPSUpgradeable,
    fees: MarketplaceFees,
}
```

The storage layout of the entrypoint is the proxy's storage layout. A new
implementation must keep every field, in order, and only append new ones.
*/

#![allow(clippy::pub_underscore_fields, clippy::module_name_repetitions)]
#![cfg_attr(not(test), no_std)]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

pub mod access;
pub mod marketplace;
pub mod proxy;
pub mod utils;
