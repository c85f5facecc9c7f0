//! Constants used in the deploy scripts

use alloy::primitives::{address, Address};

/// The default RPC endpoint, a local nitro dev node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8547";

/// The address receiving the DAO fees, also the default Factory deployer
/// and SV launch address
pub const DEFAULT_FEE_ADDRESS: Address =
    address!("0xD507283f873837057Bc551aD9f46cbe60C8C79AA");

/// The Marketplace proxy upgraded by default
pub const DEFAULT_PROXY_ADDRESS: Address =
    address!("0xfDC54e85b9B18eDCeCef2aaffe02A35E8aB43C1C");

/// Package name of the Marketplace implementation
pub const MARKETPLACE_PROGRAM: &str = "marketplace";

/// Package name of the Factory
pub const FACTORY_PROGRAM: &str = "factory";

/// Package name of the ERC-1967 proxy
pub const PROXY_PROGRAM: &str = "erc1967-proxy";
