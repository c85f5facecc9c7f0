//! Solidity ABI of the programs the scripts talk to

#![allow(missing_docs)]

use alloy::sol;

sol! {
    #[sol(rpc)]
    contract Marketplace {
        function initialize(address fee_address) external;
        function VERSION() external view returns (string memory version);
    }

    #[sol(rpc)]
    contract UUPSUpgradeable {
        function proxiableUUID() external view returns (bytes32 slot);
        function upgradeToAndCall(address new_implementation, bytes calldata data) external payable;
    }
}
