#![allow(dead_code)]
use alloy::sol;

sol!(
    #[sol(rpc)]
    contract Marketplace {
        function initialize(address fee_address) external;

        function VERSION() external view returns (string memory version);
        function daoFeeAddress() external view returns (address dao_fee_address);
        function feePcnt() external view returns (uint256 fee_pcnt);
        function feeFor(uint256 amount) external view returns (uint256 fee);
        function setDaoFeeAddress(address dao_fee_address) external;
        function setFeePcnt(uint256 fee_pcnt) external;

        function owner() external view returns (address owner);
        function transferOwnership(address new_owner) external;
        function renounceOwnership() external;

        function UPGRADE_INTERFACE_VERSION() external view returns (string memory version);
        function proxiableUUID() external view returns (bytes32 slot);
        function upgradeToAndCall(address new_implementation, bytes calldata data) external payable;

        error InvalidInitialization();
        error OwnableUnauthorizedAccount(address account);
        error OwnableInvalidOwner(address owner);
        error MarketplaceInvalidFeeAddress(address fee_address);
        error MarketplaceInvalidFeePcnt(uint256 fee_pcnt);
        error MarketplaceFeeOverflow(uint256 amount);
        error UUPSUnauthorizedCallContext();
        error UUPSUnsupportedProxiableUUID(bytes32 slot);
        error ERC1967InvalidImplementation(address implementation);

        #[derive(Debug, PartialEq)]
        event Initialized(uint64 version);
        #[derive(Debug, PartialEq)]
        event OwnershipTransferred(address indexed previous_owner, address indexed new_owner);
        #[derive(Debug, PartialEq)]
        event DaoFeeAddressUpdated(address indexed previous_address, address indexed new_address);
        #[derive(Debug, PartialEq)]
        event FeePcntUpdated(uint256 previous_fee_pcnt, uint256 new_fee_pcnt);
        #[derive(Debug, PartialEq)]
        event Upgraded(address indexed implementation);
    }

    #[sol(rpc)]
    contract Erc1967Proxy {
        function implementation() external view returns (address implementation);
    }
);
