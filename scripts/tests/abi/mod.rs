#![allow(dead_code)]
use alloy::sol;

sol!(
    #[sol(rpc)]
    contract Marketplace {
        function VERSION() external view returns (string memory version);
        function daoFeeAddress() external view returns (address dao_fee_address);
        function feePcnt() external view returns (uint256 fee_pcnt);
        function owner() external view returns (address owner);
    }
);
