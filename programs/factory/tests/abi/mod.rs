#![allow(dead_code)]
use alloy::sol;

sol!(
    #[sol(rpc)]
    contract Factory {
        function deployerAddress() external view returns (address deployer_address);
        function svLaunchAddress() external view returns (address sv_launch_address);
        function feeAddress() external view returns (address fee_address);

        error FactoryInvalidAddress(address account);
    }
);
