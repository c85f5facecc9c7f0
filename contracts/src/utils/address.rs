//! A collection of utilities for working with [`Address`].
use alloc::{vec, vec::Vec};

use alloy_primitives::Address;
pub use sol::*;
use stylus_sdk::{
    call::delegate_call,
    prelude::*,
    stylus_core::calls::{
        errors::{self, MethodError},
        Call,
    },
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// There's no code at `target` (it is not a contract).
        ///
        /// * `target` - Address of the target contract.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error AddressEmptyCode(address target);

        /// A call to an address target failed. The target may have reverted
        /// without a revert reason.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error FailedCall();

        /// A call to an address target failed with a revert reason.
        ///
        /// * `reason` - The revert data returned by the call.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error FailedCallWithReason(bytes reason);
    }
}

/// An [`AddressUtils`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// There's no code at `target` (it is not a contract).
    EmptyCode(AddressEmptyCode),
    /// A call to an address target failed. The target may have reverted
    /// without a revert reason.
    FailedCall(FailedCall),
    /// A call to an address target failed with a revert reason.
    FailedCallWithReason(FailedCallWithReason),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// A collection of utilities for working with [`Address`].
pub struct AddressUtils;

impl AddressUtils {
    /// Performs a delegate call to `target` with the given `data`.
    ///
    /// # Arguments
    ///
    /// * `context` - Mutable access to the calling contract's state.
    /// * `target` - The address of the target contract.
    /// * `data` - The calldata to pass to the target contract.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyCode`] - If the call succeeded with no return data
    ///   and the target has no code.
    /// * [`Error::FailedCall`] - If the target reverted without data.
    /// * [`Error::FailedCallWithReason`] - If the target reverted with data.
    pub fn function_delegate_call<T: TopLevelStorage + HostAccess>(
        context: &mut T,
        target: Address,
        data: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let config = Call::new_mutating(context);
        let result =
            unsafe { delegate_call(context.vm(), config, target, data) };
        let has_code = context.vm().code_size(target) > 0;
        Self::verify_call_result_from_target(target, has_code, result)
    }

    /// Verifies that a low level call to `target` was successful.
    ///
    /// Reverts if the target was not a contract or bubbles up the revert
    /// reason, falling back to [`Error::FailedCall`] if there is none.
    ///
    /// # Arguments
    ///
    /// * `target` - The address of the target contract.
    /// * `has_code` - Whether `target` has code deployed.
    /// * `result` - The result of the call.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyCode`] - If the call returned no data and `target` has
    ///   no code.
    /// * [`Error::FailedCall`] - If the call reverted without data.
    /// * [`Error::FailedCallWithReason`] - If the call reverted with data.
    pub fn verify_call_result_from_target<R: AsRef<[u8]>>(
        target: Address,
        has_code: bool,
        result: Result<R, errors::Error>,
    ) -> Result<R, Error> {
        match result {
            Ok(returndata) => {
                if returndata.as_ref().is_empty() && !has_code {
                    return Err(AddressEmptyCode { target }.into());
                }
                Ok(returndata)
            }
            Err(e) => Err(Self::revert(e)),
        }
    }

    fn revert(error: errors::Error) -> Error {
        match &error {
            errors::Error::Revert(data) if data.is_empty() => FailedCall {}.into(),
            _ => FailedCallWithReason { reason: error.encode().into() }.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_without_data_is_failed_call() {
        let result = AddressUtils::revert(errors::Error::Revert(vec![]));
        assert!(matches!(result, Error::FailedCall(FailedCall {})));
    }

    #[test]
    fn revert_with_data_is_bubbled_up() {
        let result = AddressUtils::revert(errors::Error::Revert(vec![1, 2, 3]));
        assert!(matches!(
            result,
            Error::FailedCallWithReason(FailedCallWithReason { reason })
                if reason.as_ref() == [1, 2, 3]
        ));
    }

    #[test]
    fn empty_return_data_from_account_without_code_fails() {
        let target = Address::repeat_byte(0x11);
        let err = AddressUtils::verify_call_result_from_target(
            target,
            false,
            Ok(Vec::<u8>::new()),
        )
        .expect_err("should reject account without code");
        assert!(matches!(
            err,
            Error::EmptyCode(AddressEmptyCode { target: t }) if t == target
        ));
    }

    #[test]
    fn empty_return_data_from_contract_is_ok() {
        let result = AddressUtils::verify_call_result_from_target(
            Address::repeat_byte(0x11),
            true,
            Ok(Vec::<u8>::new()),
        )
        .expect("should accept contract with code");
        assert!(result.is_empty());
    }

    #[test]
    fn return_data_is_passed_through() {
        let data = vec![0xaa; 32];
        let result = AddressUtils::verify_call_result_from_target(
            Address::ZERO,
            false,
            Ok(data.clone()),
        )
        .expect("should accept non-empty return data");
        assert_eq!(result, data);
    }
}
