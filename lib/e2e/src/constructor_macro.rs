use alloy::primitives::{Address, U256};

/// Constructor data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    /// Constructor signature, eg. `constructor(address,bytes)`.
    pub signature: String,
    /// Constructor arguments, in the format `cargo stylus` expects.
    pub args: Vec<String>,
}

/// Helper trait to convert values to string representation
pub trait AbiTypeToString {
    /// Stringify ABI type.
    fn abi_type_to_string(&self) -> String;
}

macro_rules! impl_to_arg_string {
    ($($abi_type:ident),* $(,)?) => {$(
        impl AbiTypeToString for $abi_type {
            fn abi_type_to_string(&self) -> String {
                self.to_string()
            }
        }
    )*};
}

impl_to_arg_string!(U256, u64, String, Address);

impl AbiTypeToString for stylus_sdk::abi::Bytes {
    fn abi_type_to_string(&self) -> String {
        format!("0x{}", alloy::hex::encode(self))
    }
}

/// Builds a [`Constructor`] from typed arguments.
///
/// ```rust,ignore
/// let ctr = constructor!(implementation, Bytes::from(initializer));
/// assert_eq!(ctr.signature, "constructor(address,bytes)");
/// ```
#[macro_export]
macro_rules! constructor {
    () => {{
        $crate::Constructor {
            signature: "constructor()".to_string(),
            args: vec![],
        }
    }};

    ($first:expr $(, $rest:expr)* $(,)?) => {{
        fn get_abi_str<T: stylus_sdk::abi::AbiType>(_: &T) -> &'static str {
            <T as stylus_sdk::abi::AbiType>::ABI.as_str()
        }

        let signature_params = {
            let mut params = vec![get_abi_str(&$first)];
            $(params.push(get_abi_str(&$rest));)*
            params.join(",")
        };

        let args = vec![
            $crate::AbiTypeToString::abi_type_to_string(&$first)
            $(, $crate::AbiTypeToString::abi_type_to_string(&$rest))*
        ];

        $crate::Constructor {
            signature: format!("constructor({})", signature_params),
            args,
        }
    }};
}
