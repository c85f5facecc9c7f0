//! Procedural macros of the `e2e` harness.
use proc_macro::TokenStream;


/// Defines an end-to-end test that injects funded test accounts from its
/// arguments.
///
/// # Examples
///
/// ```rust,ignore
/// #[e2e::test]
/// async fn reports_version(alice: Account) -> eyre::Result<()> {
///     let proxy = alice.deploy_marketplace().await?;
///     let contract = Marketplace::new(proxy, &alice.wallet);
///     assert_eq!(contract.VERSION().call().await?, "1");
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, input: TokenStream) -> TokenStream {
    test::test(attr, input)
}
