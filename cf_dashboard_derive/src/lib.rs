mod helper;
mod to_params;

use proc_macro::TokenStream;
use to_params::impl_to_params;

/// Derive `ToParams` for a struct whose named fields are bound as query parameters.
///
/// Field attributes:
///
/// - `#[param(rename = "name")]`: use `name` as the parameter key instead of the field name.
/// - `#[param(join = ";")]`: separator used for `Vec` fields (defaults to `;`).
///
/// `Option` fields are omitted from the parameters when they are `None`.
#[proc_macro_derive(ToParams, attributes(param))]
pub fn derive_to_params(input: TokenStream) -> TokenStream {
    impl_to_params(input.into()).into()
}
