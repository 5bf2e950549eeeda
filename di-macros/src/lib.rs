//! Compile-time dependency injection macros for geoscene.
//!
//! - `#[derive(Context)]` turns a struct into a DI root: every field type
//!   becomes extractable through `FromRef<Root>`.
//! - `#[derive(FromContext)]` builds a struct by resolving each field from a
//!   root via `FromRef`.
//!
//! Generated code refers to `crate::FromRef`, so the consuming crate must
//! define or re-export the trait at its root.

use proc_macro::TokenStream;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Data, DeriveInput, Field, Fields};

mod context;
mod from_context;

/// Derive macro for a DI root.
///
/// The repository container is the usual root:
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Container {
///     pub asset: AssetRepository,
///     pub config: ConfigRepository,
///     pub lock: Lock,
/// }
///
/// // Generated:
/// // impl FromRef<Container> for AssetRepository { ... }
/// // impl FromRef<Container> for ConfigRepository { ... }
/// // impl FromRef<Container> for Lock { ... }
/// ```
///
/// Every field type must be `Clone` and appear only once in the struct.
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::derive_context_impl(input)
}

/// Derive macro for types assembled from a DI root.
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// #[from_context(Context = Container)]
/// pub struct MigrationClient {
///     store: Store,
///     config: ConfigRepository,
/// }
/// ```
///
/// The root defaults to `Context`; override it with
/// `#[from_context(Context = Path)]` or `#[from_context(Context = "Path")]`.
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::derive_from_context_impl(input)
}

/// Returns the named fields of a struct, or a spanned error naming the derive.
pub(crate) fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> syn::Result<&'a Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{derive} can only be derived for structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{derive} can only be derived for structs"),
        )),
    }
}
