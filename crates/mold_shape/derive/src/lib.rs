//! See [`Shape`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SHAPE_ATTRIBUTE_NAME: &str = "shape";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;

// -----------------------------------------------------------------------------
// Macros

/// # Record Shape Derivation
///
/// `#[derive(Shape)]` implements `Shape` and `ops::Record` for a struct with
/// named fields. The struct must also implement `Clone`.
///
/// ```rust, ignore
/// #[derive(Clone, Default, Shape)]
/// struct Server {
///     #[shape(json = "addr")]
///     address: String,
///     #[shape(json = ",omitempty")]
///     port: u16,
///     #[shape(embed)]
///     common: Common,
///     #[shape(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Field attributes
///
/// - `skip`: the field is not part of the shape. Its type does not need to
///   implement `Shape`.
/// - `embed`: the field is embedded. When it holds a record (or an optional
///   record) its fields are promoted to the parent level.
/// - `<key> = "<text>"`: a tag, e.g. `json = "name,omitempty"`. Any key is
///   accepted; the assigner reads the one it is configured with.
///
/// Tuple structs, unit structs, enums and unions are rejected.
#[proc_macro_derive(Shape, attributes(shape))]
pub fn derive_shape(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ShapeRecord::from_ast(&ast) {
        Ok(record) => impls::impl_record(&record).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
