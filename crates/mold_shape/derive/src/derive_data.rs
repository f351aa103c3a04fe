use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Generics, Ident, LitStr, Type};

use crate::SHAPE_ATTRIBUTE_NAME;

/// A field that takes part in the shape.
pub(crate) struct ShapeField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// The declared name, without a raw identifier prefix.
    pub name: String,
    pub tags: Vec<(String, String)>,
    pub embedded: bool,
}

/// The parsed input of `#[derive(Shape)]`.
pub(crate) struct ShapeRecord<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub fields: Vec<ShapeField<'a>>,
}

#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    embedded: bool,
    tags: Vec<(String, String)>,
}

fn parse_field_attrs(attrs: &[syn::Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident(SHAPE_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                parsed.skip = true;
                return Ok(());
            }
            if meta.path.is_ident("embed") {
                parsed.embedded = true;
                return Ok(());
            }
            let Some(key) = meta.path.get_ident() else {
                return Err(meta.error("expected `skip`, `embed` or `<tag> = \"...\"`"));
            };
            let key = key.unraw().to_string();
            if parsed.tags.iter().any(|(k, _)| *k == key) {
                return Err(meta.error(format_args!("duplicate tag `{key}`")));
            }
            let text: LitStr = meta.value()?.parse()?;
            parsed.tags.push((key, text.value()));
            Ok(())
        })?;
    }

    Ok(parsed)
}

impl<'a> ShapeRecord<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new_spanned(
                        &ast.ident,
                        "`Shape` can only be derived for structs with named fields, found a tuple struct",
                    ));
                }
                Fields::Unit => {
                    return Err(syn::Error::new_spanned(
                        &ast.ident,
                        "`Shape` can only be derived for structs with named fields, found a unit struct",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new_spanned(
                    data.enum_token,
                    "`Shape` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new_spanned(
                    data.union_token,
                    "`Shape` cannot be derived for unions",
                ));
            }
        };

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let attrs = parse_field_attrs(&field.attrs)?;
            if attrs.skip {
                if attrs.embedded || !attrs.tags.is_empty() {
                    return Err(syn::Error::new_spanned(
                        field,
                        "a skipped field cannot carry other `shape` attributes",
                    ));
                }
                continue;
            }
            // Named fields always have an identifier.
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            fields.push(ShapeField {
                ident,
                ty: &field.ty,
                name: ident.unraw().to_string(),
                tags: attrs.tags,
                embedded: attrs.embedded,
            });
        }

        Ok(Self {
            ident: &ast.ident,
            generics: &ast.generics,
            fields,
        })
    }
}
