use mold_macro_utils::Manifest;
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::{WhereClause, parse_quote};

use crate::derive_data::ShapeRecord;

/// Generates `impl Shape` and `impl ops::Record` for a record.
pub(crate) fn impl_record(record: &ShapeRecord) -> TokenStream {
    let shape_path: syn::Path = Manifest::shared(|m| m.get_crate_path("mold_shape"));

    let ident = record.ident;
    let (impl_generics, ty_generics, where_clause) = record.generics.split_for_impl();

    let mut where_clause = where_clause.cloned().unwrap_or_else(|| WhereClause {
        where_token: Default::default(),
        predicates: Default::default(),
    });
    for param in record.generics.type_params() {
        let param = &param.ident;
        where_clause.predicates.push(parse_quote!(
            #param: ::core::marker::Send + ::core::marker::Sync + 'static
        ));
    }
    for field in &record.fields {
        let ty = field.ty;
        where_clause
            .predicates
            .push(parse_quote!(#ty: #shape_path::Shape));
    }
    where_clause
        .predicates
        .push(parse_quote!(Self: ::core::clone::Clone));

    let decls = record.fields.iter().map(|field| {
        let name = &field.name;
        let embedded = field.embedded;
        let keys = field.tags.iter().map(|(key, _)| key);
        let texts = field.tags.iter().map(|(_, text)| text);
        quote! {
            #shape_path::ops::FieldDecl::new(#name)
                .with_tags(&[#((#keys, #texts)),*])
                .with_embedded(#embedded)
        }
    });

    let indices: Vec<Literal> = (0..record.fields.len())
        .map(Literal::usize_unsuffixed)
        .collect();
    let idents: Vec<_> = record.fields.iter().map(|field| field.ident).collect();
    let field_count = record.fields.len();

    let exports = quote!(#shape_path::__macro_exports);

    quote! {
        const _: () = {
            impl #impl_generics #shape_path::Shape for #ident #ty_generics #where_clause {
                #[inline]
                fn shape_ref(&self) -> #shape_path::ShapeRef<'_> {
                    #shape_path::ShapeRef::Record(self)
                }

                #[inline]
                fn shape_mut(&mut self) -> #shape_path::ShapeMut<'_> {
                    #shape_path::ShapeMut::Record(self)
                }

                #[inline]
                fn clone_shape(&self) -> #exports::Box<dyn #shape_path::Shape> {
                    #exports::Box::new(::core::clone::Clone::clone(self))
                }
            }

            impl #impl_generics #shape_path::ops::Record for #ident #ty_generics #where_clause {
                fn field_decls(&self) -> &'static [#shape_path::ops::FieldDecl] {
                    const FIELDS: &[#shape_path::ops::FieldDecl] = &[#(#decls),*];
                    FIELDS
                }

                fn field(&self, index: usize) -> #exports::Option<&dyn #shape_path::Shape> {
                    match index {
                        #(#indices => #exports::Option::Some(&self.#idents),)*
                        _ => #exports::Option::None,
                    }
                }

                fn field_mut(&mut self, index: usize) -> #exports::Option<&mut dyn #shape_path::Shape> {
                    match index {
                        #(#indices => #exports::Option::Some(&mut self.#idents),)*
                        _ => #exports::Option::None,
                    }
                }

                #[allow(unused_mut, reason = "records without fields")]
                fn fields_mut(&mut self) -> #exports::Vec<&mut dyn #shape_path::Shape> {
                    let mut fields: #exports::Vec<&mut dyn #shape_path::Shape> =
                        #exports::Vec::with_capacity(#field_count);
                    #(fields.push(&mut self.#idents);)*
                    fields
                }
            }
        };
    }
}
