//! `#[derive(Resource)]` implementation
//!
//! Generates the `Resource`, `Bindable` and `Patch` impls for a struct with named fields.
//! The field table is emitted as a static and decoded into a `ModelSchema` on first use.

use crate::attributes::{parse_container_attributes, parse_field_attributes};
use proc_macro2::{TokenStream, TokenTree};
use quote::{quote, ToTokens};
use syn::{parse2, parse_quote, Data, DeriveInput, Error, Fields, Ident, Result, Type};

pub fn derive_resource(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let type_name = name.to_string();
    let container = parse_container_attributes(&input.attrs)?;

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input,
                    "Resource can only be derived for structs with named fields",
                ))
            }
        },
        _ => return Err(Error::new_spanned(&input, "Resource can only be derived for structs")),
    };

    let type_params: Vec<&Ident> = input.generics.type_params().map(|param| &param.ident).collect();

    let mut decls = Vec::new();
    let mut accessors = Vec::new();
    let mut absent = Vec::new();
    let mut swaps = Vec::new();
    let mut bounded: Vec<&Type> = Vec::new();

    for field in named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_field_attributes(&field.attrs)?;

        // Fields serde never sees and jsh does not tag take no part in validation
        if attrs.skip && attrs.tag.is_none() {
            continue;
        }

        let tag = attrs.tag.unwrap_or_default();
        if is_relationship_tag(&tag) && !attrs.skip {
            return Err(Error::new_spanned(
                field,
                "relationship fields must be excluded from deserialization with #[serde(skip)]",
            ));
        }
        if attrs.flatten && !tag.is_empty() {
            return Err(Error::new_spanned(field, "#[jsh] has no effect on a flattened field"));
        }

        let ident_str = ident.to_string().trim_start_matches("r#").to_string();
        let external = match (attrs.rename, container.rename_all) {
            (Some(rename), _) => rename,
            (None, Some(rule)) => rule.apply(&ident_str),
            (None, None) => ident_str.clone(),
        };
        let skipped = attrs.skip;
        let flatten = attrs.flatten;
        let index = decls.len();

        decls.push(quote! {
            ::jsh_core::model::FieldDecl {
                ident: #ident_str,
                name: #external,
                skipped: #skipped,
                flatten: #flatten,
                tag: #tag,
            }
        });
        accessors.push(quote! {
            #index => ::core::option::Option::Some(&mut self.#ident as &mut dyn ::jsh_core::model::Bindable),
        });
        absent.push(quote! {
            ::jsh_core::model::Bindable::is_absent(&self.#ident)
        });
        swaps.push(quote! {
            #index => ::core::mem::swap(&mut self.#ident, &mut source.#ident),
        });
        if mentions_any(&field.ty, &type_params) {
            bounded.push(&field.ty);
        }
    }

    let mut generics = input.generics.clone();
    {
        let where_clause = generics.make_where_clause();
        for ty in bounded {
            where_clause.predicates.push(parse_quote!(#ty: ::jsh_core::model::Bindable));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::jsh_core::model::Resource for #name #ty_generics #where_clause {
            fn schema(&self) -> &'static ::jsh_core::model::ModelSchema {
                static FIELDS: &[::jsh_core::model::FieldDecl] = &[#(#decls),*];
                static SCHEMA: ::std::sync::OnceLock<::jsh_core::model::ModelSchema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| ::jsh_core::model::ModelSchema::new(#type_name, FIELDS))
            }

            fn field_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn ::jsh_core::model::Bindable> {
                match index {
                    #(#accessors)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::jsh_core::model::Bindable for #name #ty_generics #where_clause {
            fn is_absent(&self) -> bool {
                true #(&& #absent)*
            }

            fn shape(&mut self) -> ::jsh_core::model::Shape<'_> {
                ::jsh_core::model::Shape::Struct(self)
            }
        }

        impl #impl_generics ::jsh_core::model::Patch for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn take_field(&mut self, source: &mut Self, index: usize) {
                match index {
                    #(#swaps)*
                    _ => {}
                }
            }
        }
    })
}

fn is_relationship_tag(tag: &str) -> bool {
    tag.split(',')
        .filter_map(|segment| segment.split('/').next())
        .any(|directive| directive == "one" || directive == "many")
}

/// Whether `ty` refers to any of the struct's type parameters
fn mentions_any(ty: &Type, params: &[&Ident]) -> bool {
    fn scan(tokens: TokenStream, params: &[&Ident]) -> bool {
        tokens.into_iter().any(|token| match token {
            TokenTree::Ident(ident) => params.iter().any(|param| **param == ident),
            TokenTree::Group(group) => scan(group.stream(), params),
            _ => false,
        })
    }
    !params.is_empty() && scan(ty.to_token_stream(), params)
}
