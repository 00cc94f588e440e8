use crate::helper;
use proc_macro2::TokenStream;
use syn::{DeriveInput, Type};

const DEFAULT_SEPARATOR: &str = ";";

pub fn impl_to_params(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = syn::parse(input.into()).expect("failed to parse input token stream");

    let struct_name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    let fields = helper::extract_fields(&ast.data);

    let mut pushes: Vec<TokenStream> = Vec::with_capacity(fields.named.len());
    for field in fields.named.iter() {
        let ident = match field.ident.as_ref() {
            Some(ident) => ident,
            None => continue,
        };
        let options = match helper::parse_param_options(&field.attrs) {
            Ok(options) => options,
            Err(e) => return e.to_compile_error(),
        };
        let key = options.rename.unwrap_or_else(|| ident.to_string());
        let separator = options
            .join
            .unwrap_or_else(|| String::from(DEFAULT_SEPARATOR));

        let push = if helper::is_option(&field.ty) {
            let inner = helper::unwrap_option(&field.ty);
            let value = bind_value(inner, quote::quote!(value), &separator);
            quote::quote! {
                if let Some(value) = &self.#ident {
                    params.push((#key, #value));
                }
            }
        } else {
            let value = bind_value(&field.ty, quote::quote!(&self.#ident), &separator);
            quote::quote! {
                params.push((#key, #value));
            }
        };
        pushes.push(push);
    }

    quote::quote! {
        impl #impl_generics ToParams for #struct_name #ty_generics #where_clause {
            #[allow(unused_mut)]
            fn to_params(&self) -> Vec<(&'static str, ParamValue)> {
                let mut params: Vec<(&'static str, ParamValue)> = Vec::new();
                #(#pushes)*
                params
            }
        }
    }
}

/// Build the expression converting a borrowed field value (`&T`) into a `ParamValue`.
fn bind_value(ty: &Type, value: TokenStream, separator: &str) -> TokenStream {
    if helper::is_vec(ty) {
        quote::quote! {
            ParamValue::from(
                ::std::iter::IntoIterator::into_iter(#value)
                    .map(|item| item.to_string())
                    .collect::<Vec<String>>()
                    .join(#separator)
            )
        }
    } else {
        quote::quote! {
            ParamValue::from(::std::clone::Clone::clone(#value))
        }
    }
}
