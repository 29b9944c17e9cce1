//! Derive macros for the suitecase test harness.
//!
//! - `TestValue`: Implements `Stringify` and `Operand` so a user type can be passed to `compare`

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Ident, parse_macro_input};

const INTEGER_REPRS: [&str; 12] = [
    "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128", "isize",
];

/// The integer type named by `#[repr(..)]`, or `isize`, the type of discriminants without one.
fn discriminant_type(attrs: &[Attribute]) -> Ident {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("repr")) {
        // Malformed reprs are rejected by the compiler itself.
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                if INTEGER_REPRS.contains(&ident.to_string().as_str()) {
                    found = Some(ident.clone());
                }
            }
            if meta.input.peek(syn::token::Paren) {
                let _args;
                syn::parenthesized!(_args in meta.input);
            }
            Ok(())
        });
    }
    found.unwrap_or_else(|| format_ident!("isize"))
}

/// Makes a user type usable as a scalar operand in `suitecase::compare`.
///
/// The generated `Stringify` impl renders:
/// - fieldless enums as `(enum)N`, where `N` is the variant's discriminant read as the `#[repr]` integer type
/// - enums carrying data as `(enum)N`, where `N` is the variant's index
/// - structs and unions as the opaque `<path::to::Type>` placeholder
///
/// # Example
/// ```ignore
/// #[derive(Debug, PartialEq, TestValue)]
/// enum Color {
///     Red = 1,
///     Green = 2,
/// }
///
/// // Color::Green.stringify() == "(enum)2"
/// ```
#[proc_macro_derive(TestValue)]
pub fn derive_test_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Enum(data) if data.variants.is_empty() => quote! { match *self {} },
        Data::Enum(data) => {
            let fieldless = data.variants.iter().all(|v| matches!(v.fields, Fields::Unit));
            let repr = discriminant_type(&input.attrs);
            let arms = data.variants.iter().enumerate().map(|(index, variant)| {
                let ident = &variant.ident;
                if fieldless {
                    // Casting the variant path reads the declared discriminant, explicit or implicit.
                    quote! { Self::#ident => ::std::format!("(enum){}", Self::#ident as #repr) }
                } else {
                    let index = index as u64;
                    quote! { Self::#ident { .. } => ::std::format!("(enum){}", #index) }
                }
            });
            quote! {
                match self {
                    #(#arms),*
                }
            }
        }
        Data::Struct(_) | Data::Union(_) => quote! {
            ::suitecase::format::opaque::<Self>()
        },
    };

    let expanded = quote! {
        impl #impl_generics ::suitecase::format::Stringify for #name #ty_generics #where_clause {
            fn stringify(&self) -> ::std::string::String {
                #body
            }
        }

        impl #impl_generics ::suitecase::compare::Operand for #name #ty_generics #where_clause {
            type Unit = Self;

            fn view(&self) -> ::suitecase::compare::OperandView<'_, Self> {
                ::suitecase::compare::OperandView::Scalar(self)
            }
        }
    };

    TokenStream::from(expanded)
}
