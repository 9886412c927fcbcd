//! Derive macros for the motes particle engine.
//!
//! This crate provides one derive macro:
//!
//! - [`ParticleKind`] - Index and name conversions for closed particle-kind enums
//!
//! # Usage
//!
//! The macro is re-exported from the main `motes` crate. You don't need
//! to add this crate directly:
//!
//! ```ignore
//! use motes::ParticleKind;
//!
//! #[derive(ParticleKind, Clone, Copy, PartialEq)]
//! enum Look {
//!     Floating,
//!     Constellation,
//! }
//! ```
//!
//! # The ParticleKind Macro
//!
//! `#[derive(ParticleKind)]` turns a unit-only enum into a closed set of
//! particle archetypes that renderers can key strategy tables by.
//!
//! It generates:
//! - `From<EnumName> for u32` - Stable index, in declaration order
//! - `From<u32> for EnumName` - Convert back (defaults to first variant)
//! - `EnumName::count() -> u32` - Number of variants
//! - `EnumName::ALL` - Every variant, in declaration order
//! - `EnumName::name()` / `EnumName::from_name()` - snake_case tag round trip
//! - `Display`, printing the snake_case tag

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident};

/// Derive macro for particle kind enums.
///
/// Variants are assigned sequential indices starting from 0 and a tag equal
/// to the snake_case form of the variant name (`Floating` -> `"floating"`,
/// `SoftGlow` -> `"soft_glow"`).
///
/// # Generated Items
///
/// For an enum `Look`:
///
/// - `impl From<Look> for u32` - Convert variant to index
/// - `impl From<u32> for Look` - Convert index to variant (invalid values default to first variant)
/// - `Look::count() -> u32` - Returns number of variants
/// - `Look::ALL: [Look; N]` - All variants
/// - `Look::name(&self) -> &'static str` - snake_case tag
/// - `Look::from_name(&str) -> Option<Look>` - Parse a tag, ASCII case-insensitive
/// - `impl Display for Look` - Writes the tag
///
/// # Example
///
/// ```ignore
/// #[derive(ParticleKind, Clone, Copy, PartialEq, Debug)]
/// enum Look {
///     Floating,       // = 0, "floating"
///     Constellation,  // = 1, "constellation"
/// }
///
/// let idx: u32 = Look::Constellation.into();          // 1
/// assert_eq!(Look::from_name("FLOATING"), Some(Look::Floating));
/// assert_eq!(Look::count(), 2);
/// ```
///
/// # Panics
///
/// The macro panics at compile time if:
/// - Applied to a struct instead of an enum
/// - Any variant has fields (tuple or struct variants)
/// - Enum has zero variants
#[proc_macro_derive(ParticleKind)]
pub fn derive_particle_kind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => panic!("ParticleKind derive only supports enums"),
    };

    for variant in variants.iter() {
        if !matches!(variant.fields, Fields::Unit) {
            panic!(
                "ParticleKind enum variants must be unit variants (no fields). \
                 Found fields on variant '{}'",
                variant.ident
            );
        }
    }

    let first_variant = &variants
        .first()
        .expect("ParticleKind enum must have at least one variant")
        .ident;
    let variant_count = variants.len() as u32;
    let variant_len = variants.len();

    let idents: Vec<&Ident> = variants.iter().map(|v| &v.ident).collect();
    let tags: Vec<String> = idents.iter().map(|i| snake_case(&i.to_string())).collect();

    let into_arms = index_arms(name, &idents, |variant, idx| quote! { #variant => #idx });
    let from_arms = index_arms(name, &idents, |variant, idx| quote! { #idx => #variant });

    let name_arms: Vec<_> = idents
        .iter()
        .zip(tags.iter())
        .map(|(ident, tag)| quote! { #name::#ident => #tag })
        .collect();

    let from_name_checks: Vec<_> = idents
        .iter()
        .zip(tags.iter())
        .map(|(ident, tag)| {
            quote! {
                if value.eq_ignore_ascii_case(#tag) {
                    return Some(#name::#ident);
                }
            }
        })
        .collect();

    let expanded = quote! {
        impl From<#name> for u32 {
            fn from(value: #name) -> u32 {
                match value {
                    #(#into_arms),*
                }
            }
        }

        impl From<u32> for #name {
            fn from(value: u32) -> #name {
                match value {
                    #(#from_arms,)*
                    _ => #name::#first_variant,
                }
            }
        }

        impl #name {
            /// Every variant of this kind enum, in declaration order.
            pub const ALL: [#name; #variant_len] = [#(#name::#idents),*];

            /// Returns the number of variants in this kind enum.
            pub const fn count() -> u32 {
                #variant_count
            }

            /// The snake_case tag for this variant.
            pub fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }

            /// Parse a snake_case tag (ASCII case-insensitive).
            pub fn from_name(value: &str) -> Option<#name> {
                #(#from_name_checks)*
                None
            }
        }

        impl ::std::fmt::Display for #name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };

    TokenStream::from(expanded)
}

/// Build one match arm per variant, pairing `Enum::Variant` with its index.
fn index_arms<F>(name: &Ident, idents: &[&Ident], arm: F) -> Vec<proc_macro2::TokenStream>
where
    F: Fn(proc_macro2::TokenStream, u32) -> proc_macro2::TokenStream,
{
    idents
        .iter()
        .enumerate()
        .map(|(i, ident)| arm(quote! { #name::#ident }, i as u32))
        .collect()
}

fn snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
