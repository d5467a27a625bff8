//! Derive macros for Redux Lite
//!
//! This crate provides the procedural macro behind `#[derive(Action)]`, which
//! implements `redux_lite_core::Action` for an action enum.
//!
//! # Example
//!
//! ```
//! use redux_lite_core::Action;
//!
//! #[derive(Clone, Copy, Debug)]
//! enum VisibilityFilter {
//!     ShowAll,
//!     ShowCompleted,
//! }
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     AddTodo { id: u64, text: String },
//!
//!     #[action(rename = "SET_VISIBLITY_FILTER")]
//!     SetVisibilityFilter { filter: VisibilityFilter },
//!
//!     #[action(init)]
//!     Init,
//!
//!     #[action(unknown)]
//!     Unknown,
//! }
//!
//! // Generated methods:
//! assert_eq!(TodoAction::init().action_type(), "@@INIT");
//! assert!(!TodoAction::Unknown.is_recognized());
//!
//! let add = TodoAction::AddTodo { id: 0, text: "Learn Redux".to_string() };
//! assert_eq!(add.action_type(), "ADD_TODO");
//!
//! let filter = TodoAction::SetVisibilityFilter { filter: VisibilityFilter::ShowCompleted };
//! assert_eq!(filter.action_type(), "SET_VISIBLITY_FILTER");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Variant};

const INIT_ACTION_TYPE: &str = "@@INIT";
const UNKNOWN_ACTION_TYPE: &str = "@@UNKNOWN";

/// Derive macro for action enums
///
/// Implements `redux_lite_core::Action`:
/// - `action_type()` - The wire name of the variant
/// - `init()` - The variant marked `#[action(init)]`
/// - `is_recognized()` - False only for the variant marked `#[action(unknown)]`
///
/// Wire names default to the variant name in `SCREAMING_SNAKE_CASE`
/// (`AddTodo` becomes `ADD_TODO`). The init variant defaults to `@@INIT` and
/// the unknown variant to `@@UNKNOWN`.
///
/// # Attributes
///
/// - `#[action(rename = "NAME")]` - Override the wire name
/// - `#[action(init)]` - Mark the (unit) initialization sentinel; exactly one required
/// - `#[action(unknown)]` - Mark the catch-all variant; at most one
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - No variant, or more than one, is marked `#[action(init)]`
/// - The init variant carries fields
/// - More than one variant is marked `#[action(unknown)]`
/// - A variant is marked both `init` and `unknown`
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_action(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Parsed `#[action(...)]` options of one variant
#[derive(Default)]
struct VariantOptions {
    rename: Option<String>,
    init: bool,
    unknown: bool,
}

impl VariantOptions {
    fn parse(variant: &Variant) -> syn::Result<Self> {
        let mut options = Self::default();

        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("action")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    options.rename = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("init") {
                    options.init = true;
                    Ok(())
                } else if meta.path.is_ident("unknown") {
                    options.unknown = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `rename = \"...\"`, `init` or `unknown`"))
                }
            })?;
        }

        if options.init && options.unknown {
            return Err(syn::Error::new_spanned(
                variant,
                "Variant cannot be both #[action(init)] and #[action(unknown)]",
            ));
        }

        Ok(options)
    }

    fn action_type(&self, variant: &Variant) -> String {
        if let Some(rename) = &self.rename {
            return rename.clone();
        }
        if self.init {
            return INIT_ACTION_TYPE.to_string();
        }
        if self.unknown {
            return UNKNOWN_ACTION_TYPE.to_string();
        }
        screaming_snake_case(&variant.ident.to_string())
    }
}

fn expand_action(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums",
        ));
    };

    let mut type_arms = Vec::new();
    let mut init_variant = None;
    let mut unknown_pattern = None;

    for variant in &data_enum.variants {
        let options = VariantOptions::parse(variant)?;
        let pattern = variant_pattern(variant);
        let action_type = options.action_type(variant);

        type_arms.push(quote! { #pattern => #action_type, });

        if options.init {
            if init_variant.is_some() {
                return Err(syn::Error::new_spanned(
                    variant,
                    "Only one variant can be marked #[action(init)]",
                ));
            }
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    variant,
                    "The #[action(init)] variant must be a unit variant",
                ));
            }
            init_variant = Some(&variant.ident);
        }

        if options.unknown {
            if unknown_pattern.is_some() {
                return Err(syn::Error::new_spanned(
                    variant,
                    "Only one variant can be marked #[action(unknown)]",
                ));
            }
            unknown_pattern = Some(pattern);
        }
    }

    let Some(init_variant) = init_variant else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] needs one unit variant marked #[action(init)]",
        ));
    };

    let is_recognized = match unknown_pattern {
        Some(pattern) => quote! { !matches!(self, #pattern) },
        None => quote! { true },
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::redux_lite_core::action::Action for #name #ty_generics #where_clause {
            fn init() -> Self {
                Self::#init_variant
            }

            fn action_type(&self) -> &'static str {
                match self {
                    #(#type_arms)*
                }
            }

            fn is_recognized(&self) -> bool {
                #is_recognized
            }
        }
    })
}

/// Match pattern for a variant that ignores its fields
fn variant_pattern(variant: &Variant) -> TokenStream2 {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// `AddTodo` -> `ADD_TODO`, `HTTPRequest` -> `HTTP_REQUEST`
fn screaming_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }

    out
}
