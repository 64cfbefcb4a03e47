// SPDX-License-Identifier: Apache-2.0

//! Derive for sdnc internal use
//!
//! [JsonDisplay]: Implement `std::fmt::Display` trait using JSON output and
//! fallback to Debug display.
//!
//! [JsonDisplayHideSecrets]: Implement `std::fmt::Display` trait using JSON
//! output and fallback to Debug display. Will invoke
//! `self.clone().hide_secrets()` to hide the password before displaying.
//! User of derive should also make sure secrets not leak by Debug trait.
//!
//! [DebugHideSecrets]: Implement `std::fmt::Debug` trait using JSON output
//! of `self.clone().hide_secrets()`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

#[proc_macro_derive(JsonDisplay)]
pub fn derive_json_display(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let class_name = &input.ident;

    let expanded = quote::quote! {
        impl std::fmt::Display for #class_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match serde_json::to_string(&self) {
                    Ok(s) => {
                        // For simple string, remove the quote.
                        let stripped = if s.matches('"').count() == 2 {
                            s.strip_prefix('"').and_then(|s| s.strip_suffix('"'))
                        } else {
                            None
                        };
                        write!(f, "{}", stripped.unwrap_or(s.as_str()))
                    }
                    Err(e) => {
                        log::error!(
                            "BUG: Failed to convert {self:?} into JSON: {e}"
                        );
                        write!(f, "{self:?}")
                    }
                }
            }
        }
    };

    TokenStream::from(expanded)
}

#[proc_macro_derive(JsonDisplayHideSecrets)]
pub fn derive_json_display_hide_secrets(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let class_name = &input.ident;

    let expanded = quote::quote! {
        impl std::fmt::Display for #class_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut self_clone = self.clone();
                self_clone.hide_secrets();
                match serde_json::to_string(&self_clone) {
                    Ok(s) => write!(f, "{}", s),
                    Err(e) => {
                        log::error!(
                            "BUG: Failed to convert {self_clone:?} \
                            into JSON: {e}"
                        );
                        write!(f, "{self_clone:?}")
                    }
                }
            }
        }
    };

    TokenStream::from(expanded)
}

#[proc_macro_derive(DebugHideSecrets)]
pub fn derive_debug_hide_secrets(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let class_name = &input.ident;

    // Falls back to the type name only, `{:?}` would recurse.
    let expanded = quote::quote! {
        impl std::fmt::Debug for #class_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut self_clone = self.clone();
                self_clone.hide_secrets();
                match serde_json::to_string(&self_clone) {
                    Ok(s) => write!(f, "{}", s),
                    Err(_) => write!(f, "{}", stringify!(#class_name)),
                }
            }
        }
    };

    TokenStream::from(expanded)
}
