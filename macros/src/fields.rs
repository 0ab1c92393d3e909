use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Token, parse_macro_input};

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let names = wire_names(input)?;

    Ok(quote! {
        impl #impl_generics ::jsonvet::JsonFields for #struct_name #ty_generics #where_clause {
            fn field_names() -> &'static [&'static str] {
                &[#(#names),*]
            }
        }
    })
}

/// Wire-visible field names in declaration order, honouring the serde
/// attributes the deserializer uses.
fn wire_names(input: &DeriveInput) -> syn::Result<Vec<String>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "JsonFields can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "JsonFields can only be derived for structs with named fields",
            ));
        }
    };

    let rename_all = container_rename_all(&input.attrs)?;
    let mut names = Vec::with_capacity(fields.len());

    for field in fields {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        if let Some(rename) = attrs.rename {
            names.push(rename);
            continue;
        }

        let ident = field.ident.as_ref().expect("named field");
        let bare = ident.to_string();
        let bare = bare.strip_prefix("r#").unwrap_or(&bare).to_owned();
        names.push(match &rename_all {
            Some(rule) => apply_rename_all(rule, &bare)
                .ok_or_else(|| syn::Error::new_spanned(ident, unknown_rename_all(rule)))?,
            None => bare,
        });
    }

    Ok(names)
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = FieldAttrs::default();

        for attr in attrs {
            if !attr.path().is_ident("serde") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
                    out.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    if meta.input.peek(Token![=]) {
                        let lit: LitStr = meta.value()?.parse()?;
                        out.rename = Some(lit.value());
                        Ok(())
                    } else {
                        // rename(serialize = "...", deserialize = "...") —
                        // only the deserialize name matters for decoding.
                        meta.parse_nested_meta(|inner| {
                            let lit: LitStr = inner.value()?.parse()?;
                            if inner.path.is_ident("deserialize") {
                                out.rename = Some(lit.value());
                            }
                            Ok(())
                        })
                    }
                } else {
                    consume_value(&meta)
                }
            })?;
        }

        Ok(out)
    }
}

fn container_rename_all(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename_all = None;

    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if meta.input.peek(Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    rename_all = Some(lit.value());
                    Ok(())
                } else {
                    meta.parse_nested_meta(|inner| {
                        let lit: LitStr = inner.value()?.parse()?;
                        if inner.path.is_ident("deserialize") {
                            rename_all = Some(lit.value());
                        }
                        Ok(())
                    })
                }
            } else {
                consume_value(&meta)
            }
        })?;
    }

    Ok(rename_all)
}

/// Consumes the value of a serde attribute this derive does not interpret,
/// so parsing can continue past it.
fn consume_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _value: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Mirrors serde's field-name case transforms (field identifiers are
/// snake_case by convention).
fn apply_rename_all(rule: &str, name: &str) -> Option<String> {
    let pascal = || {
        name.split('_')
            .map(|segment| {
                let mut chars = segment.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<String>()
    };

    match rule {
        "lowercase" => Some(name.to_lowercase()),
        "UPPERCASE" | "SCREAMING_SNAKE_CASE" => Some(name.to_uppercase()),
        "PascalCase" => Some(pascal()),
        "camelCase" => {
            let pascal = pascal();
            let mut chars = pascal.chars();
            chars.next().map(|first| {
                first
                    .to_lowercase()
                    .chain(chars)
                    .collect::<String>()
            })
        }
        "snake_case" => Some(name.to_owned()),
        "kebab-case" => Some(name.replace('_', "-")),
        "SCREAMING-KEBAB-CASE" => Some(name.to_uppercase().replace('_', "-")),
        _ => None,
    }
}

fn unknown_rename_all(rule: &str) -> String {
    format!("unknown #[serde(rename_all = \"{rule}\")] case convention")
}

// ============================================================================
// TESTS
// ============================================================================
