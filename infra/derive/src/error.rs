use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, GenericArgument, Ident, PathArguments, Type, Variant};

/// One enum variant, reduced to the pieces the expansion cares about.
struct VariantShape<'a> {
    ident: &'a Ident,
    cfg_attrs: Vec<&'a syn::Attribute>,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
}

pub(crate) fn expand(input: &DeriveInput) -> TokenStream {
    match try_expand(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn try_expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "flag_error supports only enums"));
    };

    let shapes =
        data.variants.iter().map(VariantShape::parse).collect::<syn::Result<Vec<_>>>()?;

    let name = &input.ident;
    let ext_trait = format_ident!("{}Ext", name);
    let derives = missing_derives(input);
    let context_ext = context_ext(name, &ext_trait, &shapes);
    let source_impls = shapes.iter().filter_map(|shape| shape.source_impls(name, &ext_trait));
    let internal_impls = internal_impls(name, &shapes);

    Ok(quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #context_ext
        #(#source_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    })
}

impl<'a> VariantShape<'a> {
    fn parse(variant: &'a Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "flag_error variants need named fields",
            ));
        };

        let mut source = None;
        let mut has_context = false;
        for field in &fields.named {
            let Some(ident) = &field.ident else { continue };
            if ident == "context" {
                if !is_context_type(&field.ty) {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "context field must be Option<Cow<'static, str>>",
                    ));
                }
                has_context = true;
            } else if ident == "source" || has_attr(field, "source") || has_attr(field, "from") {
                source = Some((ident, &field.ty));
            }
        }

        if source.is_some() && !has_context {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "flag_error needs `context: Option<Cow<'static, str>>` on variants with a source",
            ));
        }

        let cfg_attrs =
            variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect();

        Ok(Self { ident: &variant.ident, cfg_attrs, source, has_context })
    }

    fn source_impls(&self, name: &Ident, ext_trait: &Ident) -> Option<TokenStream> {
        if self.ident == "Internal" {
            return None;
        }
        let (field, ty) = self.source?;
        let variant = self.ident;
        let cfg_attrs = &self.cfg_attrs;

        Some(quote! {
            #(#cfg_attrs)*
            #[automatically_derived]
            impl From<#ty> for #name {
                #[inline]
                fn from(#field: #ty) -> Self { Self::#variant { #field, context: None } }
            }

            #(#cfg_attrs)*
            impl<T> #ext_trait<T> for std::result::Result<T, #ty> {
                #[inline]
                fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                    self.map_err(|#field| #name::#variant { #field, context: Some(context.into()) })
                }
            }
        })
    }
}

fn context_ext(name: &Ident, ext_trait: &Ident, shapes: &[VariantShape<'_>]) -> TokenStream {
    let arms = shapes.iter().filter(|shape| shape.has_context).map(|shape| {
        let cfg_attrs = &shape.cfg_attrs;
        let ident = shape.ident;
        quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
    });

    quote! {
        pub trait #ext_trait<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext_trait<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut e| {
                    #[allow(unreachable_patterns)]
                    match &mut e {
                        #(#arms)*
                        _ => {}
                    }
                    e
                })
            }
        }
    }
}

fn internal_impls(name: &Ident, shapes: &[VariantShape<'_>]) -> TokenStream {
    let Some(internal) = shapes.iter().find(|shape| shape.ident == "Internal") else {
        return quote!();
    };
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(message), context: None }
            }
        }
        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("derive") {
            continue;
        }
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                present.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    let mut tokens = Vec::new();
    if !present.contains("Debug") {
        tokens.push(quote! { Debug });
    }
    if !present.contains("Error") {
        tokens.push(quote! { ::thiserror::Error });
    }
    if tokens.is_empty() { quote!() } else { quote! { #[derive(#(#tokens),*)] } }
}

fn has_attr(field: &syn::Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn is_context_type(ty: &Type) -> bool {
    generic_type(ty, "Option").and_then(cow_static_str).is_some()
}

/// Peels `Wrapper<T>` when the path's last segment matches, yielding `T`.
fn generic_type<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else { return None };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

fn cow_static_str(ty: &Type) -> Option<()> {
    let Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    if segment.ident != "Cow" {
        return None;
    }
    let PathArguments::AngleBracketed(generics) = &segment.arguments else { return None };
    let mut generics = generics.args.iter();
    let Some(GenericArgument::Lifetime(lifetime)) = generics.next() else { return None };
    if lifetime.ident != "static" {
        return None;
    }
    let Some(GenericArgument::Type(Type::Path(inner))) = generics.next() else { return None };
    (inner.path.segments.last()?.ident == "str").then_some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_rejects_non_enums() {
        let input: DeriveInput = parse_quote! {
            struct NotAnEnum {
                message: String,
            }
        };
        let err = try_expand(&input).unwrap_err();
        assert_eq!(err.to_string(), "flag_error supports only enums");
    }

    #[test]
    fn test_rejects_tuple_variants() {
        let input: DeriveInput = parse_quote! {
            enum Broken {
                Tuple(String),
            }
        };
        let err = try_expand(&input).unwrap_err();
        assert_eq!(err.to_string(), "flag_error variants need named fields");
    }

    #[test]
    fn test_rejects_malformed_context_fields() {
        let input: DeriveInput = parse_quote! {
            enum Broken {
                Oops { message: String, context: Option<String> },
            }
        };
        let err = try_expand(&input).unwrap_err();
        assert_eq!(err.to_string(), "context field must be Option<Cow<'static, str>>");
    }

    #[test]
    fn test_requires_context_next_to_a_source() {
        let input: DeriveInput = parse_quote! {
            enum Broken {
                Io { source: std::io::Error },
            }
        };
        let err = try_expand(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "flag_error needs `context: Option<Cow<'static, str>>` on variants with a source"
        );
    }

    #[test]
    fn test_expansion_emits_the_ext_trait_and_derives() {
        let input: DeriveInput = parse_quote! {
            enum Demo {
                Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
            }
        };
        let tokens = try_expand(&input).unwrap().to_string();

        assert!(tokens.contains("trait DemoExt"));
        assert!(tokens.contains("thiserror"));
        assert!(tokens.contains("fn format_context"));
    }
}
