use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, GenericArgument, Meta, PathArguments, Token, Type, Visibility,
    ext::IdentExt, parse_macro_input,
};

/// Derives `env_loadr::Record` for a struct with named fields
///
/// Every `pub` field is bound, in declaration order. Per-field options go in
/// `#[field(...)]`:
///
/// - `env = "KEY"` overrides the key derived from the field name
/// - `default = "literal"` is used when the environment has no value
/// - `delimiter = "|"` splits `Vec<String>` fields (default `,`)
/// - `skip` leaves the field out
#[proc_macro_derive(Record, attributes(field))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_record(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_record(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields: Vec<&syn::Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut descriptors = Vec::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let config = parse_field_config(&field.attrs)?;

        if !is_exported(&field.vis) {
            if config.present {
                return Err(syn::Error::new_spanned(
                    field,
                    "#[field(...)] has no effect on private fields, make the field pub",
                ));
            }
            continue;
        }
        if config.skip {
            continue;
        }

        let name = ident.unraw().to_string();
        let env = option_tokens(config.env.as_ref());
        let default = option_tokens(config.default.as_ref());
        let delimiter = option_tokens(config.delimiter.as_ref());
        let metadata = quote! {
            ::env_loadr::FieldMetadata {
                env: #env,
                default: #default,
                delimiter: #delimiter,
            }
        };

        let descriptor = if is_supported(&field.ty) {
            quote! {
                ::env_loadr::FieldDescriptor::new(#name, #metadata, &mut self.#ident)
            }
        } else {
            let type_name = type_text(&field.ty);
            quote! {
                ::env_loadr::FieldDescriptor::unsupported(#name, #metadata, #type_name)
            }
        };
        descriptors.push(descriptor);
    }

    Ok(quote! {
        impl #impl_generics ::env_loadr::Record for #struct_name #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::env_loadr::FieldDescriptor<'_>> {
                ::std::vec![
                    #(#descriptors),*
                ]
            }
        }
    })
}

#[derive(Debug, Default)]
struct FieldConfig {
    present: bool,
    env: Option<syn::LitStr>,
    default: Option<syn::LitStr>,
    delimiter: Option<syn::LitStr>,
    skip: bool,
}

/// Parse #[field(env = "X", default = "Y", delimiter = "Z", skip)] syntax
fn parse_field_config(attrs: &[Attribute]) -> syn::Result<FieldConfig> {
    let mut config = FieldConfig::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("field")) {
        config.present = true;
        let list = match &attr.meta {
            Meta::List(list) => list,
            _ => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "field attribute must be a list: #[field(env = \"...\", ...)]",
                ));
            }
        };

        list.parse_nested_meta(|meta| {
            let key = meta
                .path
                .get_ident()
                .ok_or_else(|| meta.error("expected identifier"))?
                .to_string();

            if key == "skip" {
                config.skip = true;
                return Ok(());
            }

            let slot = match key.as_str() {
                "env" => &mut config.env,
                "default" => &mut config.default,
                "delimiter" => &mut config.delimiter,
                other => {
                    return Err(meta.error(format!(
                        "unknown field option `{}`, expected env, default, delimiter or skip",
                        other
                    )));
                }
            };
            if slot.is_some() {
                return Err(meta.error(format!("duplicate `{}` option", key)));
            }

            meta.input.parse::<Token![=]>()?;
            let value: syn::LitStr = meta.input.parse().map_err(|_| {
                meta.error(format!("`{}` must be a string literal", key))
            })?;
            *slot = Some(value);
            Ok(())
        })?;
    }

    Ok(config)
}

fn is_exported(vis: &Visibility) -> bool {
    !matches!(vis, Visibility::Inherited)
}

fn option_tokens(value: Option<&syn::LitStr>) -> proc_macro2::TokenStream {
    match value {
        Some(lit) => quote! { ::core::option::Option::Some(#lit) },
        None => quote! { ::core::option::Option::None },
    }
}

/// Source text of a type with token spacing removed, for error messages
fn type_text(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}

/// Types the runtime has a `FieldValue` impl for
fn is_supported(ty: &Type) -> bool {
    match single_generic(ty, "Option") {
        Some(inner) => is_scalar(inner),
        None => is_scalar(ty),
    }
}

fn is_scalar(ty: &Type) -> bool {
    if let Some(inner) = single_generic(ty, "Vec") {
        return is_plain(inner, &["String"]);
    }
    is_plain(ty, &["bool", "String", "i8", "i16", "i32", "i64", "isize"])
}

/// A bare path type whose last segment is one of `names`, without generics
fn is_plain(ty: &Type, names: &[&str]) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| {
                matches!(segment.arguments, PathArguments::None)
                    && names.iter().any(|name| segment.ident == name)
            }),
        _ => false,
    }
}

/// Extract `T` from `wrapper<T>`
fn single_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first() {
        Some(GenericArgument::Type(inner)) => Some(inner),
        _ => None,
    }
}
