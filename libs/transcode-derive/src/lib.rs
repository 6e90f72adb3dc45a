use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Derive macro for transcodable records.
///
/// Generates:
///
/// - `record_schema() -> &'static transcode::Schema` — field descriptors in
///   declaration order, built once.
/// - `impl transcode::Record` — indexed field read/write through
///   `transcode::FieldValue`.
///
/// # Example
///
/// ```ignore
/// #[derive(Default, Record)]
/// pub struct MaterialGroup {
///     pub id: Option<ObjectId>,
///
///     #[transcode(rename = "name")]
///     pub title: String,
///
///     #[transcode(skip)]
///     pub tags: Vec<String>,
/// }
/// ```
///
/// Every non-skipped field type must implement `transcode::FieldValue`.
/// Field types outside the supported kinds (collections, nested structs)
/// must be marked `#[transcode(skip)]`.
#[proc_macro_derive(Record, attributes(transcode))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

struct FieldSpec {
    ident: syn::Ident,
    ty: syn::Type,
    match_name: String,
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let name_str = name.unraw().to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record only supports structs",
            ))
        }
    };

    let mut specs = Vec::new();

    for field in fields {
        let ident = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;

        // Parse #[transcode(...)] attribute.
        let mut rename: Option<String> = None;
        let mut skip = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("transcode") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                } else if meta.path.is_ident("skip") {
                    skip = true;
                } else {
                    return Err(meta.error("unknown transcode attribute (expected `rename` or `skip`)"));
                }
                Ok(())
            })?;
        }

        if skip {
            continue;
        }

        let match_name = rename.unwrap_or_else(|| ident.unraw().to_string());
        if specs.iter().any(|s: &FieldSpec| s.match_name == match_name) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate record field name '{match_name}'"),
            ));
        }

        specs.push(FieldSpec {
            ident: ident.clone(),
            ty: field.ty.clone(),
            match_name,
        });
    }

    let mut descriptor_tokens = Vec::new();
    let mut read_arms = Vec::new();
    let mut write_arms = Vec::new();

    for (index, spec) in specs.iter().enumerate() {
        let FieldSpec { ident, ty, match_name } = spec;

        descriptor_tokens.push(quote! {
            ::transcode::FieldDescriptor::of::<#ty>(#match_name)
        });

        read_arms.push(quote! {
            #index => <#ty as ::transcode::FieldValue>::to_value(&self.#ident),
        });

        write_arms.push(quote! {
            #index => ::transcode::record::assign(&mut self.#ident, __value, #name_str, #match_name),
        });
    }

    let expanded = quote! {
        impl #name {
            pub fn record_schema() -> &'static ::transcode::Schema {
                static __SCHEMA: ::std::sync::OnceLock<::transcode::Schema> = ::std::sync::OnceLock::new();
                __SCHEMA.get_or_init(|| {
                    ::transcode::Schema::new(#name_str, ::std::vec![
                        #(#descriptor_tokens),*
                    ])
                })
            }
        }

        impl ::transcode::Record for #name {
            fn schema(&self) -> &'static ::transcode::Schema {
                Self::record_schema()
            }

            fn field(&self, __index: usize) -> ::std::option::Option<::transcode::Value> {
                match __index {
                    #(#read_arms)*
                    _ => ::std::option::Option::None,
                }
            }

            fn set_field(
                &mut self,
                __index: usize,
                __value: ::transcode::Value,
            ) -> ::std::result::Result<(), ::transcode::TranscodeError> {
                match __index {
                    #(#write_arms)*
                    _ => ::std::result::Result::Err(::transcode::TranscodeError::invalid_destination(
                        ::std::format!("{} has no field #{}", #name_str, __index)
                    )),
                }
            }
        }
    };

    Ok(TokenStream::from(expanded))
}
