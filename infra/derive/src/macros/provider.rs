use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::meta::ParseNestedMeta;
use syn::{ItemStruct, LitStr};

#[derive(Default)]
pub struct ProviderArgs {
    id: Option<LitStr>,
}

impl ProviderArgs {
    pub fn parse(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("id") {
            let value: LitStr = meta.value()?.parse()?;
            if value.value().trim().is_empty() {
                return Err(meta.error("provider id cannot be empty"));
            }
            self.id = Some(value);
            Ok(())
        } else {
            Err(meta.error("unsupported gate_provider argument, expected `id = \"...\"`"))
        }
    }
}

pub fn expand(args: ProviderArgs, input: ItemStruct) -> TokenStream {
    let Some(id) = args.id else {
        return syn::Error::new_spanned(&input.ident, "gate_provider requires `id = \"...\"`")
            .to_compile_error();
    };

    let handle = &input.ident;
    let vis = &input.vis;
    let attrs = &input.attrs;
    let fields = &input.fields;
    let semi = matches!(fields, syn::Fields::Unnamed(_) | syn::Fields::Unit).then(|| quote!(;));
    let inner = format_ident!("{handle}Inner");

    quote! {
        #(#attrs)*
        #[derive(Debug, Clone)]
        #vis struct #inner #fields #semi

        #[derive(Debug, Clone)]
        #vis struct #handle {
            inner: ::std::sync::Arc<#inner>,
        }

        impl #handle {
            /// Unique identifier of this provider.
            pub const IDENTIFIER: &'static str = #id;

            pub fn new(inner: #inner) -> Self {
                Self { inner: ::std::sync::Arc::new(inner) }
            }
        }

        impl ::std::ops::Deref for #handle {
            type Target = #inner;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::gate_kernel::domain::registry::ProviderSlice for #handle {
            fn identifier(&self) -> &'static str {
                Self::IDENTIFIER
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    }
}
