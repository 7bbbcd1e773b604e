use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

pub fn derive_listener(input: TokenStream) -> syn::Result<TokenStream> {
    let ast: DeriveInput = syn::parse2(input)?;

    // The type name doubles as the listener's stable name
    let struct_name = &ast.ident;
    let name = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    // `::rusty_emitter` resolves inside this crate through `extern crate self`.
    Ok(quote! {
        impl #impl_generics ::rusty_emitter::Listener for #struct_name #ty_generics #where_clause {
            const NAME: &'static str = #name;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_names_the_listener_after_the_type() {
        let output = derive_listener(quote! { struct Worker { id: u32 } }).unwrap();

        let item: syn::ItemImpl = syn::parse2(output).unwrap();
        let (_, path, _) = item.trait_.expect("trait impl");
        assert_eq!(path.segments.last().unwrap().ident, "Listener");
        assert_eq!(item.self_ty, syn::parse_quote!(Worker));
        let items = &item.items;
        let rendered = quote!(#(#items)*).to_string();
        assert!(rendered.contains("\"Worker\""));
    }

    #[test]
    fn derive_rejects_non_items() {
        assert!(derive_listener(quote! { 1 + 2 }).is_err());
    }
}
