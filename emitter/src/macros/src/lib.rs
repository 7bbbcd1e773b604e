mod listener;

use proc_macro::TokenStream;

#[proc_macro_derive(Listener)]
pub fn derive_listener(item: TokenStream) -> TokenStream {
    listener::derive_listener(item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
