use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{parse_macro_input, Attribute, ImplItem, ItemImpl, LitInt, LitStr, Meta, Type};

/// Macro that generates an Axum router from struct methods with route attributes
///
/// Usage:
/// ```ignore
/// struct ProductController;
///
/// #[controller]
/// impl ProductController {
///     #[get("/")]
///     async fn list() -> String {
///         "products".to_string()
///     }
///
///     #[post("/refresh")]
///     async fn refresh() -> String {
///         "refreshed".to_string()
///     }
/// }
/// ```
///
/// The expansion adds a `pricewatch_core::controller::Controller` impl
/// assembling the router, one `#[utoipa::path]` wrapper function per
/// route for OpenAPI generation, and a `<Name>Api` struct listing the
/// controller's paths for nesting into the main API doc.
#[proc_macro_attribute]
pub fn controller(_args: TokenStream, input: TokenStream) -> TokenStream {
    let impl_block = parse_macro_input!(input as ItemImpl);
    let self_ty = &impl_block.self_ty;
    let struct_name = match &**self_ty {
        syn::Type::Path(type_path) => type_path.path.segments.last().map(|s| &s.ident).unwrap(),
        _ => {
            return syn::Error::new(impl_block.span(), "Expected a struct type")
                .to_compile_error()
                .into();
        }
    };

    let mut route_registrations = Vec::new();
    let mut openapi_path_functions = Vec::new();
    let mut openapi_path_names = Vec::new();

    // Iterate through items in the impl block
    for item in &impl_block.items {
        if let ImplItem::Fn(method) = item {
            // Check for route attributes
            let Some((method_name, path)) = extract_route_attr(&method.attrs) else {
                continue;
            };

            let fn_name = &method.sig.ident;

            // Generate route registration based on HTTP method
            let axum_method = format_ident!("{}", method_name);
            route_registrations.push(quote! {
                router = router.route(#path, axum::routing::#axum_method(#struct_name::#fn_name));
            });

            // Wrapper function carrying the #[utoipa::path] attribute.
            // It mirrors the handler signature but only exists for
            // OpenAPI generation and is never called.
            let wrapper_name = format_ident!("__utoipa_path_{}", fn_name);
            let utoipa_method = format_ident!("{}", method_name);
            let path_lit = LitStr::new(&path, method.span());

            let fn_vis = &method.vis;
            let fn_async = method.sig.asyncness;
            let fn_inputs = &method.sig.inputs;
            let fn_output = &method.sig.output;

            let responses = extract_response_attrs(&method.attrs);
            let path_attr_tokens = if responses.is_empty() {
                quote! {
                    #utoipa_method,
                    path = #path_lit,
                }
            } else {
                quote! {
                    #utoipa_method,
                    path = #path_lit,
                    responses(
                        #(#responses),*
                    ),
                }
            };

            let struct_name_str = struct_name.to_string();
            let fn_name_str = fn_name.to_string();

            openapi_path_functions.push(quote! {
                #[doc = concat!("OpenAPI wrapper for ", #struct_name_str, "::", #fn_name_str)]
                #[utoipa::path(
                    #path_attr_tokens
                )]
                #[allow(dead_code, unused_variables)]
                #fn_vis #fn_async fn #wrapper_name(#fn_inputs) #fn_output {
                    unimplemented!("documentation-only wrapper function")
                }
            });
            openapi_path_names.push(wrapper_name);
        }
    }

    // "ProductController" -> "ProductControllerApi"
    let api_struct_name = format_ident!("{}Api", struct_name);

    let expanded = quote! {
        // The original impl block
        #impl_block

        impl pricewatch_core::controller::Controller for #self_ty {
            /// Generates an Axum router from the controller methods
            fn router() -> axum::Router {
                use axum::Router;

                let mut router = Router::new();

                #(#route_registrations)*

                router
            }
        }

        // Auto-generated utoipa path wrapper functions (must be at module level)
        #(#openapi_path_functions)*

        // Lists the paths found in this controller for nesting into the
        // main ApiDoc.
        #[derive(utoipa::OpenApi)]
        #[openapi(
            paths(
                #(#openapi_path_names),*
            )
        )]
        pub struct #api_struct_name;
    };

    TokenStream::from(expanded)
}

/// Extract route information from attributes
/// Looks for route macro attributes like #[get("/path")] or #[pricewatch_macros::get("/path")]
fn extract_route_attr(attrs: &[Attribute]) -> Option<(String, String)> {
    for attr in attrs {
        let path_segments: Vec<_> = attr.path().segments.iter().collect();
        if path_segments.is_empty() {
            continue;
        }

        // Last segment handles both #[get("/path")] and #[pricewatch_macros::get("/path")]
        let last_segment = path_segments.last().unwrap();
        let method = last_segment.ident.to_string().to_lowercase();
        if matches!(method.as_str(), "get" | "post" | "put" | "delete" | "patch") {
            if let Meta::List(meta) = &attr.meta {
                // The path is expected to be a single string literal
                let tokens = meta.tokens.clone();
                if let Ok(path_lit) = syn::parse2::<LitStr>(tokens) {
                    return Some((method, path_lit.value()));
                }
            }
        }
    }
    None
}

/// Extract all `#[api_response(...)]` attributes into utoipa response tuples.
///
/// Supported form (multiple attributes allowed, one per status code):
/// - #[api_response(status = 200, body = Type, description = "Success")]
///
/// `status` defaults to 200 and `description` to "Success" when absent;
/// `body` is required.
fn extract_response_attrs(attrs: &[Attribute]) -> Vec<proc_macro2::TokenStream> {
    let mut responses = Vec::new();

    for attr in attrs {
        let path_segments: Vec<_> = attr.path().segments.iter().collect();
        if path_segments.is_empty() {
            continue;
        }

        let last_segment = path_segments.last().unwrap();
        if last_segment.ident != "api_response" {
            continue;
        }

        if let Meta::List(meta) = &attr.meta {
            if let Ok(parsed) = syn::parse2::<ApiResponseArgs>(meta.tokens.clone()) {
                let status = parsed
                    .status
                    .unwrap_or_else(|| LitInt::new("200", proc_macro2::Span::call_site()));
                let description = parsed.description.unwrap_or_else(|| "Success".to_string());
                let body = parsed.body;

                responses.push(quote! {
                    (status = #status, description = #description, body = #body)
                });
            }
        }
    }

    responses
}

/// Helper struct to parse api_response attribute arguments
struct ApiResponseArgs {
    status: Option<LitInt>,
    body: Type,
    description: Option<String>,
}

impl syn::parse::Parse for ApiResponseArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut status = None;
        let mut body = None;
        let mut description = None;

        // Parse comma-separated key-value pairs
        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            let key_str = key.to_string();

            if key_str == "status" {
                let _eq: syn::Token![=] = input.parse()?;
                status = Some(input.parse::<LitInt>()?);
            } else if key_str == "body" {
                let _eq: syn::Token![=] = input.parse()?;
                body = Some(input.parse()?);
            } else if key_str == "description" {
                let _eq: syn::Token![=] = input.parse()?;
                let lit: LitStr = input.parse()?;
                description = Some(lit.value());
            } else {
                return Err(syn::Error::new(
                    key.span(),
                    format!("Unknown argument: {}", key_str),
                ));
            }

            if !input.is_empty() {
                let _comma: syn::Token![,] = input.parse()?;
            }
        }

        let Some(body) = body else {
            return Err(input.error("`body` is required"));
        };

        Ok(ApiResponseArgs {
            status,
            body,
            description,
        })
    }
}

/// Macro for GET route
#[proc_macro_attribute]
pub fn get(args: TokenStream, input: TokenStream) -> TokenStream {
    route_attr_macro("get", args, input)
}

/// Macro for POST route
#[proc_macro_attribute]
pub fn post(args: TokenStream, input: TokenStream) -> TokenStream {
    route_attr_macro("post", args, input)
}

/// Macro for PUT route
#[proc_macro_attribute]
pub fn put(args: TokenStream, input: TokenStream) -> TokenStream {
    route_attr_macro("put", args, input)
}

/// Macro for DELETE route
#[proc_macro_attribute]
pub fn delete(args: TokenStream, input: TokenStream) -> TokenStream {
    route_attr_macro("delete", args, input)
}

/// Macro for PATCH route
#[proc_macro_attribute]
pub fn patch(args: TokenStream, input: TokenStream) -> TokenStream {
    route_attr_macro("patch", args, input)
}

/// Attribute macro for documenting a route's responses
///
/// Chain one attribute per status code:
/// ```ignore
/// #[get("/{id}")]
/// #[api_response(status = 200, body = Product, description = "Product found")]
/// #[api_response(status = 404, body = SimpleResponse, description = "Unknown product")]
/// async fn show() -> ProductResponse { ... }
/// ```
///
/// Consumed by `#[controller]`; as a standalone attribute it is a
/// pass-through.
#[proc_macro_attribute]
pub fn api_response(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Route attribute macros are pass-throughs: `#[controller]` runs on
/// the impl block first and reads them before they expand, so by the
/// time these run there is nothing left to do.
fn route_attr_macro(_method: &str, _args: TokenStream, input: TokenStream) -> TokenStream {
    input
}
