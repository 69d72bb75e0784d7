/// A mountable group of HTTP endpoints.
///
/// Implemented by `#[pricewatch_macros::controller]`, which assembles
/// the router from the route attributes on the annotated impl block.
pub trait Controller {
    fn router() -> axum::Router;
}
