//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "CRUD API for products stored in MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    )
)]
struct ServiceDoc;

/// Combined OpenAPI documentation for Products API
///
/// Product routes are mounted at the root, so the domain document is merged
/// as is rather than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_products::ApiDoc::openapi());
        doc
    }
}
