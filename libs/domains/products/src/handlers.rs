//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderName, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, JsonBody, ValidatedJson, ValidatedQuery,
    errors::handlers::method_not_allowed,
    errors::responses::{
        BadRequestIdResponse, BadRequestQueryResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, DeleteResponse, ListParams, Product, ProductId, ProductPage, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Response header carrying the number of matching products on `HEAD /products`.
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

pub const DELETED_MESSAGE: &str = "Product deleted successfully";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        count_products,
        create_product,
        get_product,
        product_exists,
        replace_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, ProductPage, DeleteResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            BadRequestQueryResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Products", description = "Product CRUD endpoints")
    )
)]
pub struct ApiDoc;

/// Routes for `/products` and `/products/{id}`.
///
/// Verbs without a handler answer 405 with a JSON body.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/products",
            get(list_products)
                .head(count_products)
                .post(create_product)
                .fallback(method_not_allowed),
        )
        .route(
            "/products/{id}",
            get(get_product)
                .head(product_exists)
                .put(replace_product)
                .patch(update_product)
                .delete(delete_product)
                .fallback(method_not_allowed),
        )
        .with_state(shared_service)
}

/// List products, newest first
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ListParams),
    responses(
        (status = 200, description = "One page of matching products", body = ProductPage),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_products(params).await?;
    Ok(Json(page))
}

/// Count matching products
///
/// Accepts the same filters as the list endpoint and answers with the
/// count in `X-Total-Count` and no body.
#[utoipa::path(
    head,
    path = "/products",
    tag = "Products",
    params(ListParams),
    responses(
        (status = 200, description = "Count of matching products",
            headers(("x-total-count" = u64, description = "Number of matching products"))),
        (status = 400, description = "Invalid query parameters")
    )
)]
async fn count_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> ProductResult<impl IntoResponse> {
    let total = service.count_products(params).await?;
    Ok((StatusCode::OK, [(TOTAL_COUNT_HEADER, total.to_string())]))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(input): JsonBody<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath<ProductId>,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Check that a product exists
#[utoipa::path(
    head,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Product exists"),
        (status = 400, description = "Malformed product ID"),
        (status = 404, description = "Product not found")
    )
)]
async fn product_exists<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath<ProductId>,
) -> ProductResult<StatusCode> {
    service.ensure_exists(id).await?;
    Ok(StatusCode::OK)
}

/// Replace a product
///
/// All four fields are required; anything else stored on the record is dropped.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24 hex characters)")
    ),
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product replaced", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath<ProductId>,
    JsonBody(input): JsonBody<CreateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.replace_product(id, input).await?;
    Ok(Json(product))
}

/// Update some fields of a product
#[utoipa::path(
    patch,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24 hex characters)")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath<ProductId>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeleteResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath<ProductId>,
) -> ProductResult<Json<DeleteResponse>> {
    service.delete_product(id).await?;
    Ok(Json(DeleteResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}
