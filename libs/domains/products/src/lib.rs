//! Products Domain
//!
//! CRUD over a single `Product` resource stored in MongoDB.
//!
//! ```text
//! handlers   → HTTP endpoints, extractors, OpenAPI
//! service    → required-field and value checks, not-found mapping
//! repository → storage trait
//! mongodb    → MongoDB implementation
//! models     → entity, id, request/response types
//! ```
//!
//! ```rust,no_run
//! use domain_products::{handlers, MongoProductRepository, ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoProductRepository::new(&client.database("products"));
//! repository.init_indexes().await?;
//!
//! let router = handlers::router(ProductService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, DeleteResponse, ListParams, Pagination, Product, ProductFields, ProductFilter,
    ProductId, ProductPage, UpdateProduct,
};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
