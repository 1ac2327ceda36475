use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{
    Pagination, Product, ProductFields, ProductFilter, ProductId, UpdateProduct,
};

/// Storage for products.
///
/// Absence is reported as `None`/`false`; turning it into a not-found error
/// is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new record; the store assigns the id and timestamps.
    async fn create(&self, fields: ProductFields) -> ProductResult<Product>;

    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>>;

    /// One page of matches, newest first, together with the total number of
    /// matches. Both must come from the same read.
    async fn list(
        &self,
        filter: ProductFilter,
        page: Pagination,
    ) -> ProductResult<(Vec<Product>, u64)>;

    async fn count(&self, filter: ProductFilter) -> ProductResult<u64>;

    async fn exists(&self, id: ProductId) -> ProductResult<bool>;

    /// Overwrite the record with exactly `fields`, keeping id and `createdAt`.
    async fn replace(&self, id: ProductId, fields: ProductFields)
    -> ProductResult<Option<Product>>;

    /// Set only the fields present in `changes` and refresh `updatedAt`.
    async fn update(&self, id: ProductId, changes: UpdateProduct)
    -> ProductResult<Option<Product>>;

    /// `true` if a record was removed.
    async fn delete(&self, id: ProductId) -> ProductResult<bool>;
}
