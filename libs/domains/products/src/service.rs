//! Product Service - validation and not-found mapping over the repository

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, ListParams, Product, ProductFields, ProductId, ProductPage, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Missing fields are reported before any value is validated.
fn complete_fields(input: CreateProduct) -> ProductResult<ProductFields> {
    let missing = input.missing_fields();
    if !missing.is_empty() {
        return Err(ProductError::MissingFields(missing));
    }
    input.validate()?;
    input.into_fields()
}

pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a product; every one of the four fields must be present.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let fields = complete_fields(input)?;
        self.repository.create(fields).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// One page of products matching `params`, newest first.
    ///
    /// `params` is validated here too: callers other than the HTTP handlers
    /// pass it unchecked.
    #[instrument(skip(self))]
    pub async fn list_products(&self, params: ListParams) -> ProductResult<ProductPage> {
        params.validate()?;
        let filter = params.filter();
        filter.check_price_range()?;
        let window = params.pagination();

        let (results, total) = self.repository.list(filter, window).await?;

        Ok(ProductPage {
            page: window.page,
            limit: window.limit,
            total,
            results,
        })
    }

    /// Number of products matching the filters in `params`; paging values are
    /// validated but otherwise ignored.
    #[instrument(skip(self))]
    pub async fn count_products(&self, params: ListParams) -> ProductResult<u64> {
        params.validate()?;
        let filter = params.filter();
        filter.check_price_range()?;

        self.repository.count(filter).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn ensure_exists(&self, id: ProductId) -> ProductResult<()> {
        if self.repository.exists(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }

    /// Overwrite a product with exactly the supplied fields.
    ///
    /// Missing fields are rejected before the store is touched.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn replace_product(
        &self,
        id: ProductId,
        input: CreateProduct,
    ) -> ProductResult<Product> {
        let fields = complete_fields(input)?;

        self.repository
            .replace(id, fields)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Change only the supplied fields.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(&self, id: ProductId, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }
}
