//! In-memory `ProductRepository` for handler tests.

use async_trait::async_trait;
use chrono::Utc;
use domain_products::*;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn matching(&self, filter: &ProductFilter) -> Vec<Product> {
        let products = self.products.read().await;
        let mut matches: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matches.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        matches
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, fields: ProductFields) -> ProductResult<Product> {
        let product = Product::new(ProductId::new(), fields, Utc::now());
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: ProductFilter,
        page: Pagination,
    ) -> ProductResult<(Vec<Product>, u64)> {
        let matches = self.matching(&filter).await;
        let total = matches.len() as u64;
        let results = matches
            .into_iter()
            .skip(usize::try_from(page.skip()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
            .collect();
        Ok((results, total))
    }

    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        Ok(self.matching(&filter).await.len() as u64)
    }

    async fn exists(&self, id: ProductId) -> ProductResult<bool> {
        Ok(self.products.read().await.contains_key(&id))
    }

    async fn replace(
        &self,
        id: ProductId,
        fields: ProductFields,
    ) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.get_mut(&id).map(|product| {
            product.replace_fields(fields, Utc::now());
            product.clone()
        }))
    }

    async fn update(
        &self,
        id: ProductId,
        changes: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.get_mut(&id).map(|product| {
            product.apply_update(changes, Utc::now());
            product.clone()
        }))
    }

    async fn delete(&self, id: ProductId) -> ProductResult<bool> {
        Ok(self.products.write().await.remove(&id).is_some())
    }
}
