//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Pagination, Product, ProductFields, ProductFilter, ProductId, UpdateProduct};
use crate::repository::ProductRepository;

pub const COLLECTION_NAME: &str = "products";

/// Stored shape of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    buyer: String,
    price: f64,
    location: String,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Product {
            id: doc.id.into(),
            name: doc.name,
            buyer: doc.buyer,
            price: doc.price,
            location: doc.location,
            created_at: to_chrono(doc.created_at),
            updated_at: to_chrono(doc.updated_at),
        }
    }
}

fn to_chrono(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

/// Output of the list aggregation's `$facet` stage.
#[derive(Debug, Deserialize)]
struct ListFacet {
    results: Vec<ProductDocument>,
    total: Vec<CountRow>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection(collection_name),
        }
    }

    /// Create the indexes backing listing and filtering. Idempotent.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = |keys: Document, name: &str| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build()
        };

        let indexes = vec![
            index(doc! { "createdAt": -1, "_id": -1 }, "idx_created_at"),
            index(doc! { "buyer": 1 }, "idx_buyer"),
            index(doc! { "location": 1 }, "idx_location"),
            index(doc! { "price": 1 }, "idx_price"),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = COLLECTION_NAME, "Product indexes ensured");
        Ok(())
    }

    /// Translate filter predicates into a `$match` document.
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(buyer) = &filter.buyer {
            doc.insert("buyer", buyer);
        }

        if let Some(location) = &filter.location {
            doc.insert("location", location);
        }

        if filter.min_price.is_some() || filter.max_price.is_some() {
            let mut price = doc! {};
            if let Some(min) = filter.min_price {
                price.insert("$gte", min);
            }
            if let Some(max) = filter.max_price {
                price.insert("$lte", max);
            }
            doc.insert("price", price);
        }

        doc
    }

    /// Page and total from one `$facet` aggregation so they share a snapshot.
    fn list_pipeline(filter: &ProductFilter, page: Pagination) -> Vec<Document> {
        let skip = i64::try_from(page.skip()).unwrap_or(i64::MAX);
        let limit = i64::try_from(page.limit).unwrap_or(i64::MAX);

        vec![
            doc! { "$match": Self::build_filter(filter) },
            doc! {
                "$facet": {
                    "results": [
                        { "$sort": { "createdAt": -1, "_id": -1 } },
                        { "$skip": skip },
                        { "$limit": limit },
                    ],
                    "total": [ { "$count": "count" } ],
                }
            },
        ]
    }

    /// Pipeline update that keeps only `_id`, `createdAt` and `fields`.
    ///
    /// Values go through `$literal` so user strings starting with `$` are not
    /// read as field paths.
    fn replace_pipeline(fields: ProductFields, now: bson::DateTime) -> Vec<Document> {
        vec![doc! {
            "$replaceWith": {
                "_id": "$_id",
                "name": { "$literal": fields.name },
                "buyer": { "$literal": fields.buyer },
                "price": { "$literal": fields.price },
                "location": { "$literal": fields.location },
                "createdAt": { "$ifNull": ["$createdAt", now] },
                "updatedAt": now,
            }
        }]
    }

    fn set_document(changes: UpdateProduct, now: bson::DateTime) -> Document {
        let mut set = doc! { "updatedAt": now };
        if let Some(name) = changes.name {
            set.insert("name", name);
        }
        if let Some(buyer) = changes.buyer {
            set.insert("buyer", buyer);
        }
        if let Some(price) = changes.price {
            set.insert("price", price);
        }
        if let Some(location) = changes.location {
            set.insert("location", location);
        }
        doc! { "$set": set }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, fields), fields(product_name = %fields.name))]
    async fn create(&self, fields: ProductFields) -> ProductResult<Product> {
        let now = bson::DateTime::now();
        let document = ProductDocument {
            id: ObjectId::new(),
            name: fields.name,
            buyer: fields.buyer,
            price: fields.price,
            location: fields.location,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&document).await?;

        tracing::info!(product_id = %document.id, "Product created");
        Ok(document.into())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        let found = self
            .collection
            .find_one(doc! { "_id": id.object_id() })
            .await?;
        Ok(found.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: ProductFilter,
        page: Pagination,
    ) -> ProductResult<(Vec<Product>, u64)> {
        let mut cursor = self
            .collection
            .aggregate(Self::list_pipeline(&filter, page))
            .await?;

        let facet = cursor
            .try_next()
            .await?
            .ok_or_else(|| ProductError::Internal("list aggregation returned no document".into()))?;
        let facet: ListFacet = bson::from_document(facet).map_err(mongodb::error::Error::from)?;

        let total = facet.total.first().map_or(0, |row| row.count);
        let results: Vec<Product> = facet.results.into_iter().map(Product::from).collect();

        tracing::debug!(returned = results.len(), total, "Listed products");
        Ok((results, total))
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn exists(&self, id: ProductId) -> ProductResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "_id": id.object_id() })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, fields), fields(product_id = %id))]
    async fn replace(
        &self,
        id: ProductId,
        fields: ProductFields,
    ) -> ProductResult<Option<Product>> {
        let replaced = self
            .collection
            .find_one_and_update(
                doc! { "_id": id.object_id() },
                Self::replace_pipeline(fields, bson::DateTime::now()),
            )
            .return_document(ReturnDocument::After)
            .await?;

        if replaced.is_some() {
            tracing::info!("Product replaced");
        }
        Ok(replaced.map(Product::from))
    }

    #[instrument(skip(self, changes), fields(product_id = %id))]
    async fn update(
        &self,
        id: ProductId,
        changes: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": id.object_id() },
                Self::set_document(changes, bson::DateTime::now()),
            )
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!("Product updated");
        }
        Ok(updated.map(Product::from))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete(&self, id: ProductId) -> ProductResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.object_id() })
            .await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!("Product deleted");
        }
        Ok(deleted)
    }
}
