use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
#[allow(unused_imports)]
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::ProductError;

/// Store-assigned product identifier, rendered as 24 hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(ObjectId);

impl ProductId {
    /// Fresh id; the timestamp prefix makes ids roughly creation-ordered.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for ProductId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ProductError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A product as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(value_type = String, example = "665f1c2e8b3e4a0012345678")]
    pub id: ProductId,
    pub name: String,
    pub buyer: String,
    pub price: f64,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The four caller-owned fields, all present and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub buyer: String,
    pub price: f64,
    pub location: String,
}

impl Product {
    /// Build a new record stamped with `now` for both timestamps.
    pub fn new(id: ProductId, fields: ProductFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            buyer: fields.buyer,
            price: fields.price,
            location: fields.location,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite all four fields, keeping `id` and `created_at`.
    pub fn replace_fields(&mut self, fields: ProductFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.buyer = fields.buyer;
        self.price = fields.price;
        self.location = fields.location;
        self.updated_at = now;
    }

    /// Overwrite only the fields present in `changes`.
    pub fn apply_update(&mut self, changes: UpdateProduct, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(buyer) = changes.buyer {
            self.buyer = buyer;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(location) = changes.location {
            self.location = location;
        }
        self.updated_at = now;
    }
}

/// Body for create (POST) and full replace (PUT).
///
/// Fields are optional at the type level so that every absent field can be
/// reported by name instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(example = json!({"name": "Desk", "buyer": "Acme", "price": 120.5, "location": "Berlin"}))]
pub struct CreateProduct {
    /// Required
    #[validate(length(min = 1))]
    pub name: Option<String>,
    /// Required
    #[validate(length(min = 1))]
    pub buyer: Option<String>,
    /// Required, zero or more
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    /// Required
    #[validate(length(min = 1))]
    pub location: Option<String>,
}

impl CreateProduct {
    /// Fields missing from the body, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.buyer.is_none() {
            missing.push("buyer");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        if self.location.is_none() {
            missing.push("location");
        }
        missing
    }

    /// Convert into complete fields, or list every missing one.
    pub fn into_fields(self) -> Result<ProductFields, ProductError> {
        match self {
            CreateProduct {
                name: Some(name),
                buyer: Some(buyer),
                price: Some(price),
                location: Some(location),
            } => Ok(ProductFields {
                name,
                buyer,
                price,
                location,
            }),
            incomplete => Err(ProductError::MissingFields(incomplete.missing_fields())),
        }
    }
}

/// Body for partial update (PATCH). Absent or `null` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(example = json!({"price": 500}))]
pub struct UpdateProduct {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub buyer: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.buyer.is_none() && self.price.is_none() && self.location.is_none()
    }
}

/// Predicates shared by listing and counting; all supplied ones must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub buyer: Option<String>,
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Rejects non-finite bounds and an empty price window (`minPrice > maxPrice`).
    pub fn check_price_range(&self) -> Result<(), ProductError> {
        for (name, bound) in [("minPrice", self.min_price), ("maxPrice", self.max_price)] {
            if bound.is_some_and(|value| !value.is_finite()) {
                return Err(ProductError::InvalidQuery(format!(
                    "{name} must be a finite number"
                )));
            }
        }

        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if min > max => Err(ProductError::InvalidQuery(format!(
                "minPrice ({min}) must not be greater than maxPrice ({max})"
            ))),
            _ => Ok(()),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.buyer.as_ref().is_none_or(|buyer| &product.buyer == buyer)
            && self
                .location
                .as_ref()
                .is_none_or(|location| &product.location == location)
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
    }
}

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// One-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Query string accepted by `GET /products` and `HEAD /products`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Exact buyer match
    pub buyer: Option<String>,
    /// Exact location match
    pub location: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
    /// 1-based page number (default 1)
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub page: Option<u64>,
    /// Page size (default 10)
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub limit: Option<u64>,
}

impl ListParams {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            buyer: self.buyer.clone(),
            location: self.location.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
    }
}

/// One page of products plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub page: u64,
    pub limit: u64,
    /// Matches across all pages
    pub total: u64,
    pub results: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"message": "Product deleted successfully"}))]
pub struct DeleteResponse {
    pub message: String,
}
