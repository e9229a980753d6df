//! Data types used in the database, shared by the storage layer and everything that calls into it.
use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, Type};
use thiserror::Error;

pub use bindery_common::Money;

use crate::helpers::month_key;

//--------------------------------------     SourceTag       ---------------------------------------------------------

/// The upstream system a record was reconciled from. Stored alongside every product and order so that queries and
/// aggregates can be scoped to a single source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SourceTag {
    Woocommerce,
    Amazon,
    Kindle,
    Manual,
}

#[derive(Debug, Clone, Error)]
#[error("Could not convert {0} into a SourceTag")]
pub struct SourceTagConversionError(String);

impl Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SourceTag::Woocommerce => "woocommerce",
            SourceTag::Amazon => "amazon",
            SourceTag::Kindle => "kindle",
            SourceTag::Manual => "manual",
        };
        f.write_str(s)
    }
}

impl FromStr for SourceTag {
    type Err = SourceTagConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "woocommerce" => Ok(SourceTag::Woocommerce),
            "amazon" => Ok(SourceTag::Amazon),
            "kindle" => Ok(SourceTag::Kindle),
            "manual" => Ok(SourceTag::Manual),
            _ => Err(SourceTagConversionError(s.to_string())),
        }
    }
}

//--------------------------------------     Record ids      ---------------------------------------------------------

/// The canonical product identifier. Upstream ids are carried as text verbatim: a WooCommerce numeric id, an ASIN,
/// or an ISBN for manually entered titles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The canonical order identifier, carried verbatim from the upstream system.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

//--------------------------------------     JSON payloads   ---------------------------------------------------------
// These types live inside JSON columns rather than having columns of their own.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTag {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// One line of an order. `id` refers to the product the line was sold against, when the upstream reported one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub name: String,
    pub quantity: i64,
    pub price: Money,
}

//--------------------------------------      Product        ---------------------------------------------------------

/// A reconciled catalog entry. Each row is keyed on the upstream id and tagged with the source it came from, so the
/// same title sold through two channels is two rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub description: String,
    pub short_description: String,
    pub sku: String,
    pub stock_quantity: i64,
    #[sqlx(json)]
    pub images: Vec<ImageRef>,
    #[sqlx(json)]
    pub categories: Vec<CategoryTag>,
    pub source: SourceTag,
    pub author: String,
    pub publisher: String,
    pub pages: i64,
    pub item_weight: String,
    pub dimensions: String,
    pub country_of_origin: String,
    pub packer: String,
    pub generic_name: String,
    pub unspsc_code: String,
    pub date_created: String,
    pub date_modified: String,
    /// Bumped by the storage layer on every upsert. `None` on records that have not been persisted yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
}

//--------------------------------------       Order         ---------------------------------------------------------

/// A reconciled order from any of the sources. Timestamps are carried as the upstream reported them, since the
/// sources disagree about formats and timezones.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub status: String,
    pub total: Money,
    pub currency: String,
    pub date_created: String,
    pub date_modified: String,
    pub customer_id: Option<i64>,
    #[sqlx(json)]
    pub billing: Value,
    #[sqlx(json)]
    pub shipping: Value,
    #[sqlx(json)]
    pub line_items: Vec<LineItem>,
    pub source: SourceTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl Order {
    /// The `YYYY-MM` calendar month this order was created in, as written by the upstream.
    pub fn month(&self) -> Option<String> {
        month_key(&self.date_created)
    }
}

//--------------------------------------  MonthlyAggregate   ---------------------------------------------------------

/// One row of the analytics table: the sales total and royalty figure for a calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MonthlyAggregate {
    /// Calendar month in `YYYY-MM` form.
    pub month: String,
    pub total_sales: Money,
    pub royalties: Money,
    pub updated_at: DateTime<Utc>,
}
