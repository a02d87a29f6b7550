use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marketplace product flattened into the storefront's ten-field shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProduct {
    /// Marketplace identifier, stored as a string whatever its source type.
    pub id: String,
    pub title: String,
    /// Brand display name; empty when the listing carries none.
    pub brand: String,
    pub description: String,
    /// List price. `0.0` when the listing carries no price.
    pub price: f64,
    /// Discounted price; equals `price` when no sale price is set.
    pub sale_price: f64,
    /// Units in stock across all line items.
    pub quantity: u64,
    /// Image URLs in listing order.
    pub images: Vec<String>,
    pub category: String,
    /// Canonical product page on the marketplace.
    pub url: String,
}

impl NormalizedProduct {
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.sale_price < self.price
    }
}

/// One complete catalog export: a timestamp and every product, sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub updated_at: DateTime<Utc>,
    pub products: Vec<NormalizedProduct>,
}

impl Snapshot {
    /// Builds a snapshot stamped with the current UTC time.
    #[must_use]
    pub fn build(products: Vec<NormalizedProduct>) -> Self {
        Self::build_at(products, Utc::now())
    }

    /// Builds a snapshot with an explicit timestamp.
    ///
    /// Products are ordered by `(brand, title)` so consecutive exports of an
    /// unchanged catalog diff cleanly. The sort is stable: products sharing
    /// both keys keep their fetch order.
    #[must_use]
    pub fn build_at(mut products: Vec<NormalizedProduct>, updated_at: DateTime<Utc>) -> Self {
        products.sort_by(|a, b| (&a.brand, &a.title).cmp(&(&b.brand, &b.title)));
        Self {
            updated_at,
            products,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
