//! Marketplace product-listing response types.
//!
//! ## Observed shape
//!
//! ### Envelope
//! `{ "content": [...], "page": 0, "size": 200, "totalPages": 3, "totalElements": 512 }`.
//! Some deployments omit `totalPages`; pagination falls back to
//! `totalElements` (see [`crate::pagination`]).
//!
//! ### Identifiers
//! Depending on the endpoint family a listing carries `productId`, `id`,
//! `barcode` and/or `productMainId`. Any of them may be a JSON string or
//! number, so they are modelled as [`RawId`].
//!
//! ### Brand
//! Either a nested object `{ "id": 1, "name": "Nike" }`, a bare string, or
//! absent with a sibling `brandName` string. Modelled as [`RawBrand`].
//!
//! ### Prices and stock
//! `listPrice` / `salePrice` (sometimes only the `*WithVat` variants) and
//! `quantity` are usually numbers but have been seen as numeric strings.
//! Stock may instead live on line items: `items: [{ "quantity": 3 }, ...]`.
//!
//! ### Images
//! `images: [{ "url": "https://cdn..." }, ...]`. Entries may be `null`, lack
//! a `url`, or be bare URL strings.

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as the type's default (e.g. an empty `Vec`).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a free-text field leniently: strings pass through, numbers
/// and booleans are stringified, anything else becomes `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// One page of `GET .../products`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogPage {
    #[serde(deserialize_with = "null_as_default")]
    pub content: Vec<RawProduct>,
    pub total_pages: Option<u32>,
    pub total_elements: Option<u64>,
    /// Page index echoed by the server.
    pub page: Option<u32>,
    /// Page size echoed by the server.
    pub size: Option<u32>,
}

/// A product listing exactly as the API returns it.
///
/// Every field is optional; defaulting rules live in [`crate::normalize`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawProduct {
    pub product_id: Option<RawId>,
    pub id: Option<RawId>,
    pub barcode: Option<RawId>,
    pub product_main_id: Option<RawId>,

    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    pub brand: Option<RawBrand>,
    #[serde(deserialize_with = "lenient_text")]
    pub brand_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,

    pub list_price: Option<RawNumber>,
    pub list_price_with_vat: Option<RawNumber>,
    pub sale_price: Option<RawNumber>,
    pub sale_price_with_vat: Option<RawNumber>,

    pub quantity: Option<RawNumber>,
    /// Line items; `None` when the field is absent or `null`.
    pub items: Option<Vec<RawLineItem>>,

    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Option<RawImage>>,

    #[serde(deserialize_with = "lenient_text")]
    pub category_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub product_url: Option<String>,
}

/// Identifier that may arrive as a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl RawId {
    /// String form of the identifier, or `None` for a blank string.
    ///
    /// Whole floats render without a fractional part (`123.0` → `"123"`).
    #[must_use]
    pub fn to_id_string(&self) -> Option<String> {
        match self {
            RawId::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
            RawId::Integer(n) => Some(n.to_string()),
            RawId::Unsigned(n) => Some(n.to_string()),
            #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
            RawId::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
                Some((*f as i64).to_string())
            }
            RawId::Float(f) => Some(f.to_string()),
        }
    }
}

/// Brand as a nested object, a bare name, or something unusable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawBrand {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
    Other(serde_json::Value),
}

impl RawBrand {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            RawBrand::Name(name) => Some(name.as_str()),
            RawBrand::Object { name } => name.as_deref(),
            RawBrand::Other(_) => None,
        }
    }

    /// Non-blank name from the nested-object form only.
    #[must_use]
    pub fn object_name(&self) -> Option<&str> {
        match self {
            RawBrand::Object { name: Some(name) } if !name.trim().is_empty() => {
                Some(name.as_str())
            }
            _ => None,
        }
    }
}

/// Numeric field that may arrive as a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Finite numeric value, or `None` for unparseable strings.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// A stock-keeping line item of a listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawLineItem {
    pub quantity: Option<RawNumber>,
}

/// An image entry: `{ "url": ... }` or a bare URL string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawImage {
    Url(String),
    Object {
        #[serde(default)]
        url: Option<String>,
    },
    Other(serde_json::Value),
}

impl RawImage {
    /// The image URL, if the entry carries a non-blank one.
    #[must_use]
    pub fn into_url(self) -> Option<String> {
        let url = match self {
            RawImage::Url(url) => url,
            RawImage::Object { url: Some(url) } => url,
            RawImage::Object { url: None } | RawImage::Other(_) => return None,
        };
        (!url.trim().is_empty()).then_some(url)
    }
}
