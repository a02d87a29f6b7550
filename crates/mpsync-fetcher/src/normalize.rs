//! Normalization from raw listings to [`mpsync_core::NormalizedProduct`].
//!
//! This is the only place where missing or malformed optional fields are
//! defaulted. Fallback chains treat blank strings and zero prices as absent.

use mpsync_core::NormalizedProduct;

use crate::error::FetchError;
use crate::types::{RawBrand, RawId, RawImage, RawNumber, RawProduct};

/// Title used when a listing carries neither `title` nor `productMainId`.
pub const DEFAULT_TITLE: &str = "Ürün";

/// Normalizes a raw listing into the ten-field storefront shape.
///
/// `position` is the listing's zero-based index in the fetch order and is
/// only used to identify the record in error messages.
///
/// # Errors
///
/// Returns [`FetchError::Normalization`] if none of `productId`, `id`,
/// `barcode` or `productMainId` yields an identifier.
pub fn normalize_product(
    product: RawProduct,
    position: usize,
) -> Result<NormalizedProduct, FetchError> {
    let id = [
        &product.product_id,
        &product.id,
        &product.barcode,
        &product.product_main_id,
    ]
    .into_iter()
    .flatten()
    .find_map(RawId::to_id_string)
    .ok_or_else(|| FetchError::Normalization {
        position,
        reason: "listing has no productId, id, barcode or productMainId".into(),
    })?;

    let title = non_blank(product.title)
        .or_else(|| product.product_main_id.as_ref().and_then(RawId::to_id_string))
        .unwrap_or_else(|| DEFAULT_TITLE.to_owned());

    // A nested brand object is authoritative; a bare string is only a
    // fallback behind `brandName`.
    let brand_field = product.brand.as_ref();
    let brand = brand_field
        .and_then(RawBrand::object_name)
        .map(str::to_owned)
        .or_else(|| non_blank(product.brand_name))
        .or_else(|| brand_field.and_then(RawBrand::name).map(str::to_owned))
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_default();

    let price = first_price(&[&product.list_price, &product.list_price_with_vat]).unwrap_or(0.0);
    let sale_price =
        first_price(&[&product.sale_price, &product.sale_price_with_vat]).unwrap_or(price);

    let quantity = match product.items.as_deref() {
        Some(items) if !items.is_empty() => items
            .iter()
            .map(|item| item.quantity.as_ref().map_or(0, to_count))
            .fold(0u64, u64::saturating_add),
        _ => product.quantity.as_ref().map_or(0, to_count),
    };

    let images = product
        .images
        .into_iter()
        .flatten()
        .filter_map(RawImage::into_url)
        .collect();

    Ok(NormalizedProduct {
        id,
        title,
        brand,
        description: product.description.unwrap_or_default(),
        price,
        sale_price,
        quantity,
        images,
        category: product.category_name.unwrap_or_default(),
        url: product.product_url.unwrap_or_default(),
    })
}

/// Normalizes every listing, failing on the first one without an identifier.
///
/// # Errors
///
/// Propagates [`FetchError::Normalization`] from [`normalize_product`].
pub fn normalize_all(products: Vec<RawProduct>) -> Result<Vec<NormalizedProduct>, FetchError> {
    products
        .into_iter()
        .enumerate()
        .map(|(position, product)| normalize_product(product, position))
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// First strictly positive price in the chain.
fn first_price(chain: &[&Option<RawNumber>]) -> Option<f64> {
    chain
        .iter()
        .copied()
        .filter_map(|n| n.as_ref().and_then(RawNumber::as_f64))
        .find(|&n| n > 0.0)
}

/// Stock count; negative and unparseable values count as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(value: &RawNumber) -> u64 {
    value
        .as_f64()
        .filter(|&n| n > 0.0)
        .map_or(0, |n| n.round() as u64)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
