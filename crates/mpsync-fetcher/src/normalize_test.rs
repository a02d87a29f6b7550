use serde_json::json;

use super::*;

fn raw(value: serde_json::Value) -> RawProduct {
    serde_json::from_value(value).expect("fixture should deserialize")
}

fn normalize(value: serde_json::Value) -> NormalizedProduct {
    normalize_product(raw(value), 0).expect("fixture should normalize")
}

// -----------------------------------------------------------------------
// identifiers
// -----------------------------------------------------------------------

#[test]
fn id_prefers_product_id() {
    let p = normalize(json!({
        "productId": 1,
        "id": "2",
        "barcode": "3",
        "productMainId": "4"
    }));
    assert_eq!(p.id, "1");
}

#[test]
fn id_falls_back_in_precedence_order() {
    assert_eq!(normalize(json!({ "id": "abc", "barcode": "3" })).id, "abc");
    assert_eq!(
        normalize(json!({ "barcode": "868000", "productMainId": "M-1" })).id,
        "868000"
    );
    assert_eq!(normalize(json!({ "productMainId": "M-1" })).id, "M-1");
}

#[test]
fn blank_id_is_skipped_in_favour_of_next_source() {
    let p = normalize(json!({ "productId": "  ", "barcode": "868000" }));
    assert_eq!(p.id, "868000");
}

#[test]
fn missing_every_id_is_a_normalization_error() {
    let err = normalize_product(raw(json!({ "title": "Orphan" })), 17).unwrap_err();
    assert!(
        matches!(err, FetchError::Normalization { position: 17, .. }),
        "expected Normalization at position 17, got: {err:?}"
    );
}

// -----------------------------------------------------------------------
// title / brand / text fields
// -----------------------------------------------------------------------

#[test]
fn title_falls_back_to_product_main_id_then_placeholder() {
    let from_main = normalize(json!({ "id": 1, "title": "", "productMainId": "KZK-01" }));
    assert_eq!(from_main.title, "KZK-01");

    let placeholder = normalize(json!({ "id": 1 }));
    assert_eq!(placeholder.title, DEFAULT_TITLE);
}

#[test]
fn brand_from_nested_object() {
    let p = normalize(json!({ "id": 1, "brand": { "id": 99, "name": "Koton" } }));
    assert_eq!(p.brand, "Koton");
}

#[test]
fn brand_from_bare_string() {
    let p = normalize(json!({ "id": 1, "brand": "LC Waikiki" }));
    assert_eq!(p.brand, "LC Waikiki");
}

#[test]
fn brand_falls_back_to_brand_name() {
    let p = normalize(json!({ "id": 1, "brand": { "id": 99 }, "brandName": "Mavi" }));
    assert_eq!(p.brand, "Mavi");

    let p = normalize(json!({ "id": 1, "brandName": "DeFacto" }));
    assert_eq!(p.brand, "DeFacto");
}

#[test]
fn brand_name_wins_over_bare_brand_string() {
    let p = normalize(json!({ "id": 1, "brand": "acme-code", "brandName": "Acme" }));
    assert_eq!(p.brand, "Acme");
}

#[test]
fn nested_brand_name_wins_over_brand_name() {
    let p = normalize(json!({ "id": 1, "brand": { "name": "Koton" }, "brandName": "KTN" }));
    assert_eq!(p.brand, "Koton");
}

#[test]
fn blank_brand_name_falls_back_to_bare_string() {
    let p = normalize(json!({ "id": 1, "brand": "Mavi", "brandName": " " }));
    assert_eq!(p.brand, "Mavi");
}

#[test]
fn brand_defaults_to_empty() {
    let p = normalize(json!({ "id": 1, "brand": 12 }));
    assert_eq!(p.brand, "");
}

#[test]
fn text_fields_default_to_empty() {
    let p = normalize(json!({ "id": 1 }));
    assert_eq!(p.description, "");
    assert_eq!(p.category, "");
    assert_eq!(p.url, "");
}

#[test]
fn text_fields_pass_through() {
    let p = normalize(json!({
        "id": 1,
        "description": "<p>Pamuklu</p>",
        "categoryName": "T-Shirt",
        "productUrl": "https://www.trendyol.com/koton/t-shirt-p-1"
    }));
    assert_eq!(p.description, "<p>Pamuklu</p>");
    assert_eq!(p.category, "T-Shirt");
    assert_eq!(p.url, "https://www.trendyol.com/koton/t-shirt-p-1");
}

// -----------------------------------------------------------------------
// prices
// -----------------------------------------------------------------------

#[test]
fn no_prices_means_zero_price_and_sale_price() {
    let p = normalize(json!({ "id": 1 }));
    assert!(p.price.abs() < f64::EPSILON);
    assert!(p.sale_price.abs() < f64::EPSILON);
}

#[test]
fn sale_price_defaults_to_list_price() {
    let p = normalize(json!({ "id": 1, "listPrice": 249.9 }));
    assert!((p.price - 249.9).abs() < f64::EPSILON);
    assert!((p.sale_price - 249.9).abs() < f64::EPSILON);
}

#[test]
fn prices_fall_back_to_vat_variants() {
    let p = normalize(json!({
        "id": 1,
        "listPriceWithVat": 300,
        "salePriceWithVat": "199.99"
    }));
    assert!((p.price - 300.0).abs() < f64::EPSILON);
    assert!((p.sale_price - 199.99).abs() < f64::EPSILON);
}

#[test]
fn zero_sale_price_counts_as_absent() {
    let p = normalize(json!({ "id": 1, "listPrice": 100, "salePrice": 0 }));
    assert!((p.sale_price - 100.0).abs() < f64::EPSILON);
}

#[test]
fn null_prices_default() {
    let p = normalize(json!({ "id": 1, "listPrice": null, "salePrice": null }));
    assert!(p.price.abs() < f64::EPSILON);
    assert!(p.sale_price.abs() < f64::EPSILON);
}

// -----------------------------------------------------------------------
// quantity
// -----------------------------------------------------------------------

#[test]
fn quantity_sums_line_items_when_direct_field_missing() {
    let p = normalize(json!({
        "id": 1,
        "items": [{ "quantity": 3 }, { "quantity": 4 }, { "quantity": null }, {}]
    }));
    assert_eq!(p.quantity, 7);
}

#[test]
fn line_items_take_precedence_over_direct_quantity() {
    let p = normalize(json!({ "id": 1, "quantity": 100, "items": [{ "quantity": 2 }] }));
    assert_eq!(p.quantity, 2);
}

#[test]
fn empty_line_items_fall_back_to_direct_quantity() {
    let p = normalize(json!({ "id": 1, "quantity": 12, "items": [] }));
    assert_eq!(p.quantity, 12);
}

#[test]
fn direct_quantity_used_without_line_items() {
    let p = normalize(json!({ "id": 1, "quantity": "5" }));
    assert_eq!(p.quantity, 5);
}

#[test]
fn negative_quantities_clamp_to_zero() {
    assert_eq!(normalize(json!({ "id": 1, "quantity": -3 })).quantity, 0);

    let p = normalize(json!({ "id": 1, "items": [{ "quantity": -5 }, { "quantity": 2 }] }));
    assert_eq!(p.quantity, 2);
}

#[test]
fn missing_quantity_is_zero() {
    assert_eq!(normalize(json!({ "id": 1 })).quantity, 0);
}

// -----------------------------------------------------------------------
// images
// -----------------------------------------------------------------------

#[test]
fn images_keep_non_null_urls_in_source_order() {
    let p = normalize(json!({
        "id": 1,
        "images": [
            { "url": "https://cdn.example.com/3.jpg" },
            { "url": null },
            null,
            { "url": "https://cdn.example.com/1.jpg" },
            { "url": "https://cdn.example.com/2.jpg" }
        ]
    }));
    assert_eq!(
        p.images,
        vec![
            "https://cdn.example.com/3.jpg",
            "https://cdn.example.com/1.jpg",
            "https://cdn.example.com/2.jpg"
        ]
    );
}

#[test]
fn missing_images_is_empty() {
    assert!(normalize(json!({ "id": 1 })).images.is_empty());
}

// -----------------------------------------------------------------------
// normalize_all
// -----------------------------------------------------------------------

#[test]
fn normalize_all_preserves_order() {
    let products = vec![
        raw(json!({ "id": "b", "title": "Second" })),
        raw(json!({ "id": "a", "title": "First" })),
    ];
    let normalized = normalize_all(products).unwrap();
    let ids: Vec<&str> = normalized.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn normalize_all_reports_position_of_bad_record() {
    let products = vec![
        raw(json!({ "id": "ok" })),
        raw(json!({ "id": "ok-too" })),
        raw(json!({ "title": "No id" })),
    ];
    let err = normalize_all(products).unwrap_err();
    assert!(matches!(err, FetchError::Normalization { position: 2, .. }));
}
