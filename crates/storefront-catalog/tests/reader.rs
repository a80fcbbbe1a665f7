//! Catalog reader behavior against a mock commerce API.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use storefront_catalog::{CatalogReader, SortKey};
use storefront_core::StoreConfig;
use storefront_data::{ClientSettings, RetryPolicy, StorefrontClient};

fn reader_for(server: &MockServer) -> CatalogReader {
    let settings = ClientSettings {
        timeout: Duration::from_secs(2),
        retry: RetryPolicy::default().with_base_delay(Duration::from_millis(10)),
    };
    let client = StorefrontClient::with_settings(
        &StoreConfig::new("test-shop.example.com", "test-token"),
        settings,
    )
    .unwrap()
    .with_endpoint(format!("{}/graphql", server.uri()));
    CatalogReader::new(Arc::new(client))
}

fn variant_node(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Default",
        "availableForSale": true,
        "price": { "amount": "10.00", "currencyCode": "BRL" },
        "selectedOptions": []
    })
}

fn variant_page(ids: &[&str], has_next_page: bool, end_cursor: Option<&str>) -> serde_json::Value {
    json!({
        "data": {
            "productByHandle": {
                "variants": {
                    "pageInfo": { "hasNextPage": has_next_page, "endCursor": end_cursor },
                    "edges": ids.iter().map(|id| json!({ "node": variant_node(id) })).collect::<Vec<_>>()
                }
            }
        }
    })
}

/// Serves three variant pages keyed by the cursor in the request body.
struct VariantPager;

impl Respond for VariantPager {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        let page = match body["variables"]["cursor"].as_str() {
            None => variant_page(&["gid://variant/1", "gid://variant/2"], true, Some("cur-1")),
            Some("cur-1") => {
                variant_page(&["gid://variant/3", "gid://variant/4"], true, Some("cur-2"))
            }
            Some("cur-2") => variant_page(&["gid://variant/5"], false, None),
            Some(_) => return ResponseTemplate::new(500),
        };
        ResponseTemplate::new(200).set_body_json(page)
    }
}

fn product_detail_body() -> serde_json::Value {
    json!({
        "data": {
            "productByHandle": {
                "id": "gid://product/1",
                "title": "Shipping Box",
                "handle": "shipping-box",
                "description": "A box.",
                "descriptionHtml": "<p>A box.</p>",
                "availableForSale": true,
                "productType": "Packaging",
                "options": [{ "name": "Size", "values": ["S", "M"] }],
                "priceRange": {
                    "minVariantPrice": { "amount": "10.00", "currencyCode": "BRL" },
                    "maxVariantPrice": { "amount": "25.00", "currencyCode": "BRL" }
                },
                "images": { "edges": [{ "node": { "url": "https://cdn/box.png" } }] }
            }
        }
    })
}

#[tokio::test]
async fn product_stitches_variants_across_three_pages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("ProductVariants"))
        .respond_with(VariantPager)
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("ProductDetail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_detail_body()))
        .expect(1)
        .mount(&server)
        .await;

    let reader = reader_for(&server);
    let product = reader.product("shipping-box").await.unwrap();

    let ids: Vec<&str> = product.variants.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "gid://variant/1",
            "gid://variant/2",
            "gid://variant/3",
            "gid://variant/4",
            "gid://variant/5"
        ]
    );
    assert_eq!(product.title, "Shipping Box");
    assert_eq!(product.images.len(), 1);
}

#[tokio::test]
async fn missing_product_resolves_to_none_without_variant_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "productByHandle": null } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reader = reader_for(&server);
    assert!(reader.product("no-such-product").await.is_none());
}

#[tokio::test]
async fn one_char_search_makes_no_remote_call() {
    let server = MockServer::start().await;

    let reader = reader_for(&server);
    assert!(reader.search("a").await.is_empty());
    assert!(reader.search("   a   ").await.is_empty());

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn overlong_search_makes_no_remote_call() {
    let server = MockServer::start().await;

    let reader = reader_for(&server);
    assert!(reader.search(&"x".repeat(101)).await.is_empty());

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn two_char_search_makes_exactly_one_remote_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "products": {
                    "edges": [{
                        "node": {
                            "id": "gid://product/1",
                            "title": "Abacate Box",
                            "handle": "abacate-box",
                            "images": { "edges": [{ "node": { "url": "https://cdn/a.png" } }] },
                            "priceRange": {
                                "minVariantPrice": { "amount": "5.00", "currencyCode": "BRL" }
                            }
                        }
                    }]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reader = reader_for(&server);
    let hits = reader.search("ab").await;

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].handle, "abacate-box");
    assert_eq!(hits[0].min_price.amount, "5.00");
}

#[tokio::test]
async fn search_failure_yields_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let reader = reader_for(&server);
    assert!(reader.search("boxes").await.is_empty());
}

#[tokio::test]
async fn collection_products_flatten_into_summaries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("CollectionProducts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "collectionByHandle": {
                    "products": {
                        "edges": [{
                            "node": {
                                "id": "gid://product/1",
                                "title": "Shipping Box",
                                "handle": "shipping-box",
                                "productType": "Packaging",
                                "availableForSale": true,
                                "priceRange": {
                                    "minVariantPrice": { "amount": "10.00", "currencyCode": "BRL" }
                                },
                                "images": { "edges": [] },
                                "variants": { "edges": [{ "node": {
                                    "id": "gid://variant/1",
                                    "availableForSale": true,
                                    "price": { "amount": "10.00", "currencyCode": "BRL" },
                                    "selectedOptions": []
                                } }] }
                            }
                        }]
                    }
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reader = reader_for(&server);
    let rows = reader
        .collection_products("boxes", SortKey::Created, false, 9)
        .await;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].handle, "shipping-box");
    assert_eq!(rows[0].first_variant.as_ref().unwrap().id, "gid://variant/1");
}

#[tokio::test]
async fn unknown_collection_yields_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "collectionByHandle": null } })),
        )
        .mount(&server)
        .await;

    let reader = reader_for(&server);
    let rows = reader
        .collection_products("missing", SortKey::Created, false, 9)
        .await;
    assert!(rows.is_empty());
}

#[tokio::test]
async fn collections_listing_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "collections": {
                    "edges": [
                        { "node": { "id": "gid://collection/1", "title": "Boxes", "handle": "boxes" } },
                        { "node": { "id": "gid://collection/2", "title": "Tapes", "handle": "tapes" } }
                    ]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reader = reader_for(&server);
    let collections = reader.collections().await;

    assert_eq!(collections.len(), 2);
    assert_eq!(collections[1].handle, "tapes");
}
