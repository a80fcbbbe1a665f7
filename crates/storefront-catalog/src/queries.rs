//! GraphQL query text for catalog reads.
//!
//! The commerce schema is depended on exactly as written here; a remote
//! field rename requires a matching change in this module.

use crate::reader::SortKey;

/// Full product detail, minus variants (fetched page by page separately).
pub(crate) const PRODUCT_DETAIL_QUERY: &str = r#"
query ProductDetail($handle: String!) {
  productByHandle(handle: $handle) {
    id
    title
    handle
    description
    descriptionHtml
    availableForSale
    productType
    options { name values }
    priceRange {
      minVariantPrice { amount currencyCode }
      maxVariantPrice { amount currencyCode }
    }
    images(first: 20) {
      edges { node { url altText } }
    }
  }
}"#;

/// One page of a product's variants, addressed by cursor.
pub(crate) const VARIANT_PAGE_QUERY: &str = r#"
query ProductVariants($handle: String!, $cursor: String) {
  productByHandle(handle: $handle) {
    variants(first: 250, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      edges {
        node {
          id
          title
          availableForSale
          price { amount currencyCode }
          selectedOptions { name value }
          image { url altText }
        }
      }
    }
  }
}"#;

/// Collection navigation rows.
pub(crate) const COLLECTIONS_QUERY: &str = r#"
query Collections {
  collections(first: 20) {
    edges {
      node {
        id
        title
        handle
        image { url altText }
      }
    }
  }
}"#;

/// Prefix-style title search, capped at five suggestions.
pub(crate) const SEARCH_QUERY: &str = r#"
query SearchProducts($query: String!) {
  products(first: 5, query: $query) {
    edges {
      node {
        id
        title
        handle
        images(first: 1) {
          edges { node { url altText } }
        }
        priceRange {
          minVariantPrice { amount currencyCode }
        }
      }
    }
  }
}"#;

/// Sorted product rows for one collection.
///
/// Sort key and direction are enum positions in the schema, so they are
/// interpolated rather than passed as variables; the handle and page size
/// stay proper variables.
pub(crate) fn collection_products_query(sort_key: SortKey, reverse: bool) -> String {
    format!(
        r#"
query CollectionProducts($handle: String!, $first: Int!) {{
  collectionByHandle(handle: $handle) {{
    products(first: $first, sortKey: {sort}, reverse: {reverse}) {{
      edges {{
        node {{
          id
          title
          handle
          productType
          availableForSale
          priceRange {{
            minVariantPrice {{ amount currencyCode }}
          }}
          images(first: 1) {{
            edges {{ node {{ url altText }} }}
          }}
          variants(first: 1) {{
            edges {{
              node {{
                id
                availableForSale
                price {{ amount currencyCode }}
                selectedOptions {{ name value }}
              }}
            }}
          }}
        }}
      }}
    }}
  }}
}}"#,
        sort = sort_key.as_str(),
        reverse = reverse,
    )
}
