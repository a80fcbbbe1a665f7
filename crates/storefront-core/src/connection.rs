//! GraphQL connection wire shapes.
//!
//! The commerce API returns lists as connections (`edges` of `node`s plus
//! `pageInfo`). These generic shapes exist only at the wire boundary; readers
//! flatten them into plain `Vec`s before handing data to callers.

use serde::{Deserialize, Serialize};

/// One edge wrapping a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// Cursor pagination info.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page exists after this one.
    #[serde(default)]
    pub has_next_page: bool,
    /// Opaque cursor for the next page.
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// A page of edges plus pagination info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default)]
    pub edges: Vec<Edge<T>>,
    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            page_info: None,
        }
    }
}

impl<T> Connection<T> {
    /// Consume the connection, returning the nodes in page order.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }

    /// The first node, if any.
    pub fn into_first(self) -> Option<T> {
        self.edges.into_iter().next().map(|edge| edge.node)
    }

    /// Number of nodes in this page.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether this page is empty.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
