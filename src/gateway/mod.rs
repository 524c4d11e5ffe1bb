//! Access to the hosted database.
//!
//! Everything the engines need from the database goes through [`DataGateway`]:
//! table reads, table mutations and named remote procedures. The production
//! implementation is [`SupabaseGateway`]; tests use an in-memory double.

pub mod supabase;

#[cfg(test)]
pub mod memory;

pub use supabase::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppResult;

/// Sort order for a table read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            ascending: false,
        }
    }

    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            ascending: true,
        }
    }
}

/// Equality predicates, joined with AND.
pub type Filters = Vec<(String, String)>;

pub fn eq(column: &str, value: impl Into<String>) -> (String, String) {
    (column.to_string(), value.into())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Insert { payload: Value },
    Update { filters: Filters, payload: Value },
    Delete { filters: Filters },
}

#[async_trait]
pub trait DataGateway: Send + Sync {
    async fn query(
        &self,
        table: &str,
        projection: &str,
        order: Option<Order>,
    ) -> AppResult<Vec<Value>>;

    async fn mutate(&self, table: &str, mutation: Mutation) -> AppResult<()>;

    async fn call(&self, procedure: &str, args: Value) -> AppResult<Value>;
}

/// Typed table read.
pub async fn select<T: DeserializeOwned>(
    gateway: &dyn DataGateway,
    table: &str,
    projection: &str,
    order: Option<Order>,
) -> AppResult<Vec<T>> {
    let rows = gateway.query(table, projection, order).await?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(Into::into))
        .collect()
}
