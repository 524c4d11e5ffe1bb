//! In-memory gateway double for engine tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{DataGateway, Mutation, Order};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Mutate { table: String, mutation: Mutation },
    Call { procedure: String, args: Value },
}

#[derive(Default)]
pub struct MemoryGateway {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    failing: Mutex<HashMap<String, String>>,
    results: Mutex<HashMap<String, Value>>,
    log: Mutex<Vec<Recorded>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        self.tables.lock().unwrap().insert(table.to_string(), rows);
        self
    }

    /// Makes every operation on `name` (table or procedure) fail with `message`.
    pub fn failing(self, name: &str, message: &str) -> Self {
        self.fail(name, message);
        self
    }

    pub fn fail(&self, name: &str, message: &str) {
        self.failing
            .lock()
            .unwrap()
            .insert(name.to_string(), message.to_string());
    }

    pub fn recover(&self, name: &str) {
        self.failing.lock().unwrap().remove(name);
    }

    pub fn returning(self, procedure: &str, value: Value) -> Self {
        self.results
            .lock()
            .unwrap()
            .insert(procedure.to_string(), value);
        self
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    fn check(&self, name: &str) -> AppResult<()> {
        match self.failing.lock().unwrap().get(name) {
            Some(message) => Err(AppError::remote(message.clone(), Some("XX000".into()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataGateway for MemoryGateway {
    async fn query(
        &self,
        table: &str,
        _projection: &str,
        _order: Option<Order>,
    ) -> AppResult<Vec<Value>> {
        self.check(table)?;
        Ok(self
            .tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default())
    }

    async fn mutate(&self, table: &str, mutation: Mutation) -> AppResult<()> {
        self.check(table)?;
        self.log.lock().unwrap().push(Recorded::Mutate {
            table: table.to_string(),
            mutation,
        });
        Ok(())
    }

    async fn call(&self, procedure: &str, args: Value) -> AppResult<Value> {
        self.check(procedure)?;
        self.log.lock().unwrap().push(Recorded::Call {
            procedure: procedure.to_string(),
            args,
        });
        Ok(self
            .results
            .lock()
            .unwrap()
            .get(procedure)
            .cloned()
            .unwrap_or(Value::Null))
    }
}
