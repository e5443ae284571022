// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock connection pool for testing
//!
//! [`MockPool`] answers the catalog statements from an in-memory
//! [`MockCatalog`], filtering by the bound parameters the way the real
//! statements do. It counts checkouts and releases, records every executed
//! statement and can be told to fail connects or individual statements.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use catalog_introspect::queries::is_reserved_schema;
use catalog_introspect::{
    ArrayColumnProbe, Attribute, Column, ConnectionPool, Domain, DriverError, PoolConnection,
    Row, Schema, Table, TypeDescriptor, UserDefinedType,
};
use serde_json::Value;

/// In-memory catalog contents served by [`MockPool`]
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    pub schemas: Vec<Schema>,
    pub tables: Vec<Table>,
    pub columns: Vec<Column>,
    /// Array probes keyed by schema name
    pub array_columns: Vec<(String, ArrayColumnProbe)>,
    pub domains: Vec<Domain>,
    pub user_defined_types: Vec<UserDefinedType>,
    pub attributes: Vec<Attribute>,
    /// `pg_type` rows keyed by the schema that holds them
    pub type_descriptors: HashMap<String, Vec<TypeDescriptor>>,
}

/// A statement executed through a [`MockPool`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedStatement {
    pub name: String,
    pub text: String,
    pub params: Vec<String>,
}

#[derive(Debug, Default)]
struct MockState {
    catalog: MockCatalog,
    connect_error: Mutex<Option<String>>,
    statement_errors: Mutex<HashMap<String, String>>,
    executed: Mutex<Vec<ExecutedStatement>>,
    acquired: AtomicUsize,
    released: AtomicUsize,
    closed: AtomicBool,
}

/// Connection pool double backed by a [`MockCatalog`]
#[derive(Debug, Clone, Default)]
pub struct MockPool {
    state: Arc<MockState>,
}

impl MockPool {
    /// Create a pool serving `catalog`
    pub fn new(catalog: MockCatalog) -> Self {
        Self {
            state: Arc::new(MockState {
                catalog,
                ..Default::default()
            }),
        }
    }

    /// Create a pool whose every acquire fails with `message`
    pub fn unreachable(message: impl Into<String>) -> Self {
        let pool = Self::default();
        pool.fail_connect(message);
        pool
    }

    /// Make every following acquire fail with `message`
    pub fn fail_connect(&self, message: impl Into<String>) {
        *lock(&self.state.connect_error) = Some(message.into());
    }

    /// Make statement `name` fail with `message`
    pub fn fail_statement(&self, name: impl Into<String>, message: impl Into<String>) {
        lock(&self.state.statement_errors).insert(name.into(), message.into());
    }

    /// Number of successful checkouts
    pub fn acquired(&self) -> usize {
        self.state.acquired.load(Ordering::SeqCst)
    }

    /// Number of connections handed back
    pub fn released(&self) -> usize {
        self.state.released.load(Ordering::SeqCst)
    }

    /// Checkouts not yet handed back
    pub fn outstanding(&self) -> usize {
        self.acquired() - self.released()
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::SeqCst)
    }

    /// Every statement executed so far, in order
    pub fn executed(&self) -> Vec<ExecutedStatement> {
        lock(&self.state.executed).clone()
    }

    /// Names of the statements executed so far, in order
    pub fn executed_names(&self) -> Vec<String> {
        self.executed().into_iter().map(|s| s.name).collect()
    }
}

#[async_trait::async_trait]
impl ConnectionPool for MockPool {
    async fn acquire(&self) -> Result<Box<dyn PoolConnection>, DriverError> {
        if let Some(message) = lock(&self.state.connect_error).clone() {
            return Err(DriverError::new(message));
        }
        self.state.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockConnection {
            state: self.state.clone(),
        }))
    }

    async fn close(&self) {
        self.state.closed.store(true, Ordering::SeqCst);
    }
}

struct MockConnection {
    state: Arc<MockState>,
}

#[async_trait::async_trait]
impl PoolConnection for MockConnection {
    async fn execute(
        &mut self,
        text: &str,
        params: &[&str],
        statement_name: &str,
    ) -> Result<Vec<Row>, DriverError> {
        lock(&self.state.executed).push(ExecutedStatement {
            name: statement_name.to_string(),
            text: text.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
        });

        if let Some(message) = lock(&self.state.statement_errors).get(statement_name) {
            return Err(DriverError::new(message.clone()));
        }

        answer(&self.state.catalog, statement_name, text, params)
    }

    fn release(self: Box<Self>) {
        self.state.released.fetch_add(1, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn param<'a>(params: &[&'a str], index: usize) -> Result<&'a str, DriverError> {
    params
        .get(index)
        .copied()
        .ok_or_else(|| DriverError::new(format!("there is no parameter ${}", index + 1)))
}

fn is(field: &Option<String>, value: &str) -> bool {
    field.as_deref() == Some(value)
}

fn answer(
    catalog: &MockCatalog,
    statement_name: &str,
    text: &str,
    params: &[&str],
) -> Result<Vec<Row>, DriverError> {
    match statement_name {
        "catalog_list_schemas" | "catalog_list_all_schemas" => {
            let database = param(params, 0)?;
            let all = statement_name == "catalog_list_all_schemas";
            let mut schemas: Vec<&Schema> = catalog
                .schemas
                .iter()
                .filter(|s| is(&s.catalog_name, database))
                .filter(|s| all || !s.schema_name.as_deref().is_some_and(is_reserved_schema))
                .collect();
            schemas.sort_by(|a, b| a.schema_name.cmp(&b.schema_name));
            to_rows(schemas)
        }
        "catalog_list_domains" => {
            let database = param(params, 0)?;
            let mut domains: Vec<&Domain> = catalog
                .domains
                .iter()
                .filter(|d| is(&d.domain_catalog, database))
                .collect();
            domains.sort_by(|a, b| {
                (&a.domain_catalog, &a.domain_schema, &a.domain_name).cmp(&(
                    &b.domain_catalog,
                    &b.domain_schema,
                    &b.domain_name,
                ))
            });
            to_rows(domains)
        }
        "catalog_list_type_descriptors" => {
            let schema = descriptor_schema(text)?;
            match catalog.type_descriptors.get(&schema) {
                Some(rows) => to_rows(rows),
                None => Err(DriverError::new(format!(
                    "relation \"{}.pg_type\" does not exist",
                    schema
                ))),
            }
        }
        "schema_list_tables" => {
            let (database, schema) = (param(params, 0)?, param(params, 1)?);
            let mut tables: Vec<&Table> = catalog
                .tables
                .iter()
                .filter(|t| is(&t.table_catalog, database) && is(&t.table_schema, schema))
                .filter(|t| is(&t.table_type, "BASE TABLE"))
                .collect();
            tables.sort_by(|a, b| {
                (&a.table_schema, &a.table_name).cmp(&(&b.table_schema, &b.table_name))
            });
            to_rows(tables)
        }
        "schema_list_user_defined_types" => {
            let (database, schema) = (param(params, 0)?, param(params, 1)?);
            let mut types: Vec<&UserDefinedType> = catalog
                .user_defined_types
                .iter()
                .filter(|u| {
                    is(&u.user_defined_type_catalog, database)
                        && is(&u.user_defined_type_schema, schema)
                })
                .collect();
            types.sort_by(|a, b| a.user_defined_type_name.cmp(&b.user_defined_type_name));
            to_rows(types)
        }
        "schema_list_attributes" => {
            let (database, schema) = (param(params, 0)?, param(params, 1)?);
            let mut attributes: Vec<&Attribute> = catalog
                .attributes
                .iter()
                .filter(|a| is(&a.udt_catalog, database) && is(&a.udt_schema, schema))
                .collect();
            attributes.sort_by(|a, b| {
                (&a.udt_name, &a.attribute_name).cmp(&(&b.udt_name, &b.attribute_name))
            });
            to_rows(attributes)
        }
        "schema_list_array_columns" => {
            let schema = param(params, 0)?;
            let mut probes: Vec<&ArrayColumnProbe> = catalog
                .array_columns
                .iter()
                .filter(|(owner, _)| owner == schema)
                .map(|(_, probe)| probe)
                .collect();
            probes.sort_by(|a, b| {
                (&a.table_name, &a.column_name).cmp(&(&b.table_name, &b.column_name))
            });
            to_rows(probes)
        }
        "schema_list_columns" | "table_list_columns" => {
            let (database, schema) = (param(params, 0)?, param(params, 1)?);
            let table = match statement_name {
                "table_list_columns" => Some(param(params, 2)?),
                _ => None,
            };
            let mut columns: Vec<&Column> = catalog
                .columns
                .iter()
                .filter(|c| is(&c.table_catalog, database) && is(&c.table_schema, schema))
                .filter(|c| table.is_none_or(|t| is(&c.table_name, t)))
                .collect();
            columns.sort_by(|a, b| {
                (&a.table_name, &a.column_name).cmp(&(&b.table_name, &b.column_name))
            });
            // The database never returns the array dimension itself
            let mut rows = to_rows(columns)?;
            for row in &mut rows {
                row.remove("array_dimension");
            }
            Ok(rows)
        }
        other => Err(DriverError::new(format!(
            "prepared statement \"{}\" does not exist",
            other
        ))),
    }
}

/// Pull the quoted schema out of `FROM "<schema>".pg_type`
fn descriptor_schema(text: &str) -> Result<String, DriverError> {
    text.split_once("FROM \"")
        .and_then(|(_, rest)| rest.split_once("\".pg_type"))
        .map(|(schema, _)| schema.replace("\"\"", "\""))
        .ok_or_else(|| DriverError::new("syntax error at or near \"pg_type\""))
}

fn to_rows<T, I>(records: I) -> Result<Vec<Row>, DriverError>
where
    T: serde::Serialize,
    I: IntoIterator<Item = T>,
{
    records
        .into_iter()
        .map(|record| match serde_json::to_value(record)? {
            Value::Object(row) => Ok(row),
            other => Err(DriverError::new(format!("row is not an object: {}", other))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::MockCatalogBuilder;

    async fn run(
        pool: &MockPool,
        name: &str,
        text: &str,
        params: &[&str],
    ) -> Result<Vec<Row>, DriverError> {
        let mut conn = pool.acquire().await?;
        let rows = conn.execute(text, params, name).await;
        conn.release();
        rows
    }

    #[tokio::test]
    async fn test_counts_checkouts() {
        let pool = MockCatalogBuilder::default().with_standard_schema().pool();
        run(&pool, "catalog_list_schemas", "", &["shop"]).await.unwrap();

        assert_eq!(pool.acquired(), 1);
        assert_eq!(pool.released(), 1);
        assert_eq!(pool.executed()[0].params, vec!["shop"]);
    }

    #[tokio::test]
    async fn test_columns_without_dimension() {
        let pool = MockCatalogBuilder::default().with_standard_schema().pool();
        let rows = run(&pool, "table_list_columns", "", &["shop", "public", "users"])
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| !r.contains_key("array_dimension")));
    }

    #[tokio::test]
    async fn test_descriptor_schema_from_text() {
        let pool = MockCatalogBuilder::default().with_standard_schema().pool();
        let text = "SELECT t.oid FROM \"pg_catalog\".pg_type t";
        assert_eq!(run(&pool, "catalog_list_type_descriptors", text, &[]).await.unwrap().len(), 3);

        let text = "SELECT t.oid FROM \"public\".pg_type t";
        let err = run(&pool, "catalog_list_type_descriptors", text, &[]).await.unwrap_err();
        assert!(err.message().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let pool = MockPool::new(MockCatalog::default());
        pool.fail_statement("catalog_list_domains", "boom");
        let err = run(&pool, "catalog_list_domains", "", &["shop"]).await.unwrap_err();
        assert_eq!(err.message(), "boom");

        let err = run(&pool, "no_such_statement", "", &[]).await.unwrap_err();
        assert!(err.message().contains("no_such_statement"));

        pool.fail_connect("refused");
        assert!(pool.acquire().await.is_err());
        assert_eq!(pool.outstanding(), 0);
    }
}
