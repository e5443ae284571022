// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema-scoped service

use crate::catalog::CatalogService;
use crate::enrich::enrich_array_dimensions;
use crate::error::CatalogResult;
use crate::metadata::{ArrayColumnProbe, Attribute, Column, Table, UserDefinedType};
use crate::queries;
use crate::table::TableService;

/// Introspection scoped to one schema of a [`CatalogService`]
///
/// The schema name is not checked against the database.
#[derive(Debug, Clone)]
pub struct SchemaService<'a> {
    catalog: &'a CatalogService,
    schema_name: String,
}

impl<'a> SchemaService<'a> {
    pub fn new(catalog: &'a CatalogService, schema_name: impl Into<String>) -> Self {
        Self {
            catalog,
            schema_name: schema_name.into(),
        }
    }

    pub fn catalog(&self) -> &'a CatalogService {
        self.catalog
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// List base tables with their comments, ordered by schema and name
    pub async fn list_tables(&self) -> CatalogResult<Vec<Table>> {
        self.catalog
            .executor()
            .run(&queries::list_tables(), &self.scope())
            .await
    }

    /// List composite types, ordered by name
    pub async fn list_user_defined_types(&self) -> CatalogResult<Vec<UserDefinedType>> {
        self.catalog
            .executor()
            .run(&queries::list_user_defined_types(), &self.scope())
            .await
    }

    /// List composite type attributes, ordered by type and attribute name
    pub async fn list_attributes(&self) -> CatalogResult<Vec<Attribute>> {
        self.catalog
            .executor()
            .run(&queries::list_attributes(), &self.scope())
            .await
    }

    /// Probe `pg_attribute` for user columns declared with array dimensions
    pub async fn list_array_columns(&self) -> CatalogResult<Vec<ArrayColumnProbe>> {
        self.catalog
            .executor()
            .run(&queries::list_array_columns(), &[self.schema_name.as_str()])
            .await
    }

    /// List columns of every table in the schema, ordered by table and column
    ///
    /// Array columns get their `array_dimension` from a second query. Both
    /// queries run on their own connection without a shared snapshot.
    pub async fn list_columns(&self) -> CatalogResult<Vec<Column>> {
        let mut columns: Vec<Column> = self
            .catalog
            .executor()
            .run(&queries::list_schema_columns(), &self.scope())
            .await?;
        let probes = self.list_array_columns().await?;

        enrich_array_dimensions(&mut columns, &probes);
        Ok(columns)
    }

    /// Scope further queries to table `name`
    pub fn table(&self, name: impl Into<String>) -> TableService<'_> {
        TableService::new(self.catalog, self, name)
    }

    fn scope(&self) -> [&str; 2] {
        [self.catalog.database_name(), &self.schema_name]
    }
}
