// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Table-scoped service

use crate::catalog::CatalogService;
use crate::enrich::enrich_array_dimensions;
use crate::error::CatalogResult;
use crate::metadata::Column;
use crate::queries;
use crate::schema::SchemaService;

/// Introspection scoped to one table of a [`SchemaService`]
#[derive(Debug, Clone)]
pub struct TableService<'a> {
    catalog: &'a CatalogService,
    schema: &'a SchemaService<'a>,
    table_name: String,
}

impl<'a> TableService<'a> {
    pub fn new(
        catalog: &'a CatalogService,
        schema: &'a SchemaService<'a>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            schema,
            table_name: table_name.into(),
        }
    }

    pub fn schema(&self) -> &'a SchemaService<'a> {
        self.schema
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// List the columns of this table, ordered by column name
    ///
    /// The array probe still covers the whole schema; only the probes for
    /// this table find a matching column.
    pub async fn list_columns(&self) -> CatalogResult<Vec<Column>> {
        let params = [
            self.catalog.database_name(),
            self.schema.schema_name(),
            self.table_name.as_str(),
        ];
        let mut columns: Vec<Column> = self
            .catalog
            .executor()
            .run(&queries::list_table_columns(), &params)
            .await?;
        let probes = self.schema.list_array_columns().await?;

        enrich_array_dimensions(&mut columns, &probes);
        Ok(columns)
    }
}
