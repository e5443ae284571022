// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Catalog fixtures
//!
//! [`MockCatalogBuilder`] assembles a [`MockCatalog`] with a fluent API. The
//! rows it creates carry the same catalog/schema/table identifiers the real
//! views would, so [`MockPool`] can filter them by statement parameters.

use catalog_introspect::{
    ArrayColumnProbe, Attribute, Column, Domain, Schema, Table, TypeDescriptor, UserDefinedType,
};

use crate::mock_pool::{MockCatalog, MockPool};

/// Database name used by [`MockCatalogBuilder::with_standard_schema`]
pub const STANDARD_DATABASE: &str = "shop";

/// Builder for creating mock catalogs with a fluent API
#[derive(Debug, Clone)]
pub struct MockCatalogBuilder {
    database: String,
    catalog: MockCatalog,
}

impl MockCatalogBuilder {
    /// Create an empty catalog for `database`
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            catalog: MockCatalog::default(),
        }
    }

    pub fn add_schema(mut self, name: &str) -> Self {
        self.catalog.schemas.push(Schema {
            schema_owner: Some("postgres".to_string()),
            ..Schema::new(&self.database, name)
        });
        self
    }

    /// Add a base table
    pub fn add_table(self, schema: &str, name: &str, comment: Option<&str>) -> Self {
        self.add_relation(schema, name, "BASE TABLE", comment)
    }

    pub fn add_view(self, schema: &str, name: &str) -> Self {
        self.add_relation(schema, name, "VIEW", None)
    }

    fn add_relation(
        mut self,
        schema: &str,
        name: &str,
        table_type: &str,
        comment: Option<&str>,
    ) -> Self {
        self.catalog.tables.push(Table {
            table_catalog: Some(self.database.clone()),
            table_type: Some(table_type.to_string()),
            is_insertable_into: Some("YES".to_string()),
            is_typed: Some("NO".to_string()),
            comment: comment.map(str::to_string),
            ..Table::new(schema, name)
        });
        self
    }

    /// Add a scalar column
    pub fn add_column(self, schema: &str, table: &str, column: &str, data_type: &str) -> Self {
        self.push_column(schema, table, column, data_type, data_type, None)
    }

    /// Add a column with a comment
    pub fn add_commented_column(
        self,
        schema: &str,
        table: &str,
        column: &str,
        data_type: &str,
        comment: &str,
    ) -> Self {
        self.push_column(schema, table, column, data_type, data_type, Some(comment))
    }

    /// Add an array column and the matching `pg_attribute` probe
    pub fn add_array_column(
        mut self,
        schema: &str,
        table: &str,
        column: &str,
        element_udt: &str,
        dimensions: i32,
    ) -> Self {
        self.catalog.array_columns.push((
            schema.to_string(),
            ArrayColumnProbe::new(table, column, dimensions),
        ));
        self.push_column(schema, table, column, "ARRAY", &format!("_{}", element_udt), None)
    }

    /// Add a probe row that has no column behind it
    pub fn add_stale_array_probe(
        mut self,
        schema: &str,
        table: &str,
        column: &str,
        dimensions: i32,
    ) -> Self {
        self.catalog.array_columns.push((
            schema.to_string(),
            ArrayColumnProbe::new(table, column, dimensions),
        ));
        self
    }

    fn push_column(
        mut self,
        schema: &str,
        table: &str,
        column: &str,
        data_type: &str,
        udt_name: &str,
        comment: Option<&str>,
    ) -> Self {
        let ordinal = self
            .catalog
            .columns
            .iter()
            .filter(|c| c.table_schema.as_deref() == Some(schema))
            .filter(|c| c.table_name.as_deref() == Some(table))
            .count() as i32
            + 1;

        self.catalog.columns.push(Column {
            table_catalog: Some(self.database.clone()),
            table_schema: Some(schema.to_string()),
            ordinal_position: Some(ordinal),
            is_nullable: Some("YES".to_string()),
            data_type: Some(data_type.to_string()),
            udt_catalog: Some(self.database.clone()),
            udt_schema: Some("pg_catalog".to_string()),
            udt_name: Some(udt_name.to_string()),
            dtd_identifier: Some(ordinal.to_string()),
            is_self_referencing: Some("NO".to_string()),
            is_identity: Some("NO".to_string()),
            is_generated: Some("NEVER".to_string()),
            is_updatable: Some("YES".to_string()),
            comment: comment.map(str::to_string),
            ..Column::new(table, column)
        });
        self
    }

    pub fn add_domain(mut self, schema: &str, name: &str, data_type: &str) -> Self {
        self.catalog.domains.push(Domain {
            domain_catalog: Some(self.database.clone()),
            domain_schema: Some(schema.to_string()),
            domain_name: Some(name.to_string()),
            data_type: Some(data_type.to_string()),
            udt_catalog: Some(self.database.clone()),
            udt_schema: Some("pg_catalog".to_string()),
            udt_name: Some(data_type.to_string()),
            dtd_identifier: Some("1".to_string()),
            ..Default::default()
        });
        self
    }

    /// Add a composite type with `(attribute, data_type)` pairs
    pub fn add_composite_type(
        mut self,
        schema: &str,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> Self {
        self.catalog.user_defined_types.push(UserDefinedType {
            user_defined_type_catalog: Some(self.database.clone()),
            user_defined_type_schema: Some(schema.to_string()),
            user_defined_type_name: Some(name.to_string()),
            user_defined_type_category: Some("STRUCTURED".to_string()),
            is_instantiable: Some("YES".to_string()),
            is_final: Some("NO".to_string()),
            ..Default::default()
        });

        for (position, (attribute, data_type)) in attributes.iter().enumerate() {
            self.catalog.attributes.push(Attribute {
                udt_catalog: Some(self.database.clone()),
                udt_schema: Some(schema.to_string()),
                udt_name: Some(name.to_string()),
                attribute_name: Some(attribute.to_string()),
                ordinal_position: Some(position as i32 + 1),
                is_nullable: Some("YES".to_string()),
                data_type: Some(data_type.to_string()),
                attribute_udt_catalog: Some(self.database.clone()),
                attribute_udt_schema: Some("pg_catalog".to_string()),
                attribute_udt_name: Some(data_type.to_string()),
                is_derived_reference_attribute: Some("NO".to_string()),
                ..Default::default()
            });
        }
        self
    }

    /// Add a `pg_type` row to the `pg_type` table of `schema`
    pub fn add_type_descriptor(
        mut self,
        schema: &str,
        oid: i64,
        typname: &str,
        typlen: i16,
    ) -> Self {
        self.catalog
            .type_descriptors
            .entry(schema.to_string())
            .or_default()
            .push(TypeDescriptor {
                oid: Some(oid),
                typname: Some(typname.to_string()),
                typnamespace: Some(11),
                typlen: Some(typlen),
                typbyval: Some(typlen > 0 && typlen <= 8),
                typtype: Some("b".to_string()),
                typisdefined: Some(true),
                typdelim: Some(",".to_string()),
                ..Default::default()
            });
        self
    }

    /// A small shop database
    ///
    /// - schemas `public` and `inventory`, plus the reserved
    ///   `information_schema`, `pg_catalog` and `pg_toast`
    /// - `public.users` with `tags text[]`, `public.orders` with a
    ///   two-dimensional `matrix`, a view `public.active_users`
    /// - `inventory.products` with `sizes int4[]`
    /// - a stale array probe for `public.ghost.data`
    pub fn with_standard_schema(self) -> Self {
        self.add_schema("public")
            .add_schema("inventory")
            .add_schema("information_schema")
            .add_schema("pg_catalog")
            .add_schema("pg_toast")
            .add_table("public", "users", Some("User account information"))
            .add_column("public", "users", "id", "integer")
            .add_commented_column(
                "public",
                "users",
                "email",
                "character varying",
                "User email address",
            )
            .add_array_column("public", "users", "tags", "text", 1)
            .add_table("public", "orders", None)
            .add_column("public", "orders", "id", "integer")
            .add_column("public", "orders", "user_id", "integer")
            .add_array_column("public", "orders", "matrix", "int4", 2)
            .add_view("public", "active_users")
            .add_column("public", "active_users", "id", "integer")
            .add_table("inventory", "products", None)
            .add_column("inventory", "products", "id", "integer")
            .add_array_column("inventory", "products", "sizes", "int4", 1)
            .add_stale_array_probe("public", "ghost", "data", 1)
            .add_domain("public", "email_address", "character varying")
            .add_domain("inventory", "positive_int", "integer")
            .add_composite_type(
                "public",
                "address",
                &[
                    ("street", "text"),
                    ("city", "text"),
                    ("zip", "character varying"),
                ],
            )
            .add_type_descriptor("pg_catalog", 23, "int4", 4)
            .add_type_descriptor("pg_catalog", 25, "text", -1)
            .add_type_descriptor("pg_catalog", 1007, "_int4", -1)
    }

    pub fn build(self) -> MockCatalog {
        self.catalog
    }

    /// Build a [`MockPool`] serving this catalog
    pub fn pool(self) -> MockPool {
        MockPool::new(self.catalog)
    }
}

impl Default for MockCatalogBuilder {
    fn default() -> Self {
        Self::new(STANDARD_DATABASE)
    }
}
