// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata types for catalog rows
//!
//! One record type per catalog view or table. Field names follow the
//! PostgreSQL documentation column for column, and every field is nullable,
//! so a record can be decoded from any [`Row`] the engine returns.
//!
//! Two fields are not part of the underlying views:
//! - `comment` on [`Table`] and [`Column`], looked up from `pg_description`
//! - `array_dimension` on [`Column`], filled in by
//!   [`enrich_array_dimensions`](crate::enrich::enrich_array_dimensions)

use serde::{Deserialize, Serialize};

/// One result row, keyed by output column name
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A row of `information_schema.schemata`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Name of the database that contains the schema
    pub catalog_name: Option<String>,
    /// Name of the schema
    pub schema_name: Option<String>,
    /// Name of the owner of the schema
    pub schema_owner: Option<String>,
    /// Applies to a feature not available in PostgreSQL
    pub default_character_set_catalog: Option<String>,
    /// Applies to a feature not available in PostgreSQL
    pub default_character_set_schema: Option<String>,
    /// Applies to a feature not available in PostgreSQL
    pub default_character_set_name: Option<String>,
    /// Applies to a feature not available in PostgreSQL
    pub sql_path: Option<String>,
}

impl Schema {
    /// Create a schema row with catalog and schema name set
    pub fn new(catalog: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            catalog_name: Some(catalog.into()),
            schema_name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A row of `information_schema.tables`, plus the table comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Name of the database that contains the table
    pub table_catalog: Option<String>,
    /// Name of the schema that contains the table
    pub table_schema: Option<String>,
    /// Name of the table
    pub table_name: Option<String>,
    /// `BASE TABLE`, `VIEW`, `FOREIGN` or `LOCAL TEMPORARY`
    pub table_type: Option<String>,
    pub self_referencing_column_name: Option<String>,
    pub reference_generation: Option<String>,
    /// Set when the table is a typed table
    pub user_defined_type_catalog: Option<String>,
    pub user_defined_type_schema: Option<String>,
    pub user_defined_type_name: Option<String>,
    /// `YES` if the table is insertable into
    pub is_insertable_into: Option<String>,
    /// `YES` if the table is a typed table
    pub is_typed: Option<String>,
    /// Not yet implemented by PostgreSQL
    pub commit_action: Option<String>,
    /// Comment attached with `COMMENT ON TABLE`
    pub comment: Option<String>,
}

impl Table {
    /// Create a base table row
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table_schema: Some(schema.into()),
            table_name: Some(name.into()),
            table_type: Some("BASE TABLE".to_string()),
            ..Default::default()
        }
    }
}

/// A row of `information_schema.columns`, plus the column comment and the
/// array dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub table_catalog: Option<String>,
    pub table_schema: Option<String>,
    pub table_name: Option<String>,
    pub column_name: Option<String>,
    /// Ordinal position of the column within the table (count starts at 1)
    pub ordinal_position: Option<i32>,
    /// Default expression of the column
    pub column_default: Option<String>,
    /// `YES` if the column is possibly nullable
    pub is_nullable: Option<String>,
    /// `ARRAY` for array columns, `USER-DEFINED` for custom types
    pub data_type: Option<String>,

    // Character types
    pub character_maximum_length: Option<i32>,
    pub character_octet_length: Option<i32>,

    // Numeric types
    pub numeric_precision: Option<i32>,
    pub numeric_precision_radix: Option<i32>,
    pub numeric_scale: Option<i32>,

    // Date, time, timestamp and interval types
    pub datetime_precision: Option<i32>,
    pub interval_type: Option<String>,
    pub interval_precision: Option<i32>,

    pub character_set_catalog: Option<String>,
    pub character_set_schema: Option<String>,
    pub character_set_name: Option<String>,
    pub collation_catalog: Option<String>,
    pub collation_schema: Option<String>,
    pub collation_name: Option<String>,

    // Set when the column has a domain type
    pub domain_catalog: Option<String>,
    pub domain_schema: Option<String>,
    pub domain_name: Option<String>,

    /// Underlying data type; for arrays this is the array type (e.g. `_int4`)
    pub udt_catalog: Option<String>,
    pub udt_schema: Option<String>,
    pub udt_name: Option<String>,

    pub scope_catalog: Option<String>,
    pub scope_schema: Option<String>,
    pub scope_name: Option<String>,
    /// Always null, PostgreSQL arrays have no maximum cardinality
    pub maximum_cardinality: Option<i32>,
    pub dtd_identifier: Option<String>,
    pub is_self_referencing: Option<String>,

    // Identity columns
    pub is_identity: Option<String>,
    pub identity_generation: Option<String>,
    pub identity_start: Option<String>,
    pub identity_increment: Option<String>,
    pub identity_maximum: Option<String>,
    pub identity_minimum: Option<String>,
    pub identity_cycle: Option<String>,

    // Generated columns
    pub is_generated: Option<String>,
    pub generation_expression: Option<String>,

    pub is_updatable: Option<String>,

    /// Comment attached with `COMMENT ON COLUMN`
    pub comment: Option<String>,
    /// Declared number of array dimensions; `None` for non-array columns
    pub array_dimension: Option<i32>,
}

impl Column {
    /// Create a column row identified by table and column name
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table_name: Some(table.into()),
            column_name: Some(column.into()),
            ..Default::default()
        }
    }
}

/// A row of `information_schema.domains`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub domain_catalog: Option<String>,
    pub domain_schema: Option<String>,
    pub domain_name: Option<String>,
    pub data_type: Option<String>,
    pub character_maximum_length: Option<i32>,
    pub character_octet_length: Option<i32>,
    pub character_set_catalog: Option<String>,
    pub character_set_schema: Option<String>,
    pub character_set_name: Option<String>,
    pub collation_catalog: Option<String>,
    pub collation_schema: Option<String>,
    pub collation_name: Option<String>,
    pub numeric_precision: Option<i32>,
    pub numeric_precision_radix: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub datetime_precision: Option<i32>,
    pub interval_type: Option<String>,
    pub interval_precision: Option<i32>,
    pub domain_default: Option<String>,
    pub udt_catalog: Option<String>,
    pub udt_schema: Option<String>,
    pub udt_name: Option<String>,
    pub scope_catalog: Option<String>,
    pub scope_schema: Option<String>,
    pub scope_name: Option<String>,
    pub maximum_cardinality: Option<i32>,
    pub dtd_identifier: Option<String>,
}

/// A row of `information_schema.user_defined_types`
///
/// PostgreSQL only lists composite types in this view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDefinedType {
    pub user_defined_type_catalog: Option<String>,
    pub user_defined_type_schema: Option<String>,
    pub user_defined_type_name: Option<String>,
    /// `STRUCTURED` for composite types
    pub user_defined_type_category: Option<String>,
    pub is_instantiable: Option<String>,
    pub is_final: Option<String>,
    pub ordering_form: Option<String>,
    pub ordering_category: Option<String>,
    pub ordering_routine_catalog: Option<String>,
    pub ordering_routine_schema: Option<String>,
    pub ordering_routine_name: Option<String>,
    pub reference_type: Option<String>,
    pub data_type: Option<String>,
    pub character_maximum_length: Option<i32>,
    pub character_octet_length: Option<i32>,
    pub character_set_catalog: Option<String>,
    pub character_set_schema: Option<String>,
    pub character_set_name: Option<String>,
    pub collation_catalog: Option<String>,
    pub collation_schema: Option<String>,
    pub collation_name: Option<String>,
    pub numeric_precision: Option<i32>,
    pub numeric_precision_radix: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub datetime_precision: Option<i32>,
    pub interval_type: Option<String>,
    pub interval_precision: Option<i32>,
    pub source_dtd_identifier: Option<String>,
    pub ref_dtd_identifier: Option<String>,
}

/// A row of `information_schema.attributes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Composite type that owns the attribute
    pub udt_catalog: Option<String>,
    pub udt_schema: Option<String>,
    pub udt_name: Option<String>,
    pub attribute_name: Option<String>,
    pub ordinal_position: Option<i32>,
    pub attribute_default: Option<String>,
    pub is_nullable: Option<String>,
    pub data_type: Option<String>,
    pub character_maximum_length: Option<i32>,
    pub character_octet_length: Option<i32>,
    pub character_set_catalog: Option<String>,
    pub character_set_schema: Option<String>,
    pub character_set_name: Option<String>,
    pub collation_catalog: Option<String>,
    pub collation_schema: Option<String>,
    pub collation_name: Option<String>,
    pub numeric_precision: Option<i32>,
    pub numeric_precision_radix: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub datetime_precision: Option<i32>,
    pub interval_type: Option<String>,
    pub interval_precision: Option<i32>,
    /// Data type of the attribute itself
    pub attribute_udt_catalog: Option<String>,
    pub attribute_udt_schema: Option<String>,
    pub attribute_udt_name: Option<String>,
    pub scope_catalog: Option<String>,
    pub scope_schema: Option<String>,
    pub scope_name: Option<String>,
    pub maximum_cardinality: Option<i32>,
    pub dtd_identifier: Option<String>,
    pub is_derived_reference_attribute: Option<String>,
}

/// A row of `pg_type`
///
/// `regproc`, `aclitem[]` and `pg_node_tree` columns are read as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub oid: Option<i64>,
    pub typname: Option<String>,
    pub typnamespace: Option<i64>,
    pub typowner: Option<i64>,
    pub typlen: Option<i16>,
    pub typbyval: Option<bool>,
    /// `b` base, `c` composite, `d` domain, `e` enum, `p` pseudo, `r` range, `m` multirange
    pub typtype: Option<String>,
    pub typcategory: Option<String>,
    pub typispreferred: Option<bool>,
    pub typisdefined: Option<bool>,
    pub typdelim: Option<String>,
    pub typrelid: Option<i64>,
    pub typsubscript: Option<String>,
    pub typelem: Option<i64>,
    pub typarray: Option<i64>,
    pub typinput: Option<String>,
    pub typoutput: Option<String>,
    pub typreceive: Option<String>,
    pub typsend: Option<String>,
    pub typmodin: Option<String>,
    pub typmodout: Option<String>,
    pub typanalyze: Option<String>,
    pub typalign: Option<String>,
    pub typstorage: Option<String>,
    pub typnotnull: Option<bool>,
    pub typbasetype: Option<i64>,
    pub typtypmod: Option<i32>,
    pub typndims: Option<i32>,
    pub typcollation: Option<i64>,
    pub typdefaultbin: Option<String>,
    pub typdefault: Option<String>,
    pub typacl: Option<Vec<String>>,
}

/// Array dimension of one column, read from `pg_attribute`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayColumnProbe {
    pub table_name: Option<String>,
    pub column_name: Option<String>,
    pub array_dimension: Option<i32>,
}

impl ArrayColumnProbe {
    pub fn new(table: impl Into<String>, column: impl Into<String>, dimension: i32) -> Self {
        Self {
            table_name: Some(table.into()),
            column_name: Some(column.into()),
            array_dimension: Some(dimension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_missing_fields_are_none() {
        let value = json!({
            "table_name": "users",
            "column_name": "id",
            "ordinal_position": 1,
            "is_nullable": "NO",
        });
        let column: Column = serde_json::from_value(value).unwrap();

        assert_eq!(column.table_name.as_deref(), Some("users"));
        assert_eq!(column.ordinal_position, Some(1));
        assert_eq!(column.comment, None);
        assert_eq!(column.array_dimension, None);
    }

    #[test]
    fn test_column_nulls_decode_as_none() {
        let value = json!({
            "table_name": "users",
            "column_name": "tags",
            "character_maximum_length": null,
            "comment": null,
        });
        let column: Column = serde_json::from_value(value).unwrap();
        assert_eq!(column.character_maximum_length, None);
        assert_eq!(column.comment, None);
    }

    #[test]
    fn test_table_new_is_base_table() {
        let table = Table::new("public", "users");
        assert_eq!(table.table_type.as_deref(), Some("BASE TABLE"));
        assert_eq!(table.table_schema.as_deref(), Some("public"));
    }

    #[test]
    fn test_type_descriptor_decodes_acl_array() {
        let value = json!({
            "oid": 23,
            "typname": "int4",
            "typlen": 4,
            "typbyval": true,
            "typtype": "b",
            "typacl": ["postgres=U/postgres"],
        });
        let descriptor: TypeDescriptor = serde_json::from_value(value).unwrap();
        assert_eq!(descriptor.oid, Some(23));
        assert_eq!(descriptor.typlen, Some(4));
        assert_eq!(descriptor.typacl.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_wrong_scalar_type_is_rejected() {
        let value = json!({ "ordinal_position": "first" });
        assert!(serde_json::from_value::<Column>(value).is_err());
    }
}
