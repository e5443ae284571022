// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog statements
//!
//! Statement texts used by the services. Each statement shape has its own
//! stable name so prepared plans never collide. Values are always bound
//! positionally; the only interpolated identifier is the type-descriptor
//! catalog, see [`type_descriptors`].

/// Default system catalog holding `pg_type`
pub const SYSTEM_CATALOG: &str = "pg_catalog";

/// Standard information-schema namespace
pub const INFORMATION_SCHEMA: &str = "information_schema";

/// Prefix of namespaces reserved by the engine
pub const RESERVED_SCHEMA_PREFIX: &str = "pg_";

/// A statement text together with its stable name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub name: &'static str,
    pub text: String,
}

impl Statement {
    fn fixed(name: &'static str, text: &str) -> Self {
        Self {
            name,
            text: text.to_string(),
        }
    }
}

/// `$1` database name
pub fn list_schemas() -> Statement {
    Statement::fixed(
        "catalog_list_schemas",
        r#"
        SELECT s.*
        FROM information_schema.schemata s
        WHERE s.catalog_name = $1
          AND s.schema_name <> 'information_schema'
          AND s.schema_name NOT LIKE 'pg\_%'
        ORDER BY s.schema_name
        "#,
    )
}

/// `$1` database name
pub fn list_all_schemas() -> Statement {
    Statement::fixed(
        "catalog_list_all_schemas",
        r#"
        SELECT s.*
        FROM information_schema.schemata s
        WHERE s.catalog_name = $1
        ORDER BY s.schema_name
        "#,
    )
}

/// `$1` database name
pub fn list_domains() -> Statement {
    Statement::fixed(
        "catalog_list_domains",
        r#"
        SELECT d.*
        FROM information_schema.domains d
        WHERE d.domain_catalog = $1
        ORDER BY d.domain_catalog, d.domain_schema, d.domain_name
        "#,
    )
}

/// Reads `pg_type` from `catalog`
///
/// `catalog` is interpolated as a quoted identifier. Callers must check it
/// against the list of existing schemas first.
pub fn type_descriptors(catalog: &str) -> Statement {
    let text = format!(
        r#"
        SELECT t.oid,
               t.typname,
               t.typnamespace,
               t.typowner,
               t.typlen,
               t.typbyval,
               t.typtype,
               t.typcategory,
               t.typispreferred,
               t.typisdefined,
               t.typdelim,
               t.typrelid,
               t.typsubscript::text AS typsubscript,
               t.typelem,
               t.typarray,
               t.typinput::text AS typinput,
               t.typoutput::text AS typoutput,
               t.typreceive::text AS typreceive,
               t.typsend::text AS typsend,
               t.typmodin::text AS typmodin,
               t.typmodout::text AS typmodout,
               t.typanalyze::text AS typanalyze,
               t.typalign,
               t.typstorage,
               t.typnotnull,
               t.typbasetype,
               t.typtypmod,
               t.typndims,
               t.typcollation,
               t.typdefaultbin::text AS typdefaultbin,
               t.typdefault,
               t.typacl::text[] AS typacl
        FROM {}.pg_type t
        ORDER BY t.typname
        "#,
        quote_identifier(catalog)
    );

    Statement {
        name: "catalog_list_type_descriptors",
        text,
    }
}

/// `$1` database name, `$2` schema name
pub fn list_tables() -> Statement {
    Statement::fixed(
        "schema_list_tables",
        r#"
        SELECT t.*,
               pg_catalog.obj_description(pc.oid, 'pg_class') AS comment
        FROM information_schema.tables t
        JOIN pg_catalog.pg_namespace pn ON pn.nspname = t.table_schema
        JOIN pg_catalog.pg_class pc
          ON pc.relnamespace = pn.oid AND pc.relname = t.table_name
        WHERE t.table_catalog = $1
          AND t.table_schema = $2
          AND t.table_type = 'BASE TABLE'
        ORDER BY t.table_schema, t.table_name
        "#,
    )
}

/// `$1` database name, `$2` schema name
pub fn list_user_defined_types() -> Statement {
    Statement::fixed(
        "schema_list_user_defined_types",
        r#"
        SELECT u.*
        FROM information_schema.user_defined_types u
        WHERE u.user_defined_type_catalog = $1
          AND u.user_defined_type_schema = $2
        ORDER BY u.user_defined_type_name
        "#,
    )
}

/// `$1` database name, `$2` schema name
pub fn list_attributes() -> Statement {
    Statement::fixed(
        "schema_list_attributes",
        r#"
        SELECT a.*
        FROM information_schema.attributes a
        WHERE a.udt_catalog = $1
          AND a.udt_schema = $2
        ORDER BY a.udt_name, a.attribute_name
        "#,
    )
}

/// `$1` schema name
pub fn list_array_columns() -> Statement {
    Statement::fixed(
        "schema_list_array_columns",
        r#"
        SELECT pc.relname::text AS table_name,
               pa.attname::text AS column_name,
               pa.attndims AS array_dimension
        FROM pg_catalog.pg_attribute pa
        JOIN pg_catalog.pg_class pc ON pc.oid = pa.attrelid
        JOIN pg_catalog.pg_namespace pn ON pn.oid = pc.relnamespace
        WHERE pn.nspname = $1
          AND pa.attnum > 0
          AND pa.attndims > 0
          AND NOT pa.attisdropped
        ORDER BY pc.relname, pa.attname
        "#,
    )
}

/// `$1` database name, `$2` schema name
pub fn list_schema_columns() -> Statement {
    Statement::fixed(
        "schema_list_columns",
        r#"
        SELECT c.*,
               pg_catalog.col_description(pc.oid, c.ordinal_position::int) AS comment
        FROM information_schema.columns c
        JOIN pg_catalog.pg_namespace pn ON pn.nspname = c.table_schema
        JOIN pg_catalog.pg_class pc
          ON pc.relnamespace = pn.oid AND pc.relname = c.table_name
        WHERE c.table_catalog = $1
          AND c.table_schema = $2
        ORDER BY c.table_name, c.column_name
        "#,
    )
}

/// `$1` database name, `$2` schema name, `$3` table name
pub fn list_table_columns() -> Statement {
    Statement::fixed(
        "table_list_columns",
        r#"
        SELECT c.*,
               pg_catalog.col_description(pc.oid, c.ordinal_position::int) AS comment
        FROM information_schema.columns c
        JOIN pg_catalog.pg_namespace pn ON pn.nspname = c.table_schema
        JOIN pg_catalog.pg_class pc
          ON pc.relnamespace = pn.oid AND pc.relname = c.table_name
        WHERE c.table_catalog = $1
          AND c.table_schema = $2
          AND c.table_name = $3
        ORDER BY c.column_name
        "#,
    )
}

/// Quote `ident` as a SQL identifier, doubling embedded quotes
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Whether `schema` belongs to a reserved namespace family
pub fn is_reserved_schema(schema: &str) -> bool {
    schema == INFORMATION_SCHEMA || schema.starts_with(RESERVED_SCHEMA_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("pg_catalog"), "\"pg_catalog\"");
        assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_type_descriptors_interpolates_quoted_catalog() {
        let stmt = type_descriptors("pg_catalog");
        assert!(stmt.text.contains("FROM \"pg_catalog\".pg_type t"));
        assert!(!stmt.text.contains('$'));
    }

    #[test]
    fn test_statement_names_are_unique() {
        let mut names = vec![
            list_schemas().name,
            list_all_schemas().name,
            list_domains().name,
            type_descriptors(SYSTEM_CATALOG).name,
            list_tables().name,
            list_user_defined_types().name,
            list_attributes().name,
            list_array_columns().name,
            list_schema_columns().name,
            list_table_columns().name,
        ];
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_reserved_schema() {
        assert!(is_reserved_schema("information_schema"));
        assert!(is_reserved_schema("pg_catalog"));
        assert!(is_reserved_schema("pg_toast"));
        assert!(!is_reserved_schema("public"));
        assert!(!is_reserved_schema("pgx"));
    }

    #[test]
    fn test_table_columns_filters_by_table() {
        assert!(list_table_columns().text.contains("c.table_name = $3"));
        assert!(!list_schema_columns().text.contains("$3"));
    }
}
