//! SQL builders for catalog discovery, definition lookup and table data.
//!
//! Everything here is pure string assembly. Values travel as positional
//! binds; only allow-listed identifiers are ever spliced into statement
//! text (the table-data statements, where the engine cannot bind them).

use crate::db::catalog::types::{DbObject, ObjectKind};
use crate::db::error::BrowseError;

/// The four discovery clauses run per schema, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryFamily {
    Tables,
    StandaloneRoutines,
    PackagedRoutines,
    PackageBodies,
}

impl DiscoveryFamily {
    pub const ALL: [DiscoveryFamily; 4] = [
        DiscoveryFamily::Tables,
        DiscoveryFamily::StandaloneRoutines,
        DiscoveryFamily::PackagedRoutines,
        DiscoveryFamily::PackageBodies,
    ];

    /// Discovery statement for this family. Every statement yields rows of
    /// (kind tag, object name, owner, package-or-null) and binds the owner
    /// as `:1`.
    pub fn sql(&self) -> &'static str {
        match self {
            DiscoveryFamily::Tables => {
                "SELECT 'TABLE', table_name, owner, NULL FROM all_tables WHERE owner = :1"
            }
            DiscoveryFamily::StandaloneRoutines => {
                "SELECT object_type, object_name, owner, NULL FROM all_objects \
                 WHERE owner = :1 AND object_type IN ('PROCEDURE', 'FUNCTION')"
            }
            DiscoveryFamily::PackagedRoutines => {
                "SELECT 'PROCEDURE', procedure_name, owner, object_name FROM all_procedures \
                 WHERE owner = :1 AND object_type = 'PACKAGE' AND procedure_name IS NOT NULL"
            }
            DiscoveryFamily::PackageBodies => {
                "SELECT 'PACKAGE BODY', object_name, owner, NULL FROM all_objects \
                 WHERE owner = :1 AND object_type = 'PACKAGE BODY'"
            }
        }
    }
}

/// One discovery statement bound to its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryQuery {
    pub schema: String,
    pub family: DiscoveryFamily,
}

impl DiscoveryQuery {
    pub fn sql(&self) -> &'static str {
        self.family.sql()
    }
}

/// The ordered discovery statements for a browse request: all four families
/// per schema, schemas in caller order.
#[derive(Debug, Clone, Default)]
pub struct CatalogQueryPlan {
    pub queries: Vec<DiscoveryQuery>,
}

impl CatalogQueryPlan {
    pub fn for_schemas(schemas: &[String]) -> Self {
        let mut queries = Vec::with_capacity(schemas.len() * DiscoveryFamily::ALL.len());
        for schema in schemas {
            for family in DiscoveryFamily::ALL {
                queries.push(DiscoveryQuery {
                    schema: schema.clone(),
                    family,
                });
            }
        }
        Self { queries }
    }

    /// The plan grouped by schema. Each group holds one schema's four
    /// clauses, by construction.
    pub fn schema_groups(&self) -> impl Iterator<Item = &[DiscoveryQuery]> + '_ {
        self.queries.chunks(DiscoveryFamily::ALL.len())
    }
}

pub const TABLE_DDL_SQL: &str = "SELECT DBMS_METADATA.GET_DDL('TABLE', :1, :2) FROM DUAL";

pub const PACKAGE_BODY_SOURCE_SQL: &str = "SELECT line, text FROM all_source \
     WHERE type = 'PACKAGE BODY' AND name = :1 AND owner = :2 ORDER BY line";

pub const STANDALONE_SOURCE_SQL: &str = "SELECT line, text FROM all_source \
     WHERE type = :1 AND name = :2 AND owner = :3 ORDER BY line";

pub const PACKAGE_SPEC_SOURCE_SQL: &str = "SELECT line, text FROM all_source \
     WHERE type = 'PACKAGE' AND name = :1 AND owner = :2 ORDER BY line";

pub const ROUTINE_IN_BODY_SQL: &str = "SELECT line, text FROM all_source \
     WHERE type = 'PACKAGE BODY' AND name = :1 AND owner = :2 \
     AND UPPER(text) LIKE :3 ORDER BY line";

/// How a definition is read back: one DDL scalar, or source rows to be
/// concatenated in line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionQuery {
    DdlScalar {
        sql: &'static str,
        binds: Vec<String>,
    },
    SourceLines {
        sql: &'static str,
        binds: Vec<String>,
    },
}

/// Definition statement for an object, dispatched on its kind.
///
/// Kinds outside the closed set have no statement; the resolver turns that
/// into the unknown-type sentinel without touching the database.
pub fn definition_query(object: &DbObject) -> Option<DefinitionQuery> {
    match &object.kind {
        ObjectKind::Table => Some(DefinitionQuery::DdlScalar {
            sql: TABLE_DDL_SQL,
            binds: vec![object.name.clone(), object.schema.clone()],
        }),
        // Both package kinds show the body source; a `schema.package` entry
        // and a discovered PACKAGE BODY name the same object.
        ObjectKind::Package | ObjectKind::PackageBody => Some(DefinitionQuery::SourceLines {
            sql: PACKAGE_BODY_SOURCE_SQL,
            binds: vec![object.name.clone(), object.schema.clone()],
        }),
        ObjectKind::Procedure => match &object.package {
            // A packaged routine shows the package interface it is
            // declared in; the body search is a separate operation.
            Some(package) => Some(DefinitionQuery::SourceLines {
                sql: PACKAGE_SPEC_SOURCE_SQL,
                binds: vec![package.clone(), object.schema.clone()],
            }),
            None => Some(DefinitionQuery::SourceLines {
                sql: STANDALONE_SOURCE_SQL,
                binds: vec![
                    "PROCEDURE".to_string(),
                    object.name.clone(),
                    object.schema.clone(),
                ],
            }),
        },
        ObjectKind::Function => Some(DefinitionQuery::SourceLines {
            sql: STANDALONE_SOURCE_SQL,
            binds: vec![
                "FUNCTION".to_string(),
                object.name.clone(),
                object.schema.clone(),
            ],
        }),
        ObjectKind::Other(_) => None,
    }
}

/// Statement and binds for locating one routine inside a package body.
pub fn routine_search_query(schema: &str, package: &str, routine: &str) -> (&'static str, Vec<String>) {
    (
        ROUTINE_IN_BODY_SQL,
        vec![
            package.to_string(),
            schema.to_string(),
            format!("%PROCEDURE {}%", routine.to_uppercase()),
        ],
    )
}

/// Allow-list check for identifiers spliced into table-data statements:
/// a letter followed by letters, digits, `_`, `$` or `#`, at most 128
/// bytes. Anything else is rejected before any SQL is assembled.
pub fn validate_identifier(name: &str) -> Result<&str, BrowseError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '#')
        }
        _ => false,
    };
    if valid && name.len() <= 128 {
        Ok(name)
    } else {
        Err(BrowseError::InvalidIdentifier(name.to_string()))
    }
}

fn qualified_table(schema: &str, table: &str) -> Result<String, BrowseError> {
    Ok(format!(
        "\"{}\".\"{}\"",
        validate_identifier(schema)?,
        validate_identifier(table)?
    ))
}

/// `COUNT(*)` over the fully qualified table.
pub fn table_count_sql(schema: &str, table: &str) -> Result<String, BrowseError> {
    Ok(format!(
        "SELECT COUNT(*) FROM {}",
        qualified_table(schema, table)?
    ))
}

/// Skip/take emulation over an unordered base select. Binds: `:1` is the
/// upper ROWNUM bound (offset + fetch count), `:2` the offset.
pub fn table_page_sql(schema: &str, table: &str) -> Result<String, BrowseError> {
    let table = qualified_table(schema, table)?;
    Ok(format!(
        "SELECT * FROM (SELECT t.*, ROWNUM rnum FROM (SELECT * FROM {table}) t \
         WHERE ROWNUM <= :1) WHERE rnum > :2"
    ))
}
