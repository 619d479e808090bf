//! Catalog assembly: live discovery against the catalog views, or the
//! caller-configured name lists. Both produce the same identity shape.

use oracle::{Connection, Error as OracleError, Row};
use serde::{Deserialize, Serialize};

use crate::db::catalog::plan::{CatalogQueryPlan, DiscoveryQuery};
use crate::db::catalog::types::{ConfiguredObjects, DbObject, ObjectKind};
use crate::db::error::BrowseError;

/// What to do when one schema's discovery statements fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaErrorPolicy {
    /// Fail the whole browse request.
    #[default]
    FailRequest,
    /// Drop the schema's entire contribution, warn on stderr, keep going.
    SkipSchema,
}

pub struct CatalogAssembler;

impl CatalogAssembler {
    /// Discover objects across `schemas` in plan order, then apply the name
    /// filter. A failing schema is handled per `policy`; a skipped schema
    /// contributes nothing, not even clauses that had already succeeded.
    pub fn discover(
        conn: &Connection,
        schemas: &[String],
        filter: Option<&str>,
        policy: SchemaErrorPolicy,
    ) -> Result<Vec<DbObject>, BrowseError> {
        let plan = CatalogQueryPlan::for_schemas(schemas);
        let mut objects: Vec<DbObject> = Vec::new();

        for group in plan.schema_groups() {
            match Self::run_schema_group(conn, group) {
                Ok(mut found) => objects.append(&mut found),
                Err(err) => match policy {
                    SchemaErrorPolicy::FailRequest => return Err(err.into()),
                    SchemaErrorPolicy::SkipSchema => {
                        let schema = group.first().map(|q| q.schema.as_str()).unwrap_or("?");
                        eprintln!("Warning: skipping schema {schema}: {err}");
                    }
                },
            }
        }

        Ok(Self::apply_filter(objects, filter))
    }

    fn run_schema_group(
        conn: &Connection,
        group: &[DiscoveryQuery],
    ) -> Result<Vec<DbObject>, OracleError> {
        let mut objects = Vec::new();
        for query in group {
            objects.extend(Self::run_discovery(conn, query)?);
        }
        Ok(objects)
    }

    fn run_discovery(
        conn: &Connection,
        query: &DiscoveryQuery,
    ) -> Result<Vec<DbObject>, OracleError> {
        let mut stmt = conn.statement(query.sql()).build()?;
        let rows = stmt.query(&[&query.schema])?;

        let mut objects = Vec::new();
        for row_result in rows {
            let row: Row = row_result?;
            let kind_tag: String = row.get(0)?;
            let name: String = row.get(1)?;
            let schema: String = row.get(2)?;
            let package: Option<String> = row.get(3)?;
            objects.push(Self::identity_from_row(&kind_tag, &name, &schema, package));
        }
        Ok(objects)
    }

    /// Map one discovery row to an identity. No deduplication: an object
    /// reached through two clauses stays listed twice.
    pub fn identity_from_row(
        kind_tag: &str,
        name: &str,
        schema: &str,
        package: Option<String>,
    ) -> DbObject {
        DbObject {
            kind: ObjectKind::from_catalog(kind_tag),
            name: name.to_string(),
            schema: schema.to_string(),
            package,
        }
    }

    /// Build the catalog from configured name lists; no statements run.
    pub fn from_configured(
        lists: &ConfiguredObjects,
        filter: Option<&str>,
    ) -> Result<Vec<DbObject>, BrowseError> {
        let mut objects = Vec::new();
        for entry in &lists.tables {
            objects.push(Self::parse_table_entry(entry)?);
        }
        for entry in &lists.procedures {
            objects.push(Self::parse_procedure_entry(entry)?);
        }
        for entry in &lists.packages {
            objects.push(Self::parse_package_entry(entry)?);
        }
        Ok(Self::apply_filter(objects, filter))
    }

    /// `schema.table`
    pub fn parse_table_entry(entry: &str) -> Result<DbObject, BrowseError> {
        match entry.split('.').collect::<Vec<_>>().as_slice() {
            [schema, table] => Ok(DbObject::new(ObjectKind::Table, table, schema)),
            _ => Err(BrowseError::BadObjectEntry {
                entry: entry.to_string(),
                expected: "schema.table",
            }),
        }
    }

    /// `schema.package.procedure`
    pub fn parse_procedure_entry(entry: &str) -> Result<DbObject, BrowseError> {
        match entry.split('.').collect::<Vec<_>>().as_slice() {
            [schema, package, procedure] => Ok(DbObject::packaged(procedure, schema, package)),
            _ => Err(BrowseError::BadObjectEntry {
                entry: entry.to_string(),
                expected: "schema.package.procedure",
            }),
        }
    }

    /// `schema.package`
    pub fn parse_package_entry(entry: &str) -> Result<DbObject, BrowseError> {
        match entry.split('.').collect::<Vec<_>>().as_slice() {
            [schema, package] => Ok(DbObject::new(ObjectKind::Package, package, schema)),
            _ => Err(BrowseError::BadObjectEntry {
                entry: entry.to_string(),
                expected: "schema.package",
            }),
        }
    }

    /// Case-insensitive substring filter on the object name only; schema
    /// and package never participate. An empty filter passes everything.
    pub fn apply_filter(objects: Vec<DbObject>, filter: Option<&str>) -> Vec<DbObject> {
        let needle = filter.unwrap_or("").to_lowercase();
        if needle.is_empty() {
            return objects;
        }
        objects
            .into_iter()
            .filter(|object| object.name.to_lowercase().contains(&needle))
            .collect()
    }
}
