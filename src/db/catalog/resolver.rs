//! Definition resolution: dispatch on object kind, read DDL or source
//! text, shape sentinel values for the cases that have no text.

use oracle::sql_type::ToSql;
use oracle::{Connection, Error as OracleError, Row};

use crate::db::catalog::plan::{self, DefinitionQuery};
use crate::db::catalog::types::DbObject;
use crate::db::error::BrowseError;

/// Returned when DBMS_METADATA hands back no DDL for a table.
pub const NO_DDL_AVAILABLE: &str = "No DDL available";
/// Returned when the in-package routine search matches nothing.
pub const PROCEDURE_NOT_FOUND: &str = "Stored procedure not found";
/// Returned for kinds the browser has no definition lookup for.
pub const UNKNOWN_OBJECT_TYPE: &str = "Unknown object type";

pub struct DefinitionResolver;

impl DefinitionResolver {
    /// Resolve an object to its definition text. Sentinels are ordinary
    /// values; errors are reserved for driver failures.
    pub fn resolve(conn: &Connection, object: &DbObject) -> Result<String, BrowseError> {
        match plan::definition_query(object) {
            None => Ok(UNKNOWN_OBJECT_TYPE.to_string()),
            Some(DefinitionQuery::DdlScalar { sql, binds }) => {
                let ddl = Self::fetch_ddl_scalar(conn, sql, &binds)?;
                Ok(ddl_or_placeholder(ddl))
            }
            Some(DefinitionQuery::SourceLines { sql, binds }) => {
                let lines = Self::fetch_source_lines(conn, sql, &binds)?;
                Ok(join_source_lines(lines))
            }
        }
    }

    /// Locate one routine inside a package body via the narrowed source
    /// search. An empty match becomes the not-found sentinel.
    pub fn find_procedure_in_body(
        conn: &Connection,
        schema: &str,
        package: &str,
        routine: &str,
    ) -> Result<String, BrowseError> {
        let (sql, binds) = plan::routine_search_query(schema, package, routine);
        let lines = Self::fetch_source_lines(conn, sql, &binds)?;
        Ok(source_or_missing(join_source_lines(lines)))
    }

    fn fetch_ddl_scalar(
        conn: &Connection,
        sql: &str,
        binds: &[String],
    ) -> Result<Option<String>, OracleError> {
        let mut stmt = conn.statement(sql).build()?;
        let params: Vec<&dyn ToSql> = binds.iter().map(|value| value as &dyn ToSql).collect();
        let row = stmt.query_row(&params)?;
        row.get(0)
    }

    fn fetch_source_lines(
        conn: &Connection,
        sql: &str,
        binds: &[String],
    ) -> Result<Vec<(u32, String)>, OracleError> {
        let mut stmt = conn.statement(sql).build()?;
        let params: Vec<&dyn ToSql> = binds.iter().map(|value| value as &dyn ToSql).collect();
        let rows = stmt.query(&params)?;

        let mut lines: Vec<(u32, String)> = Vec::new();
        for row_result in rows {
            let row: Row = row_result?;
            let line: u32 = row.get(0)?;
            let text: Option<String> = row.get(1)?;
            lines.push((line, text.unwrap_or_default()));
        }
        Ok(lines)
    }
}

/// Concatenate source rows in ascending line order with no separator.
/// ALL_SOURCE text already carries its trailing newlines.
pub fn join_source_lines(mut lines: Vec<(u32, String)>) -> String {
    lines.sort_by_key(|(line, _)| *line);
    let mut text = String::with_capacity(lines.iter().map(|(_, chunk)| chunk.len()).sum());
    for (_, chunk) in lines {
        text.push_str(&chunk);
    }
    text
}

/// Shape a DDL scalar: null or blank collapses to the no-DDL sentinel.
pub fn ddl_or_placeholder(ddl: Option<String>) -> String {
    match ddl {
        Some(text) if !text.trim().is_empty() => text,
        _ => NO_DDL_AVAILABLE.to_string(),
    }
}

/// Shape the routine search result: an empty match is the not-found
/// sentinel.
pub fn source_or_missing(text: String) -> String {
    if text.is_empty() {
        PROCEDURE_NOT_FOUND.to_string()
    } else {
        text
    }
}
