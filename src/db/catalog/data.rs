//! Table data windows: a count plus a ROWNUM-emulated skip/take fetch.

use oracle::{Connection, Row};

use crate::db::catalog::plan;
use crate::db::error::BrowseError;
use crate::db::pager::TableWindow;

/// One window of table rows: ordered column names and nullable text
/// cells, shaped from whatever the table currently has.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TablePage {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

pub struct TableReader;

impl TableReader {
    /// Total row count for the fully qualified table.
    pub fn count_rows(conn: &Connection, schema: &str, table: &str) -> Result<u64, BrowseError> {
        let sql = plan::table_count_sql(schema, table)?;
        let mut stmt = conn.statement(&sql).build()?;
        let row = stmt.query_row(&[])?;
        let count: u64 = row.get(0)?;
        Ok(count)
    }

    /// Fetch one window of rows. The ROWNUM helper column used by the
    /// window emulation is stripped from the result.
    pub fn fetch_page(
        conn: &Connection,
        schema: &str,
        table: &str,
        window: &TableWindow,
    ) -> Result<TablePage, BrowseError> {
        let sql = plan::table_page_sql(schema, table)?;
        let mut stmt = conn.statement(&sql).build()?;
        let result_set = stmt.query(&[&window.upper_bound(), &window.offset])?;

        let mut columns: Vec<String> = result_set
            .column_info()
            .iter()
            .map(|col| col.name().to_string())
            .collect();
        let keep = column_keep_count(&columns);
        columns.truncate(keep);

        let mut rows: Vec<Vec<Option<String>>> = Vec::new();
        for row_result in result_set {
            let row: Row = row_result?;
            let mut cells: Vec<Option<String>> = Vec::with_capacity(keep);
            for i in 0..keep {
                // Unconvertible cell types (RAW, nested types, ...) render
                // as null rather than failing the page.
                let value: Option<String> = row.get(i).unwrap_or(None);
                cells.push(value);
            }
            rows.push(cells);
        }

        Ok(TablePage { columns, rows })
    }
}

/// Columns kept from the window query: everything up to the trailing
/// ROWNUM helper.
pub fn column_keep_count(columns: &[String]) -> usize {
    match columns.last() {
        Some(last) if last.eq_ignore_ascii_case("rnum") => columns.len() - 1,
        _ => columns.len(),
    }
}
