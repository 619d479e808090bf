//! The browse façade: one call assembles the catalog page, resolves the
//! selected object's definition, and windows table data.

use oracle::Connection;

use crate::db::catalog::{
    CatalogAssembler, ConfiguredObjects, DbObject, DefinitionResolver, ObjectKind,
    SchemaErrorPolicy, TableReader,
};
use crate::db::error::BrowseError;
use crate::db::pager::{self, TableWindow};

/// Where the catalog comes from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Interrogate the catalog views for every schema in the list.
    Live { schemas: Vec<String> },
    /// Use caller-configured name lists; no discovery statements run.
    Configured(ConfiguredObjects),
}

/// One browse request, as assembled by the caller.
#[derive(Debug, Clone)]
pub struct BrowseRequest {
    /// Object to resolve a definition for, if any.
    pub selection: Option<DbObject>,
    /// Case-insensitive name filter.
    pub search: Option<String>,
    /// 1-based object-list page.
    pub page: usize,
    /// 1-based table-data page.
    pub data_page: usize,
    /// Fetch a table-data window for a TABLE selection.
    pub show_data: bool,
    /// Routine to locate inside the selected package's body.
    pub find_procedure: Option<String>,
}

impl Default for BrowseRequest {
    fn default() -> Self {
        Self {
            selection: None,
            search: None,
            page: 1,
            data_page: 1,
            show_data: false,
            find_procedure: None,
        }
    }
}

/// One page of table data plus its page count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableDataPage {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
    pub total_pages: u64,
}

/// Everything a browse run produced.
#[derive(Debug, Clone, Default)]
pub struct BrowseOutcome {
    /// The requested object-list page.
    pub objects: Vec<DbObject>,
    /// Page count for the filtered object list.
    pub total_pages: usize,
    /// Definition text for the selection, when one was made.
    pub definition: Option<String>,
    /// Located routine text for a find-procedure request.
    pub procedure_match: Option<String>,
    /// Table window for a show-data request on a TABLE selection.
    pub table_data: Option<TableDataPage>,
}

pub struct SchemaBrowser {
    source: CatalogSource,
    page_size: usize,
    data_page_size: usize,
    on_schema_error: SchemaErrorPolicy,
}

impl SchemaBrowser {
    pub fn new(
        source: CatalogSource,
        page_size: usize,
        data_page_size: usize,
        on_schema_error: SchemaErrorPolicy,
    ) -> Self {
        Self {
            source,
            page_size,
            data_page_size,
            on_schema_error,
        }
    }

    /// Run one browse request over an already-open connection. Statements
    /// execute sequentially in plan order.
    pub fn browse(
        &self,
        conn: &Connection,
        request: &BrowseRequest,
    ) -> Result<BrowseOutcome, BrowseError> {
        let filter = request.search.as_deref();
        let catalog = match &self.source {
            CatalogSource::Live { schemas } => {
                CatalogAssembler::discover(conn, schemas, filter, self.on_schema_error)?
            }
            CatalogSource::Configured(lists) => CatalogAssembler::from_configured(lists, filter)?,
        };

        let mut outcome = BrowseOutcome {
            total_pages: pager::total_pages(catalog.len(), self.page_size),
            objects: pager::page_slice(&catalog, request.page, self.page_size).to_vec(),
            ..BrowseOutcome::default()
        };

        let Some(selection) = &request.selection else {
            return Ok(outcome);
        };

        outcome.definition = Some(DefinitionResolver::resolve(conn, selection)?);

        if let Some(routine) = &request.find_procedure {
            // A package selection names the package itself; a packaged
            // routine carries it in `package`.
            let package = selection.package.as_deref().unwrap_or(&selection.name);
            outcome.procedure_match = Some(DefinitionResolver::find_procedure_in_body(
                conn,
                &selection.schema,
                package,
                routine,
            )?);
        }

        if request.show_data && selection.kind == ObjectKind::Table {
            let count = TableReader::count_rows(conn, &selection.schema, &selection.name)?;
            let window = TableWindow::new(
                count,
                request.data_page as u64,
                self.data_page_size as u64,
            );
            let page = TableReader::fetch_page(conn, &selection.schema, &selection.name, &window)?;
            outcome.table_data = Some(TableDataPage {
                columns: page.columns,
                rows: page.rows,
                total_pages: window.total_pages,
            });
        }

        Ok(outcome)
    }
}
