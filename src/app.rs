use std::env;
use std::time::{Duration, Instant};

use crate::db::{
    self, BrowseOutcome, BrowseRequest, CatalogSource, DbObject, ObjectKind, SchemaBrowser,
};
use crate::report;
use crate::utils::{credential_store, AppConfig, BrowseHistory, BrowseHistoryEntry, DiscoveryMode};

pub struct App {
    config: AppConfig,
}

/// Everything the command line asked for, parsed and validated.
struct CliOptions {
    selection: Option<DbObject>,
    search: Option<String>,
    page: usize,
    data_page: usize,
    show_data: bool,
    find_procedure: Option<String>,
    password: Option<String>,
    save_password: bool,
    forget_password: bool,
    check_only: bool,
    init_config: bool,
}

impl App {
    pub fn new() -> Self {
        let config = AppConfig::load();
        Self { config }
    }

    pub fn run(&self) -> i32 {
        let mut args: Vec<String> = env::args().collect();
        let program = if args.is_empty() {
            "orascope".to_string()
        } else {
            args.remove(0)
        };

        let options = match parse_flags(&program, &args) {
            Ok(options) => options,
            Err(code) => return code,
        };

        if options.init_config {
            if self.config.save().is_err() {
                return 1;
            }
            if let Some(path) = AppConfig::config_path() {
                println!("Config written to {}", path.display());
            }
            return 0;
        }

        let mut info = self.config.connection.clone();
        if info.name.is_empty() {
            info.name = "default".to_string();
        }

        if options.forget_password {
            return match credential_store::delete_password(&info.name) {
                Ok(()) => {
                    println!("Stored password removed for connection `{}`.", info.name);
                    0
                }
                Err(err) => {
                    eprintln!("{err}");
                    1
                }
            };
        }

        if info.username.is_empty() {
            let path = AppConfig::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the config file".to_string());
            eprintln!("No connection configured; set one in {path} (--init-config writes a starter file)");
            return 1;
        }

        if let Some(ref value) = options.password {
            info.password = value.clone();
            if options.save_password {
                match credential_store::store_password(&info.name, value) {
                    Ok(()) => eprintln!("Password stored for connection `{}`.", info.name),
                    Err(err) => eprintln!("Warning: {err}"),
                }
            }
        } else {
            match credential_store::get_password(&info.name) {
                Ok(Some(stored)) => info.password = stored,
                Ok(None) => {}
                Err(err) => eprintln!("Warning: {err}"),
            }
            if info.password.is_empty() {
                if let Ok(env_password) = env::var("ORASCOPE_PASSWORD") {
                    info.password = env_password;
                }
            }
        }

        if info.password.is_empty() {
            eprintln!(
                "No password available: pass --password, store one with --save-password, or set ORASCOPE_PASSWORD."
            );
            return 1;
        }

        if options.check_only {
            return match db::test_connection(&info) {
                Ok(()) => {
                    println!("Connection OK: {}", info.display_string());
                    0
                }
                Err(_) => 1,
            };
        }

        let conn = match db::connect(&info) {
            Ok(conn) => conn,
            Err(_) => return 1,
        };
        // Clear the password now that the connection is established
        let connection_name = info.name.clone();
        info.clear_password();

        let source = match self.config.discovery_mode {
            DiscoveryMode::Live => CatalogSource::Live {
                schemas: self.config.schemas.clone(),
            },
            DiscoveryMode::Configured => {
                if self.config.objects.is_empty() {
                    eprintln!("Warning: configured object lists are empty");
                }
                CatalogSource::Configured(self.config.objects.clone())
            }
        };
        let browser = SchemaBrowser::new(
            source,
            self.config.page_size,
            self.config.data_page_size,
            self.config.on_schema_error,
        );

        let request = BrowseRequest {
            selection: options.selection,
            search: options.search,
            page: options.page,
            data_page: options.data_page,
            show_data: options.show_data,
            find_procedure: options.find_procedure,
        };
        if let Some(notice) = ignored_request_notice(&request) {
            eprintln!("{notice}");
        }

        let start = Instant::now();
        let outcome = match browser.browse(&conn, &request) {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("Browse failed: {err}");
                return 1;
            }
        };
        let elapsed = start.elapsed();

        print!(
            "{}",
            report::render_object_list(&outcome.objects, request.page, outcome.total_pages)
        );
        if let (Some(selected), Some(definition)) = (&request.selection, &outcome.definition) {
            println!();
            print!("{}", report::render_definition(selected, definition));
        }
        if let Some(found) = &outcome.procedure_match {
            println!();
            println!("--- routine search ---");
            print!("{found}");
            if !found.ends_with('\n') {
                println!();
            }
        }
        if let Some(data) = &outcome.table_data {
            println!();
            print!("{}", report::render_table_page(data, request.data_page));
        }

        self.record_history(&request, &outcome, elapsed, &connection_name);
        0
    }

    fn record_history(
        &self,
        request: &BrowseRequest,
        outcome: &BrowseOutcome,
        elapsed: Duration,
        connection_name: &str,
    ) {
        let mut history = BrowseHistory::load();
        history.add_entry(BrowseHistoryEntry {
            request: describe_request(request),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            execution_time_ms: elapsed.as_millis() as u64,
            object_count: outcome.objects.len(),
            connection_name: connection_name.to_string(),
        });
        let _ = history.save();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the flag list. `Err` carries the exit code to return: 2 for a bad
/// command line, 0 for `--help`.
fn parse_flags(program: &str, args: &[String]) -> Result<CliOptions, i32> {
    let mut search: Option<String> = None;
    let mut page: usize = 1;
    let mut data_page: usize = 1;
    let mut show_data = false;
    let mut kind: Option<String> = None;
    let mut name: Option<String> = None;
    let mut schema: Option<String> = None;
    let mut package: Option<String> = None;
    let mut find_procedure: Option<String> = None;
    let mut password: Option<String> = None;
    let mut save_password = false;
    let mut forget_password = false;
    let mut check_only = false;
    let mut init_config = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--search" => {
                if i + 1 >= args.len() { eprintln!("--search requires a value"); print_usage(program); return Err(2); }
                search = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--page" => {
                if i + 1 >= args.len() { eprintln!("--page requires a number"); print_usage(program); return Err(2); }
                match args[i + 1].parse::<usize>() {
                    Ok(value) => page = value,
                    Err(_) => { eprintln!("--page requires a number"); print_usage(program); return Err(2); }
                }
                i += 2; continue;
            }
            "--type" => {
                if i + 1 >= args.len() { eprintln!("--type requires a value"); print_usage(program); return Err(2); }
                kind = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--name" => {
                if i + 1 >= args.len() { eprintln!("--name requires a value"); print_usage(program); return Err(2); }
                name = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--schema" => {
                if i + 1 >= args.len() { eprintln!("--schema requires a value"); print_usage(program); return Err(2); }
                schema = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--package" => {
                if i + 1 >= args.len() { eprintln!("--package requires a value"); print_usage(program); return Err(2); }
                package = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--find-proc" => {
                if i + 1 >= args.len() { eprintln!("--find-proc requires a value"); print_usage(program); return Err(2); }
                find_procedure = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--data" => { show_data = true; i += 1; continue; }
            "--data-page" => {
                if i + 1 >= args.len() { eprintln!("--data-page requires a number"); print_usage(program); return Err(2); }
                match args[i + 1].parse::<usize>() {
                    Ok(value) => data_page = value,
                    Err(_) => { eprintln!("--data-page requires a number"); print_usage(program); return Err(2); }
                }
                i += 2; continue;
            }
            "--password" => {
                if i + 1 >= args.len() { eprintln!("--password requires a value"); print_usage(program); return Err(2); }
                password = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--save-password" => { save_password = true; i += 1; continue; }
            "--forget-password" => { forget_password = true; i += 1; continue; }
            "--check" => { check_only = true; i += 1; continue; }
            "--init-config" => { init_config = true; i += 1; continue; }
            "-h" | "--help" => {
                print_usage(program);
                return Err(0);
            }
            other => {
                eprintln!("Unknown flag `{other}`");
                print_usage(program);
                return Err(2);
            }
        }
    }

    if save_password && password.is_none() {
        eprintln!("--save-password requires --password");
        return Err(2);
    }

    let selection: Option<DbObject> = match name {
        Some(ref object_name) => {
            let Some(ref object_schema) = schema else {
                eprintln!("--name requires --schema");
                print_usage(program);
                return Err(2);
            };
            let Some(ref kind_tag) = kind else {
                eprintln!("--name requires --type");
                print_usage(program);
                return Err(2);
            };
            Some(DbObject {
                kind: ObjectKind::from_catalog(kind_tag),
                name: object_name.clone(),
                schema: object_schema.clone(),
                package: package.clone(),
            })
        }
        None => None,
    };

    Ok(CliOptions {
        selection,
        search,
        page,
        data_page,
        show_data,
        find_procedure,
        password,
        save_password,
        forget_password,
        check_only,
        init_config,
    })
}

/// A notice for request flags that only act on a selection.
fn ignored_request_notice(request: &BrowseRequest) -> Option<String> {
    if request.selection.is_some() {
        return None;
    }
    let mut ignored: Vec<&str> = Vec::new();
    if request.find_procedure.is_some() {
        ignored.push("--find-proc");
    }
    if request.show_data {
        ignored.push("--data");
    }
    if ignored.is_empty() {
        None
    } else {
        Some(format!(
            "Warning: {} ignored without a selection (--type/--name/--schema)",
            ignored.join(" and ")
        ))
    }
}

fn describe_request(request: &BrowseRequest) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(search) = &request.search {
        parts.push(format!("search={search}"));
    }
    parts.push(format!("page={}", request.page));
    if let Some(selection) = &request.selection {
        parts.push(format!("{} {}", selection.kind, selection.qualified_name()));
    }
    if request.show_data {
        parts.push(format!("data page={}", request.data_page));
    }
    if let Some(routine) = &request.find_procedure {
        parts.push(format!("find-proc={routine}"));
    }
    parts.join(", ")
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--search <text>] [--page <n>]\n  {program} --type <kind> --name <object> --schema <owner> [--package <pkg>] [--data] [--data-page <n>] [--find-proc <routine>]\n  {program} --check\n\nFlags:\n  --search <text>        Filter object names (case-insensitive substring)\n  --page <n>             Object list page (default 1)\n  --type <kind>          Selection kind: TABLE, PROCEDURE, FUNCTION, PACKAGE, PACKAGE BODY\n  --name <object>        Selection object name\n  --schema <owner>       Selection schema\n  --package <pkg>        Owning package for a packaged procedure\n  --data                 Show a page of table rows for a TABLE selection\n  --data-page <n>        Table data page (default 1)\n  --find-proc <routine>  Locate a routine inside the selected package body\n  --password <p>         Connection password for this run\n  --save-password        Store --password in the OS keyring\n  --forget-password      Remove the stored password and exit\n  --check                Test the configured connection and exit\n  --init-config          Write the config file with current values and exit\n  -h, --help             Show this help\n\nConnection, schemas and page sizes come from the config file\n(<config dir>/orascope/config.json).",
    );
}
