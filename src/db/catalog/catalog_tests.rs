use super::*;
use crate::db::error::BrowseError;

fn named(kind: ObjectKind, name: &str) -> DbObject {
    DbObject::new(kind, name, "HR")
}

#[test]
fn kind_parses_catalog_tags() {
    assert_eq!(ObjectKind::from_catalog("TABLE"), ObjectKind::Table);
    assert_eq!(ObjectKind::from_catalog("PROCEDURE"), ObjectKind::Procedure);
    assert_eq!(ObjectKind::from_catalog("FUNCTION"), ObjectKind::Function);
    assert_eq!(ObjectKind::from_catalog("PACKAGE"), ObjectKind::Package);
    assert_eq!(
        ObjectKind::from_catalog("PACKAGE BODY"),
        ObjectKind::PackageBody
    );
    assert_eq!(
        ObjectKind::from_catalog("PACKAGE_BODY"),
        ObjectKind::PackageBody
    );
}

#[test]
fn kind_parsing_is_case_insensitive() {
    assert_eq!(ObjectKind::from_catalog("table"), ObjectKind::Table);
    assert_eq!(
        ObjectKind::from_catalog(" package body "),
        ObjectKind::PackageBody
    );
}

#[test]
fn unrecognized_kind_is_preserved() {
    let kind = ObjectKind::from_catalog("Trigger");
    assert_eq!(kind, ObjectKind::Other("TRIGGER".to_string()));
    assert_eq!(kind.to_string(), "TRIGGER");
}

#[test]
fn kind_displays_catalog_spelling() {
    assert_eq!(ObjectKind::PackageBody.to_string(), "PACKAGE BODY");
    assert_eq!(ObjectKind::Table.to_string(), "TABLE");
}

#[test]
fn qualified_name_includes_package_when_present() {
    let standalone = named(ObjectKind::Procedure, "REFRESH_STATS");
    assert_eq!(standalone.qualified_name(), "HR.REFRESH_STATS");

    let packaged = DbObject::packaged("ADD_EMPLOYEE", "HR", "EMP_PKG");
    assert_eq!(packaged.qualified_name(), "HR.EMP_PKG.ADD_EMPLOYEE");
    assert_eq!(packaged.kind, ObjectKind::Procedure);
}

#[test]
fn plan_orders_families_within_each_schema() {
    let schemas = vec!["HR".to_string(), "SALES".to_string()];
    let plan = CatalogQueryPlan::for_schemas(&schemas);
    assert_eq!(plan.queries.len(), 8);

    let expected = [
        DiscoveryFamily::Tables,
        DiscoveryFamily::StandaloneRoutines,
        DiscoveryFamily::PackagedRoutines,
        DiscoveryFamily::PackageBodies,
    ];
    for (i, query) in plan.queries.iter().enumerate() {
        assert_eq!(query.schema, schemas[i / 4]);
        assert_eq!(query.family, expected[i % 4]);
    }
}

#[test]
fn plan_groups_by_schema() {
    let schemas = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let plan = CatalogQueryPlan::for_schemas(&schemas);
    let groups: Vec<_> = plan.schema_groups().collect();
    assert_eq!(groups.len(), 3);
    for (group, schema) in groups.iter().zip(&schemas) {
        assert_eq!(group.len(), 4);
        assert!(group.iter().all(|q| &q.schema == schema));
    }
}

#[test]
fn discovery_statements_bind_the_owner() {
    for family in DiscoveryFamily::ALL {
        let sql = family.sql();
        assert!(sql.contains("owner = :1"), "owner must be bound: {sql}");
    }
}

#[test]
fn discovery_statements_cover_the_four_families() {
    assert!(DiscoveryFamily::Tables.sql().contains("all_tables"));
    assert!(DiscoveryFamily::Tables.sql().contains("'TABLE'"));

    let standalone = DiscoveryFamily::StandaloneRoutines.sql();
    assert!(standalone.contains("all_objects"));
    assert!(standalone.contains("('PROCEDURE', 'FUNCTION')"));

    let packaged = DiscoveryFamily::PackagedRoutines.sql();
    assert!(packaged.contains("all_procedures"));
    assert!(packaged.contains("procedure_name IS NOT NULL"));
    assert!(
        packaged.contains("object_name"),
        "packaged routines must carry their package"
    );

    let bodies = DiscoveryFamily::PackageBodies.sql();
    assert!(bodies.contains("'PACKAGE BODY'"));
}

#[test]
fn table_definition_uses_metadata_ddl() {
    let object = named(ObjectKind::Table, "EMPLOYEES");
    match definition_query(&object) {
        Some(DefinitionQuery::DdlScalar { sql, binds }) => {
            assert_eq!(sql, TABLE_DDL_SQL);
            assert_eq!(binds, vec!["EMPLOYEES".to_string(), "HR".to_string()]);
        }
        other => panic!("expected a DDL scalar query, got {other:?}"),
    }
}

#[test]
fn package_kinds_resolve_to_body_source() {
    for kind in [ObjectKind::Package, ObjectKind::PackageBody] {
        let object = named(kind, "EMP_PKG");
        match definition_query(&object) {
            Some(DefinitionQuery::SourceLines { sql, binds }) => {
                assert_eq!(sql, PACKAGE_BODY_SOURCE_SQL);
                assert_eq!(binds, vec!["EMP_PKG".to_string(), "HR".to_string()]);
            }
            other => panic!("expected body source, got {other:?}"),
        }
    }
}

#[test]
fn standalone_routines_resolve_to_their_own_source() {
    let procedure = named(ObjectKind::Procedure, "REFRESH_STATS");
    match definition_query(&procedure) {
        Some(DefinitionQuery::SourceLines { sql, binds }) => {
            assert_eq!(sql, STANDALONE_SOURCE_SQL);
            assert_eq!(binds[0], "PROCEDURE");
            assert_eq!(binds[1], "REFRESH_STATS");
            assert_eq!(binds[2], "HR");
        }
        other => panic!("expected standalone source, got {other:?}"),
    }

    let function = named(ObjectKind::Function, "NET_SALARY");
    match definition_query(&function) {
        Some(DefinitionQuery::SourceLines { binds, .. }) => assert_eq!(binds[0], "FUNCTION"),
        other => panic!("expected standalone source, got {other:?}"),
    }
}

#[test]
fn packaged_procedure_resolves_to_package_interface() {
    let object = DbObject::packaged("ADD_EMPLOYEE", "HR", "EMP_PKG");
    match definition_query(&object) {
        Some(DefinitionQuery::SourceLines { sql, binds }) => {
            assert_eq!(sql, PACKAGE_SPEC_SOURCE_SQL);
            assert_eq!(binds, vec!["EMP_PKG".to_string(), "HR".to_string()]);
        }
        other => panic!("expected package interface source, got {other:?}"),
    }
}

#[test]
fn unknown_kind_has_no_definition_query() {
    let object = named(ObjectKind::Other("SYNONYM".to_string()), "EMP_SYN");
    assert_eq!(definition_query(&object), None);
    assert_eq!(UNKNOWN_OBJECT_TYPE, "Unknown object type");
}

#[test]
fn routine_search_uppercases_the_pattern() {
    let (sql, binds) = routine_search_query("HR", "EMP_PKG", "calc_bonus");
    assert_eq!(sql, ROUTINE_IN_BODY_SQL);
    assert_eq!(binds[0], "EMP_PKG");
    assert_eq!(binds[1], "HR");
    assert_eq!(binds[2], "%PROCEDURE CALC_BONUS%");
}

#[test]
fn identifier_allow_list_accepts_catalog_names() {
    for name in ["EMPLOYEES", "T1", "EMP_AUDIT", "X$KCCDI", "A#B", "hr"] {
        assert!(validate_identifier(name).is_ok(), "{name} should pass");
    }
}

#[test]
fn identifier_allow_list_rejects_everything_else() {
    let bad = [
        "",
        "1TAB",
        "_LEAD",
        "EMP LOYEES",
        "EMP\"LOYEES",
        "EMP;DROP TABLE T",
        "EMP--",
        "EMPLOYÉS",
        "\"X\"",
    ];
    for name in bad {
        assert!(
            matches!(
                validate_identifier(name),
                Err(BrowseError::InvalidIdentifier(_))
            ),
            "{name:?} should be rejected"
        );
    }

    let long = "A".repeat(129);
    assert!(validate_identifier(&long).is_err());
    let max = "A".repeat(128);
    assert!(validate_identifier(&max).is_ok());
}

#[test]
fn table_statements_quote_validated_identifiers() {
    let count = table_count_sql("HR", "EMPLOYEES").unwrap();
    assert_eq!(count, "SELECT COUNT(*) FROM \"HR\".\"EMPLOYEES\"");

    let page = table_page_sql("HR", "EMPLOYEES").unwrap();
    assert!(page.contains("\"HR\".\"EMPLOYEES\""));
    assert!(page.contains("ROWNUM <= :1"));
    assert!(page.contains("rnum > :2"));
}

#[test]
fn table_statements_reject_bad_identifiers() {
    assert!(table_count_sql("HR", "EMP\" OR 1=1 --").is_err());
    assert!(table_page_sql("HR; DROP USER HR", "EMPLOYEES").is_err());
}

#[test]
fn source_rows_join_in_line_order_without_separator() {
    let sorted = vec![
        (1, "PACKAGE BODY emp_pkg IS\n".to_string()),
        (2, "  PROCEDURE add_employee IS\n".to_string()),
        (3, "END emp_pkg;\n".to_string()),
    ];
    let shuffled = vec![sorted[2].clone(), sorted[0].clone(), sorted[1].clone()];

    let expected = "PACKAGE BODY emp_pkg IS\n  PROCEDURE add_employee IS\nEND emp_pkg;\n";
    assert_eq!(join_source_lines(sorted), expected);
    assert_eq!(
        join_source_lines(shuffled),
        expected,
        "delivery order must not affect the joined text"
    );
}

#[test]
fn join_of_no_rows_is_empty() {
    assert_eq!(join_source_lines(Vec::new()), "");
}

#[test]
fn missing_ddl_becomes_placeholder() {
    assert_eq!(ddl_or_placeholder(None), NO_DDL_AVAILABLE);
    assert_eq!(ddl_or_placeholder(Some("   \n".to_string())), NO_DDL_AVAILABLE);
    assert_eq!(
        ddl_or_placeholder(Some("CREATE TABLE ...".to_string())),
        "CREATE TABLE ..."
    );
}

#[test]
fn empty_routine_search_becomes_not_found() {
    assert_eq!(source_or_missing(String::new()), PROCEDURE_NOT_FOUND);
    assert_eq!(
        source_or_missing("PROCEDURE CALC_BONUS IS\n".to_string()),
        "PROCEDURE CALC_BONUS IS\n"
    );
}

#[test]
fn filter_matches_name_substring_case_insensitively() {
    let objects = vec![
        named(ObjectKind::Table, "EMPLOYEES"),
        named(ObjectKind::Table, "TMP_EMP"),
        named(ObjectKind::Table, "emp_audit"),
        named(ObjectKind::Table, "DEPARTMENTS"),
    ];
    let kept = CatalogAssembler::apply_filter(objects, Some("emp"));
    let names: Vec<&str> = kept.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["EMPLOYEES", "TMP_EMP", "emp_audit"]);
}

#[test]
fn filter_ignores_schema_and_package() {
    let objects = vec![
        DbObject::packaged("LIST_ALL", "PAYROLL", "PAY_PKG"),
        named(ObjectKind::Table, "PAYROLL"),
    ];

    let kept = CatalogAssembler::apply_filter(objects, Some("pay"));
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "PAYROLL");
}

#[test]
fn empty_filter_passes_everything() {
    let objects = vec![
        named(ObjectKind::Table, "EMPLOYEES"),
        named(ObjectKind::Package, "EMP_PKG"),
    ];
    assert_eq!(CatalogAssembler::apply_filter(objects.clone(), None).len(), 2);
    assert_eq!(
        CatalogAssembler::apply_filter(objects, Some("")).len(),
        2
    );
}

#[test]
fn hr_discovery_filtered_to_payroll() {
    // The shape a discovery of HR would assemble, one row per clause hit.
    let rows = [
        ("TABLE", "EMPLOYEES", None),
        ("TABLE", "PAYROLL", None),
        ("PROCEDURE", "REFRESH_STATS", None),
        ("PROCEDURE", "ADD_EMPLOYEE", Some("EMP_PKG")),
        ("PACKAGE BODY", "EMP_PKG", None),
    ];
    let objects: Vec<DbObject> = rows
        .iter()
        .copied()
        .map(|(kind, name, package)| {
            CatalogAssembler::identity_from_row(kind, name, "HR", package.map(String::from))
        })
        .collect();

    let kept = CatalogAssembler::apply_filter(objects, Some("pay"));
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "PAYROLL");
    assert_eq!(kept[0].kind, ObjectKind::Table);
}

#[test]
fn identity_from_row_keeps_the_package() {
    let object = CatalogAssembler::identity_from_row(
        "PROCEDURE",
        "ADD_EMPLOYEE",
        "HR",
        Some("EMP_PKG".to_string()),
    );
    assert_eq!(object.kind, ObjectKind::Procedure);
    assert_eq!(object.package.as_deref(), Some("EMP_PKG"));
}

#[test]
fn configured_entries_parse_by_segment_count() {
    let table = CatalogAssembler::parse_table_entry("HR.EMPLOYEES").unwrap();
    assert_eq!(table.kind, ObjectKind::Table);
    assert_eq!(table.schema, "HR");
    assert_eq!(table.name, "EMPLOYEES");

    let procedure = CatalogAssembler::parse_procedure_entry("HR.EMP_PKG.ADD_EMPLOYEE").unwrap();
    assert_eq!(procedure.kind, ObjectKind::Procedure);
    assert_eq!(procedure.package.as_deref(), Some("EMP_PKG"));
    assert_eq!(procedure.name, "ADD_EMPLOYEE");

    let package = CatalogAssembler::parse_package_entry("HR.EMP_PKG").unwrap();
    assert_eq!(package.kind, ObjectKind::Package);
    assert_eq!(package.name, "EMP_PKG");
    assert_eq!(package.package, None);
}

#[test]
fn malformed_configured_entries_are_errors() {
    for entry in ["EMPLOYEES", "HR.X.Y", "A.B.C.D"] {
        let result = CatalogAssembler::parse_table_entry(entry);
        assert!(
            matches!(result, Err(BrowseError::BadObjectEntry { .. })),
            "{entry} should not parse as a table entry"
        );
    }
    assert!(CatalogAssembler::parse_procedure_entry("HR.EMP_PKG").is_err());
    assert!(CatalogAssembler::parse_package_entry("HR").is_err());
}

#[test]
fn configured_catalog_lists_tables_then_procedures_then_packages() {
    let lists = ConfiguredObjects {
        tables: vec!["HR.EMPLOYEES".to_string()],
        procedures: vec!["HR.EMP_PKG.ADD_EMPLOYEE".to_string()],
        packages: vec!["HR.EMP_PKG".to_string()],
    };
    let objects = CatalogAssembler::from_configured(&lists, None).unwrap();
    let kinds: Vec<&ObjectKind> = objects.iter().map(|o| &o.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &ObjectKind::Table,
            &ObjectKind::Procedure,
            &ObjectKind::Package
        ]
    );
}

#[test]
fn configured_catalog_is_not_deduplicated() {
    let lists = ConfiguredObjects {
        tables: vec!["HR.EMPLOYEES".to_string(), "HR.EMPLOYEES".to_string()],
        ..ConfiguredObjects::default()
    };
    let objects = CatalogAssembler::from_configured(&lists, None).unwrap();
    assert_eq!(objects.len(), 2);
}

#[test]
fn configured_catalog_applies_the_filter() {
    let lists = ConfiguredObjects {
        tables: vec!["HR.EMPLOYEES".to_string(), "HR.DEPARTMENTS".to_string()],
        procedures: vec!["HR.EMP_PKG.ADD_EMPLOYEE".to_string()],
        packages: vec![],
    };
    let objects = CatalogAssembler::from_configured(&lists, Some("emp")).unwrap();
    let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["EMPLOYEES", "ADD_EMPLOYEE"]);
}

#[test]
fn configured_catalog_surfaces_the_first_bad_entry() {
    let lists = ConfiguredObjects {
        tables: vec!["JUSTANAME".to_string()],
        ..ConfiguredObjects::default()
    };
    assert!(CatalogAssembler::from_configured(&lists, None).is_err());
}

#[test]
fn configured_lists_know_when_they_are_empty() {
    assert!(ConfiguredObjects::default().is_empty());

    let lists = ConfiguredObjects {
        packages: vec!["HR.EMP_PKG".to_string()],
        ..ConfiguredObjects::default()
    };
    assert!(!lists.is_empty());
}

#[test]
fn window_helper_column_is_stripped() {
    let with_helper = vec![
        "ID".to_string(),
        "NAME".to_string(),
        "RNUM".to_string(),
    ];
    assert_eq!(column_keep_count(&with_helper), 2);

    let lowercase = vec!["id".to_string(), "rnum".to_string()];
    assert_eq!(column_keep_count(&lowercase), 1);

    let without = vec!["ID".to_string(), "NAME".to_string()];
    assert_eq!(column_keep_count(&without), 2);

    // Only a trailing helper is stripped.
    let mid = vec!["RNUM".to_string(), "NAME".to_string()];
    assert_eq!(column_keep_count(&mid), 2);
}
