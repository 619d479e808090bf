use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of schema objects the browser handles.
///
/// The catalog can hand back types outside this set (views, triggers,
/// synonyms, ...); those are preserved verbatim in `Other` so they still
/// display, even though no definition lookup exists for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    Table,
    Procedure,
    Function,
    Package,
    PackageBody,
    Other(String),
}

impl ObjectKind {
    /// Parse a catalog type tag (`OBJECT_TYPE` spelling, e.g. `PACKAGE BODY`).
    /// Unrecognized tags are kept as-is, uppercased.
    pub fn from_catalog(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "TABLE" => ObjectKind::Table,
            "PROCEDURE" => ObjectKind::Procedure,
            "FUNCTION" => ObjectKind::Function,
            "PACKAGE" => ObjectKind::Package,
            "PACKAGE BODY" | "PACKAGE_BODY" => ObjectKind::PackageBody,
            other => ObjectKind::Other(other.to_string()),
        }
    }

    /// The catalog spelling of this kind (`PACKAGE BODY` with a space).
    pub fn as_catalog(&self) -> &str {
        match self {
            ObjectKind::Table => "TABLE",
            ObjectKind::Procedure => "PROCEDURE",
            ObjectKind::Function => "FUNCTION",
            ObjectKind::Package => "PACKAGE",
            ObjectKind::PackageBody => "PACKAGE BODY",
            ObjectKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_catalog())
    }
}

/// One schema object as assembled into the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DbObject {
    pub kind: ObjectKind,
    pub name: String,
    pub schema: String,
    /// Owning package for packaged routines; `None` for everything else.
    pub package: Option<String>,
}

impl DbObject {
    pub fn new(kind: ObjectKind, name: &str, schema: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            schema: schema.to_string(),
            package: None,
        }
    }

    /// A procedure living inside a package.
    pub fn packaged(name: &str, schema: &str, package: &str) -> Self {
        Self {
            kind: ObjectKind::Procedure,
            name: name.to_string(),
            schema: schema.to_string(),
            package: Some(package.to_string()),
        }
    }

    /// `SCHEMA.NAME`, or `SCHEMA.PACKAGE.NAME` for packaged routines.
    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{}.{}.{}", self.schema, package, self.name),
            None => format!("{}.{}", self.schema, self.name),
        }
    }
}

/// The three caller-supplied name lists used instead of live discovery.
///
/// Entries are dotted: `schema.table`, `schema.package.procedure` and
/// `schema.package`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfiguredObjects {
    pub tables: Vec<String>,
    pub procedures: Vec<String>,
    pub packages: Vec<String>,
}

impl ConfiguredObjects {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.procedures.is_empty() && self.packages.is_empty()
    }
}
