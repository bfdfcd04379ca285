//! Names calculator: identifiers and file names derived from model names.

use std::borrow::Cow;

use metamodel_core::{Name, WordCase, to_camel_case, to_pascal_case};
use serde::Deserialize;

/// How file names are spelled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileNaming {
    /// Text placed between words.
    #[serde(default)]
    pub separator: Cow<'static, str>,
    pub case: WordCase,
    /// Extension without the leading dot; `None` for no extension.
    #[serde(default)]
    pub extension: Option<Cow<'static, str>>,
}

impl FileNaming {
    /// Spell the file name for `name`.
    pub fn file_name(&self, name: &Name) -> String {
        let stem = self.case.join(name, &self.separator);
        match &self.extension {
            Some(extension) if !extension.is_empty() => format!("{}.{}", stem, extension),
            _ => stem,
        }
    }
}

/// Language-specific naming conventions.
#[derive(Debug, Clone)]
pub struct NamingConvention {
    /// Exported identifiers: types, getters, constants.
    pub public: fn(&Name) -> String,
    /// Fields and parameters.
    pub private: fn(&Name) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "delete" -> "_delete")
    pub escape_reserved: fn(&str) -> String,
    pub files: FileNaming,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }
}

fn escape_with_underscore(name: &str) -> String {
    format!("_{}", name)
}

/// JavaScript naming: `ClusterState` / `clusterState`, files `clusterStateType.js`.
pub const JAVASCRIPT_NAMING: NamingConvention = NamingConvention {
    public: to_pascal_case,
    private: to_camel_case,
    reserved_words: &[
        "await",
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "implements",
        "import",
        "in",
        "instanceof",
        "interface",
        "let",
        "new",
        "null",
        "package",
        "private",
        "protected",
        "public",
        "return",
        "static",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
    ],
    escape_reserved: escape_with_underscore,
    files: FileNaming {
        separator: Cow::Borrowed(""),
        case: WordCase::Camel,
        extension: Some(Cow::Borrowed("js")),
    },
};

/// Go naming: exported `ClusterState`, unexported `clusterState`, files
/// `cluster_state_type.go`.
pub const GO_NAMING: NamingConvention = NamingConvention {
    public: to_pascal_case,
    private: to_camel_case,
    reserved_words: &[
        "break",
        "case",
        "chan",
        "const",
        "continue",
        "default",
        "defer",
        "else",
        "fallthrough",
        "for",
        "func",
        "go",
        "goto",
        "if",
        "import",
        "interface",
        "map",
        "package",
        "range",
        "return",
        "select",
        "struct",
        "switch",
        "type",
        "var",
    ],
    escape_reserved: escape_with_underscore,
    files: FileNaming {
        separator: Cow::Borrowed("_"),
        case: WordCase::Lower,
        extension: Some(Cow::Borrowed("go")),
    },
};

/// PascalCase everywhere and no file extension, for documentation trees.
pub const PASCAL_NAMING: NamingConvention = NamingConvention {
    public: to_pascal_case,
    private: to_pascal_case,
    reserved_words: &[],
    escape_reserved: escape_with_underscore,
    files: FileNaming {
        separator: Cow::Borrowed(""),
        case: WordCase::Pascal,
        extension: None,
    },
};

/// Derives public and private identifiers and file names from names.
#[derive(Debug, Clone)]
pub struct NamesCalculator {
    convention: NamingConvention,
}

impl NamesCalculator {
    pub fn new(convention: NamingConvention) -> Self {
        Self { convention }
    }

    /// Replace the file naming policy of the convention.
    pub fn with_files(mut self, files: FileNaming) -> Self {
        self.convention.files = files;
        self
    }

    pub fn convention(&self) -> &NamingConvention {
        &self.convention
    }

    /// Exported identifier, e.g. `ClusterState`.
    pub fn public(&self, name: &Name) -> String {
        self.convention.safe_name(&(self.convention.public)(name))
    }

    /// Field or parameter identifier, e.g. `clusterState`.
    pub fn private(&self, name: &Name) -> String {
        self.convention.safe_name(&(self.convention.private)(name))
    }

    /// Private spelling used only as a member name (`this.default`), where
    /// reserved words are allowed and must not be escaped.
    pub fn property(&self, name: &Name) -> String {
        (self.convention.private)(name)
    }

    /// File name, with the extension of the convention.
    pub fn file(&self, name: &Name) -> String {
        self.convention.files.file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javascript_names() {
        let names = NamesCalculator::new(JAVASCRIPT_NAMING);
        let name = Name::parse("cluster_state");

        assert_eq!(names.public(&name), "ClusterState");
        assert_eq!(names.private(&name), "clusterState");
        assert_eq!(names.file(&Name::cat([&name, &Name::parse("Type")])), "clusterStateType.js");
    }

    #[test]
    fn test_reserved_words_are_escaped() {
        let names = NamesCalculator::new(JAVASCRIPT_NAMING);
        assert_eq!(names.private(&Name::parse("delete")), "_delete");
        assert_eq!(names.public(&Name::parse("delete")), "Delete");
        assert_eq!(names.property(&Name::parse("delete")), "delete");
    }

    #[test]
    fn test_go_and_pascal_files() {
        let name = Name::parse("ClusterStateType");
        assert_eq!(
            NamesCalculator::new(GO_NAMING).file(&name),
            "cluster_state_type.go"
        );
        assert_eq!(
            NamesCalculator::new(PASCAL_NAMING).file(&name),
            "ClusterStateType"
        );
    }

    #[test]
    fn test_with_files_overrides_policy() {
        let names = NamesCalculator::new(JAVASCRIPT_NAMING).with_files(FileNaming {
            separator: Cow::Borrowed("-"),
            case: WordCase::Lower,
            extension: Some(Cow::Borrowed("mjs")),
        });
        assert_eq!(names.file(&Name::parse("ClusterType")), "cluster-type.mjs");
        assert_eq!(names.public(&Name::parse("cluster")), "Cluster");
    }

    #[test]
    fn test_file_naming_from_toml() {
        let files: FileNaming = toml::from_str(
            r#"
            separator = "_"
            case = "upper"
            "#,
        )
        .unwrap();
        assert_eq!(files.file_name(&Name::parse("node_pool")), "NODE_POOL");
    }
}
