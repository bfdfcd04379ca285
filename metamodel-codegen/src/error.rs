use std::{io, path::PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A configuration struct was handed over with mandatory fields unset.
#[derive(Debug, Error, Diagnostic)]
#[error("{component} configuration is missing mandatory fields: {}", .fields.join(", "))]
#[diagnostic(
    code(metamodel::config::missing),
    help("set every listed field before building the {component}")
)]
pub struct ConfigError {
    pub component: &'static str,
    pub fields: Vec<&'static str>,
}

impl ConfigError {
    /// Build the error from `(field, present)` pairs, keeping the absent ones.
    pub fn missing(
        component: &'static str,
        fields: impl IntoIterator<Item = (&'static str, bool)>,
    ) -> Self {
        Self {
            component,
            fields: fields
                .into_iter()
                .filter(|(_, present)| !present)
                .map(|(name, _)| name)
                .collect(),
        }
    }
}

/// The model doesn't have the shape a types calculator expects.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum TypesError {
    #[error("don't know how to calculate the type of attribute '{attribute}'")]
    #[diagnostic(
        code(metamodel::types::unclassifiable),
        help("every attribute needs a resolved scalar, enum, struct, class, list or map type")
    )]
    Unclassifiable { attribute: String },

    #[error("{kind} type '{name}' has no element type")]
    #[diagnostic(code(metamodel::types::missing_element))]
    MissingElement { kind: &'static str, name: String },

    #[error("{kind} type '{name}' has no {reference} reference")]
    #[diagnostic(code(metamodel::types::unsupported))]
    Unsupported {
        reference: &'static str,
        kind: &'static str,
        name: String,
    },

    #[error("element of {kind} type '{name}' leads back to the type itself")]
    #[diagnostic(
        code(metamodel::types::cycle),
        help("a list or map can't contain itself, directly or through other collections")
    )]
    Cycle { kind: &'static str, name: String },

    #[error("{entity} is not part of the model")]
    #[diagnostic(code(metamodel::types::dangling))]
    Dangling { entity: String },
}

/// A template helper was called with something it can't handle.
#[derive(Debug, Error, Diagnostic)]
pub enum HelperError {
    #[error("helper '{helper}' expects {expected}, got {found}")]
    #[diagnostic(code(metamodel::helper::mismatch))]
    Mismatch {
        helper: String,
        expected: &'static str,
        found: String,
    },

    #[error("helper '{helper}' was given {entity}, which is not part of the model")]
    #[diagnostic(code(metamodel::helper::dangling))]
    Dangling { helper: String, entity: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Types(#[from] TypesError),
}

/// Rendering or writing one output file failed.
#[derive(Debug, Error, Diagnostic)]
pub enum BufferError {
    #[error("template '{template}' uses unknown helpers: {}", .helpers.join(", "))]
    #[diagnostic(
        code(metamodel::buffer::unknown_helper),
        help("register the helpers with the backend before emitting the template")
    )]
    UnknownHelper {
        template: &'static str,
        helpers: Vec<&'static str>,
    },

    #[error("can't render template '{template}': {message}")]
    #[diagnostic(code(metamodel::buffer::render))]
    Render {
        template: &'static str,
        message: String,
    },

    #[error("can't serialize the context of template '{template}': {message}")]
    #[diagnostic(code(metamodel::buffer::context))]
    Context {
        template: &'static str,
        message: String,
    },

    #[error("failed to write '{}'", .path.display())]
    #[diagnostic(code(metamodel::buffer::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of a whole generation run.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("versions '{first}' and '{second}' both generate into package '{package}'")]
    #[diagnostic(
        code(metamodel::generate::package_collision),
        help("change the base package or the word separator so that every version gets its own package")
    )]
    PackageCollision {
        package: String,
        first: String,
        second: String,
    },

    #[error("failed to write '{}'", .path.display())]
    #[diagnostic(code(metamodel::generate::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}", error_count(.count))]
    #[diagnostic(
        code(metamodel::generate::failed),
        help("the errors were reported while generating; every other file was written")
    )]
    Failed { count: usize },
}

impl GenerateError {
    /// Number of units that failed, for [`GenerateError::Failed`].
    pub fn count(&self) -> Option<usize> {
        match self {
            GenerateError::Failed { count } => Some(*count),
            _ => None,
        }
    }
}

fn error_count(count: &usize) -> String {
    if *count == 1 {
        "there was 1 error".to_string()
    } else {
        format!("there were {} errors", count)
    }
}

/// Loading backend settings failed.
#[derive(Debug, Error, Diagnostic)]
pub enum SettingsError {
    #[error("failed to read '{}'", .path.display())]
    #[diagnostic(code(metamodel::settings::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse backend settings")]
    #[diagnostic(code(metamodel::settings::parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl SettingsError {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(SettingsError::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message_is_singular_or_plural() {
        assert_eq!(
            GenerateError::Failed { count: 1 }.to_string(),
            "there was 1 error"
        );
        assert_eq!(
            GenerateError::Failed { count: 3 }.to_string(),
            "there were 3 errors"
        );
        assert_eq!(GenerateError::Failed { count: 3 }.count(), Some(3));
    }

    #[test]
    fn test_config_error_lists_every_missing_field() {
        let err = ConfigError::missing(
            "buffer",
            [("reporter", true), ("model", false), ("output", false)],
        );
        assert_eq!(err.fields, ["model", "output"]);
        assert_eq!(
            err.to_string(),
            "buffer configuration is missing mandatory fields: model, output"
        );
    }

    #[test]
    fn test_unknown_helper_message() {
        let err = BufferError::UnknownHelper {
            template: "struct",
            helpers: vec!["field_name", "getter_type"],
        };
        assert_eq!(
            err.to_string(),
            "template 'struct' uses unknown helpers: field_name, getter_type"
        );
    }
}
