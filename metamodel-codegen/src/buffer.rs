//! Output buffers: one rendered file each.

use std::{
    error::Error as _,
    path::{Path, PathBuf},
    sync::Arc,
};

use metamodel_concepts::Model;
use metamodel_core::{File, WriteResult};
use serde::Serialize;
use tera::{Context, Tera};

use crate::{BufferError, ConfigError, Helpers, Reporter, Template};

/// Everything a buffer needs. All fields but `helpers` are mandatory.
#[derive(Debug, Clone, Default)]
pub struct BufferConfig {
    pub reporter: Option<Reporter>,
    pub model: Option<Arc<Model>>,
    /// Root directory of the generated tree.
    pub output: Option<PathBuf>,
    /// Package path relative to `output`, `/` separated. May be empty.
    pub package: Option<String>,
    pub file: Option<String>,
    pub helpers: Helpers,
}

/// Accumulates the rendered text of one output file.
///
/// Fragments are rendered with [`Buffer::emit`] and concatenated in call
/// order; [`Buffer::write`] normalizes the text and writes it out.
pub struct Buffer {
    reporter: Reporter,
    path: PathBuf,
    tera: Tera,
    helpers: Helpers,
    body: String,
}

impl Buffer {
    pub fn new(config: BufferConfig) -> Result<Self, ConfigError> {
        let missing = ConfigError::missing(
            "buffer",
            [
                ("reporter", config.reporter.is_some()),
                ("model", config.model.is_some()),
                (
                    "output",
                    config
                        .output
                        .as_ref()
                        .is_some_and(|output| !output.as_os_str().is_empty()),
                ),
                ("package", config.package.is_some()),
                (
                    "file",
                    config.file.as_ref().is_some_and(|file| !file.is_empty()),
                ),
            ],
        );
        if !missing.fields.is_empty() {
            return Err(missing);
        }
        let (Some(reporter), Some(model), Some(output), Some(package), Some(file)) = (
            config.reporter,
            config.model,
            config.output,
            config.package,
            config.file,
        ) else {
            return Err(missing);
        };

        let mut path = output;
        path.extend(package.split('/').filter(|segment| !segment.is_empty()));
        path.push(file);

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        config.helpers.install(&mut tera, &model);

        Ok(Self {
            reporter,
            path,
            tera,
            helpers: config.helpers,
            body: String::new(),
        })
    }

    /// Path of the file the buffer writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The text rendered so far.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Render a template fragment against `context` and append it.
    ///
    /// Failures are reported and returned; the body is left untouched.
    pub fn emit(&mut self, template: &Template, context: &impl Serialize) -> Result<(), BufferError> {
        match self.render(template, context) {
            Ok(text) => {
                self.body.push_str(&text);
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Report a failure to generate the file and return it.
    pub fn fail(&self, err: BufferError) -> Result<(), BufferError> {
        self.reporter.error(format_args!(
            "can't generate '{}': {}",
            self.path.display(),
            err
        ));
        Err(err)
    }

    fn render(&mut self, template: &Template, context: &impl Serialize) -> Result<String, BufferError> {
        let missing = self.helpers.missing(template.helpers());
        if !missing.is_empty() {
            return Err(BufferError::UnknownHelper {
                template: template.name(),
                helpers: missing,
            });
        }

        let render_error = |err: tera::Error| BufferError::Render {
            template: template.name(),
            message: flatten(&err),
        };
        let context = Context::from_serialize(context).map_err(render_error)?;
        self.tera
            .add_raw_template(template.name(), template.source())
            .map_err(render_error)?;
        self.tera.render(template.name(), &context).map_err(render_error)
    }

    /// Normalize the body and write it to the file.
    ///
    /// Unchanged files are not touched. Failures are reported and returned.
    pub fn write(&self) -> Result<WriteResult, BufferError> {
        let file = File::new(&self.path, format_body(&self.body));
        file.write().map_err(|source| {
            self.reporter.error(format_args!(
                "can't write '{}': {}",
                self.path.display(),
                source
            ));
            BufferError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }
}

/// Join an error and all of its sources into one message.
fn flatten(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Normalize generated text: trailing whitespace is stripped from every
/// line, leading blank lines are dropped, runs of blank lines collapse to a
/// single one and the text ends with exactly one newline.
pub fn format_body(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut blank = false;
    for line in body.lines().map(str::trim_end) {
        if line.is_empty() {
            blank = !out.is_empty();
            continue;
        }
        if blank {
            out.push('\n');
            blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use std::fs;

    use metamodel_concepts::{Service, Version};
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::Helper;

    fn config(output: &Path) -> BufferConfig {
        let mut model = Model::new();
        let service = model.add_service(Service::new("clusters_mgmt")).unwrap();
        model.add_version(service, Version::new("v1"));
        BufferConfig {
            reporter: Some(Reporter::new()),
            model: Some(Arc::new(model)),
            output: Some(output.to_path_buf()),
            package: Some("clusters_mgmt/v1".to_string()),
            file: Some("clusterType.js".to_string()),
            helpers: Helpers::new(),
        }
    }

    #[test]
    fn test_format_body() {
        assert_eq!(format_body("\n\n  \nfirst  \n\n\n\nsecond\t\n\n"), "first\n\nsecond\n");
        assert_eq!(format_body(""), "");
        assert_eq!(format_body("one\ntwo"), "one\ntwo\n");
    }

    #[test]
    fn test_missing_fields_are_listed_together() {
        let err = Buffer::new(BufferConfig {
            reporter: Some(Reporter::new()),
            output: Some(PathBuf::new()),
            ..Default::default()
        })
        .err()
        .unwrap();

        assert_eq!(err.fields, ["model", "output", "package", "file"]);
    }

    #[test]
    fn test_path_joins_package_segments() {
        let temp = TempDir::new().unwrap();
        let buffer = Buffer::new(config(temp.path())).unwrap();

        assert_eq!(
            buffer.path(),
            temp.path().join("clusters_mgmt").join("v1").join("clusterType.js")
        );
    }

    #[test]
    fn test_emit_concatenates_in_order() {
        let temp = TempDir::new().unwrap();
        let mut buffer = Buffer::new(config(temp.path())).unwrap();

        let header = Template::new("header", "// {{ title }}\n");
        let body = Template::new("body", "export const {{ name }} = {};\n");
        buffer.emit(&header, &json!({ "title": "Generated" })).unwrap();
        buffer.emit(&body, &json!({ "name": "Cluster" })).unwrap();

        assert_eq!(buffer.body(), "// Generated\nexport const Cluster = {};\n");
    }

    #[test]
    fn test_unknown_helper_is_reported_before_rendering() {
        let temp = TempDir::new().unwrap();
        let cfg = config(temp.path());
        let reporter = cfg.reporter.clone().unwrap();
        let mut buffer = Buffer::new(cfg).unwrap();

        let template = Template::new("struct", "{{ x | field_name }}").with_helpers(&["field_name"]);
        let err = buffer.emit(&template, &json!({ "x": 1 })).unwrap_err();

        assert!(matches!(err, BufferError::UnknownHelper { ref helpers, .. } if helpers == &["field_name"]));
        assert_eq!(reporter.errors(), 1);
        assert!(buffer.body().is_empty());
    }

    #[test]
    fn test_render_error_keeps_body() {
        let temp = TempDir::new().unwrap();
        let mut buffer = Buffer::new(config(temp.path())).unwrap();

        buffer
            .emit(&Template::new("ok", "kept\n"), &json!({}))
            .unwrap();
        let err = buffer
            .emit(&Template::new("broken", "{{ missing.field }}"), &json!({}))
            .unwrap_err();

        assert!(matches!(err, BufferError::Render { template: "broken", .. }));
        assert_eq!(buffer.body(), "kept\n");
    }

    #[test]
    fn test_helper_failure_is_a_render_error() {
        let temp = TempDir::new().unwrap();
        let mut cfg = config(temp.path());
        cfg.helpers.insert(
            "always_fails",
            Helper::text(|_| String::new()),
        );
        let mut buffer = Buffer::new(cfg).unwrap();

        let template = Template::new("t", "{{ 42 | always_fails }}").with_helpers(&["always_fails"]);
        let err = buffer.emit(&template, &json!({})).unwrap_err();

        let BufferError::Render { message, .. } = err else {
            panic!("expected a render error");
        };
        assert!(message.contains("expects text, got a number"));
    }

    #[test]
    fn test_write_normalizes_and_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let mut buffer = Buffer::new(config(temp.path())).unwrap();
        buffer
            .emit(&Template::new("t", "\n\nexport class Cluster {}   \n\n\n"), &json!({}))
            .unwrap();

        assert_eq!(buffer.write().unwrap(), WriteResult::Written);
        assert_eq!(buffer.write().unwrap(), WriteResult::Unchanged);
        assert_eq!(
            fs::read_to_string(buffer.path()).unwrap(),
            "export class Cluster {}\n"
        );
    }

    #[test]
    fn test_write_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("clusters_mgmt"), "not a directory").unwrap();
        let cfg = config(temp.path());
        let reporter = cfg.reporter.clone().unwrap();
        let buffer = Buffer::new(cfg).unwrap();

        let err = buffer.write().unwrap_err();

        assert!(matches!(err, BufferError::Io { .. }));
        assert_eq!(reporter.errors(), 1);
    }
}
