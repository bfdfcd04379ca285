//! The generation run loop shared by every backend.

use std::{
    collections::HashSet,
    path::PathBuf,
    sync::Arc,
};

use metamodel_concepts::{Model, ResourceId, TypeId, VersionId, lint};
use metamodel_core::WriteResult;
use serde::Serialize;
use serde_json::Value;

use crate::{
    Buffer, BufferConfig, BufferError, ConfigError, GenerateError, Helpers, NamesCalculator,
    PackagesCalculator, Reporter, Template, TypesCalculator,
};

/// The three calculators a backend derives its output from.
#[derive(Clone)]
pub struct Calculators {
    pub names: Arc<NamesCalculator>,
    pub packages: Arc<PackagesCalculator>,
    pub types: Arc<dyn TypesCalculator>,
}

/// Context of a fragment, or the message of the error serializing it.
pub type FragmentContext = Result<Value, String>;

/// One output file: its name and the fragments rendered into it, in order.
#[derive(Debug, Clone)]
pub struct Unit {
    file: String,
    fragments: Vec<(Template, FragmentContext)>,
}

impl Unit {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            fragments: Vec::new(),
        }
    }

    /// Append a fragment rendered against `context`.
    ///
    /// A context that doesn't serialize keeps its error, which fails the
    /// unit when it is generated.
    pub fn emit(mut self, template: Template, context: &impl Serialize) -> Self {
        let context = serde_json::to_value(context).map_err(|err| err.to_string());
        self.fragments.push((template, context));
        self
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn fragments(&self) -> &[(Template, FragmentContext)] {
        &self.fragments
    }
}

/// A target language or format.
///
/// The generator walks services, versions, types and resources in name
/// order and asks the backend for the unit of each. Returning `None` skips
/// the entity.
pub trait Backend {
    fn name(&self) -> &'static str;

    /// The helpers the backend's templates call.
    fn helpers(&self, calculators: &Calculators) -> Helpers;

    fn metadata_unit(
        &self,
        _model: &Model,
        _calculators: &Calculators,
        _version: VersionId,
    ) -> Option<Unit> {
        None
    }

    fn type_unit(&self, _model: &Model, _calculators: &Calculators, _ty: TypeId) -> Option<Unit> {
        None
    }

    fn resource_unit(
        &self,
        _model: &Model,
        _calculators: &Calculators,
        _resource: ResourceId,
    ) -> Option<Unit> {
        None
    }
}

/// Everything a generator needs besides its backend. All fields are mandatory.
#[derive(Clone, Default)]
pub struct GeneratorConfig {
    pub reporter: Option<Reporter>,
    pub model: Option<Arc<Model>>,
    pub output: Option<PathBuf>,
    pub names: Option<NamesCalculator>,
    pub packages: Option<PackagesCalculator>,
    pub types: Option<Arc<dyn TypesCalculator>>,
}

/// Summary of a successful run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateResult {
    /// Files created or rewritten.
    pub written: Vec<PathBuf>,
    /// Files that already had the generated content.
    pub unchanged: Vec<PathBuf>,
}

impl GenerateResult {
    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }
}

/// Drives one backend over a model.
pub struct Generator<B> {
    backend: B,
    reporter: Reporter,
    model: Arc<Model>,
    output: PathBuf,
    calculators: Calculators,
    lints: bool,
    errors: usize,
}

impl<B: Backend> Generator<B> {
    pub fn new(backend: B, config: GeneratorConfig) -> Result<Self, ConfigError> {
        let missing = ConfigError::missing(
            "generator",
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
                ("names", config.names.is_some()),
                ("packages", config.packages.is_some()),
                ("types", config.types.is_some()),
            ],
        );
        match config {
            GeneratorConfig {
                reporter: Some(reporter),
                model: Some(model),
                output: Some(output),
                names: Some(names),
                packages: Some(packages),
                types: Some(types),
            } if missing.fields.is_empty() => Ok(Self {
                backend,
                reporter,
                model,
                output,
                calculators: Calculators {
                    names: Arc::new(names),
                    packages: Arc::new(packages),
                    types,
                },
                lints: true,
                errors: 0,
            }),
            _ => Err(missing),
        }
    }

    /// Skip the model lints, for a model another generator already checked.
    pub fn without_lints(mut self) -> Self {
        self.lints = false;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Units that failed so far.
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Generate every unit of the model.
    ///
    /// A unit whose rendering fails is reported and skipped; the run goes on
    /// and fails at the end with the number of failed units. Filesystem
    /// errors stop the run immediately.
    pub fn run(&mut self) -> Result<GenerateResult, GenerateError> {
        let model = Arc::clone(&self.model);
        self.calculators.packages.check(&model)?;

        if self.lints {
            for diagnostic in lint::check(&model) {
                self.reporter.diagnostic(&diagnostic);
            }
        }

        let helpers = self.backend.helpers(&self.calculators);
        let mut result = GenerateResult::default();
        let mut paths = HashSet::new();

        for &service in model.services() {
            for &version in model.service(service).versions() {
                let package = self.calculators.packages.version_package(&model, version);
                let units = self.units(&model, version);
                tracing::debug!(
                    target: "metamodel",
                    backend = self.backend.name(),
                    package = %package,
                    units = units.len(),
                    "generating version"
                );
                for unit in units {
                    self.generate(&model, &helpers, &package, unit, &mut paths, &mut result)?;
                }
            }
        }

        if self.errors > 0 {
            return Err(GenerateError::Failed { count: self.errors });
        }
        self.reporter.info(format_args!(
            "generated {} files with the {} backend ({} unchanged)",
            result.total(),
            self.backend.name(),
            result.unchanged.len()
        ));
        Ok(result)
    }

    fn units(&self, model: &Model, version: VersionId) -> Vec<Unit> {
        let calculators = &self.calculators;
        let version_ref = model.version(version);
        self.backend
            .metadata_unit(model, calculators, version)
            .into_iter()
            .chain(
                version_ref
                    .types()
                    .iter()
                    .filter_map(|&ty| self.backend.type_unit(model, calculators, ty)),
            )
            .chain(
                version_ref
                    .resources()
                    .iter()
                    .filter_map(|&resource| self.backend.resource_unit(model, calculators, resource)),
            )
            .collect()
    }

    fn generate(
        &mut self,
        model: &Arc<Model>,
        helpers: &Helpers,
        package: &str,
        unit: Unit,
        paths: &mut HashSet<PathBuf>,
        result: &mut GenerateResult,
    ) -> Result<(), GenerateError> {
        let mut buffer = Buffer::new(BufferConfig {
            reporter: Some(self.reporter.clone()),
            model: Some(Arc::clone(model)),
            output: Some(self.output.clone()),
            package: Some(package.to_string()),
            file: Some(unit.file.clone()),
            helpers: helpers.clone(),
        })?;

        if !paths.insert(buffer.path().to_path_buf()) {
            self.reporter.error(format_args!(
                "more than one unit generates '{}'",
                buffer.path().display()
            ));
            self.errors += 1;
            return Ok(());
        }

        for (template, context) in &unit.fragments {
            let emitted = match context {
                Ok(context) => buffer.emit(template, context),
                Err(message) => buffer.fail(BufferError::Context {
                    template: template.name(),
                    message: message.clone(),
                }),
            };
            if emitted.is_err() {
                self.errors += 1;
                return Ok(());
            }
        }

        match buffer.write() {
            Ok(WriteResult::Written) => {
                tracing::debug!(target: "metamodel", path = %buffer.path().display(), "wrote file");
                result.written.push(buffer.path().to_path_buf());
                Ok(())
            }
            Ok(WriteResult::Unchanged) => {
                tracing::debug!(target: "metamodel", path = %buffer.path().display(), "file is up to date");
                result.unchanged.push(buffer.path().to_path_buf());
                Ok(())
            }
            Err(BufferError::Io { path, source }) => Err(GenerateError::Io { path, source }),
            Err(_) => {
                self.errors += 1;
                Ok(())
            }
        }
    }
}
