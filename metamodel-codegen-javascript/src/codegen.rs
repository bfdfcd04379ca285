//! Entry point running both JavaScript generators.

use std::{path::Path, sync::Arc};

use eyre::Result;
use metamodel_codegen::{
    BackendSettings, GenerateError, GenerateResult, Generator, GeneratorConfig, JAVASCRIPT_NAMING,
    LanguageCodegen, Reporter,
};
use metamodel_concepts::Model;

use crate::{JavaScriptTypes, ResourcesBackend, TypesBackend};

/// JavaScript code generator: types first, then resource clients.
pub struct JavaScriptCodegen {
    model: Arc<Model>,
    reporter: Reporter,
    settings: BackendSettings,
}

impl LanguageCodegen for JavaScriptCodegen {
    fn language(&self) -> &'static str {
        "javascript"
    }

    fn file_extension(&self) -> &'static str {
        "js"
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        self.generate_files(output_dir)
    }
}

impl JavaScriptCodegen {
    pub fn new(model: impl Into<Arc<Model>>) -> Self {
        Self {
            model: model.into(),
            reporter: Reporter::new(),
            settings: BackendSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: BackendSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Report through `reporter` instead of a private one.
    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    fn generate_files(&self, output_dir: &Path) -> Result<GenerateResult> {
        let output = match &self.settings.output {
            Some(output) => output_dir.join(output),
            None => output_dir.to_path_buf(),
        };
        let names = self.settings.names(JAVASCRIPT_NAMING);
        let config = GeneratorConfig {
            reporter: Some(self.reporter.clone()),
            model: Some(Arc::clone(&self.model)),
            output: Some(output),
            types: Some(Arc::new(JavaScriptTypes::new(Arc::new(names.clone())))),
            names: Some(names),
            packages: Some(self.settings.packages()),
        };

        let mut result = GenerateResult::default();
        let mut failed = 0;
        absorb(
            &mut result,
            &mut failed,
            Generator::new(TypesBackend, config.clone())?.run(),
        )?;
        absorb(
            &mut result,
            &mut failed,
            Generator::new(ResourcesBackend, config)?.without_lints().run(),
        )?;

        if failed > 0 {
            return Err(GenerateError::Failed { count: failed }.into());
        }
        Ok(result)
    }
}

/// Merge the outcome of one generator run. Failed units are counted so the
/// other generator still runs; any other error stops the whole generation.
fn absorb(
    result: &mut GenerateResult,
    failed: &mut usize,
    run: Result<GenerateResult, GenerateError>,
) -> Result<(), GenerateError> {
    match run {
        Ok(run) => {
            result.written.extend(run.written);
            result.unchanged.extend(run.unchanged);
            Ok(())
        }
        Err(GenerateError::Failed { count }) => {
            *failed += count;
            Ok(())
        }
        Err(err) => Err(err),
    }
}
