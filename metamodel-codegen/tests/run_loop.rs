//! Run loop behaviour with a minimal outline backend.

use std::{borrow::Cow, fs, sync::Arc};

use metamodel_codegen::{
    Backend, Calculators, FileNaming, GenerateError, Generator, GeneratorConfig, Helper, Helpers,
    NamesCalculator, PASCAL_NAMING, PackagesCalculator, Reporter, Template, TypeReference,
    TypesCalculator, TypesError, Unit, types, views::TypeView,
};
use metamodel_concepts::{Attribute, Model, ScalarKind, Service, Type, TypeId, TypeKind, Version};
use metamodel_core::{Name, WordCase};
use tempfile::TempDir;

/// Spells every reference as the snake case type name.
struct Plain;

impl TypesCalculator for Plain {
    fn value_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError> {
        Ok(TypeReference::new(types::lookup(model, ty)?.name().to_string()))
    }

    fn nullable_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError> {
        Ok(TypeReference::new(format!("{}?", types::lookup(model, ty)?.name())))
    }

    fn list_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError> {
        let element = types::element(model, ty)?;
        Ok(TypeReference::new(format!("[{}]", types::lookup(model, element)?.name())))
    }

    fn map_reference(&self, model: &Model, ty: TypeId) -> Result<TypeReference, TypesError> {
        let element = types::element(model, ty)?;
        Ok(TypeReference::new(format!("{{{}}}", types::lookup(model, element)?.name())))
    }

    fn zero_value(&self, _model: &Model, _ty: TypeId) -> Result<String, TypesError> {
        Ok("nil".to_string())
    }
}

const OUTLINE: Template = Template::new(
    "outline",
    "{{ object.name }}\n\
     {%- for attribute in object.attributes %}\n  {{ attribute.name }}: {{ attribute | field_type }}\n{%- endfor %}\n",
)
.with_helpers(&["field_type"]);

/// Writes one outline per struct type.
struct Outline;

impl Backend for Outline {
    fn name(&self) -> &'static str {
        "outline"
    }

    fn helpers(&self, calculators: &Calculators) -> Helpers {
        let types = Arc::clone(&calculators.types);
        Helpers::new().with(
            "field_type",
            Helper::attribute(move |model, attribute| {
                Ok(types.field_type(model, attribute)?.to_string())
            }),
        )
    }

    fn type_unit(&self, model: &Model, calculators: &Calculators, ty: TypeId) -> Option<Unit> {
        let view = TypeView::deep(model, ty)?;
        if !view.flags.is_struct {
            return None;
        }
        Some(Unit::new(calculators.names.file(&view.name)).emit(
            OUTLINE,
            &serde_json::json!({ "object": view }),
        ))
    }
}

fn model(broken: bool) -> Model {
    let mut model = Model::new();
    let service = model.add_service(Service::new("clusters_mgmt")).unwrap();
    let version = model.add_version(service, Version::new("v1")).unwrap();
    let string = model
        .add_type(version, Type::new("string", TypeKind::Scalar(ScalarKind::String)))
        .unwrap();
    for name in ["cluster", "node_pool", "subscription"] {
        let ty = model
            .add_type(version, Type::new(name, TypeKind::structure()))
            .unwrap();
        model.add_attribute(ty, Attribute::new("name", string));
    }
    if broken {
        let flavour = model
            .add_type(version, Type::new("flavour", TypeKind::structure()))
            .unwrap();
        model.add_attribute(flavour, Attribute::unresolved("network"));
    }
    model
}

fn generator(model: Model, temp: &TempDir, reporter: &Reporter) -> Generator<Outline> {
    let names = NamesCalculator::new(PASCAL_NAMING).with_files(FileNaming {
        separator: Cow::Borrowed("_"),
        case: WordCase::Lower,
        extension: Some(Cow::Borrowed("txt")),
    });
    Generator::new(
        Outline,
        GeneratorConfig {
            reporter: Some(reporter.clone()),
            model: Some(Arc::new(model)),
            output: Some(temp.path().to_path_buf()),
            names: Some(names),
            packages: Some(PackagesCalculator::default()),
            types: Some(Arc::new(Plain)),
        },
    )
    .unwrap()
}

#[test]
fn test_generates_one_file_per_unit() {
    let temp = TempDir::new().unwrap();
    let reporter = Reporter::new();

    let result = generator(model(false), &temp, &reporter).run().unwrap();

    assert_eq!(result.written.len(), 3);
    let package = temp.path().join("clusters_mgmt").join("v1");
    assert_eq!(
        fs::read_to_string(package.join("node_pool.txt")).unwrap(),
        "node_pool\n  name: string?\n"
    );
    assert_eq!(reporter.errors(), 0);
}

#[test]
fn test_failed_unit_does_not_stop_the_others() {
    let temp = TempDir::new().unwrap();
    let reporter = Reporter::new();
    let mut generator = generator(model(true), &temp, &reporter);

    let err = generator.run().unwrap_err();

    assert!(matches!(err, GenerateError::Failed { count: 1 }));
    assert_eq!(err.to_string(), "there was 1 error");
    assert_eq!(generator.errors(), 1);
    let package = temp.path().join("clusters_mgmt").join("v1");
    assert!(!package.join("flavour.txt").exists());
    for file in ["cluster.txt", "node_pool.txt", "subscription.txt"] {
        assert!(package.join(file).exists(), "{} should have been written", file);
    }
    // The unresolved attribute is also flagged by the lints before traversal.
    assert!(reporter.errors() >= 2);
}

#[test]
fn test_second_run_leaves_files_unchanged() {
    let temp = TempDir::new().unwrap();
    let reporter = Reporter::new();

    let first = generator(model(false), &temp, &reporter).run().unwrap();
    let second = generator(model(false), &temp, &reporter).run().unwrap();

    assert_eq!(first.written.len(), 3);
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged, first.written);
}

#[test]
fn test_colliding_versions_abort_before_writing() {
    let temp = TempDir::new().unwrap();
    let reporter = Reporter::new();
    let mut model = model(false);
    let other = model.add_service(Service::new("clusters-mgmt")).unwrap();
    model.add_version(other, Version::new("v1"));

    let err = generator(model, &temp, &reporter).run().unwrap_err();

    assert!(matches!(err, GenerateError::PackageCollision { .. }));
    assert!(!temp.path().join("clusters_mgmt").exists());
}

#[test]
fn test_file_names_use_the_names_calculator() {
    let names = NamesCalculator::new(PASCAL_NAMING);
    assert_eq!(names.file(&Name::parse("node_pool")), "NodePool");
}

#[test]
fn test_write_failure_aborts_the_run() {
    let temp = TempDir::new().unwrap();
    let reporter = Reporter::new();
    // The service directory can't be created where a plain file already is.
    fs::write(temp.path().join("clusters_mgmt"), "").unwrap();
    let mut generator = generator(model(false), &temp, &reporter);

    let err = generator.run().unwrap_err();

    match err {
        GenerateError::Io { path, .. } => {
            assert!(path.starts_with(temp.path().join("clusters_mgmt")));
        }
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert_eq!(generator.errors(), 0);
    assert_eq!(reporter.errors(), 1);
}

#[test]
fn test_units_sharing_a_file_are_an_error() {
    let temp = TempDir::new().unwrap();
    let reporter = Reporter::new();
    let mut model = model(false);
    let service = model.find_service(&Name::parse("clusters_mgmt")).unwrap();
    let version = model.find_version(service, &Name::parse("v1")).unwrap();
    let string = model.find_type(version, &Name::parse("string")).unwrap();
    // Spelled differently, but both land in `node_pool.txt`.
    let twin = model
        .add_type(version, Type::new("node-pool", TypeKind::structure()))
        .unwrap();
    model.add_attribute(twin, Attribute::new("size", string));
    let mut generator = generator(model, &temp, &reporter);

    let err = generator.run().unwrap_err();

    assert_eq!(err.to_string(), "there was 1 error");
    assert_eq!(generator.errors(), 1);
    assert_eq!(reporter.errors(), 1);
    let package = temp.path().join("clusters_mgmt").join("v1");
    for file in ["cluster.txt", "node_pool.txt", "subscription.txt"] {
        assert!(package.join(file).exists(), "{} should have been written", file);
    }
}
