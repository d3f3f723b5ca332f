//! End-to-end pipeline runs against the in-memory backend.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use xcforge_generator::{
    Error, ErrorKind, Generator, Hook, Pipeline, Plugin, Result, TranslationContext,
    backend::{MemoryBackend, SavedSchemeList},
    generators::GeneratorConfig,
};
use xcforge_model::{
    Language, Platform, Project, SchemeAction, Target, TargetType, TestTargetPolicy,
};

/// `App` with a single scheme and its `AppTests` bundle.
fn app_with_tests(scheme: &str) -> Project {
    let mut project = Project::new("Demo");
    project
        .application_for("App", Platform::Ios, "15.0", Language::Swift)
        .expect("App should be unique")
        .scheme(scheme);
    project.unit_tests_for("App").expect("App exists");
    project
}

fn run_standard(project: &Project) -> (Result<usize>, MemoryBackend) {
    let mut backend = MemoryBackend::new();
    let result = Pipeline::standard(&GeneratorConfig::default())
        .run(project, &mut backend)
        .map(|summary| summary.translated);
    (result, backend)
}

#[test]
fn test_target_without_schemes_is_still_suppressed() {
    let mut project = Project::new("Demo");
    project
        .application_for("App", Platform::Ios, "15.0", Language::Objc)
        .unwrap();

    let (result, backend) = run_standard(&project);
    result.expect("pipeline should succeed");

    let saved = backend.saved_scheme_list().expect("scheme list saved");
    assert_eq!(saved.suppressed, ["App"]);
    assert!(saved.schemes.is_empty());
    assert_eq!(backend.save_count(), 1);
}

#[test]
fn test_scheme_binds_target_and_unit_tests() {
    let project = app_with_tests("AppScheme");

    let (result, backend) = run_standard(&project);
    result.expect("pipeline should succeed");

    let saved = backend.saved_scheme_list().expect("scheme list saved");
    insta::assert_snapshot!(saved.to_string().trim_end(), @r"
    suppressed: App, AppTests
    scheme AppScheme
      build: App, AppTests
      launch: App
      test: AppTests
      actions: test=Debug launch=Debug profile=Release analyze=Debug archive=Release
    ");
}

#[test]
fn test_unknown_configuration_aborts_before_save() {
    let mut project = Project::new("Demo");
    project
        .application_for("App", Platform::Ios, "15.0", Language::Swift)
        .unwrap()
        .scheme("AppScheme")
        .set_configuration(SchemeAction::Launch, "Staging");

    let (result, backend) = run_standard(&project);

    match result.unwrap_err() {
        Error::UnknownConfiguration {
            scheme,
            configuration,
            action,
        } => {
            assert_eq!(scheme, "AppScheme");
            assert_eq!(configuration, "Staging");
            assert_eq!(action, SchemeAction::Launch);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(backend.save_count(), 0);
    assert!(backend.saved_scheme_list().is_none());
    assert!(backend.find_scheme("AppScheme").is_none());
}

struct RecordingGenerator {
    name: &'static str,
    dependencies: &'static [&'static str],
    visits: Arc<AtomicUsize>,
}

impl Generator for RecordingGenerator {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "Count project visits"
    }

    fn dependencies(&self) -> &[&'static str] {
        self.dependencies
    }

    fn visit_project(&self, _project: &Project, _ctx: &mut TranslationContext<'_>) -> Result<()> {
        self.visits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_missing_dependency_is_reported_before_traversal() {
    let project = app_with_tests("AppScheme");
    let visits = Arc::new(AtomicUsize::new(0));
    let mut backend = MemoryBackend::new();

    let err = Pipeline::standard(&GeneratorConfig::default())
        .generator(RecordingGenerator {
            name: "lint",
            dependencies: &["missing"],
            visits: visits.clone(),
        })
        .run(&project, &mut backend)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(
        err,
        Error::MissingDependency { ref generator, ref dependency }
            if generator == "lint" && dependency == "missing"
    ));
    assert_eq!(visits.load(Ordering::SeqCst), 0);
    assert!(backend.is_empty());
}

#[test]
fn test_custom_generator_runs_after_its_dependency() {
    let project = app_with_tests("AppScheme");
    let visits = Arc::new(AtomicUsize::new(0));
    let mut backend = MemoryBackend::new();

    let summary = Pipeline::new()
        .generator(RecordingGenerator {
            name: "lint",
            dependencies: &["scheme"],
            visits: visits.clone(),
        })
        .generator(xcforge_generator::generators::SchemeGenerator::new())
        .generator(xcforge_generator::generators::ConfigurationGenerator)
        .generator(xcforge_generator::generators::TargetGenerator)
        .generator(xcforge_generator::generators::ProjectStructureGenerator)
        .run(&project, &mut backend)
        .expect("pipeline should succeed");

    assert_eq!(
        summary.order,
        ["project-structure", "target", "configuration", "scheme", "lint"]
    );
    assert_eq!(visits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_runs_are_deterministic() {
    let project = app_with_tests("AppScheme");

    let (first, first_backend) = run_standard(&project);
    let (second, second_backend) = run_standard(&project);

    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(
        first_backend.saved_scheme_list(),
        second_backend.saved_scheme_list()
    );
    assert_eq!(first_backend.len(), second_backend.len());
}

#[test]
fn test_ambiguous_test_targets_follow_policy() {
    let mut project = app_with_tests("AppScheme");
    let mut ui_tests = Target::new(
        "AppUITests",
        xcforge_model::TargetType::UnitTestBundle,
        Platform::Ios,
        "15.0",
    );
    ui_tests.host = Some("App".into());
    project.add_target(ui_tests).unwrap();

    let (result, _) = run_standard(&project);
    assert!(matches!(result, Err(Error::AmbiguousTestTarget { .. })));

    let config = GeneratorConfig {
        test_target_policy: TestTargetPolicy::FirstMatch,
    };
    let mut backend = MemoryBackend::new();
    Pipeline::standard(&config)
        .run(&project, &mut backend)
        .expect("first match should succeed");

    let saved = backend.saved_scheme_list().unwrap();
    assert_eq!(saved.schemes[0].test_targets, ["AppTests"]);
    assert_eq!(saved.suppressed, ["App", "AppTests", "AppUITests"]);
}

#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<String>>,
    translated_at_hook: AtomicUsize,
}

struct LoggingPlugin(Arc<EventLog>);

impl Plugin for LoggingPlugin {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn on_before_generator(&self, generator: &str, _ctx: &mut TranslationContext<'_>) -> Result<()> {
        self.0.events.lock().unwrap().push(generator.to_string());
        Ok(())
    }

    fn on_hook(&self, hook: Hook, ctx: &mut TranslationContext<'_>) -> Result<()> {
        self.0.events.lock().unwrap().push(hook.to_string());
        self.0.translated_at_hook.store(ctx.len(), Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_hook_fires_once_before_schemes_exist() {
    let project = app_with_tests("AppScheme");
    let log = Arc::new(EventLog::default());
    let mut backend = MemoryBackend::new();

    let summary = Pipeline::standard(&GeneratorConfig::default())
        .plugin(LoggingPlugin(log.clone()))
        .run(&project, &mut backend)
        .expect("pipeline should succeed");

    assert_eq!(
        *log.events.lock().unwrap(),
        [
            "project-structure",
            "target",
            "configuration",
            "scheme",
            "before_adding_user_schemes"
        ]
    );
    // The only object translated after the hook is the scheme.
    assert_eq!(
        log.translated_at_hook.load(Ordering::SeqCst),
        summary.translated - 1
    );
}

#[test]
fn test_scheme_list_is_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("xcschemes.json");
    let project = app_with_tests("AppScheme");
    let mut backend = MemoryBackend::with_output(&path);

    Pipeline::standard(&GeneratorConfig::default())
        .run(&project, &mut backend)
        .expect("pipeline should succeed");

    let read = SavedSchemeList::read(&path).expect("scheme list readable");
    assert_eq!(Some(&read), backend.saved_scheme_list());
    assert_eq!(read.schemes[0].launch_target.as_deref(), Some("App"));
}

#[test]
fn test_target_settings_are_flattened_into_native_configurations() {
    let mut project = Project::new("Demo");
    project
        .all_build_configurations
        .insert("SWIFT_VERSION", "5.0");
    let app = project
        .application_for("App", Platform::Ios, "15.0", Language::Swift)
        .unwrap();
    app.all_build_configurations
        .insert("PRODUCT_NAME", "App");
    app.build_configuration_mut("Debug")
        .settings
        .insert("PRODUCT_NAME", "App Debug");

    let (result, backend) = run_standard(&project);
    result.unwrap();

    let native_app = backend
        .target(backend.find_target("App").unwrap())
        .unwrap();
    let names: Vec<_> = native_app
        .configurations
        .iter()
        .map(|id| backend.configuration(*id).unwrap())
        .map(|c| (c.name.as_str(), c.settings.get("PRODUCT_NAME").and_then(|v| v.as_str())))
        .collect();
    assert_eq!(
        names,
        [("Debug", Some("App Debug")), ("Release", Some("App"))]
    );

    let native_project = backend.project().unwrap();
    let debug = backend
        .configuration(native_project.configurations[0])
        .unwrap();
    assert_eq!(
        debug.settings.get("SWIFT_VERSION").and_then(|v| v.as_str()),
        Some("5.0")
    );
}

#[test]
fn test_cloned_target_gets_its_own_native_target() {
    let mut project = Project::new("Demo");
    let mut widget = project
        .application_for("App", Platform::Ios, "15.0", Language::Swift)
        .unwrap()
        .clone();
    widget.name = "Widget".into();
    project.add_target(widget).unwrap();

    let (result, backend) = run_standard(&project);
    result.expect("pipeline should succeed");

    let app = backend.find_target("App").expect("native App");
    let widget = backend.find_target("Widget").expect("native Widget");
    assert_ne!(app, widget);
    assert!(backend.is_suppressed(widget));
    assert_eq!(
        backend.saved_scheme_list().unwrap().suppressed,
        ["App", "Widget"]
    );
}

#[test]
fn test_unresolved_host_aborts_before_save() {
    let mut project = Project::new("Demo");
    let mut tests = Target::new("AppTests", TargetType::UnitTestBundle, Platform::Ios, "15.0");
    tests.host = Some("Missing".into());
    project.add_target(tests).unwrap();

    let (result, backend) = run_standard(&project);

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Reference);
    match err {
        Error::UnresolvedHost { target, host } => {
            assert_eq!(target, "AppTests");
            assert_eq!(host, "Missing");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(backend.save_count(), 0);
}

#[test]
fn test_unrepresentable_target_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xcschemes.json");
    let mut project = Project::new("Demo");
    project
        .application_for("App", Platform::Macos, "12.0", Language::Swift)
        .unwrap()
        .scheme("AppScheme");
    project
        .add_target(Target::new(
            "Driver",
            TargetType::Other("kext".into()),
            Platform::Macos,
            "12.0",
        ))
        .unwrap();
    let mut backend = MemoryBackend::with_output(&path);

    let err = Pipeline::standard(&GeneratorConfig::default())
        .run(&project, &mut backend)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Translation);
    assert!(matches!(err, Error::Translation { ref object, .. } if object == "target 'Driver'"));
    assert_eq!(backend.save_count(), 0);
    assert!(backend.saved_scheme_list().is_none());
    assert!(!path.exists());
}
