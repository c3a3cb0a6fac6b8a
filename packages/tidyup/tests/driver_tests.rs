use pretty_assertions::assert_eq;
use tidyup::Error;
use tidyup::config::{CONFIG_FILE_NAME, ProjectConfig, ToolsConfig};
use tidyup::driver::{formatters, run_all};
use tidyup::tools::ToolRegistry;
use tidyup_test_utilities::{Behavior, FakeRunner, TestProject};

#[test_log::test]
fn test_formatters_run_in_order() {
    let project = TestProject::new();
    project.write("src/a.cpp", "a\n");
    project.write("meson.build", "project('x')\n");
    project.write("setup.py", "x=1\n");

    let config = project.config();
    let steps = formatters(&config, &ToolRegistry::new(&config.tools));
    let runner = FakeRunner::new();
    let mut out = Vec::new();

    let reports = run_all(&steps, &runner, &mut out).unwrap();

    assert_eq!(reports.len(), 3);
    assert_eq!(
        steps.iter().map(|s| s.name()).collect::<Vec<_>>(),
        vec!["format-cpp", "format-meson", "format-python"]
    );
    assert_eq!(
        runner.probes(),
        vec!["clang-format", "muon", "yapf", "isort"]
    );
    assert_eq!(
        runner
            .invocations()
            .into_iter()
            .map(|(p, _)| p)
            .collect::<Vec<_>>(),
        vec!["clang-format", "muon", "isort", "yapf"]
    );
}

#[test_log::test]
fn test_first_failing_step_stops_the_chain() {
    let project = TestProject::new();
    project.write("src/a.cpp", "a\n");
    project.write("meson.build", "project('x')\n");
    project.write("setup.py", "x=1\n");

    let config = project.config();
    let steps = formatters(&config, &ToolRegistry::new(&config.tools));
    let runner = FakeRunner::new()
        .with_file("a.cpp", Behavior::Rewrite("b\n".to_string()))
        .with_missing("muon");
    let mut out = Vec::new();

    let err = run_all(&steps, &runner, &mut out).unwrap_err();

    assert!(matches!(err, Error::ToolMissing { ref tool } if tool == "muon"));
    assert!(!runner.probes().contains(&"yapf".to_string()));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("Formatted: {}\n", project.resolved("src/a.cpp").display())
    );
}

#[test_log::test]
fn test_config_file_changes_source_dir() {
    let project = TestProject::new();
    project.write(CONFIG_FILE_NAME, "source-dir = \"daemon\"\n");
    project.write("daemon/main.cpp", "a\n");
    project.write("src/ignored.cpp", "a\n");

    let config = ProjectConfig::load(project.root()).unwrap();
    let steps = formatters(&config, &ToolRegistry::new(&ToolsConfig::default()));
    let runner = FakeRunner::new();
    let mut out = Vec::new();

    run_all(&steps[..1], &runner, &mut out).unwrap();

    assert_eq!(
        runner.invocations(),
        vec![("clang-format".to_string(), "main.cpp".to_string())]
    );
}
