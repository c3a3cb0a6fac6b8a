use pretty_assertions::assert_eq;
use tidyup::Error;
use tidyup::config::ToolsConfig;
use tidyup::steps::{Step, StepReport, format_cpp, format_meson, format_python};
use tidyup::tools::ToolRegistry;
use tidyup_test_utilities::{Behavior, FakeRunner, TestProject};

fn registry() -> ToolRegistry {
    ToolRegistry::new(&ToolsConfig::default())
}

fn run(step: &dyn Step, runner: &FakeRunner) -> (Result<StepReport, Error>, String) {
    let mut out = Vec::new();
    let result = step.run(runner, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test_log::test]
fn test_cpp_formatter_reports_only_changed_sources() {
    let project = TestProject::new();
    project.write("src/a.cpp", "int  main(){}\n");
    project.write("src/b.cpp", "int main() {}\n");
    project.write("src/c.h", "#pragma once\nint  f();\n");
    project.write("src/d.py", "x=1\n");

    let runner = FakeRunner::new()
        .with_file("a.cpp", Behavior::Rewrite("int main() {}\n".to_string()))
        .with_file("b.cpp", Behavior::Rewrite("int main() {}\n".to_string()))
        .with_file("c.h", Behavior::Rewrite("#pragma once\nint f();\n".to_string()));

    let (result, output) = run(&format_cpp(&project.config(), &registry()), &runner);

    assert!(result.is_ok());
    assert_eq!(
        output,
        format!(
            "Formatted: {}\nFormatted: {}\n",
            project.resolved("src/a.cpp").display(),
            project.resolved("src/c.h").display()
        )
    );
    assert_eq!(
        runner.invocations(),
        vec![
            ("clang-format".to_string(), "a.cpp".to_string()),
            ("clang-format".to_string(), "b.cpp".to_string()),
            ("clang-format".to_string(), "c.h".to_string()),
        ]
    );
    assert_eq!(project.read("src/d.py"), "x=1\n");
}

#[test_log::test]
fn test_cpp_formatter_ignores_files_outside_source_dir() {
    let project = TestProject::new();
    project.write("src/main.c", "int main(void){}\n");
    project.write("tools/helper.c", "int helper(void){}\n");

    let runner = FakeRunner::new();
    let (result, _) = run(&format_cpp(&project.config(), &registry()), &runner);

    assert!(result.is_ok());
    assert_eq!(
        runner.invocations(),
        vec![("clang-format".to_string(), "main.c".to_string())]
    );
}

#[test_log::test]
fn test_unchanged_files_produce_no_output() {
    let project = TestProject::new();
    project.write("src/a.cpp", "int main() {}\n");

    let runner = FakeRunner::new();
    let (result, output) = run(&format_cpp(&project.config(), &registry()), &runner);

    let Ok(StepReport::Formatted(report)) = result else {
        panic!("expected a format report");
    };
    assert_eq!(output, "");
    assert!(report.changed.is_empty());
    assert_eq!(report.processed, vec![project.resolved("src/a.cpp")]);
}

#[test_log::test]
fn test_missing_tool_processes_no_files() {
    let project = TestProject::new();
    project.write("src/a.cpp", "int  main(){}\n");

    let runner = FakeRunner::new()
        .with_missing("clang-format")
        .with_file("a.cpp", Behavior::Rewrite("int main() {}\n".to_string()));

    let (result, output) = run(&format_cpp(&project.config(), &registry()), &runner);

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "clang-format is required");
    assert_eq!(err.exit_code(), 1);
    assert_eq!(output, "");
    assert!(runner.invocations().is_empty());
    assert_eq!(project.read("src/a.cpp"), "int  main(){}\n");
}

#[test_log::test]
fn test_interrupt_stops_remaining_files() {
    let project = TestProject::new();
    project.write("src/a.cpp", "a\n");
    project.write("src/b.cpp", "b\n");
    project.write("src/c.cpp", "c\n");
    project.write("src/d.cpp", "d\n");

    let runner = FakeRunner::new()
        .with_file("a.cpp", Behavior::Rewrite("A\n".to_string()))
        .with_file("b.cpp", Behavior::Interrupt);

    let (result, output) = run(&format_cpp(&project.config(), &registry()), &runner);

    assert!(matches!(result, Err(Error::Interrupted)));
    assert_eq!(
        output,
        format!("Formatted: {}\n", project.resolved("src/a.cpp").display())
    );
    assert_eq!(
        runner
            .invocations()
            .into_iter()
            .map(|(_, f)| f)
            .collect::<Vec<_>>(),
        vec!["a.cpp", "b.cpp"]
    );
    // Work already done is kept.
    assert_eq!(project.read("src/a.cpp"), "A\n");
}

#[test_log::test]
fn test_formatter_failure_aborts_batch() {
    let project = TestProject::new();
    project.write("src/a.cpp", "a\n");
    project.write("src/b.cpp", "b\n");

    let runner = FakeRunner::new().with_file("a.cpp", Behavior::Fail(1));

    let (result, _) = run(&format_cpp(&project.config(), &registry()), &runner);

    assert!(matches!(result, Err(Error::ToolInvocation { .. })));
    assert_eq!(runner.invocations().len(), 1);
}

#[test_log::test]
fn test_meson_formatter_selects_exact_names_and_passes_config() {
    let project = TestProject::new();
    project.write("meson.build", "project('x')\n");
    project.write("meson_options.txt", "option('a', type: 'boolean')\n");
    project.write("src/meson.build", "executable('x')\n");
    project.write("meson.build.bak", "old\n");
    project.write("notes.txt", "notes\n");

    let runner = FakeRunner::new()
        .with_file("meson.build", Behavior::Append("\n".to_string()));
    let config = project.config();

    let (result, output) = run(&format_meson(&config, &registry()), &runner);

    assert!(result.is_ok());
    assert_eq!(
        runner
            .invocations()
            .into_iter()
            .map(|(_, f)| f)
            .collect::<Vec<_>>(),
        vec!["meson.build", "meson_options.txt", "meson.build"]
    );
    assert_eq!(output.lines().count(), 2);
    assert_eq!(project.read("meson.build.bak"), "old\n");

    let first = &runner.calls()[1];
    assert_eq!(first.program, "muon");
    assert_eq!(
        first.args[..4],
        [
            "fmt".to_string(),
            "-i".to_string(),
            "-c".to_string(),
            config.muon_config.to_string_lossy().into_owned(),
        ]
    );
}

#[test_log::test]
fn test_python_formatter_diffs_across_both_passes() {
    let project = TestProject::new();
    project.write("scripts/a.py", "import sys\nimport os\n");
    project.write("scripts/b.py", "x = 1\n");
    project.write("scripts/c.pyc", "binary");

    let runner = FakeRunner::new()
        .with_program("isort", Behavior::Keep)
        .with_file("a.py", Behavior::Rewrite("import os\nimport sys\n".to_string()));

    let (result, output) = run(&format_python(&project.config(), &registry()), &runner);

    assert!(result.is_ok());
    assert_eq!(runner.probes(), vec!["yapf", "isort"]);
    assert_eq!(
        runner.invocations(),
        vec![
            ("isort".to_string(), "a.py".to_string()),
            ("yapf".to_string(), "a.py".to_string()),
            ("isort".to_string(), "b.py".to_string()),
            ("yapf".to_string(), "b.py".to_string()),
        ]
    );
    assert_eq!(
        output,
        format!(
            "Formatted: {}\n",
            project.resolved("scripts/a.py").display()
        )
    );
}

#[test_log::test]
fn test_python_formatter_requires_both_tools() {
    let project = TestProject::new();
    project.write("a.py", "x = 1\n");

    let runner = FakeRunner::new().with_missing("isort");

    let (result, _) = run(&format_python(&project.config(), &registry()), &runner);

    assert_eq!(result.unwrap_err().to_string(), "isort is required");
    assert!(runner.invocations().is_empty());
}

#[test_log::test]
fn test_configured_program_is_used() {
    let project = TestProject::new();
    project.write("src/a.cpp", "a\n");

    let registry =
        ToolRegistry::new(&ToolsConfig::default().with_path("clang-format", "clang-format-17"));
    let runner = FakeRunner::new();

    let (result, _) = run(&format_cpp(&project.config(), &registry), &runner);

    assert!(result.is_ok());
    assert_eq!(runner.probes(), vec!["clang-format-17"]);
}
