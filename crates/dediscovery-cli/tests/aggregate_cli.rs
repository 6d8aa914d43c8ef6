use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir should be created");
    }
    fs::write(path, content).expect("fixture should be written");
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dediscovery"))
        .args(args)
        .output()
        .expect("dediscovery should launch")
}

fn seed_results(results_root: &Path, equation: &str) {
    let root = results_root.join("results_optics");
    write_file(&root.join("text equations/eqn_0.1_0_0.txt"), equation);
    write_file(
        &root.join("solutions data/sln_data_test_0.1_0_0.txt"),
        "1.0\n3.0\n",
    );
    write_file(
        &root.join("split exp data/poynting_vec_test_0.1.txt"),
        "1.0\n1.0\n",
    );
}

#[test]
fn aggregate_command_writes_table_and_report() {
    let temp = TempDir::new().expect("tempdir should be created");
    seed_results(temp.path(), "1.0*C + 2.0*x0{power:1.0} + 1.0*x0 = dI/dH\n");
    let results_root = temp.path().to_string_lossy().into_owned();

    let output = run_cli(&[
        "aggregate",
        "--results-root",
        &results_root,
        "--experiment",
        "optics",
        "--params",
        "0.1,0.2",
        "--population-size",
        "2",
        "--runs",
        "1",
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Aggregated 1 row(s)"));

    let root = temp.path().join("results_optics");
    assert_eq!(
        fs::read_to_string(root.join("total_results_optics.csv")).expect("csv should exist"),
        ",C,H,dI/dH,rmse\neqn_0.1_0_0.txt,1.0,1.0,1.0,1.4142135623730951\n"
    );
    assert!(root.join("total_results_optics.md").exists());
}

#[test]
fn aggregate_flags_override_config_and_skip_outputs() {
    let temp = TempDir::new().expect("tempdir should be created");
    seed_results(temp.path(), "1.0*x0 = dI/dx0\n");
    let config_path = temp.path().join("experiment.json");
    write_file(
        &config_path,
        r#"{ "experiment_name": "other", "param_values": [0.1], "discovery": { "population_size": 1 } }"#,
    );

    let output = run_cli(&[
        "aggregate",
        "--config",
        &config_path.to_string_lossy(),
        "--results-root",
        &temp.path().to_string_lossy(),
        "--experiment",
        "optics",
        "--no-csv",
        "--no-report",
        "--json",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"file_name\": \"eqn_0.1_0_0.txt\""));
    let root = temp.path().join("results_optics");
    assert!(!root.join("total_results_optics.csv").exists());
    assert!(!root.join("total_results_optics.md").exists());
}

#[test]
fn malformed_coefficient_exits_with_input_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    seed_results(temp.path(), "abc*x0 = dI/dx0\n");

    let output = run_cli(&[
        "aggregate",
        "--results-root",
        &temp.path().to_string_lossy(),
        "--experiment",
        "optics",
        "--params",
        "0.1",
        "--population-size",
        "1",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [INPUT.COEFFICIENT]"));
    assert!(stderr.contains("FATAL EXIT CODE: 2"));
}

#[test]
fn usage_errors_exit_with_code_two() {
    let output = run_cli(&["aggregate", "--population-size", "many"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: [INPUT.CLI_USAGE]"));
}

#[test]
fn parse_command_prints_coefficients() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = temp.path().join("eqn_0.3_2_0.txt");
    write_file(&path, "-0.25 * x0{power: 1.0} + 0.5 = dI/dx0{power: 1.0}\n");

    let output = run_cli(&["parse", &path.to_string_lossy(), "--symbol", "y"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("run: param=0.3, index=2, run=0"));
    assert!(stdout.contains("terms: -0.25*y, 0.5, 1.0*dI/dy"));
    assert!(stdout.contains("y = -0.25"));
    assert!(stdout.contains("C = 0.5"));
    assert!(stdout.contains("dI/dy = 1.0"));
}

#[test]
fn split_command_writes_partitions() {
    let temp = TempDir::new().expect("tempdir should be created");
    let data_root = temp.path().join("data");
    let grid: Vec<String> = (0..10).map(|i| format!("{i}.0")).collect();
    let values: Vec<String> = (0..10).map(|i| format!("-0.{i}")).collect();
    write_file(&data_root.join("T(H) r0=0.1/grid_0.1.txt"), &grid.join(","));
    write_file(&data_root.join("T(H) r0=0.1/T_av_0.1.txt"), &values.join(","));

    let output = run_cli(&[
        "split",
        "--data-root",
        &data_root.to_string_lossy(),
        "--results-root",
        &temp.path().to_string_lossy(),
        "--experiment",
        "optics",
        "--params",
        "0.1",
        "--seed",
        "3",
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("r0=0.1: 8 training / 2 test samples"));
    let split_dir = temp.path().join("results_optics/split exp data");
    for name in [
        "grid_training_0.1.txt",
        "grid_test_0.1.txt",
        "poynting_vec_training_0.1.txt",
        "poynting_vec_test_0.1.txt",
    ] {
        assert!(split_dir.join(name).exists(), "{name} should be written");
    }
}

#[test]
fn missing_raw_data_exits_with_io_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = run_cli(&[
        "split",
        "--data-root",
        &temp.path().join("nowhere").to_string_lossy(),
        "--results-root",
        &temp.path().to_string_lossy(),
        "--params",
        "0.1",
    ]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: [IO.MISSING_FILE]"));
}
