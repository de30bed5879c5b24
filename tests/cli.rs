use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("projectile_sim").expect("binary built")
}

#[test]
fn reports_results_for_given_values() {
    cmd()
        .args(["-v", "20", "-a", "45"])
        .assert()
        .success()
        .stdout(contains("Max height: 10.20 meters"))
        .stdout(contains("Distance traveled: 40.31 meters"))
        .stdout(contains("Flight time: 2.90 seconds"));
}

#[test]
fn custom_height_and_gravity() {
    cmd()
        .args(["--velocity", "0", "--angle", "0", "--height", "2", "--gravity", "1.62"])
        .assert()
        .success()
        .stdout(contains("Max height: 2.00 meters"))
        .stdout(contains("Distance traveled: 0.00 meters"));
}

#[test]
fn json_output_parses() {
    let output = cmd()
        .args(["-v", "12", "-a", "30", "--format", "json"])
        .output()
        .expect("run binary");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert!(value["samples"].as_array().is_some_and(|s| !s.is_empty()));
    assert_eq!(value["parameters"]["gravity_mps2"], 9.8);
}

#[test]
fn rejects_negative_velocity() {
    cmd()
        .args(["-v", "-5", "-a", "45"])
        .assert()
        .failure()
        .stderr(contains("Velocity cannot be negative"))
        .stdout(contains("Max height").not());
}

#[test]
fn rejects_angle_out_of_range() {
    cmd()
        .args(["-v", "10", "-a", "91"])
        .assert()
        .failure()
        .stderr(contains("between 0 and 90"));
}

#[test]
fn velocity_needs_angle() {
    cmd().args(["-v", "10"]).assert().failure();
}

#[test]
fn interactive_session_from_stdin() {
    cmd()
        .arg("--no-pause")
        .write_stdin("20\n45\n0\n9.8\nn\n")
        .assert()
        .success()
        .stdout(contains("Initial velocity (m/s): "))
        .stdout(contains("=== Results ==="))
        .stdout(contains("Simulation finished without a plot."));
}

#[test]
fn interactive_session_stops_on_invalid_value() {
    cmd()
        .arg("--no-pause")
        .write_stdin("-5\n")
        .assert()
        .failure()
        .stderr(contains("Velocity cannot be negative"))
        .stdout(contains("Launch angle").not());
}

#[test]
fn interactive_session_reports_eof() {
    cmd()
        .arg("--no-pause")
        .write_stdin("20\n")
        .assert()
        .failure()
        .stderr(contains("EOF"));
}

#[test]
fn saves_svg_plot() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("shot.svg");

    cmd()
        .args(["-v", "15", "-a", "60", "--no-labels", "--plot"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Plot saved to"));

    assert!(path.exists());
}

#[test]
fn interactive_json_stdout_is_parseable() {
    let output = cmd()
        .args(["--no-pause", "--format", "json"])
        .write_stdin("20\n45\n0\n9.8\nn\n")
        .output()
        .expect("run binary");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout holds only json");
    assert_eq!(value["parameters"]["speed_mps"], 20.0);

    let console = String::from_utf8_lossy(&output.stderr);
    assert!(console.contains("Initial velocity (m/s): "));
    assert!(console.contains("Simulation finished without a plot."));
}
