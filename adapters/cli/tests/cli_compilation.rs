use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "scavenger"])
        .status()
        .expect("failed to invoke cargo check for scavenger CLI binary");

    assert!(status.success(), "cargo check --bin scavenger should succeed");
}

#[test]
fn scripted_run_prints_the_board_and_final_status() {
    let output = Command::new(env!("CARGO_BIN_EXE_scavenger"))
        .args(["--seed", "7", "--script", "dddwww"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run scavenger binary");

    assert!(output.status.success(), "scavenger exited with {}", output.status);
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.starts_with("Day 1\n"), "unexpected output:\n{stdout}");
    assert!(stdout.contains("##########"));
    assert!(stdout.contains("Final: day "));
}

#[test]
fn invalid_grid_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_scavenger"))
        .args(["--columns", "2", "--script", ""])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run scavenger binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.contains("invalid game configuration"), "{stderr}");
}
