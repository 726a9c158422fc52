use std::{fs, path::PathBuf, process::Command};

#[test]
fn basic_workflow() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("basic_workflow");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[growth]\n"
        + "initial_hosts = 100\n"
        + "post_reveal_upgrade_rate = 0.3\n"
        + "\n"
        + "[gtm]\n"
        + "seed_users = 40\n"
        + "b2b_attendees_per_event = 300\n";

    fs::write(&config_path, config_contents).expect("failed to write config file");

    let config_path_str = config_path
        .to_str()
        .expect("failed to convert config path to string");

    let out = run_bin(&["growth", "--months", "6"]);
    assert!(out.contains("GROWTH SIMULATION"));
    assert!(out.contains("GROWTH LOOP FUNNEL"));
    assert!(out.contains("UNIT ECONOMICS"));

    let out = run_bin(&["--config", config_path_str, "growth", "--scenarios"]);
    assert!(out.contains("SCENARIO COMPARISON (12 months)"));

    let out = run_bin(&["--config", config_path_str, "growth", "--initial-hosts", "25"]);
    assert!(out.contains("Initial hosts: 25"));

    let out = run_bin(&["--config", config_path_str, "gtm", "--tiktok", "high"]);
    assert!(out.contains("GTM SIMULATION (high TikTok scenario)"));
    assert!(out.contains("CHANNEL UNIT ECONOMICS"));
    assert!(out.contains("KEY MILESTONES"));
    assert!(out.contains("WHAT-IF ANALYSIS"));

    let out = run_bin(&["gtm", "--months", "9", "--b2b-event-size", "800"]);
    assert!(out.contains("Partner event size: 800 attendees"));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn rejects_invalid_config() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("invalid_config");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let config_path = test_dir.join("config.toml");
    fs::write(&config_path, "[growth]\npost_reveal_upgrade_rate = 1.5\n")
        .expect("failed to write config file");

    let config_path_str = config_path
        .to_str()
        .expect("failed to convert config path to string");

    let bin = PathBuf::from(env!("CARGO_BIN_EXE_growthsim"));
    let output = Command::new(bin)
        .args(["--config", config_path_str, "growth"])
        .output()
        .expect("failed to execute command");

    assert!(!output.status.success());

    fs::remove_dir_all(&test_dir).ok();
}

fn run_bin(args: &[&str]) -> String {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_growthsim"));

    let output = Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command");

    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

    assert!(
        output.status.success(),
        "failed to run binary with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );

    stdout_str.to_string()
}
