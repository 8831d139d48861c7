use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

pub fn new_command_with_temp_home() -> (Command, TempDir) {
    let temp_home = tempfile::tempdir().expect("temp home");
    let mut command = Command::cargo_bin("flowci").expect("flowci binary");
    command.env("HOME", temp_home.path());
    command.env("XDG_CONFIG_HOME", temp_home.path().join(".config"));
    command.env("XDG_CACHE_HOME", temp_home.path().join(".cache"));
    (command, temp_home)
}

pub fn write_valid_config(home: &Path) {
    let config_dir = home.join(".config").join("flowci");
    fs::create_dir_all(&config_dir).expect("create config dir");

    let config = r#"
version = 1

[api]
base_url = "http://localhost:9"
timeout_secs = 1
"#;

    fs::write(config_dir.join("config.toml"), config).expect("write config");
}
