#![allow(dead_code)]

pub mod fakes;

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run shelfnote commands against an isolated config file
pub struct ShelfTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl ShelfTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        ShelfTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_shelfnote").to_string(),
        }
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("SHELFNOTE_CONFIG", self.config_path())
            .env_remove("SHELFNOTE_API_URL")
            .env_remove("SHELFNOTE_TOKEN")
            .env_remove("GOOGLE_BOOKS_API_KEY")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to execute shelfnote command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config file");
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(self.config_path()).expect("Failed to read config file")
    }
}
