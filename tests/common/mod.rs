#![allow(dead_code)]

pub mod backend;
pub mod stub_server;

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

pub use backend::{Call, ScriptedBackend, news_items, page_of};
pub use stub_server::StubServer;

/// Helper struct to run newsdesk commands in an isolated temp directory
pub struct NewsdeskTest {
    pub temp_dir: TempDir,
    api_url: Option<String>,
}

impl NewsdeskTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        NewsdeskTest {
            temp_dir,
            api_url: None,
        }
    }

    /// Point every command at `api_url` through the environment
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_newsdesk"));
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("NEWSDESK_ROOT", self.temp_dir.path().join(".newsdesk"))
            .env_remove("NEWSDESK_TOKEN")
            .env_remove("NEWSDESK_LOG")
            .env("NO_COLOR", "1");
        match &self.api_url {
            Some(url) => command.env("NEWSDESK_API_URL", url),
            None => command.env_remove("NEWSDESK_API_URL"),
        };
        command.output().expect("Failed to execute newsdesk command")
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
            "Expected command {:?} to fail, but it succeeded\nstdout: {}",
            args,
            String::from_utf8_lossy(&output.stdout)
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(".newsdesk").join("config.yaml")
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(self.config_path()).expect("Failed to read config file")
    }

    pub fn write_config(&self, content: &str) {
        let path = self.config_path();
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create .newsdesk directory");
        fs::write(path, content).expect("Failed to write config file");
    }
}
