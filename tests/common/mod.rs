use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const DEVICE_FILE: &str = "5c1d2e3f-4a5b-4c6d-9e7f-8a9b0c1d2e3f.json";

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Scratch layout: image directories, record storage and a config pointing at them
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let env = Self {
            temp_dir: tempfile::tempdir()?,
        };
        fs::create_dir_all(env.horizontal_dir())?;
        fs::create_dir_all(env.vertical_dir())?;
        Ok(env)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn horizontal_dir(&self) -> PathBuf {
        self.path().join("horizontal")
    }

    pub fn vertical_dir(&self) -> PathBuf {
        self.path().join("vertical")
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.path().join("used")
    }

    pub fn output_path(&self) -> PathBuf {
        self.path().join("wall.jpg")
    }

    pub fn record_path(&self) -> PathBuf {
        self.storage_dir().join(DEVICE_FILE)
    }

    /// Write a config file with the given source directories
    pub fn write_config(&self, horizontal: &Path, vertical: &Path) -> Result<PathBuf> {
        let config_path = self.path().join("config.toml");
        let contents = format!(
            "storage_dir = {:?}\noutput_path = {:?}\nhorizontal_dir = {:?}\nvertical_dir = {:?}\n",
            self.storage_dir().display().to_string(),
            self.output_path().display().to_string(),
            horizontal.display().to_string(),
            vertical.display().to_string(),
        );
        fs::write(&config_path, contents)?;
        Ok(config_path)
    }

    pub fn write_record(&self, json: &str) -> Result<()> {
        fs::create_dir_all(self.storage_dir())?;
        fs::write(self.record_path(), json)?;
        Ok(())
    }
}

pub fn run_dailywall(args: &[&str]) -> Result<CommandOutput> {
    let output = Command::new(env!("CARGO_BIN_EXE_dailywall"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
