//! Where generator output comes from: a saved JSON file or an external generator program.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::string::FromUtf8Error;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{DEFAULT_THEME, FloorConfig};

pub const DEFAULT_ROOM_COUNT: u32 = 7;
pub const DEFAULT_START_AREA: &str = "cave";
pub const DEFAULT_AREAS: [&str; 3] = ["castle", "cave", "forest"];
pub const DEFAULT_ENEMIES: [&str; 3] = ["goblin", "bat", "knight"];
pub const DEFAULT_WEAPONS: [&str; 3] = ["sword", "spear", "bow"];
pub const DEFAULT_POOL_SIZE: u32 = 4;
/// Placeholder the generator expects when there is no previous floor.
pub const NO_PREVIOUS: &str = "None";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read layout file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not start generator '{program}': {source}")]
    Spawn { program: String, source: io::Error },
    #[error("generator '{program}' exited with {status}: {stderr}")]
    Failed { program: String, status: String, stderr: String },
    #[error("generator output is not UTF-8")]
    NotUtf8(#[from] FromUtf8Error),
    #[error("could not encode generator arguments: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Arguments for one generator run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    pub room_count: u32,
    pub start_area: String,
    pub areas: Vec<String>,
    pub enemy_count: u32,
    pub enemies: Vec<String>,
    pub weapon_count: u32,
    pub weapons: Vec<String>,
    pub previous_theme: String,
    pub theme: String,
    pub previous_story: String,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            room_count: DEFAULT_ROOM_COUNT,
            start_area: DEFAULT_START_AREA.to_string(),
            areas: DEFAULT_AREAS.map(String::from).to_vec(),
            enemy_count: DEFAULT_POOL_SIZE,
            enemies: DEFAULT_ENEMIES.map(String::from).to_vec(),
            weapon_count: DEFAULT_POOL_SIZE,
            weapons: DEFAULT_WEAPONS.map(String::from).to_vec(),
            previous_theme: NO_PREVIOUS.to_string(),
            theme: DEFAULT_THEME.to_string(),
            previous_story: NO_PREVIOUS.to_string(),
        }
    }
}

impl GenerationRequest {
    /// Request for the first floor of a run.
    pub fn first_floor(config: &FloorConfig) -> Self {
        Self { theme: config.theme.clone(), ..Self::default() }
    }

    /// Request for a floor that follows one with `previous_theme` and `previous_story`.
    pub fn after(config: &FloorConfig, previous_theme: &str, previous_story: &str) -> Self {
        Self {
            previous_theme: previous_theme.to_string(),
            previous_story: previous_story.to_string(),
            ..Self::first_floor(config)
        }
    }

    /// Generator command-line flags, without the api key.
    pub fn to_args(&self) -> Result<Vec<String>, SourceError> {
        let areas = serde_json::to_string(&self.areas)?;
        Ok(vec![
            "-f".to_string(),
            self.room_count.to_string(),
            self.start_area.clone(),
            areas.clone(),
            areas,
            "-e".to_string(),
            self.enemy_count.to_string(),
            serde_json::to_string(&self.enemies)?,
            "-w".to_string(),
            self.weapon_count.to_string(),
            serde_json::to_string(&self.weapons)?,
            "-s".to_string(),
            self.previous_theme.clone(),
            self.theme.clone(),
            self.previous_story.clone(),
        ])
    }
}

pub trait LayoutSource {
    /// Blocks until the generator output for `request` is available.
    fn fetch(&mut self, request: &GenerationRequest) -> Result<String, SourceError>;
}

/// Replays generator output saved to disk. The request is ignored.
#[derive(Clone, Debug)]
pub struct FileLayoutSource {
    path: PathBuf,
}

impl FileLayoutSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LayoutSource for FileLayoutSource {
    fn fetch(&mut self, _request: &GenerationRequest) -> Result<String, SourceError> {
        debug!("reading layout from {}", self.path.display());
        fs::read_to_string(&self.path)
            .map_err(|source| SourceError::Read { path: self.path.clone(), source })
    }
}

#[derive(Clone, Debug)]
pub struct CommandLayoutSource {
    program: String,
    leading_args: Vec<String>,
    api_key: Option<String>,
}

impl CommandLayoutSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), leading_args: Vec::new(), api_key: None }
    }

    /// Arguments placed before the generator flags, such as a script path.
    pub fn with_leading_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.leading_args.extend(args);
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }

    pub fn command_args(&self, request: &GenerationRequest) -> Result<Vec<String>, SourceError> {
        let mut args = self.leading_args.clone();
        if let Some(key) = &self.api_key {
            args.push("-k".to_string());
            args.push(key.clone());
        }
        args.extend(request.to_args()?);
        Ok(args)
    }
}

impl LayoutSource for CommandLayoutSource {
    fn fetch(&mut self, request: &GenerationRequest) -> Result<String, SourceError> {
        let args = self.command_args(request)?;
        info!("running generator {} for theme '{}'", self.program, request.theme);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| SourceError::Spawn { program: self.program.clone(), source })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(SourceError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }
        if !stderr.is_empty() {
            debug!("generator stderr: {stderr}");
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn default_request_matches_generator_flag_layout() {
        let args = GenerationRequest::default().to_args().unwrap();
        assert_eq!(&args[..3], ["-f", "7", "cave"]);
        assert_eq!(args[3], r#"["castle","cave","forest"]"#);
        assert_eq!(args[3], args[4]);
        assert_eq!(&args[5..8], ["-e", "4", r#"["goblin","bat","knight"]"#]);
        assert_eq!(&args[8..11], ["-w", "4", r#"["sword","spear","bow"]"#]);
        assert_eq!(&args[11..], ["-s", "None", "cave", "None"]);
    }

    #[test]
    fn follow_up_request_carries_previous_theme_and_story() {
        let config = FloorConfig { theme: "forest".to_string(), ..FloorConfig::default() };
        let request = GenerationRequest::after(&config, "castle", "The gate fell.");
        let args = request.to_args().unwrap();
        assert_eq!(&args[11..], ["-s", "castle", "forest", "The gate fell."]);
    }

    #[test]
    fn api_key_and_leading_args_come_first() {
        let source = CommandLayoutSource::new("python3")
            .with_leading_args(["agent.py".to_string()])
            .with_api_key(Some("k-123".to_string()));
        let args = source.command_args(&GenerationRequest::default()).unwrap();
        assert_eq!(&args[..4], ["agent.py", "-k", "k-123", "-f"]);
    }

    #[test]
    fn empty_api_key_is_dropped() {
        let source = CommandLayoutSource::new("gen").with_api_key(Some(String::new()));
        let args = source.command_args(&GenerationRequest::default()).unwrap();
        assert_eq!(args[0], "-f");
    }

    #[test]
    fn file_source_returns_file_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, r#"{"floors": {}}"#).unwrap();

        let mut source = FileLayoutSource::new(path.clone());
        assert_eq!(source.fetch(&GenerationRequest::default()).unwrap(), r#"{"floors": {}}"#);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let dir = tempdir().unwrap();
        let mut source = FileLayoutSource::new(dir.path().join("absent.json"));
        let err = source.fetch(&GenerationRequest::default()).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }

    #[cfg(unix)]
    #[test]
    fn command_source_returns_stdout() {
        let mut source = CommandLayoutSource::new("echo");
        let output = source.fetch(&GenerationRequest::default()).unwrap();
        assert!(output.starts_with("-f 7 cave"));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_source_error() {
        let mut source = CommandLayoutSource::new("false");
        let err = source.fetch(&GenerationRequest::default()).unwrap_err();
        assert!(matches!(err, SourceError::Failed { .. }));
    }

    #[test]
    fn unknown_program_fails_to_spawn() {
        let mut source = CommandLayoutSource::new("delve-no-such-generator");
        let err = source.fetch(&GenerationRequest::default()).unwrap_err();
        assert!(matches!(err, SourceError::Spawn { .. }));
    }
}
