
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

pub const DEFAULT_TEMPERATURE: i32 = 4500;

const STATE_FILE: &str = "config.json";
const STATE_DIR_MODE: u32 = 0o750;

/// Whether redshift is currently applying an adjustment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Power {
    On,
    Off,
}

impl Power {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "on" => Some(Self::On),
            "off" => Some(Self::Off),
            _ => None,
        }
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Off => write!(f, "off"),
        }
    }
}

/// The persisted record: whether adjustment is active, and the target
/// color temperature.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RedshiftState {
    pub state: Power,
    pub temperature: i32,
}

impl RedshiftState {
    /// The record written on first run.
    pub fn initial() -> Self {
        Self {
            state: Power::On,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Default for RedshiftState {
    /// Zero-value fallback, used when the state file cannot be read.
    fn default() -> Self {
        Self {
            state: Power::Off,
            temperature: 0,
        }
    }
}

/// On-disk store for [`RedshiftState`]. The directory is resolved once and
/// handed in, so tests can point it anywhere.
#[derive(Debug)]
pub struct Store {
    dir: PathBuf,
    file: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file = dir.join(STATE_FILE);
        Self { dir, file }
    }

    /// Per-user location: $HOME/.config/redshiftctl. HOME is read here,
    /// exactly once. An unset HOME degrades to the rootward path, whose I/O
    /// failures get logged downstream.
    pub fn from_env() -> Self {
        let home = std::env::var("HOME").unwrap_or_default();
        Self::new(Path::new(&home).join(".config").join("redshiftctl"))
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// First-run check: create the directory (non-world-writable) and write
    /// the initial record, unless the state file already exists.
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.file.exists() {
            return Ok(());
        }
        let mut dir_builder = fs::DirBuilder::new();
        dir_builder.recursive(true);
        {
            use std::os::unix::fs::DirBuilderExt;
            dir_builder.mode(STATE_DIR_MODE);
        }
        dir_builder.create(&self.dir).map_err(|e| {
            anyhow!("Failed to create state dir {:?}: {:?}", self.dir, e)
        })?;
        self.store(&RedshiftState::initial())
    }

    pub fn load(&self) -> Result<RedshiftState> {
        let data = fs::read_to_string(&self.file).map_err(|e| {
            anyhow!("Failed to read state file {:?}: {:?}", self.file, e)
        })?;
        let state = serde_json::from_str(&data).map_err(|e| {
            anyhow!("Failed to decode state file {:?}: {:?}", self.file, e)
        })?;
        Ok(state)
    }

    pub fn store(&self, state: &RedshiftState) -> Result<()> {
        let data = serde_json::to_string(state)?;
        fs::write(&self.file, data).map_err(|e| {
            anyhow!("Failed to write state file {:?}: {:?}", self.file, e)
        })?;
        Ok(())
    }
}
