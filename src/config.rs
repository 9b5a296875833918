use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

/// Sentence length presets selectable with the length knob.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LengthOption {
    #[strum(to_string = "SMALL", serialize = "s", serialize = "0")]
    Small,
    #[default]
    #[strum(to_string = "MEDIUM", serialize = "m", serialize = "1")]
    Medium,
    #[strum(to_string = "LARGE", serialize = "l", serialize = "2")]
    Large,
}

impl LengthOption {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn as_value(&self) -> f64 {
        self.as_index() as f64
    }

    /// Knob value to option. Values are snapped to whole steps before they get here.
    pub fn from_value(value: f64) -> Option<Self> {
        let idx = value.round();
        if idx < 0.0 {
            return None;
        }
        Self::iter().nth(idx as usize)
    }

    pub fn last_index() -> usize {
        Self::iter().count() - 1
    }

    pub fn word_range(&self) -> WordRange {
        match self {
            Self::Small => WordRange::new(10, 20),
            Self::Medium => WordRange::new(20, 35),
            Self::Large => WordRange::new(35, 50),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{min}-{max}")]
pub struct WordRange {
    pub min: u32,
    pub max: u32,
}

impl WordRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl Default for WordRange {
    fn default() -> Self {
        LengthOption::default().word_range()
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SectionName(String);

crate::impl_string_newtype!(SectionName);

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct YearKnobConfig {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub initial: f64,
    pub image: Option<PathBuf>,
}

impl Default for YearKnobConfig {
    fn default() -> Self {
        Self {
            x: 1399.0,
            y: 254.0,
            radius: 30.0,
            min: 2010.0,
            max: 2125.0,
            step: 1.0,
            initial: 2025.0,
            image: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LengthKnobConfig {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub initial: LengthOption,
    pub image: Option<PathBuf>,
}

impl Default for LengthKnobConfig {
    fn default() -> Self {
        Self {
            x: 1399.0,
            y: 400.0,
            radius: 30.0,
            initial: LengthOption::Medium,
            image: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PowerConfig {
    pub start_powered: bool,
    pub on_image: Option<PathBuf>,
    pub off_image: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CursorConfig {
    pub size: i32,
    pub surface: Option<PathBuf>,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            size: 32,
            surface: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SlideshowConfig {
    pub interval_secs: u32,
    pub slides: Vec<PathBuf>,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            slides: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionConfig {
    pub name: SectionName,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub cursor: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PanelConfig {
    pub welcome_title: String,
    pub welcome_body: String,
    pub sections: Vec<SectionConfig>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            welcome_title: "Welcome".to_string(),
            welcome_body: "Select a section from the navigation menu to begin.".to_string(),
            sections: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub surface: SurfaceConfig,
    pub year_knob: YearKnobConfig,
    pub length_knob: LengthKnobConfig,
    pub power: PowerConfig,
    pub cursor: CursorConfig,
    pub slideshow: SlideshowConfig,
    pub panel: PanelConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "knobdeck").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Makes a user-supplied path absolute against the working directory. The watcher compares
/// it with the absolute paths notify reports.
pub fn resolve_config_path(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(
            config::File::new(&path.to_string_lossy(), config::FileFormat::Toml).required(false),
        )
        .add_source(config::Environment::with_prefix("KNOBDECK").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
