use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use client_core::ComposerMetrics;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "chat.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub username: Option<String>,
    pub user_id: Option<String>,
    pub timed_out: bool,
    pub columns: usize,
    pub line_height_px: u32,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        let composer = ComposerMetrics::default();
        Self {
            server_url: "ws://127.0.0.1:5000/ws".into(),
            username: None,
            user_id: None,
            timed_out: false,
            columns: composer.columns,
            line_height_px: composer.line_height_px,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn composer(&self) -> ComposerMetrics {
        ComposerMetrics {
            columns: self.columns,
            line_height_px: self.line_height_px,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    username: Option<String>,
    user_id: Option<String>,
    timed_out: Option<bool>,
    columns: Option<usize>,
    line_height_px: Option<u32>,
    log: Option<String>,
}

/// Defaults, then the config file, then environment variables.
///
/// An explicitly given config file must exist; the default `chat.toml` is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if let Some(file_cfg) = read_file_settings(&path, required)? {
        apply_file_settings(&mut settings, file_cfg);
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;

    Ok(settings)
}

fn read_file_settings(path: &Path, required: bool) -> anyhow::Result<Option<FileSettings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };
    let parsed = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("invalid config file '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.username {
        settings.username = Some(v);
    }
    if let Some(v) = file_cfg.user_id {
        settings.user_id = Some(v);
    }
    if let Some(v) = file_cfg.timed_out {
        settings.timed_out = v;
    }
    if let Some(v) = file_cfg.columns {
        settings.columns = v;
    }
    if let Some(v) = file_cfg.line_height_px {
        settings.line_height_px = v;
    }
    if let Some(v) = file_cfg.log {
        settings.log_filter = v;
    }
}

fn apply_env(
    settings: &mut Settings,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = var("CHAT_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("CHAT_USERNAME") {
        settings.username = Some(v);
    }
    if let Some(v) = var("CHAT_USER_ID") {
        settings.user_id = Some(v);
    }

    if let Some(v) = var("CHAT_COLUMNS") {
        settings.columns = parse_env("CHAT_COLUMNS", &v)?;
    }
    if let Some(v) = var("CHAT_LINE_HEIGHT_PX") {
        settings.line_height_px = parse_env("CHAT_LINE_HEIGHT_PX", &v)?;
    }

    if let Some(v) = var("CHAT_LOG") {
        settings.log_filter = v;
    }

    Ok(())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> anyhow::Result<T> {
    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(_) => bail!("{key} must be a non-negative integer, got '{value}'"),
    }
}
