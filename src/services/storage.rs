use crate::dmn::DmnError;
use crate::domain::config::PipelineConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Reads the TOML pipeline configuration. `None` gives the defaults; a path
/// that was asked for but does not exist is an error.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let raw = read_text(path)?;
    let config: PipelineConfig = toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = read_text(path)?;
    let value = serde_json::from_str(&raw).map_err(|e| DmnError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(value)
}

/// Pretty-printed JSON, creating parent directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    write_text(path, &serde_json::to_string_pretty(value)?)
}

pub fn write_text(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DmnError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| DmnError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        return Err(DmnError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    let raw = std::fs::read_to_string(path).map_err(|source| DmnError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw)
}
