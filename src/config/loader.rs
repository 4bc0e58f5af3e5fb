use std::fs;
use std::path::Path;

use log::debug;

use crate::config::types::TocOptions;
use crate::utils::error::{Result, TocError};

/// Formats an options file can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFormat {
    Yaml,
    Toml,
    Json,
}

impl OptionsFormat {
    /// Pick the format from a file extension. Files without one are read as YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(ext) = path.extension() else {
            return Ok(OptionsFormat::Yaml);
        };

        match ext.to_string_lossy().to_lowercase().as_str() {
            "yml" | "yaml" => Ok(OptionsFormat::Yaml),
            "toml" => Ok(OptionsFormat::Toml),
            "json" => Ok(OptionsFormat::Json),
            other => Err(TocError::Config(format!(
                "Unsupported options file format: {}",
                other
            ))),
        }
    }
}

/// Load table of contents options from a file, filling gaps with defaults
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<TocOptions> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TocError::Config(format!(
            "Options file not found: {}",
            path.display()
        )));
    }

    let format = OptionsFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| {
        TocError::Config(format!(
            "Failed to read options file {}: {}",
            path.display(),
            e
        ))
    })?;

    debug!("Loading options from {} as {:?}", path.display(), format);
    parse_options(&content, format)
}

/// Parse options from a string in the given format
pub fn parse_options(content: &str, format: OptionsFormat) -> Result<TocOptions> {
    // An empty YAML document is `null`, which would not deserialize into a struct
    if content.trim().is_empty() {
        return Ok(TocOptions::default());
    }

    let options = match format {
        OptionsFormat::Yaml => serde_yaml::from_str::<TocOptions>(content)
            .map_err(|e| TocError::Config(format!("Failed to parse YAML options: {}", e)))?,
        OptionsFormat::Toml => toml::from_str::<TocOptions>(content)
            .map_err(|e| TocError::Config(format!("Failed to parse TOML options: {}", e)))?,
        OptionsFormat::Json => serde_json::from_str::<TocOptions>(content)
            .map_err(|e| TocError::Config(format!("Failed to parse JSON options: {}", e)))?,
    };

    debug!("Options loaded: {:?}", options);
    Ok(options)
}
