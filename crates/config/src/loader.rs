//! Parse and load user configuration.

use std::{fs, io, path::Path};

use toml::Table;
use tracing::{info, warn};

use crate::{
    Config, Error, defaults,
    error::line_col,
    excerpt_at,
    raw::{RawConfig, unknown_keys},
    validate,
};

/// Parse configuration text.
///
/// Syntax and type errors carry a line/column and excerpt; invalid values,
/// legacy keys and unusable hotkeys produce validation errors. Unknown keys
/// are logged at warn level and skipped.
pub fn parse_str(text: &str) -> Result<Config, Error> {
    let raw: RawConfig = toml::from_str(text).map_err(|e| {
        let (line, col) = e
            .span()
            .map_or((1, 1), |span| line_col(text, span.start));
        Error::Parse {
            path: None,
            line,
            col,
            message: e.message().to_string(),
            excerpt: excerpt_at(text, line, col),
        }
    })?;
    if let Ok(table) = toml::from_str::<Table>(text) {
        for key in unknown_keys(&table) {
            warn!("Unknown Key: {key}");
        }
    }
    let config = raw.resolve()?;
    validate::validate_hotkeys(&config.hotkeys)?;
    Ok(config)
}

/// Load and validate the configuration file at `path`.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    parse_str(&text).map_err(|e| e.with_path(path))
}

/// Load the configuration at `path`, first writing the default file there if
/// none exists.
pub fn load_or_create(path: &Path) -> Result<Config, Error> {
    if !path.exists() {
        let io_err = |e: io::Error| Error::Read {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        fs::write(path, defaults::render_default_toml()).map_err(io_err)?;
        info!(path = %path.display(), "wrote default config");
    }
    load_from_path(path)
}
