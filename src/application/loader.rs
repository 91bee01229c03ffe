//! Forest loading from JSON/TOML fixtures and the bundled city dataset.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::Forest;
use crate::infrastructure::traits::FileSystem;

/// Bundled city hierarchy (provinces > cities > districts).
const CITY_DATA: &str = include_str!("../../resources/city_data.json");

/// Serialization format of a forest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestFormat {
    /// Bare array of roots, or `{"nodes": [...]}`
    Json,
    /// Table with a `nodes` array (`[[nodes]]`)
    Toml,
}

impl ForestFormat {
    /// Determine the format from the file extension.
    pub fn from_path(path: &Path) -> ApplicationResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(ApplicationError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Parse forest content; `origin` names the source in error messages.
pub fn parse_forest(content: &str, format: ForestFormat, origin: &str) -> ApplicationResult<Forest> {
    let parsed = match format {
        ForestFormat::Json => serde_json::from_str::<Forest>(content).map_err(|e| e.to_string()),
        ForestFormat::Toml => toml::from_str::<Forest>(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ApplicationError::Parse {
        origin: origin.to_string(),
        message,
    })
}

/// The bundled city dataset.
pub fn bundled_forest() -> ApplicationResult<Forest> {
    parse_forest(CITY_DATA, ForestFormat::Json, "<bundled>")
}

/// Loads forests through the filesystem abstraction.
pub struct ForestLoader {
    fs: Arc<dyn FileSystem>,
}

impl ForestLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load a forest file, choosing the parser by extension.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Forest> {
        let format = ForestFormat::from_path(path)?;
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("forest file not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read forest", path)?;
        let forest = parse_forest(&content, format, &path.display().to_string())?;
        debug!(
            "load: {} roots, {} nodes from {}",
            forest.len(),
            forest.node_count(),
            path.display()
        );
        Ok(forest)
    }

    /// Load `path` if given, otherwise the bundled dataset.
    pub fn load_or_bundled(&self, path: Option<&Path>) -> ApplicationResult<Forest> {
        match path {
            Some(path) => self.load(path),
            None => {
                debug!("load_or_bundled: using bundled city data");
                bundled_forest()
            }
        }
    }
}
