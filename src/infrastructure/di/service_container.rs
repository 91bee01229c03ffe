//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::LookupService;
use crate::application::{ApplicationResult, ForestLoader};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding application settings and I/O dependencies.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    pub fn forest_loader(&self) -> ForestLoader {
        ForestLoader::new(Arc::clone(&self.fs))
    }

    /// Build a lookup service over the forest at `data`.
    ///
    /// Falls back to the configured `data_file`, then to the bundled dataset.
    pub fn lookup_service(&self, data: Option<&Path>) -> ApplicationResult<LookupService> {
        let source = data.or(self.settings.data_file.as_deref());
        debug!("lookup_service: source={:?}", source);
        let forest = self.forest_loader().load_or_bundled(source)?;
        Ok(LookupService::new(forest))
    }
}
