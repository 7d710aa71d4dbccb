//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{InferenceService, RenderService};
use crate::config::Settings;
use crate::domain::Platform;
use crate::infrastructure::converter::CommandConverter;
use crate::infrastructure::native::SharedLibraryTools;
use crate::infrastructure::traits::{
    FileSystem, NativeTools, PostscriptConverter, RealCommandRunner, RealFileSystem,
};

/// Container holding the shared collaborators of all services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Native FITCH / DRAWTREE binding
    pub tools: Arc<dyn NativeTools>,

    /// PostScript to SVG converter
    pub converter: Arc<dyn PostscriptConverter>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let tools = SharedLibraryTools::from_settings(&settings, Platform::current());
        let converter = CommandConverter::new(Arc::new(RealCommandRunner), &settings.converter);
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(tools),
            Arc::new(converter),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        tools: Arc<dyn NativeTools>,
        converter: Arc<dyn PostscriptConverter>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            tools,
            converter,
        }
    }

    pub fn inference_service(&self) -> InferenceService {
        InferenceService::new(self.fs.clone(), self.tools.clone(), self.settings.clone())
    }

    pub fn render_service(&self) -> RenderService {
        RenderService::new(
            self.fs.clone(),
            self.tools.clone(),
            self.converter.clone(),
            self.settings.clone(),
        )
    }
}
