//! Tree rendering through the native DRAWTREE routine
//!
//! Writes a Newick tree into the scratch directory, runs `psdrawtree` on it,
//! and converts the resulting PostScript into SVG.

use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::application::scratch::{
    prepare_dir, sibling_path, ScratchFiles, POSTSCRIPT_SUFFIX, TREE_SUFFIX,
};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{NativeTool, RenderedTree, TreeText};
use crate::infrastructure::traits::{FileSystem, NativeTools, PostscriptConverter};

/// DRAWTREE rendering service.
pub struct RenderService {
    fs: Arc<dyn FileSystem>,
    tools: Arc<dyn NativeTools>,
    converter: Arc<dyn PostscriptConverter>,
    settings: Arc<Settings>,
}

impl RenderService {
    /// Create a new render service.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        tools: Arc<dyn NativeTools>,
        converter: Arc<dyn PostscriptConverter>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            fs,
            tools,
            converter,
            settings,
        }
    }

    /// Draw `tree` and return both the SVG and the raw PostScript.
    ///
    /// # Errors
    /// - [`ApplicationError::MissingFont`] when the font file does not exist
    /// - [`ApplicationError::OperationFailed`] for scratch file I/O
    /// - [`ApplicationError::Native`] when the library cannot be called
    /// - [`ApplicationError::ToolFailed`] when `psdrawtree` returns false
    /// - [`ApplicationError::Conversion`] when the converter fails
    #[instrument(skip_all)]
    pub fn render(&self, tree: &TreeText) -> ApplicationResult<RenderedTree> {
        let font = self.settings.font_path();
        if !self.fs.is_file(&font) {
            return Err(ApplicationError::MissingFont(font));
        }
        let dir = prepare_dir(self.fs.as_ref(), &self.settings.scratch_dir)?;

        let mut scratch = ScratchFiles::new(self.fs.clone());
        let tree_file = scratch
            .create(&dir, TREE_SUFFIX)
            .with_path_context("create scratch file", &dir)?;
        let postscript_file =
            scratch.track(sibling_path(&tree_file, TREE_SUFFIX, POSTSCRIPT_SUFFIX));

        self.fs
            .write(&tree_file, tree.as_str())
            .with_path_context("write tree", &tree_file)?;
        debug!(
            "render: tree={} font={}",
            tree_file.display(),
            font.display()
        );

        let ok = self
            .tools
            .drawtree(&tree_file, &font, &postscript_file)
            .map_err(|e| ApplicationError::Native {
                tool: NativeTool::Drawtree,
                source: Box::new(e),
            })?;
        if !ok {
            return Err(ApplicationError::ToolFailed {
                tool: NativeTool::Drawtree,
            });
        }

        let postscript = self
            .fs
            .read_to_string(&postscript_file)
            .with_path_context("read postscript", &postscript_file)?;
        let svg = self
            .converter
            .to_svg(&postscript)
            .map_err(|e| ApplicationError::Conversion {
                source: Box::new(e),
            })?;
        debug!(
            "render: postscript={} bytes svg={} bytes",
            postscript.len(),
            svg.len()
        );

        Ok(RenderedTree { svg, postscript })
    }

    /// Best-effort rendering of raw tree text: `(svg, postscript)`.
    ///
    /// Any failure is logged and yields two empty strings.
    pub fn render_best_effort(&self, tree: &str) -> (String, String) {
        let result = TreeText::new(tree)
            .map_err(ApplicationError::from)
            .and_then(|tree| self.render(&tree));
        match result {
            Ok(rendered) => (rendered.svg, rendered.postscript),
            Err(e) => {
                error!("drawtree rendering failed: {}", e);
                (String::new(), String::new())
            }
        }
    }
}
