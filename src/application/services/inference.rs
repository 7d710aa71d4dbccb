//! Tree inference through the native FITCH routine
//!
//! Serializes a distance matrix into the scratch directory, runs `do_fitch`
//! on it and reads back the Newick tree. Scratch files are removed on every
//! exit path.

use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::application::scratch::{
    prepare_dir, sibling_path, ScratchFiles, INPUT_SUFFIX, OUTPUT_SUFFIX, TREE_OUTPUT_SUFFIX,
};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{DistanceMatrix, NativeTool, TreeText};
use crate::infrastructure::traits::{FileSystem, NativeTools};

/// FITCH tree inference service.
pub struct InferenceService {
    fs: Arc<dyn FileSystem>,
    tools: Arc<dyn NativeTools>,
    settings: Arc<Settings>,
}

impl InferenceService {
    /// Create a new inference service.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        tools: Arc<dyn NativeTools>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            fs,
            tools,
            settings,
        }
    }

    /// Infer a tree from `matrix`.
    ///
    /// # Errors
    /// - [`ApplicationError::OperationFailed`] for scratch file I/O
    /// - [`ApplicationError::Native`] when the library cannot be called
    /// - [`ApplicationError::ToolFailed`] when `do_fitch` returns false
    /// - [`ApplicationError::Domain`] when the tree file is blank
    #[instrument(skip_all, fields(leaves = matrix.len()))]
    pub fn infer(&self, matrix: &DistanceMatrix) -> ApplicationResult<TreeText> {
        let document = matrix.to_phylip();
        let dir = prepare_dir(self.fs.as_ref(), &self.settings.scratch_dir)?;

        let mut scratch = ScratchFiles::new(self.fs.clone());
        let input = scratch
            .create(&dir, INPUT_SUFFIX)
            .with_path_context("create scratch file", &dir)?;
        let output = scratch.track(sibling_path(&input, INPUT_SUFFIX, OUTPUT_SUFFIX));
        let tree = scratch.track(sibling_path(&input, INPUT_SUFFIX, TREE_OUTPUT_SUFFIX));

        self.fs
            .write(&input, &document)
            .with_path_context("write distance document", &input)?;
        debug!("infer: input={}", input.display());

        let ok = self
            .tools
            .fitch(&input, &output, &tree)
            .map_err(|e| ApplicationError::Native {
                tool: NativeTool::Fitch,
                source: Box::new(e),
            })?;
        if !ok {
            return Err(ApplicationError::ToolFailed {
                tool: NativeTool::Fitch,
            });
        }

        let text = self
            .fs
            .read_to_string(&tree)
            .with_path_context("read tree", &tree)?;
        debug!("infer: tree has {} bytes", text.len());
        Ok(TreeText::new(text)?)
    }

    /// Best-effort inference from raw labels and rows.
    ///
    /// Any failure, including invalid input, is logged and yields an empty
    /// string.
    pub fn infer_best_effort(&self, labels: &[String], rows: &[Vec<f64>]) -> String {
        let result = DistanceMatrix::new(labels.to_vec(), rows.to_vec())
            .map_err(ApplicationError::from)
            .and_then(|matrix| self.infer(&matrix));
        match result {
            Ok(tree) => tree.into_string(),
            Err(e) => {
                error!("fitch inference failed: {}", e);
                String::new()
            }
        }
    }
}
