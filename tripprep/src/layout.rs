use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// resolved file layout for a pipeline run. all input and output locations
/// are derived from a single project root supplied on the command line,
/// so no stage needs to guess paths from its own location on disk.
#[derive(Debug, Clone)]
pub struct DataLayout {
    pub root: PathBuf,
    pub zipped_dir: PathBuf,
    pub extracted_dir: PathBuf,
    pub interim_dir: PathBuf,
    pub transformations_dir: PathBuf,
    pub figures_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub params_file: PathBuf,
}

impl DataLayout {
    pub fn new<P>(root: P) -> DataLayout
    where
        P: AsRef<Path>,
    {
        let root = root.as_ref().to_path_buf();
        DataLayout {
            zipped_dir: root.join("data").join("raw").join("zipped"),
            extracted_dir: root.join("data").join("raw").join("extracted"),
            interim_dir: root.join("data").join("interim"),
            transformations_dir: root.join("data").join("processed").join("transformations"),
            figures_dir: root.join("reports").join("figures"),
            logs_dir: root.join("logs"),
            params_file: root.join("params.yaml"),
            root,
        }
    }

    /// confirms the project root exists before any stage starts writing
    /// relative to it. output directories are created lazily by the stages
    /// that own them.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.root.is_dir() {
            return Err(PipelineError::InvalidUserInput(format!(
                "project root '{}' is not a directory",
                self.root.to_str().unwrap_or_default()
            )));
        }
        Ok(())
    }

    /// destination of the target distribution plot, overwritten on
    /// every train/val transform run.
    pub fn target_plot_path(&self) -> PathBuf {
        self.figures_dir.join("target_distribution.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths_derive_from_root() {
        let layout = DataLayout::new("/tmp/project");
        assert_eq!(
            layout.interim_dir,
            PathBuf::from("/tmp/project/data/interim")
        );
        assert_eq!(
            layout.target_plot_path(),
            PathBuf::from("/tmp/project/reports/figures/target_distribution.png")
        );
        assert_eq!(layout.params_file, PathBuf::from("/tmp/project/params.yaml"));
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let layout = DataLayout::new("/definitely/not/a/real/path");
        assert!(layout.validate().is_err());
    }
}
