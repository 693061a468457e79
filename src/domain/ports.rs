use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Measures the size of a real lesion, in voxels.
pub trait VoxelCounter {
    fn count_voxels(&self, path: &Path) -> Result<u64>;
}

/// Where picked lists (and optionally the picked files) end up.
pub trait ListStore {
    /// Writes the list next to `target` without overwriting anything and
    /// returns the path actually written.
    fn save_list(&self, paths: &[String], target: &Path) -> Result<PathBuf>;

    /// Copies the files of a saved list into a folder named after it.
    fn copy_list_files(&self, paths: &[String], list_path: &Path) -> Result<PathBuf>;
}
