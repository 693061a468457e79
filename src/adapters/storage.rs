use crate::adapters::list_file;
use crate::domain::ports::ListStore;
use crate::utils::error::{PickupError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores lists and copied files on the local file system.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl ListStore for LocalStorage {
    fn save_list(&self, paths: &[String], target: &Path) -> Result<PathBuf> {
        list_file::write_list(paths, target)
    }

    fn copy_list_files(&self, paths: &[String], list_path: &Path) -> Result<PathBuf> {
        let folder = copy_folder_for(list_path);
        copy_files(paths, &folder)?;
        Ok(folder)
    }
}

/// `lists/picked_2.csv` → `lists/picked_2`; a name without extension gets `_files`.
pub fn copy_folder_for(list_path: &Path) -> PathBuf {
    let file_name = list_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let folder_name = match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => format!("{}_files", file_name),
    };
    list_path.with_file_name(folder_name)
}

pub fn copy_files(paths: &[String], folder: &Path) -> Result<()> {
    if paths.is_empty() {
        return Err(PickupError::EmptyListError);
    }
    if folder.exists() {
        return Err(PickupError::OutputExistsError {
            path: folder.display().to_string(),
        });
    }
    fs::create_dir_all(folder)?;

    for path in paths {
        let source = Path::new(path);
        let name = source.file_name().ok_or_else(|| PickupError::MissingInputError {
            path: path.clone(),
        })?;
        fs::copy(source, folder.join(name))?;
    }

    tracing::info!("📁 Copied {} file(s) into {}", paths.len(), folder.display());
    Ok(())
}
