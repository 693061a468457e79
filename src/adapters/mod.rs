// Adapters layer: concrete implementations for the file system (list files, copies, NIfTI masks).

pub mod list_file;
pub mod nifti_mask;
pub mod storage;
