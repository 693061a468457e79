//! Common test utilities for pick up integration tests

use std::fs;
use std::path::{Path, PathBuf};

/// Minimal single-file NIfTI-1 image of `u8` voxels
pub fn nifti_bytes(dims: [i16; 3], voxels: &[u8]) -> Vec<u8> {
    let mut header = vec![0u8; 348];
    header[0..4].copy_from_slice(&348i32.to_le_bytes());

    let dim: [i16; 8] = [3, dims[0], dims[1], dims[2], 1, 1, 1, 1];
    for (i, d) in dim.iter().enumerate() {
        header[40 + i * 2..42 + i * 2].copy_from_slice(&d.to_le_bytes());
    }
    header[70..72].copy_from_slice(&2i16.to_le_bytes());
    header[72..74].copy_from_slice(&8i16.to_le_bytes());
    for i in 0..8 {
        header[76 + i * 4..80 + i * 4].copy_from_slice(&1.0f32.to_le_bytes());
    }
    header[108..112].copy_from_slice(&352.0f32.to_le_bytes());
    header[112..116].copy_from_slice(&1.0f32.to_le_bytes());
    header[344..348].copy_from_slice(b"n+1\0");

    let mut bytes = header;
    bytes.extend_from_slice(&[0u8; 4]);
    bytes.extend_from_slice(voxels);
    bytes
}

/// Writes a 4x4x4 lesion mask with `lesion_voxels` non-zero voxels
pub fn write_lesion(path: &Path, lesion_voxels: usize) {
    let mut voxels = vec![0u8; 64];
    for v in voxels.iter_mut().take(lesion_voxels) {
        *v = 1;
    }
    fs::write(path, nifti_bytes([4, 4, 4], &voxels)).unwrap();
}

/// Synthetic dataset: `count` files per size, all real files on disk.
pub fn write_synth_dataset(root: &Path, sizes: &[u64], count: usize) -> PathBuf {
    let synth_dir = root.join("synth");
    fs::create_dir_all(&synth_dir).unwrap();

    let mut dict = serde_json::Map::new();
    for size in sizes {
        let mut files = Vec::new();
        for i in 0..count {
            let path = synth_dir.join(format!("synth_{}_{}.nii.gz", size, i));
            fs::write(&path, format!("{}-{}", size, i)).unwrap();
            files.push(serde_json::Value::String(path.display().to_string()));
        }
        dict.insert(size.to_string(), serde_json::Value::Array(files));
    }

    let dict_path = root.join("synth_dict.json");
    fs::write(&dict_path, serde_json::to_string_pretty(&dict).unwrap()).unwrap();
    dict_path
}
