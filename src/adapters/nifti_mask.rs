//! Lesion size measurement from NIfTI-1 masks.
//!
//! Reads `.nii` and `.nii.gz` files (gzip is detected from the magic bytes,
//! not the extension) and counts the voxels holding a non-zero value.

use crate::domain::ports::VoxelCounter;
use crate::utils::error::{PickupError, Result};
use flate2::read::GzDecoder;
use nifti::volume::ndarray::IntoNdArray;
use nifti::{InMemNiftiObject, NiftiObject};
use std::io::{Cursor, Read};
use std::path::Path;

/// Check if bytes are gzip compressed
fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

/// Header fields worth printing when decoding fails
fn header_info(bytes: &[u8]) -> String {
    if bytes.len() < 348 {
        return format!("file too small ({} bytes, need at least 348)", bytes.len());
    }

    let sizeof_hdr = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let magic = String::from_utf8_lossy(&bytes[344..348]).to_string();
    let datatype = i16::from_le_bytes([bytes[70], bytes[71]]);

    format!("sizeof_hdr={}, magic='{}', datatype={}", sizeof_hdr, magic, datatype)
}

fn decode(bytes: &[u8]) -> std::result::Result<InMemNiftiObject, String> {
    if is_gzip(bytes) {
        InMemNiftiObject::from_reader(GzDecoder::new(Cursor::new(bytes))).map_err(|e| {
            let mut decompressed = Vec::new();
            let info = match GzDecoder::new(Cursor::new(bytes)).read_to_end(&mut decompressed) {
                Ok(_) => header_info(&decompressed),
                Err(_) => "could not decompress".to_string(),
            };
            format!("{} ({})", e, info)
        })
    } else {
        InMemNiftiObject::from_reader(Cursor::new(bytes))
            .map_err(|e| format!("{} ({})", e, header_info(bytes)))
    }
}

/// Number of non-zero voxels in a NIfTI image held in memory.
pub fn count_nonzero_voxels(bytes: &[u8]) -> std::result::Result<u64, String> {
    let obj = decode(bytes)?;
    let volume = obj
        .into_volume()
        .into_ndarray::<f64>()
        .map_err(|e| format!("failed to convert volume: {}", e))?;

    Ok(volume.iter().filter(|v| **v != 0.0).count() as u64)
}

pub fn count_lesion_voxels(path: &Path) -> Result<u64> {
    if !path.is_file() {
        return Err(PickupError::MissingInputError {
            path: path.display().to_string(),
        });
    }
    let bytes = std::fs::read(path)?;
    count_nonzero_voxels(&bytes).map_err(|message| PickupError::NiftiError {
        path: path.display().to_string(),
        message,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NiftiVoxelCounter;

impl VoxelCounter for NiftiVoxelCounter {
    fn count_voxels(&self, path: &Path) -> Result<u64> {
        count_lesion_voxels(path)
    }
}
