pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod segment;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, SegmentArgs};

pub use adapters::{nifti_mask::NiftiVoxelCounter, storage::LocalStorage};
pub use config::settings::{LesionSource, PickupSettings};
pub use core::{engine::PickupEngine, size_index::SizeIndex};
pub use segment::SegmentationJob;
pub use utils::error::{PickupError, Result};
