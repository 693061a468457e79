pub mod engine;
pub mod sampler;
pub mod size_index;

pub use crate::domain::model::{PickedList, PickupReport, PickupRequest, PickupStrategy, SizeTolerance};
pub use crate::domain::ports::{ListStore, VoxelCounter};
pub use crate::utils::error::Result;
