use crate::utils::error::{PickupError, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Relative half-width of the size band a synthetic lesion must fall into.
///
/// Values of 1 or more are read as percentages, so `10` and `0.1` both mean
/// ±10 % of the target size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeTolerance(f64);

impl SizeTolerance {
    pub const DEFAULT: f64 = 0.1;

    pub fn new(raw: f64) -> Result<Self> {
        if !raw.is_finite() || raw < 0.0 {
            return Err(PickupError::InvalidConfigValueError {
                field: "size_range".to_string(),
                value: raw.to_string(),
                reason: "Size range must be a non-negative number".to_string(),
            });
        }
        let fraction = if raw >= 1.0 { raw / 100.0 } else { raw };
        Ok(Self(fraction))
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    /// 目標大小允許的體素差
    pub fn half_width(&self, size: u64) -> f64 {
        self.0 * size as f64
    }

    pub fn bounds(&self, size: u64) -> (f64, f64) {
        let half = self.half_width(size);
        (size as f64 - half, size as f64 + half)
    }

    pub fn contains(&self, size: u64, key: u64) -> bool {
        let (low, high) = self.bounds(size);
        let key = key as f64;
        low <= key && key <= high
    }
}

impl Default for SizeTolerance {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PickupStrategy {
    /// Uniform sample without replacement
    #[default]
    Random,
    /// The first candidates in ascending size order
    First,
}

impl std::fmt::Display for PickupStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickupStrategy::Random => write!(f, "random"),
            PickupStrategy::First => write!(f, "first"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PickupRequest {
    pub sizes: Vec<u64>,
    pub number_per_lesion: usize,
    pub tolerance: SizeTolerance,
    pub strategy: PickupStrategy,
    pub list_count: usize,
    pub seed: Option<u64>,
}

impl PickupRequest {
    pub fn new(sizes: Vec<u64>) -> Self {
        Self {
            sizes,
            number_per_lesion: 1,
            tolerance: SizeTolerance::default(),
            strategy: PickupStrategy::default(),
            list_count: 1,
            seed: None,
        }
    }
}

/// One non-overlapping list of picked synthetic lesions.
#[derive(Debug, Clone)]
pub struct PickedList {
    pub files: Vec<String>,
    pub saved_to: Option<PathBuf>,
    pub copied_to: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct PickupReport {
    pub lesion_sizes: Vec<u64>,
    pub lists: Vec<PickedList>,
}

impl PickupReport {
    pub fn total_picked(&self) -> usize {
        self.lists.iter().map(|l| l.files.len()).sum()
    }
}
