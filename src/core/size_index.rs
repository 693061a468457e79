use crate::domain::model::SizeTolerance;
use crate::utils::error::{PickupError, Result};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Synthetic lesion files grouped by voxel count.
///
/// Buckets iterate in ascending size; files inside a bucket keep the order of
/// the dictionary they were loaded from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeIndex {
    buckets: BTreeMap<u64, Vec<String>>,
}

impl SizeIndex {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PickupError::MissingInputError {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let index = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded {} size buckets ({} files) from {}",
            index.len(),
            index.file_count(),
            path.display()
        );
        Ok(index)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(content)?;
        let mut buckets: BTreeMap<u64, Vec<String>> = BTreeMap::new();
        for (key, files) in raw {
            let size = key
                .trim()
                .parse::<u64>()
                .map_err(|_| PickupError::InvalidSizeKeyError { key: key.clone() })?;

            // "100" 與 "0100" 屬於同一分組
            let bucket = buckets.entry(size).or_default();
            for file in files {
                if !bucket.contains(&file) {
                    bucket.push(file);
                }
            }
        }
        Ok(Self { buckets })
    }

    pub fn from_buckets<I>(buckets: I) -> Self
    where
        I: IntoIterator<Item = (u64, Vec<String>)>,
    {
        Self {
            buckets: buckets.into_iter().collect(),
        }
    }

    /// 移除排除清單中的檔案，清空的分組一併刪除
    pub fn without(&self, excluded: &HashSet<String>) -> Self {
        let buckets = self
            .buckets
            .iter()
            .filter_map(|(size, files)| {
                let kept: Vec<String> = files
                    .iter()
                    .filter(|f| !excluded.contains(*f))
                    .cloned()
                    .collect();
                (!kept.is_empty()).then_some((*size, kept))
            })
            .collect();
        Self { buckets }
    }

    /// Every file whose bucket falls within `tolerance` of `size`, minus `excluded`.
    pub fn candidates(
        &self,
        size: u64,
        tolerance: SizeTolerance,
        excluded: &HashSet<String>,
    ) -> Vec<String> {
        let (low, high) = tolerance.bounds(size);
        let low = low.max(0.0).ceil() as u64;
        if high < 0.0 {
            return Vec::new();
        }
        let high = high.floor() as u64;
        if low > high {
            return Vec::new();
        }

        self.buckets
            .range(low..=high)
            .filter(|(key, _)| tolerance.contains(size, **key))
            .flat_map(|(_, files)| files.iter())
            .filter(|f| !excluded.contains(*f))
            .cloned()
            .collect()
    }

    pub fn bucket(&self, size: u64) -> Option<&[String]> {
        self.buckets.get(&size).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}
