use crate::adapters::list_file;
use crate::config::settings::{LesionSource, PickupSettings};
use crate::core::sampler;
use crate::core::size_index::SizeIndex;
use crate::domain::model::{PickedList, PickupReport, PickupRequest};
use crate::domain::ports::{ListStore, VoxelCounter};
use crate::utils::error::Result;
use std::collections::HashSet;
use std::path::PathBuf;

pub struct PickupEngine<V: VoxelCounter, S: ListStore> {
    counter: V,
    storage: S,
    settings: PickupSettings,
}

impl<V: VoxelCounter, S: ListStore> PickupEngine<V, S> {
    pub fn new(counter: V, storage: S, settings: PickupSettings) -> Self {
        Self {
            counter,
            storage,
            settings,
        }
    }

    pub fn run(&self) -> Result<PickupReport> {
        tracing::info!("Starting synthetic lesion pick up...");

        // Measure
        let lesions = self.lesion_files()?;
        tracing::info!("Measuring {} lesion(s)...", lesions.len());
        let sizes = self.measure(&lesions)?;

        // Select
        let lists = self.select(sizes.clone())?;
        tracing::info!("Picked {} list(s)", lists.len());

        // Save
        let lists = self.save(lists)?;
        let report = PickupReport {
            lesion_sizes: sizes,
            lists,
        };
        tracing::info!("Picked {} synthetic lesion(s) in total", report.total_picked());

        Ok(report)
    }

    pub fn lesion_files(&self) -> Result<Vec<PathBuf>> {
        match &self.settings.lesions {
            LesionSource::Directory(dir) => list_file::list_directory(dir),
            LesionSource::ListFile(list) => Ok(list_file::read_lesion_list(list)?
                .into_iter()
                .map(PathBuf::from)
                .collect()),
        }
    }

    pub fn measure(&self, lesions: &[PathBuf]) -> Result<Vec<u64>> {
        let mut sizes = Vec::with_capacity(lesions.len());
        for lesion in lesions {
            let size = self.counter.count_voxels(lesion)?;
            tracing::debug!("{}: {} voxels", lesion.display(), size);
            sizes.push(size);
        }
        Ok(sizes)
    }

    pub fn select(&self, sizes: Vec<u64>) -> Result<Vec<Vec<String>>> {
        let index = SizeIndex::from_file(&self.settings.synth_dict)?;
        let excluded = self.excluded_paths()?;

        let request = PickupRequest {
            sizes,
            number_per_lesion: self.settings.number_per_lesion,
            tolerance: self.settings.tolerance()?,
            strategy: self.settings.strategy,
            list_count: self.settings.list_count,
            seed: self.settings.seed,
        };
        tracing::debug!(
            "Pick up request: {} size(s), {} per lesion, ±{:.1}%, strategy {}, {} list(s)",
            request.sizes.len(),
            request.number_per_lesion,
            request.tolerance.fraction() * 100.0,
            request.strategy,
            request.list_count
        );

        sampler::pick_lists(&index, &request, &excluded)
    }

    /// 所有排除清單合併後的路徑集合
    pub fn excluded_paths(&self) -> Result<HashSet<String>> {
        let mut excluded = HashSet::new();
        for list in &self.settings.exclude_lists {
            let paths = list_file::read_simple_list(list)?;
            tracing::debug!("Excluding {} path(s) from {}", paths.len(), list.display());
            excluded.extend(paths);
        }
        Ok(excluded)
    }

    pub fn save(&self, lists: Vec<Vec<String>>) -> Result<Vec<PickedList>> {
        if self.settings.dry_run {
            tracing::info!("🔍 DRY RUN MODE - lists are not written");
            return Ok(lists
                .into_iter()
                .map(|files| PickedList {
                    files,
                    saved_to: None,
                    copied_to: None,
                })
                .collect());
        }

        let target = self.settings.list_target();
        let mut saved = Vec::with_capacity(lists.len());
        for files in lists {
            let list_path = self.storage.save_list(&files, &target)?;
            tracing::info!("📁 List of {} file(s) saved to: {}", files.len(), list_path.display());

            let copied_to = if self.settings.copy_synth_files {
                Some(self.storage.copy_list_files(&files, &list_path)?)
            } else {
                None
            };

            saved.push(PickedList {
                files,
                saved_to: Some(list_path),
                copied_to,
            });
        }
        Ok(saved)
    }
}
