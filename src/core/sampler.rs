use crate::core::size_index::SizeIndex;
use crate::domain::model::{PickupRequest, PickupStrategy, SizeTolerance};
use crate::utils::error::{PickupError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Picks `number` synthetic lesions matching `size`, never returning a path in `excluded`.
pub fn pick_for_size<R: Rng + ?Sized>(
    index: &SizeIndex,
    size: u64,
    number: usize,
    tolerance: SizeTolerance,
    strategy: PickupStrategy,
    excluded: &HashSet<String>,
    rng: &mut R,
) -> Result<Vec<String>> {
    let mut candidates = index.candidates(size, tolerance, excluded);
    if number > candidates.len() {
        return Err(PickupError::NotEnoughCandidatesError {
            requested: number,
            size,
            tolerance_voxels: tolerance.half_width(size),
            available: candidates.len(),
        });
    }

    let picked = match strategy {
        PickupStrategy::Random => rand::seq::index::sample(rng, candidates.len(), number)
            .into_iter()
            .map(|i| candidates[i].clone())
            .collect(),
        PickupStrategy::First => {
            candidates.truncate(number);
            candidates
        }
    };
    Ok(picked)
}

/// Builds one list: `number` matches per size, no path picked twice.
pub fn pick_list<R: Rng + ?Sized>(
    index: &SizeIndex,
    sizes: &[u64],
    number: usize,
    tolerance: SizeTolerance,
    strategy: PickupStrategy,
    rng: &mut R,
) -> Result<Vec<String>> {
    let mut picked = Vec::new();
    let mut taken = HashSet::new();

    for &size in sizes {
        let matches = pick_for_size(index, size, number, tolerance, strategy, &taken, rng)?;
        tracing::debug!("Size {}: picked {} file(s)", size, matches.len());
        taken.extend(matches.iter().cloned());
        picked.extend(matches);
    }

    Ok(picked)
}

/// Builds `request.list_count` lists that share no path with each other or with `excluded`.
pub fn pick_lists(
    index: &SizeIndex,
    request: &PickupRequest,
    excluded: &HashSet<String>,
) -> Result<Vec<Vec<String>>> {
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut remaining = if excluded.is_empty() {
        index.clone()
    } else {
        let filtered = index.without(excluded);
        tracing::info!(
            "Excluded {} file(s); {} candidate(s) left",
            index.file_count() - filtered.file_count(),
            filtered.file_count()
        );
        filtered
    };

    let mut lists = Vec::new();
    for i in 0..request.list_count {
        let list = pick_list(
            &remaining,
            &request.sizes,
            request.number_per_lesion,
            request.tolerance,
            request.strategy,
            &mut rng,
        )?;
        tracing::debug!("List {} holds {} file(s)", i + 1, list.len());

        // 後續清單不可重複使用已選取的檔案
        let used: HashSet<String> = list.iter().cloned().collect();
        remaining = remaining.without(&used);
        lists.push(list);
    }

    Ok(lists)
}
