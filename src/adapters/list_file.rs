use crate::utils::error::{PickupError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// First column of every non-empty row of a header-less CSV file.
pub fn read_simple_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PickupError::MissingInputError {
            path: path.display().to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(first) = record.get(0) {
            let first = first.trim();
            if !first.is_empty() {
                entries.push(first.to_string());
            }
        }
    }
    Ok(entries)
}

/// Lesion list given on the command line: CSV, or whitespace-separated paths otherwise.
pub fn read_lesion_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PickupError::MissingInputError {
            path: path.display().to_string(),
        });
    }

    if path.to_string_lossy().ends_with(".csv") {
        return read_simple_list(path);
    }

    let content = fs::read_to_string(path)?;
    Ok(content.split_whitespace().map(str::to_string).collect())
}

/// Regular files directly inside `dir`, sorted.
pub fn list_directory<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(PickupError::MissingInputError {
            path: dir.display().to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn counter_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*)_(\d+)$").expect("counter regex is valid"))
}

/// 下一個候選檔名：`list.csv` → `list_1.csv` → `list_2.csv`
pub fn next_list_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (stem, ext) = match file_name.find('.') {
        Some(i) => (&file_name[..i], &file_name[i..]),
        None => (file_name.as_str(), ".csv"),
    };

    let next_stem = counter_suffix()
        .captures(stem)
        .and_then(|caps| {
            let counter = caps[2].parse::<u64>().ok()?.checked_add(1)?;
            Some(format!("{}_{}", &caps[1], counter))
        })
        .unwrap_or_else(|| format!("{}_1", stem));

    path.with_file_name(format!("{}{}", next_stem, ext))
}

/// First path derived from `path` that does not exist yet.
pub fn available_list_path(path: &Path) -> PathBuf {
    let mut candidate = path.to_path_buf();
    while candidate.exists() {
        candidate = next_list_path(&candidate);
    }
    candidate
}

/// Writes one path per row and returns the file actually written.
pub fn write_list(paths: &[String], target: &Path) -> Result<PathBuf> {
    let output = available_list_path(target);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // 含逗號的路徑加上引號，才能再以 read_simple_list 作為排除清單讀回
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&output)?;
    for path in paths {
        writer.write_record([path.as_str()])?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} path(s) to {}", paths.len(), output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_next_list_path_appends_counter() {
        let next = next_list_path(Path::new("/out/synth_lesions_list.csv"));
        assert_eq!(next, PathBuf::from("/out/synth_lesions_list_1.csv"));
        let next = next_list_path(&next);
        assert_eq!(next, PathBuf::from("/out/synth_lesions_list_2.csv"));
    }

    #[test]
    fn test_next_list_path_defaults_to_csv() {
        assert_eq!(next_list_path(Path::new("picked")), PathBuf::from("picked_1.csv"));
        assert_eq!(next_list_path(Path::new("picked_9")), PathBuf::from("picked_10.csv"));
    }

    #[test]
    fn test_next_list_path_keeps_compound_extension() {
        assert_eq!(
            next_list_path(Path::new("run_3.list.txt")),
            PathBuf::from("run_4.list.txt")
        );
    }

    #[test]
    fn test_write_list_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("synth.csv");
        let paths = vec!["/data/a.nii.gz".to_string(), "/data/b,c.nii.gz".to_string()];

        let first = write_list(&paths, &target).unwrap();
        let second = write_list(&paths, &target).unwrap();
        assert_eq!(first, target);
        assert_eq!(second, dir.path().join("synth_1.csv"));

        assert_eq!(read_simple_list(&first).unwrap(), paths);
    }

    #[test]
    fn test_write_list_quotes_only_when_needed() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            "/data/a.nii.gz".to_string(),
            "/data/b,c.nii.gz".to_string(),
            "/data/d e.nii.gz".to_string(),
        ];

        let written = write_list(&paths, &dir.path().join("synth.csv")).unwrap();
        let raw = fs::read_to_string(&written).unwrap();
        assert_eq!(raw, "/data/a.nii.gz\n\"/data/b,c.nii.gz\"\n/data/d e.nii.gz\n");

        let excluded: std::collections::HashSet<String> = read_simple_list(&written).unwrap().into_iter().collect();
        assert!(excluded.contains("/data/b,c.nii.gz"));
        assert_eq!(excluded.len(), 3);
    }

    #[test]
    fn test_read_lesion_list_text() {
        let dir = TempDir::new().unwrap();
        let list = dir.path().join("lesions.txt");
        fs::write(&list, "/a/l1.nii.gz /a/l2.nii.gz\n/a/l3.nii.gz\n").unwrap();
        assert_eq!(
            read_lesion_list(&list).unwrap(),
            vec!["/a/l1.nii.gz", "/a/l2.nii.gz", "/a/l3.nii.gz"]
        );
    }

    #[test]
    fn test_read_simple_list_takes_first_column() {
        let dir = TempDir::new().unwrap();
        let list = dir.path().join("exclude.csv");
        fs::write(&list, "/x/one.nii,extra\n\n/x/two.nii\n").unwrap();
        assert_eq!(read_simple_list(&list).unwrap(), vec!["/x/one.nii", "/x/two.nii"]);
    }

    #[test]
    fn test_missing_list_is_an_error() {
        assert!(matches!(
            read_lesion_list("/no/such/list.csv"),
            Err(PickupError::MissingInputError { .. })
        ));
        assert!(read_simple_list("/no/such/list.csv").is_err());
    }

    #[test]
    fn test_list_directory_only_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.nii"), b"").unwrap();
        fs::write(dir.path().join("a.nii"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = list_directory(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("a.nii"), dir.path().join("b.nii")]);
    }
}
