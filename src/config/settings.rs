#[cfg(feature = "cli")]
use crate::config::toml_config::PickupFileConfig;
use crate::domain::model::{PickupStrategy, SizeTolerance};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};

pub const DEFAULT_LIST_FILENAME: &str = "synth_lesions_list.csv";

/// Where the real lesion masks come from.
#[derive(Debug, Clone, PartialEq)]
pub enum LesionSource {
    Directory(PathBuf),
    ListFile(PathBuf),
}

/// Fully resolved settings of a pickup run.
#[derive(Debug, Clone)]
pub struct PickupSettings {
    pub lesions: LesionSource,
    pub synth_dict: PathBuf,
    pub output: PathBuf,
    pub copy_synth_files: bool,
    pub strategy: PickupStrategy,
    pub size_range: f64,
    pub number_per_lesion: usize,
    pub list_count: usize,
    pub exclude_lists: Vec<PathBuf>,
    pub seed: Option<u64>,
    pub dry_run: bool,
}

impl PickupSettings {
    pub fn new(lesions: LesionSource, synth_dict: PathBuf, output: PathBuf) -> Self {
        Self {
            lesions,
            synth_dict,
            output,
            copy_synth_files: false,
            strategy: PickupStrategy::default(),
            size_range: SizeTolerance::DEFAULT,
            number_per_lesion: 1,
            list_count: 1,
            exclude_lists: Vec::new(),
            seed: None,
            dry_run: false,
        }
    }

    /// 命令列參數優先於設定檔，設定檔優先於預設值
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &crate::config::CliConfig, file: Option<&PickupFileConfig>) -> Result<Self> {
        let file = file.cloned().unwrap_or_default();

        let lesions = match (&cli.input_path, &cli.input_list) {
            (Some(dir), _) => LesionSource::Directory(dir.clone()),
            (None, Some(list)) => LesionSource::ListFile(list.clone()),
            (None, None) => {
                return Err(crate::utils::error::PickupError::MissingConfigError {
                    field: "input_path or input_list".to_string(),
                })
            }
        };

        let synth_dict = cli.synth_dict.clone().or(file.dataset.synth_dict);
        let synth_dict = validation::validate_required_field("synth_dict", &synth_dict)?.clone();
        let output = cli.output.clone().or(file.dataset.output);
        let output = validation::validate_required_field("output", &output)?.clone();

        let mut exclude_lists = file.exclude.lists;
        exclude_lists.extend(cli.exclude_lists.iter().cloned());

        Ok(Self {
            lesions,
            synth_dict,
            output,
            copy_synth_files: cli.copy_synth_files || file.pickup.copy_synth_files.unwrap_or(false),
            strategy: cli.pickup_strat.or(file.pickup.strategy).unwrap_or_default(),
            size_range: cli
                .size_range
                .or(file.pickup.size_range)
                .unwrap_or(SizeTolerance::DEFAULT),
            number_per_lesion: cli.number_per_lesion.or(file.pickup.number_per_lesion).unwrap_or(1),
            list_count: cli.multiple_lists.or(file.pickup.multiple_lists).unwrap_or(1),
            exclude_lists,
            seed: cli.seed.or(file.pickup.seed),
            dry_run: cli.dry_run,
        })
    }

    pub fn tolerance(&self) -> Result<SizeTolerance> {
        SizeTolerance::new(self.size_range)
    }

    /// `--output` may name a folder, in which case the default list name is used.
    pub fn list_target(&self) -> PathBuf {
        resolve_list_target(&self.output)
    }
}

impl Validate for PickupSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_existing_file("synth_dict", &self.synth_dict)?;
        validation::validate_path("output", &self.output.to_string_lossy())?;
        validation::validate_positive_number("number_per_lesion", self.number_per_lesion, 1)?;
        validation::validate_positive_number("multiple_lists", self.list_count, 1)?;
        self.tolerance()?;

        match &self.lesions {
            LesionSource::Directory(dir) => {
                if !dir.is_dir() {
                    return Err(crate::utils::error::PickupError::MissingInputError {
                        path: dir.display().to_string(),
                    });
                }
            }
            LesionSource::ListFile(list) => validation::validate_existing_file("input_list", list)?,
        }

        for list in &self.exclude_lists {
            validation::validate_existing_file("exclude_lists", list)?;
        }
        Ok(())
    }
}

pub fn resolve_list_target(output: &Path) -> PathBuf {
    if output.is_dir() {
        output.join(DEFAULT_LIST_FILENAME)
    } else {
        output.to_path_buf()
    }
}
