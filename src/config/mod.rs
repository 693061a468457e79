pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, SegmentArgs};

#[cfg(feature = "cli")]
mod cli {
    use crate::domain::model::PickupStrategy;
    use clap::{ArgGroup, Parser};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "pick-synth-lesions")]
    #[command(
        about = "Pick up synthetic lesion masks matched in size with a real lesion set"
    )]
    #[command(group(ArgGroup::new("lesions").required(true).args(["input_path", "input_list"])))]
    pub struct CliConfig {
        /// Root folder of the lesion dataset
        #[arg(short = 'p', long)]
        pub input_path: Option<PathBuf>,

        /// CSV or text file listing the lesion files
        #[arg(short = 'l', long)]
        pub input_list: Option<PathBuf>,

        /// JSON dictionary of synthetic lesions grouped by voxel count
        #[arg(short = 's', long)]
        pub synth_dict: Option<PathBuf>,

        /// Output list path, or a folder (the list is then synth_lesions_list.csv)
        #[arg(short = 'o', long)]
        pub output: Option<PathBuf>,

        /// Copy the picked synthetic lesions into a folder named after each list
        #[arg(long)]
        pub copy_synth_files: bool,

        /// Synthetic lesion pick up strategy
        #[arg(long, value_enum)]
        pub pickup_strat: Option<PickupStrategy>,

        /// Size difference accepted as a match, e.g. 0.1 (or 10) means +-10%
        #[arg(long)]
        pub size_range: Option<f64>,

        /// Number of lists to generate, without overlap between them
        #[arg(short = 'm', long)]
        pub multiple_lists: Option<usize>,

        /// Number of matched synthetic lesions per real lesion
        #[arg(short = 'n', long)]
        pub number_per_lesion: Option<usize>,

        /// List files whose paths must not be picked up
        #[arg(short = 'x', long, num_args = 1..)]
        pub exclude_lists: Vec<PathBuf>,

        /// Seed for reproducible random pick up
        #[arg(long)]
        pub seed: Option<u64>,

        /// TOML configuration file
        #[arg(short = 'c', long)]
        pub config: Option<PathBuf>,

        /// Show what would be picked without writing anything
        #[arg(long)]
        pub dry_run: bool,

        /// Log as JSON lines
        #[arg(long)]
        pub json_logs: bool,

        /// Enable verbose output
        #[arg(short, long)]
        pub verbose: bool,
    }

    #[derive(Debug, Clone, Parser)]
    #[command(name = "bcbseg")]
    #[command(about = "Tissue segmentation with ANTs antsAtroposN4.sh")]
    pub struct SegmentArgs {
        /// Image dimension (2, 3 or 4)
        pub dimension: u8,

        /// Anatomical image (.nii or .nii.gz)
        pub anatomical: PathBuf,

        /// Brain extraction mask
        #[arg(short = 'x', long)]
        pub mask: PathBuf,

        /// Number of tissue classes
        #[arg(short, long, default_value = "3")]
        pub classes: u32,

        /// Output prefix
        #[arg(short, long, default_value = "bcbseg_")]
        pub output_prefix: String,

        /// Prior probability images, e.g. priors/prior%d.nii.gz
        #[arg(short, long)]
        pub priors: Option<String>,

        /// Segmentation script to invoke
        #[arg(long, env = "ANTS_ATROPOS_SCRIPT", default_value = "antsAtroposN4.sh")]
        pub ants_script: String,

        /// Print the command without running it
        #[arg(long)]
        pub dry_run: bool,

        /// Enable verbose output
        #[arg(short, long)]
        pub verbose: bool,
    }
}
