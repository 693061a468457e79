//! Tissue segmentation through ANTs' `antsAtroposN4.sh`.

use crate::utils::error::{PickupError, Result};
use crate::utils::validation;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

pub const DEFAULT_ANTS_SCRIPT: &str = "antsAtroposN4.sh";

#[derive(Debug, Clone)]
pub struct SegmentationJob {
    pub dimension: u8,
    pub anatomical: PathBuf,
    pub mask: PathBuf,
    pub classes: u32,
    pub output_prefix: String,
    pub priors: Option<String>,
    pub program: String,
}

impl SegmentationJob {
    pub fn new(dimension: u8, anatomical: PathBuf, mask: PathBuf) -> Self {
        Self {
            dimension,
            anatomical,
            mask,
            classes: 3,
            output_prefix: "bcbseg_".to_string(),
            priors: None,
            program: DEFAULT_ANTS_SCRIPT.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_range("dimension", self.dimension, 2, 4)?;
        validation::validate_positive_number("classes", self.classes as usize, 1)?;
        validation::validate_existing_file("anatomical", &self.anatomical)?;
        validation::validate_existing_file("mask", &self.mask)?;
        validation::validate_path("output_prefix", &self.output_prefix)?;
        Ok(())
    }

    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-d".into(),
            self.dimension.to_string().into(),
            "-a".into(),
            self.anatomical.clone().into(),
            "-x".into(),
            self.mask.clone().into(),
            "-c".into(),
            self.classes.to_string().into(),
            "-o".into(),
            self.output_prefix.clone().into(),
        ];
        if let Some(priors) = &self.priors {
            args.push("-p".into());
            args.push(priors.into());
        }
        args
    }

    /// Shell-like rendering, for logs and dry runs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args().iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Validated command line, without starting the tool.
    pub fn dry_run(&self) -> Result<String> {
        self.validate()?;
        Ok(self.command_line())
    }

    pub fn run(&self) -> Result<()> {
        self.validate()?;
        tracing::info!("Running {}", self.command_line());

        let status = Command::new(&self.program)
            .args(self.args())
            .status()
            .map_err(|e| PickupError::ExternalToolError {
                tool: self.program.clone(),
                message: format!("could not be started: {}", e),
            })?;

        if !status.success() {
            return Err(PickupError::ExternalToolError {
                tool: self.program.clone(),
                message: format!("exited with {}", status),
            });
        }
        tracing::info!("✅ Segmentation written with prefix {}", self.output_prefix);
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl From<crate::config::SegmentArgs> for SegmentationJob {
    fn from(args: crate::config::SegmentArgs) -> Self {
        Self {
            dimension: args.dimension,
            anatomical: args.anatomical,
            mask: args.mask,
            classes: args.classes,
            output_prefix: args.output_prefix,
            priors: args.priors,
            program: args.ants_script,
        }
    }
}
