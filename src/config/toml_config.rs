use crate::domain::model::PickupStrategy;
use crate::utils::error::{PickupError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional TOML file holding the defaults of a pickup run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PickupFileConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub pickup: PickupConfig,
    #[serde(default)]
    pub exclude: ExcludeConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetConfig {
    pub synth_dict: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PickupConfig {
    pub strategy: Option<PickupStrategy>,
    pub size_range: Option<f64>,
    pub number_per_lesion: Option<usize>,
    pub multiple_lists: Option<usize>,
    pub seed: Option<u64>,
    pub copy_synth_files: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeConfig {
    #[serde(default)]
    pub lists: Vec<PathBuf>,
}

impl PickupFileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PickupError::MissingInputError {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PickupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_ROOT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PickupError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for PickupFileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(n) = self.pickup.number_per_lesion {
            crate::utils::validation::validate_positive_number("pickup.number_per_lesion", n, 1)?;
        }
        if let Some(n) = self.pickup.multiple_lists {
            crate::utils::validation::validate_positive_number("pickup.multiple_lists", n, 1)?;
        }
        if let Some(range) = self.pickup.size_range {
            crate::domain::model::SizeTolerance::new(range)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let config = PickupFileConfig::from_toml_str(
            r#"
[dataset]
synth_dict = "/data/synth/size_dict.json"
output = "/data/lists"

[pickup]
strategy = "first"
size_range = 5
number_per_lesion = 2
multiple_lists = 3
seed = 11
copy_synth_files = true

[exclude]
lists = ["/data/lists/previous.csv"]
"#,
        )
        .unwrap();

        assert_eq!(config.dataset.synth_dict, Some(PathBuf::from("/data/synth/size_dict.json")));
        assert_eq!(config.pickup.strategy, Some(PickupStrategy::First));
        assert_eq!(config.pickup.size_range, Some(5.0));
        assert_eq!(config.pickup.multiple_lists, Some(3));
        assert_eq!(config.exclude.lists.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = PickupFileConfig::from_toml_str("").unwrap();
        assert!(config.dataset.synth_dict.is_none());
        assert!(config.exclude.lists.is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BCB_TEST_SYNTH_ROOT", "/mnt/synth");
        let config = PickupFileConfig::from_toml_str(
            r#"
[dataset]
synth_dict = "${BCB_TEST_SYNTH_ROOT}/dict.json"
"#,
        )
        .unwrap();
        assert_eq!(config.dataset.synth_dict, Some(PathBuf::from("/mnt/synth/dict.json")));
        std::env::remove_var("BCB_TEST_SYNTH_ROOT");
    }

    #[test]
    fn test_invalid_values() {
        let config = PickupFileConfig::from_toml_str("[pickup]\nmultiple_lists = 0\n").unwrap();
        assert!(config.validate().is_err());
        assert!(PickupFileConfig::from_toml_str("[pickup]\nstrategy = \"best\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[pickup]\nseed = 3\n").unwrap();
        let config = PickupFileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pickup.seed, Some(3));
    }
}
