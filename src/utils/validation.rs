use crate::utils::error::{PickupError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PickupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PickupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 路徑必須指向已存在的檔案
pub fn validate_existing_file(field_name: &str, path: &Path) -> Result<()> {
    validate_path(field_name, &path.to_string_lossy())?;
    if !path.is_file() {
        return Err(PickupError::MissingInputError {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(PickupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PickupError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PickupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output", "./lists/out.csv").is_ok());
        assert!(validate_path("output", "").is_err());
        assert!(validate_path("output", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("number_per_lesion", 2, 1).is_ok());
        assert!(validate_positive_number("number_per_lesion", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("dimension", 3u8, 2, 4).is_ok());
        assert!(validate_range("dimension", 5u8, 2, 4).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("dict.json".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("synth_dict", &present).unwrap(), "dict.json");
        assert!(matches!(
            validate_required_field("synth_dict", &missing),
            Err(PickupError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(validate_existing_file("synth_dict", file.path()).is_ok());
        let dir = tempfile::TempDir::new().unwrap();
        assert!(validate_existing_file("synth_dict", dir.path()).is_err());
    }
}
