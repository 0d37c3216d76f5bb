use thiserror::Error;

use crate::config::{ConventionKind, Settings};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct SettingsValidator;

impl SettingsValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<SettingsError>> {
        let mut errors = Vec::new();

        if settings.log.level().is_err() {
            errors.push(SettingsError::InvalidValue {
                field: "log.level".to_string(),
                reason: format!(
                    "'{}' is not one of trace, debug, info, warn, error",
                    settings.log.level
                ),
            });
        }

        // The key only matters when fields are nested under it
        if settings.props.convention == ConventionKind::Nested {
            let key = settings.props.data_key.trim();
            if key.is_empty() {
                errors.push(SettingsError::MissingField("props.data_key".to_string()));
            } else if key != settings.props.data_key {
                errors.push(SettingsError::InvalidValue {
                    field: "props.data_key".to_string(),
                    reason: "Key must not have surrounding whitespace".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogSettings, PropsSettings};

    #[test]
    fn test_valid_config() {
        let settings = Settings::default();
        assert!(SettingsValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let settings = Settings {
            log: LogSettings {
                level: "loud".to_string(),
            },
            props: PropsSettings::default(),
        };

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], SettingsError::InvalidValue { field, .. } if field == "log.level"));
    }

    #[test]
    fn test_empty_data_key() {
        let settings = Settings {
            log: LogSettings::default(),
            props: PropsSettings {
                convention: ConventionKind::Nested,
                data_key: "  ".to_string(),
            },
        };

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, SettingsError::MissingField(_))));
    }

    #[test]
    fn test_data_key_ignored_when_flat() {
        let settings = Settings {
            log: LogSettings::default(),
            props: PropsSettings {
                convention: ConventionKind::Flat,
                data_key: String::new(),
            },
        };

        assert!(SettingsValidator::validate(&settings).is_ok());
    }
}
