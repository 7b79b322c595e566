// src/config/validate.rs

use std::path::PathBuf;

use tracing::warn;

use crate::config::model::{
    Condition, ConditionConfig, RawConditionConfig, DEFAULT_POLL_INTERVAL_SECONDS,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::errors::{Result, WaitgateError};
use crate::types::ConditionType;

impl TryFrom<RawConditionConfig> for ConditionConfig {
    type Error = crate::errors::WaitgateError;

    fn try_from(raw: RawConditionConfig) -> std::result::Result<Self, Self::Error> {
        let condition = validate_condition(&raw)?;
        let timeout_seconds = positive(
            "timeout_seconds",
            raw.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )?;
        let poll_interval_seconds = positive(
            "poll_interval_seconds",
            raw.poll_interval_seconds
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECONDS),
        )?;

        Ok(ConditionConfig::new_unchecked(
            condition,
            timeout_seconds,
            poll_interval_seconds,
        ))
    }
}

fn validate_condition(raw: &RawConditionConfig) -> Result<Condition> {
    let type_str = raw.condition_type.as_deref().ok_or_else(|| {
        WaitgateError::ConfigError("condition_type is required".to_string())
    })?;

    let condition_type: ConditionType =
        type_str.parse().map_err(WaitgateError::ConfigError)?;

    let condition = match condition_type {
        ConditionType::File => {
            Condition::File(PathBuf::from(required("file_path", &raw.file_path, condition_type)?))
        }
        ConditionType::Artifact => Condition::Artifact(
            required("artifact_name", &raw.artifact_name, condition_type)?.to_string(),
        ),
        // The pattern is kept raw; a bad regex shows up per tick instead.
        ConditionType::Job => {
            Condition::Job(required("job_name", &raw.job_name, condition_type)?.to_string())
        }
    };

    for field in unrelated_fields(raw, condition_type) {
        warn!(field, %condition_type, "ignoring field that does not apply to this condition type");
    }

    Ok(condition)
}

/// Condition fields that are set but belong to another condition type.
fn unrelated_fields(raw: &RawConditionConfig, condition_type: ConditionType) -> Vec<&'static str> {
    [
        ("file_path", ConditionType::File, &raw.file_path),
        ("artifact_name", ConditionType::Artifact, &raw.artifact_name),
        ("job_name", ConditionType::Job, &raw.job_name),
    ]
    .into_iter()
    .filter(|(_, owner, value)| *owner != condition_type && value.is_some())
    .map(|(field, _, _)| field)
    .collect()
}

fn required<'a>(
    field: &str,
    value: &'a Option<String>,
    condition_type: ConditionType,
) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(WaitgateError::ConfigError(format!(
            "{field} is required when condition_type is \"{condition_type}\""
        ))),
    }
}

fn positive(field: &str, value: u64) -> Result<u64> {
    if value == 0 {
        return Err(WaitgateError::ConfigError(format!(
            "{field} must be >= 1 (got 0)"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(condition_type: &str) -> RawConditionConfig {
        RawConditionConfig {
            condition_type: Some(condition_type.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn file_condition_requires_path() {
        let err = ConditionConfig::try_from(raw("file")).unwrap_err();
        match err {
            WaitgateError::ConfigError(msg) => assert!(msg.contains("file_path")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn blank_artifact_name_is_rejected() {
        let mut cfg = raw("artifact");
        cfg.artifact_name = Some("   ".to_string());
        assert!(ConditionConfig::try_from(cfg).is_err());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = ConditionConfig::try_from(raw("deployment")).unwrap_err();
        assert!(err.to_string().contains("invalid condition type"));
    }

    #[test]
    fn missing_type_is_rejected() {
        let err = ConditionConfig::try_from(RawConditionConfig::default()).unwrap_err();
        assert!(err.to_string().contains("condition_type is required"));
    }

    #[test]
    fn defaults_apply_for_timing() {
        let mut cfg = raw("job");
        cfg.job_name = Some("test".to_string());
        let cfg = ConditionConfig::try_from(cfg).unwrap();
        assert_eq!(cfg.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(cfg.poll_interval_seconds(), DEFAULT_POLL_INTERVAL_SECONDS);
        assert_eq!(cfg.condition(), &Condition::Job("test".to_string()));
    }

    #[test]
    fn zero_timing_values_are_rejected() {
        let mut cfg = raw("artifact");
        cfg.artifact_name = Some("report".to_string());
        cfg.poll_interval_seconds = Some(0);
        let err = ConditionConfig::try_from(cfg).unwrap_err();
        assert!(err.to_string().contains("poll_interval_seconds"));
    }

    #[test]
    fn malformed_job_regex_passes_validation() {
        let mut cfg = raw("job");
        cfg.job_name = Some("/build-(/".to_string());
        assert!(ConditionConfig::try_from(cfg).is_ok());
    }

    #[test]
    fn unrelated_fields_are_ignored() {
        let mut cfg = raw("artifact");
        cfg.artifact_name = Some("report".to_string());
        cfg.file_path = Some("ignored.txt".to_string());
        let cfg = ConditionConfig::try_from(cfg).unwrap();
        assert_eq!(cfg.condition(), &Condition::Artifact("report".to_string()));
        assert_eq!(cfg.file_path(), None);
    }

    #[test]
    fn unrelated_fields_are_reported() {
        let mut cfg = raw("job");
        cfg.job_name = Some("test".to_string());
        cfg.file_path = Some("out.txt".to_string());
        cfg.artifact_name = Some("report".to_string());
        assert_eq!(
            unrelated_fields(&cfg, ConditionType::Job),
            vec!["file_path", "artifact_name"]
        );
        assert!(unrelated_fields(&cfg, ConditionType::File).contains(&"job_name"));
        cfg.file_path = None;
        cfg.artifact_name = None;
        assert!(unrelated_fields(&cfg, ConditionType::Job).is_empty());
    }
}
