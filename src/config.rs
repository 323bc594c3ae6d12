use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::grouping::{DepartmentGrouping, GroupingStrategy, SemesterGrouping};
use crate::pipeline::analyze::AnalysisSettings;
use crate::scoring::coherence::CoherenceSettings;

/// Which peer-grouping heuristic to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GroupingKind {
    /// First word of the lesson name (default)
    Department,
    /// "semester N" / "term N" markers, department otherwise
    Semester,
}

impl GroupingKind {
    pub fn strategy(self) -> Result<Box<dyn GroupingStrategy>> {
        Ok(match self {
            GroupingKind::Department => Box::new(DepartmentGrouping::default()),
            GroupingKind::Semester => Box::new(SemesterGrouping::new()?),
        })
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override these values per run.
pub struct Config {
    pub anomaly_threshold: f64,
    pub group_score_floor: f64,
    pub diagnostic_min_members: usize,
    pub diagnostic_top_k: usize,
    pub keyword_count: usize,
    pub grouping: GroupingKind,
    /// Base URL of the extraction service (used when no input file is given)
    pub source_url: Option<String>,
    pub report_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn load() -> Result<Self> {
        let defaults = CoherenceSettings::default();

        let grouping = match env::var("SKILLAUDIT_GROUPING").as_deref() {
            Ok("semester") => GroupingKind::Semester,
            Ok("department") | Err(_) => GroupingKind::Department,
            Ok(other) => anyhow::bail!(
                "SKILLAUDIT_GROUPING must be 'department' or 'semester', got '{other}'"
            ),
        };

        Ok(Self {
            anomaly_threshold: validate_threshold(
                "SKILLAUDIT_ANOMALY_THRESHOLD",
                parse_var("SKILLAUDIT_ANOMALY_THRESHOLD", defaults.anomaly_threshold)?,
            )?,
            group_score_floor: validate_floor(
                "SKILLAUDIT_GROUP_SCORE_FLOOR",
                parse_var("SKILLAUDIT_GROUP_SCORE_FLOOR", defaults.group_score_floor)?,
            )?,
            diagnostic_min_members: parse_var(
                "SKILLAUDIT_DIAGNOSTIC_MIN_MEMBERS",
                defaults.diagnostic_min_members,
            )?,
            diagnostic_top_k: parse_var("SKILLAUDIT_DIAGNOSTIC_TOP_K", defaults.diagnostic_top_k)?,
            keyword_count: parse_var("SKILLAUDIT_KEYWORD_COUNT", 5)?,
            grouping,
            source_url: env::var("SKILLAUDIT_SOURCE_URL").ok().filter(|s| !s.is_empty()),
            report_path: env::var("SKILLAUDIT_REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output/skillaudit-report.md")),
        })
    }

    /// Analysis settings derived from this configuration.
    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            coherence: CoherenceSettings {
                anomaly_threshold: self.anomaly_threshold,
                group_score_floor: self.group_score_floor,
                diagnostic_min_members: self.diagnostic_min_members,
                diagnostic_top_k: self.diagnostic_top_k,
            },
            keyword_count: self.keyword_count,
        }
    }

    /// Check that an extraction service URL is configured.
    /// Call this before fetching without an input file.
    pub fn require_source_url(&self) -> Result<&str> {
        match self.source_url.as_deref() {
            Some(url) => Ok(url),
            None => anyhow::bail!(
                "No input given. Pass --input <FILE> or set SKILLAUDIT_SOURCE_URL in your .env file."
            ),
        }
    }
}

/// Anomaly thresholds must be finite and within [0, 1].
pub fn validate_threshold(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        anyhow::bail!("{name} must be a number between 0 and 1, got {value}");
    }
    Ok(value)
}

/// Group-score floors must be finite, positive and at most 1.
pub fn validate_floor(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        anyhow::bail!("{name} must be greater than 0 and at most 1, got {value}");
    }
    Ok(value)
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: '{raw}'")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default_when_unset() {
        let value: f64 = parse_var("SKILLAUDIT_TEST_UNSET_VARIABLE", 0.25).unwrap();
        assert_eq!(value, 0.25);
    }

    #[test]
    fn test_threshold_bounds() {
        assert_eq!(validate_threshold("t", 0.0).unwrap(), 0.0);
        assert_eq!(validate_threshold("t", 1.0).unwrap(), 1.0);
        assert!(validate_threshold("t", f64::NAN).is_err());
        assert!(validate_threshold("t", f64::INFINITY).is_err());
        assert!(validate_threshold("t", -0.1).is_err());
        assert!(validate_threshold("t", 1.5).is_err());
    }

    #[test]
    fn test_floor_bounds() {
        assert_eq!(validate_floor("f", 0.001).unwrap(), 0.001);
        assert_eq!(validate_floor("f", 1.0).unwrap(), 1.0);
        assert!(validate_floor("f", 0.0).is_err());
        assert!(validate_floor("f", -1.0).is_err());
        assert!(validate_floor("f", f64::NAN).is_err());
        let err = validate_floor("SKILLAUDIT_GROUP_SCORE_FLOOR", -1.0).unwrap_err();
        assert!(err.to_string().contains("SKILLAUDIT_GROUP_SCORE_FLOOR"));
    }

    #[test]
    fn test_grouping_kind_strategies() {
        assert_eq!(GroupingKind::Department.strategy().unwrap().name(), "department");
        assert_eq!(GroupingKind::Semester.strategy().unwrap().name(), "semester");
    }
}
