//! Measurement kind

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// What a session is measuring, fixed for the lifetime of the session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeasurementKind {
    /// A single annotated location
    Point { name: String },
    /// An open path; distance excludes any closing segment
    Line { name: String },
    /// A closed boundary; last point implicitly connects to the first
    Area { name: String },
}

impl MeasurementKind {
    /// Point kind with a validated, trimmed name
    pub fn point(name: impl AsRef<str>) -> Result<Self, SessionError> {
        validate_name(name.as_ref()).map(|name| Self::Point { name })
    }

    /// Line kind with a validated, trimmed name
    pub fn line(name: impl AsRef<str>) -> Result<Self, SessionError> {
        validate_name(name.as_ref()).map(|name| Self::Line { name })
    }

    /// Area kind with a validated, trimmed name
    pub fn area(name: impl AsRef<str>) -> Result<Self, SessionError> {
        validate_name(name.as_ref()).map(|name| Self::Area { name })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Point { name } | Self::Line { name } | Self::Area { name } => name,
        }
    }

    /// Minimum number of points `finish()` accepts
    pub fn min_points(&self) -> usize {
        match self {
            Self::Point { .. } => 1,
            Self::Line { .. } => 2,
            Self::Area { .. } => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Point { .. } => "point",
            Self::Line { .. } => "line",
            Self::Area { .. } => "area",
        }
    }

    /// Re-validate the name, normalizing surrounding whitespace
    pub(crate) fn normalized(self) -> Result<Self, SessionError> {
        match self {
            Self::Point { name } => Self::point(name),
            Self::Line { name } => Self::line(name),
            Self::Area { name } => Self::area(name),
        }
    }
}

/// Trimmed name, or `InvalidName` if nothing remains
pub(crate) fn validate_name(name: &str) -> Result<String, SessionError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(SessionError::InvalidName)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_trimmed() {
        let kind = MeasurementKind::line("  North fence \n").unwrap();
        assert_eq!(kind.name(), "North fence");
    }

    #[test]
    fn test_blank_names_rejected() {
        assert_eq!(MeasurementKind::area(""), Err(SessionError::InvalidName));
        assert_eq!(MeasurementKind::point(" \t "), Err(SessionError::InvalidName));
    }

    #[test]
    fn test_min_points_per_kind() {
        assert_eq!(MeasurementKind::point("p").unwrap().min_points(), 1);
        assert_eq!(MeasurementKind::line("l").unwrap().min_points(), 2);
        assert_eq!(MeasurementKind::area("a").unwrap().min_points(), 3);
    }

    #[test]
    fn test_normalized_rejects_blank_literal() {
        let kind = MeasurementKind::Area {
            name: "   ".to_string(),
        };
        assert_eq!(kind.normalized(), Err(SessionError::InvalidName));
    }

    #[test]
    fn test_serde_tagging() {
        let kind = MeasurementKind::line("Track").unwrap();
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#"{"kind":"line","name":"Track"}"#);
    }
}
