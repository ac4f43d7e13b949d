//! Query-string validation for the area endpoint.

use serde::{Deserialize, Serialize};

use crate::area::{AreaCode, DefaultCodes, Segment};

/// One rejected query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Raw `/api/area` query, everything optional until validated
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaParams {
    pub year: Option<String>,
    pub province_code: Option<String>,
    pub city_code: Option<String>,
    pub town_code: Option<String>,
    pub village_code: Option<String>,
}

/// Validated request: a concrete year and a full four-segment code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaRequest {
    pub year: i32,
    pub code: AreaCode,
}

impl AreaParams {
    fn raw(&self, segment: Segment) -> Option<&str> {
        match segment {
            Segment::Province => self.province_code.as_deref(),
            Segment::City => self.city_code.as_deref(),
            Segment::Town => self.town_code.as_deref(),
            Segment::Village => self.village_code.as_deref(),
        }
    }

    /// Checks every field and reports all failures at once. Absent code
    /// segments take their default value.
    pub fn validate(&self, defaults: &DefaultCodes) -> Result<AreaRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let year = match self.year.as_deref() {
            None => {
                errors.push(FieldError::new("year", "Required"));
                None
            }
            Some(raw) => match parse_year(raw) {
                Some(year) => Some(year),
                None => {
                    errors.push(FieldError::new("year", "Year must be four digits"));
                    None
                }
            },
        };

        let mut segments = Vec::with_capacity(Segment::ALL.len());
        for segment in Segment::ALL {
            let value = self.raw(segment).unwrap_or(defaults.get(segment));
            if let Some(message) = check_segment(segment, value) {
                errors.push(FieldError::new(segment.field_name(), message));
            }
            segments.push(value);
        }

        match year {
            Some(year) if errors.is_empty() => Ok(AreaRequest {
                year,
                code: AreaCode::new(segments[0], segments[1], segments[2], segments[3]),
            }),
            _ => Err(errors),
        }
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    if raw.len() == 4 && is_digits(raw) {
        raw.parse().ok()
    } else {
        None
    }
}

fn check_segment(segment: Segment, value: &str) -> Option<String> {
    let width = segment.width();
    if value.chars().count() != width {
        Some(format!("String must contain exactly {} character(s)", width))
    } else if !is_digits(value) {
        Some("String must contain only digits".to_string())
    } else {
        None
    }
}

fn is_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::DEFAULT_CODES;

    fn params(year: Option<&str>, codes: [Option<&str>; 4]) -> AreaParams {
        AreaParams {
            year: year.map(str::to_string),
            province_code: codes[0].map(str::to_string),
            city_code: codes[1].map(str::to_string),
            town_code: codes[2].map(str::to_string),
            village_code: codes[3].map(str::to_string),
        }
    }

    #[test]
    fn year_alone_targets_the_nation() {
        let request = params(Some("2024"), [None; 4]).validate(&DEFAULT_CODES).unwrap();
        assert_eq!(request.year, 2024);
        assert_eq!(request.code, DEFAULT_CODES.root());
    }

    #[test]
    fn full_code_is_kept() {
        let request = params(Some("2020"), [Some("63"), Some("000"), Some("010"), Some("0003")])
            .validate(&DEFAULT_CODES)
            .unwrap();
        assert_eq!(request.code.to_string(), "63-000-010-0003");
    }

    #[test]
    fn short_village_code_is_rejected() {
        let errors = params(Some("2024"), [Some("63"), Some("000"), Some("010"), Some("003")])
            .validate(&DEFAULT_CODES)
            .unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("villageCode", "String must contain exactly 4 character(s)")]
        );
    }

    #[test]
    fn reports_every_bad_field() {
        let errors = params(None, [Some("6a"), None, Some("1"), None])
            .validate(&DEFAULT_CODES)
            .unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["year", "provinceCode", "townCode"]);
        assert_eq!(errors[0].message, "Required");
        assert_eq!(errors[1].message, "String must contain only digits");
    }

    #[test]
    fn year_must_be_four_digits() {
        for bad in ["24", "20245", "２０２４", "abcd", ""] {
            let errors = params(Some(bad), [None; 4]).validate(&DEFAULT_CODES).unwrap_err();
            assert_eq!(errors[0].field, "year", "{bad:?} should be rejected");
        }
    }
}
