use serde::Serialize;

use super::code::{AreaCode, DefaultCodes, Segment};

/// Granularity implied by which code segments are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaLevel {
    /// Nation-wide aggregate
    Province,
    City,
    Town,
    Village,
}

impl AreaLevel {
    /// Distance from the nation root
    pub fn depth(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for AreaLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AreaLevel::Province => "province",
            AreaLevel::City => "city",
            AreaLevel::Town => "town",
            AreaLevel::Village => "village",
        };
        f.write_str(name)
    }
}

/// Resolve the hierarchy level of a code.
///
/// Evaluated as an ordered guard chain; the first matching row wins. Prefix
/// consistency is not checked: a village segment set under a default town
/// still resolves to `Village`.
pub fn resolve_level(defaults: &DefaultCodes, code: &AreaCode) -> AreaLevel {
    let unset = |segment: Segment| defaults.is_default(segment, code.segment(segment));

    let province = unset(Segment::Province);
    let city = unset(Segment::City);
    let town = unset(Segment::Town);
    let village = unset(Segment::Village);

    match (province, city, town, village) {
        (true, true, true, true) => AreaLevel::Province,
        (_, _, true, true) => AreaLevel::City,
        (_, _, false, true) => AreaLevel::Town,
        _ => AreaLevel::Village,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::code::DEFAULT_CODES;

    fn level(p: &str, c: &str, t: &str, v: &str) -> AreaLevel {
        resolve_level(&DEFAULT_CODES, &AreaCode::new(p, c, t, v))
    }

    #[test]
    fn all_defaults_is_nation() {
        assert_eq!(level("00", "000", "000", "0000"), AreaLevel::Province);
    }

    #[test]
    fn cascades_by_most_specific_segment() {
        assert_eq!(level("63", "000", "000", "0000"), AreaLevel::City);
        assert_eq!(level("10", "002", "000", "0000"), AreaLevel::City);
        assert_eq!(level("63", "000", "010", "0000"), AreaLevel::Town);
        assert_eq!(level("63", "000", "010", "0003"), AreaLevel::Village);
    }

    #[test]
    fn inconsistent_prefix_is_resolved_permissively() {
        // village set while town left at default
        assert_eq!(level("63", "000", "000", "0003"), AreaLevel::Village);
        // town set under the nation code
        assert_eq!(level("00", "000", "010", "0000"), AreaLevel::Town);
        // only the city segment set
        assert_eq!(level("00", "001", "000", "0000"), AreaLevel::City);
    }

    #[test]
    fn depth_follows_hierarchy() {
        assert!(AreaLevel::Province.depth() < AreaLevel::City.depth());
        assert!(AreaLevel::Town.depth() < AreaLevel::Village.depth());
        assert_eq!(AreaLevel::Village.to_string(), "village");
    }
}
