use serde::{Deserialize, Serialize};

/// One of the four positions in an administrative code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Province,
    City,
    Town,
    Village,
}

impl Segment {
    pub const ALL: [Segment; 4] = [Segment::Province, Segment::City, Segment::Town, Segment::Village];

    /// Fixed digit width of the segment.
    pub fn width(&self) -> usize {
        match self {
            Segment::Province => 2,
            Segment::City => 3,
            Segment::Town => 3,
            Segment::Village => 4,
        }
    }

    /// Query parameter / JSON field name
    pub fn field_name(&self) -> &'static str {
        match self {
            Segment::Province => "provinceCode",
            Segment::City => "cityCode",
            Segment::Town => "townCode",
            Segment::Village => "villageCode",
        }
    }

    /// Column name in the relational store
    pub fn column(&self) -> &'static str {
        match self {
            Segment::Province => "province_code",
            Segment::City => "city_code",
            Segment::Town => "town_code",
            Segment::Village => "village_code",
        }
    }
}

/// The wildcard value per segment meaning "this level is unset".
///
/// Constructed once and passed by value; nothing mutates it after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCodes {
    pub province: &'static str,
    pub city: &'static str,
    pub town: &'static str,
    pub village: &'static str,
}

pub const DEFAULT_CODES: DefaultCodes = DefaultCodes {
    province: "00",
    city: "000",
    town: "000",
    village: "0000",
};

impl Default for DefaultCodes {
    fn default() -> Self {
        DEFAULT_CODES
    }
}

impl DefaultCodes {
    pub fn get(&self, segment: Segment) -> &'static str {
        match segment {
            Segment::Province => self.province,
            Segment::City => self.city,
            Segment::Town => self.town,
            Segment::Village => self.village,
        }
    }

    /// Code addressing the nation-wide aggregate row
    pub fn root(&self) -> AreaCode {
        AreaCode::new(self.province, self.city, self.town, self.village)
    }

    pub fn is_default(&self, segment: Segment, value: &str) -> bool {
        self.get(segment) == value
    }
}

/// Four-segment administrative address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaCode {
    pub province_code: String,
    pub city_code: String,
    pub town_code: String,
    pub village_code: String,
}

impl AreaCode {
    pub fn new(
        province: impl Into<String>,
        city: impl Into<String>,
        town: impl Into<String>,
        village: impl Into<String>,
    ) -> Self {
        Self {
            province_code: province.into(),
            city_code: city.into(),
            town_code: town.into(),
            village_code: village.into(),
        }
    }

    pub fn segment(&self, segment: Segment) -> &str {
        match segment {
            Segment::Province => &self.province_code,
            Segment::City => &self.city_code,
            Segment::Town => &self.town_code,
            Segment::Village => &self.village_code,
        }
    }
}

impl std::fmt::Display for AreaCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.province_code, self.city_code, self.town_code, self.village_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_segment_widths() {
        for segment in Segment::ALL {
            assert_eq!(DEFAULT_CODES.get(segment).len(), segment.width());
        }
    }

    #[test]
    fn root_code_is_all_defaults() {
        let root = DEFAULT_CODES.root();
        assert_eq!(root.to_string(), "00-000-000-0000");
        for segment in Segment::ALL {
            assert!(DEFAULT_CODES.is_default(segment, root.segment(segment)));
        }
    }
}
