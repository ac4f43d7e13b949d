use serde_json::{json, Map, Value};

use super::code::{AreaCode, DefaultCodes, Segment};
use super::level::AreaLevel;

/// Condition on a single code segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SegmentMatch {
    #[default]
    Any,
    Eq(String),
    Ne(String),
}

impl SegmentMatch {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            SegmentMatch::Any => true,
            SegmentMatch::Eq(expected) => expected == value,
            SegmentMatch::Ne(excluded) => excluded != value,
        }
    }

    fn to_where(&self) -> Option<Value> {
        match self {
            SegmentMatch::Any => None,
            SegmentMatch::Eq(v) => Some(Value::String(v.clone())),
            SegmentMatch::Ne(v) => Some(json!({ "$ne": v })),
        }
    }
}

/// Conjunction of per-segment conditions over an area code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaFilter {
    pub province: SegmentMatch,
    pub city: SegmentMatch,
    pub town: SegmentMatch,
    pub village: SegmentMatch,
}

impl AreaFilter {
    /// Matches exactly one code tuple
    pub fn exact(code: &AreaCode) -> Self {
        Self::default()
            .with(Segment::Province, SegmentMatch::Eq(code.province_code.clone()))
            .with(Segment::City, SegmentMatch::Eq(code.city_code.clone()))
            .with(Segment::Town, SegmentMatch::Eq(code.town_code.clone()))
            .with(Segment::Village, SegmentMatch::Eq(code.village_code.clone()))
    }

    pub fn with(mut self, segment: Segment, condition: SegmentMatch) -> Self {
        *self.get_mut(segment) = condition;
        self
    }

    pub fn get(&self, segment: Segment) -> &SegmentMatch {
        match segment {
            Segment::Province => &self.province,
            Segment::City => &self.city,
            Segment::Town => &self.town,
            Segment::Village => &self.village,
        }
    }

    fn get_mut(&mut self, segment: Segment) -> &mut SegmentMatch {
        match segment {
            Segment::Province => &mut self.province,
            Segment::City => &mut self.city,
            Segment::Town => &mut self.town,
            Segment::Village => &mut self.village,
        }
    }

    pub fn matches(&self, code: &AreaCode) -> bool {
        Segment::ALL
            .iter()
            .all(|segment| self.get(*segment).matches(code.segment(*segment)))
    }

    /// Where-clause object for the SQL filter compiler.
    pub fn to_where(&self) -> Value {
        let mut obj = Map::new();
        for segment in Segment::ALL {
            if let Some(condition) = self.get(segment).to_where() {
                obj.insert(segment.column().to_string(), condition);
            }
        }
        Value::Object(obj)
    }
}

/// Rows matching any of `any_of` and none of `exclude`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaQuery {
    pub any_of: Vec<AreaFilter>,
    pub exclude: Vec<AreaFilter>,
}

impl AreaQuery {
    pub fn single(filter: AreaFilter) -> Self {
        Self { any_of: vec![filter], exclude: vec![] }
    }

    pub fn any_of(filters: Vec<AreaFilter>) -> Self {
        Self { any_of: filters, exclude: vec![] }
    }

    pub fn excluding(mut self, filters: &[AreaFilter]) -> Self {
        self.exclude.extend_from_slice(filters);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.any_of.is_empty()
    }

    pub fn matches(&self, code: &AreaCode) -> bool {
        self.any_of.iter().any(|f| f.matches(code)) && !self.exclude.iter().any(|f| f.matches(code))
    }

    pub fn to_where(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(
            "$or".into(),
            Value::Array(self.any_of.iter().map(AreaFilter::to_where).collect()),
        );
        if !self.exclude.is_empty() {
            obj.insert(
                "$not".into(),
                json!({ "$or": self.exclude.iter().map(AreaFilter::to_where).collect::<Vec<_>>() }),
            );
        }
        Value::Object(obj)
    }
}

/// Filter selecting the direct children of an area, `None` for villages.
pub fn child_filter(defaults: &DefaultCodes, level: AreaLevel, code: &AreaCode) -> Option<AreaFilter> {
    let eq = |segment: Segment| SegmentMatch::Eq(code.segment(segment).to_string());
    let is_default = |segment: Segment| SegmentMatch::Eq(defaults.get(segment).to_string());
    let not_default = |segment: Segment| SegmentMatch::Ne(defaults.get(segment).to_string());

    match level {
        AreaLevel::Province => Some(AreaFilter::default().with(Segment::Town, is_default(Segment::Town))),
        AreaLevel::City => Some(
            AreaFilter::default()
                .with(Segment::Province, eq(Segment::Province))
                .with(Segment::City, eq(Segment::City))
                .with(Segment::Town, not_default(Segment::Town))
                .with(Segment::Village, is_default(Segment::Village)),
        ),
        AreaLevel::Town => Some(
            AreaFilter::default()
                .with(Segment::Province, eq(Segment::Province))
                .with(Segment::City, eq(Segment::City))
                .with(Segment::Town, eq(Segment::Town))
                .with(Segment::Village, not_default(Segment::Village)),
        ),
        AreaLevel::Village => None,
    }
}

/// Filters for the ancestor chain, meant to be OR'd into one lookup.
pub fn ancestor_filters(defaults: &DefaultCodes, level: AreaLevel, code: &AreaCode) -> Vec<AreaFilter> {
    if level == AreaLevel::Province {
        return vec![];
    }

    let mut filters = vec![AreaFilter::exact(&defaults.root())];

    if matches!(level, AreaLevel::Town | AreaLevel::Village) {
        filters.push(AreaFilter::exact(&AreaCode::new(
            code.province_code.as_str(),
            code.city_code.as_str(),
            defaults.town,
            defaults.village,
        )));
    }

    if level == AreaLevel::Village {
        filters.push(AreaFilter::exact(&AreaCode::new(
            code.province_code.as_str(),
            code.city_code.as_str(),
            code.town_code.as_str(),
            defaults.village,
        )));
    }

    filters
}

/// Parse a `province-city` placeholder entry, e.g. `10-000`.
pub fn placeholder_filter(entry: &str) -> Option<AreaFilter> {
    let (province, city) = entry.trim().split_once('-')?;
    let valid = |s: &str, width: usize| s.len() == width && s.bytes().all(|b| b.is_ascii_digit());
    if !valid(province, Segment::Province.width()) || !valid(city, Segment::City.width()) {
        return None;
    }
    Some(
        AreaFilter::default()
            .with(Segment::Province, SegmentMatch::Eq(province.to_string()))
            .with(Segment::City, SegmentMatch::Eq(city.to_string())),
    )
}
