use serde::{Deserialize, Serialize};

use super::code::AreaCode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    pub name: String,
    pub party_name: String,
    pub total_votes: i64,
    pub is_elected: bool,
}

/// One party's tally for the area in one election year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub year: i32,
    pub party_name: String,
    pub total_votes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaDetail {
    #[serde(flatten)]
    pub code: AreaCode,
    pub name: String,
    pub valid_votes: i64,
    pub invalid_votes: i64,
    pub total_votes: i64,
    pub voter_turnout: f64,
    pub candidates: Vec<CandidateResult>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubArea {
    #[serde(flatten)]
    pub code: AreaCode,
    pub name: String,
    pub candidates: Vec<CandidateResult>,
    pub total_votes: i64,
    pub voter_turnout: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentArea {
    #[serde(flatten)]
    pub code: AreaCode,
    pub name: String,
}

/// Body of `GET /api/area`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaResult {
    pub year: i32,
    pub area: AreaDetail,
    pub sub_areas: Vec<SubArea>,
    pub parent_areas: Vec<ParentArea>,
}

/// Body of `GET /api/years`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearsResult {
    pub years: Vec<i32>,
}
