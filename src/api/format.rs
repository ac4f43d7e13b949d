//! Store rows to response shapes. Absent vote aggregates become zeros here and
//! nowhere else.

use std::collections::HashMap;

use crate::area::{AreaCode, AreaDetail, CandidateResult, HistoryEntry, ParentArea, SubArea};
use crate::database::models::{AreaRecord, CandidateVoteRecord};

/// Vote aggregate with missing values substituted by zero
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VoteTotals {
    pub valid_votes: i64,
    pub invalid_votes: i64,
    pub total_votes: i64,
    pub voter_turnout: f64,
}

impl From<&AreaRecord> for VoteTotals {
    fn from(record: &AreaRecord) -> Self {
        Self {
            valid_votes: record.valid_votes.unwrap_or(0),
            invalid_votes: record.invalid_votes.unwrap_or(0),
            total_votes: record.total_votes.unwrap_or(0),
            voter_turnout: record.voter_turnout.filter(|t| t.is_finite()).unwrap_or(0.0),
        }
    }
}

pub fn candidate(record: &CandidateVoteRecord) -> CandidateResult {
    CandidateResult {
        name: record.candidate_name.clone(),
        party_name: record.party_name.clone(),
        total_votes: record.total_votes,
        is_elected: record.is_elected,
    }
}

pub fn history_entry(record: &CandidateVoteRecord) -> HistoryEntry {
    HistoryEntry {
        year: record.year,
        party_name: record.party_name.clone(),
        total_votes: record.total_votes,
    }
}

/// Candidates grouped by the area they were tallied in, store order preserved
pub fn candidates_by_area(records: &[CandidateVoteRecord]) -> HashMap<AreaCode, Vec<CandidateResult>> {
    let mut grouped: HashMap<AreaCode, Vec<CandidateResult>> = HashMap::new();
    for record in records {
        grouped.entry(record.code()).or_default().push(candidate(record));
    }
    grouped
}

pub fn area_detail(
    record: &AreaRecord,
    candidates: Vec<CandidateResult>,
    history: Vec<HistoryEntry>,
) -> AreaDetail {
    let totals = VoteTotals::from(record);
    AreaDetail {
        code: record.code(),
        name: record.name.clone(),
        valid_votes: totals.valid_votes,
        invalid_votes: totals.invalid_votes,
        total_votes: totals.total_votes,
        voter_turnout: totals.voter_turnout,
        candidates,
        history,
    }
}

pub fn sub_area(record: &AreaRecord, candidates: Vec<CandidateResult>) -> SubArea {
    let totals = VoteTotals::from(record);
    SubArea {
        code: record.code(),
        name: record.name.clone(),
        candidates,
        total_votes: totals.total_votes,
        voter_turnout: totals.voter_turnout,
    }
}

pub fn parent_area(record: &AreaRecord) -> ParentArea {
    ParentArea {
        code: record.code(),
        name: record.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(total_votes: Option<i64>, voter_turnout: Option<f64>) -> AreaRecord {
        AreaRecord {
            year: 2024,
            province_code: "63".into(),
            city_code: "000".into(),
            town_code: "010".into(),
            village_code: "0000".into(),
            name: "松山區".into(),
            valid_votes: None,
            invalid_votes: None,
            total_votes,
            voter_turnout,
        }
    }

    #[test]
    fn missing_votes_become_zero() {
        let detail = area_detail(&record(None, None), vec![], vec![]);
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["totalVotes"], json!(0));
        assert_eq!(value["validVotes"], json!(0));
        assert_eq!(value["invalidVotes"], json!(0));
        assert_eq!(value["voterTurnout"], json!(0.0));
        assert_eq!(value["townCode"], json!("010"));
    }

    #[test]
    fn present_votes_pass_through() {
        let sub = sub_area(&record(Some(1200), Some(71.86)), vec![]);
        assert_eq!(sub.total_votes, 1200);
        assert_eq!(sub.voter_turnout, 71.86);
    }

    #[test]
    fn groups_candidates_by_code() {
        let vote = |village: &str, name: &str| CandidateVoteRecord {
            year: 2024,
            province_code: "63".into(),
            city_code: "000".into(),
            town_code: "010".into(),
            village_code: village.into(),
            candidate_name: name.into(),
            party_name: "無黨籍".into(),
            total_votes: 10,
            is_elected: false,
        };
        let grouped = candidates_by_area(&[vote("0001", "甲"), vote("0003", "乙"), vote("0001", "丙")]);
        let first = &grouped[&AreaCode::new("63", "000", "010", "0001")];
        assert_eq!(first.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["甲", "丙"]);
        assert_eq!(grouped.len(), 2);
    }
}
