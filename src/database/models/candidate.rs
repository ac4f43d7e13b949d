use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::area::AreaCode;

/// Row of the `candidate_result` view: one candidate's tally in one area.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateVoteRecord {
    pub year: i32,
    pub province_code: String,
    pub city_code: String,
    pub town_code: String,
    pub village_code: String,
    pub candidate_name: String,
    pub party_name: String,
    pub total_votes: i64,
    pub is_elected: bool,
}

impl CandidateVoteRecord {
    pub fn code(&self) -> AreaCode {
        AreaCode::new(
            self.province_code.as_str(),
            self.city_code.as_str(),
            self.town_code.as_str(),
            self.village_code.as_str(),
        )
    }
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct YearRecord {
    pub year: i32,
}
