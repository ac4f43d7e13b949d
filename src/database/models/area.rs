use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::area::AreaCode;

/// Row of the `area_result` view: an area joined with its optional vote aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AreaRecord {
    pub year: i32,
    pub province_code: String,
    pub city_code: String,
    pub town_code: String,
    pub village_code: String,
    pub name: String,
    pub valid_votes: Option<i64>,
    pub invalid_votes: Option<i64>,
    pub total_votes: Option<i64>,
    pub voter_turnout: Option<f64>,
}

impl AreaRecord {
    pub fn code(&self) -> AreaCode {
        AreaCode::new(
            self.province_code.as_str(),
            self.city_code.as_str(),
            self.town_code.as_str(),
            self.village_code.as_str(),
        )
    }
}
