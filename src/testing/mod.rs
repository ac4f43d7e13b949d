//! In-memory store and a small fixture dataset for tests.

use async_trait::async_trait;

use crate::area::{AreaCode, AreaFilter, AreaQuery};
use crate::database::models::{AreaRecord, CandidateVoteRecord};
use crate::database::{AreaStore, DatabaseError};

/// `AreaStore` over plain vectors, evaluating filters with `AreaQuery::matches`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    areas: Vec<AreaRecord>,
    candidate_votes: Vec<CandidateVoteRecord>,
    failing: bool,
}

impl MemoryStore {
    pub fn new(areas: Vec<AreaRecord>, candidate_votes: Vec<CandidateVoteRecord>) -> Self {
        Self { areas, candidate_votes, failing: false }
    }

    /// Same data, but every lookup fails like an unreachable database
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.failing {
            return Err(DatabaseError::QueryError("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AreaStore for MemoryStore {
    async fn find_area(&self, year: i32, code: &AreaCode) -> Result<Option<AreaRecord>, DatabaseError> {
        self.check()?;
        let query = AreaQuery::single(AreaFilter::exact(code));
        Ok(self.find_areas(year, &query).await?.into_iter().next())
    }

    async fn find_areas(&self, year: i32, query: &AreaQuery) -> Result<Vec<AreaRecord>, DatabaseError> {
        self.check()?;
        let mut rows: Vec<AreaRecord> = self
            .areas
            .iter()
            .filter(|a| a.year == year && query.matches(&a.code()))
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.code());
        Ok(rows)
    }

    async fn find_candidate_votes(
        &self,
        year: Option<i32>,
        query: &AreaQuery,
    ) -> Result<Vec<CandidateVoteRecord>, DatabaseError> {
        self.check()?;
        Ok(self
            .candidate_votes
            .iter()
            .filter(|v| year.map_or(true, |y| v.year == y) && query.matches(&v.code()))
            .cloned()
            .collect())
    }

    async fn list_years(&self) -> Result<Vec<i32>, DatabaseError> {
        self.check()?;
        let mut years: Vec<i32> = self.candidate_votes.iter().map(|v| v.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Ok(years)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.check()
    }
}

fn area(year: i32, code: [&str; 4], name: &str, votes: Option<(i64, i64, f64)>) -> AreaRecord {
    AreaRecord {
        year,
        province_code: code[0].to_string(),
        city_code: code[1].to_string(),
        town_code: code[2].to_string(),
        village_code: code[3].to_string(),
        name: name.to_string(),
        valid_votes: votes.map(|(valid, _, _)| valid),
        invalid_votes: votes.map(|(_, invalid, _)| invalid),
        total_votes: votes.map(|(valid, invalid, _)| valid + invalid),
        voter_turnout: votes.map(|(_, _, turnout)| turnout),
    }
}

fn vote(year: i32, code: [&str; 4], candidate: &str, party: &str, total_votes: i64, is_elected: bool) -> CandidateVoteRecord {
    CandidateVoteRecord {
        year,
        province_code: code[0].to_string(),
        city_code: code[1].to_string(),
        town_code: code[2].to_string(),
        village_code: code[3].to_string(),
        candidate_name: candidate.to_string(),
        party_name: party.to_string(),
        total_votes,
        is_elected,
    }
}

/// Two elections (2020, 2024) over a slice of the hierarchy.
///
/// 2024 has the nation, the Taiwan / Fujian aggregates, seven cities and
/// counties (one with a name outside the display table), two towns under
/// 臺北市 (信義區 without a vote aggregate) and two villages under 松山區.
/// 2020 only has the nation row.
pub fn fixture() -> MemoryStore {
    const NATION: [&str; 4] = ["00", "000", "000", "0000"];
    const TAIPEI: [&str; 4] = ["63", "000", "000", "0000"];
    const SONGSHAN: [&str; 4] = ["63", "000", "010", "0000"];
    const VILLAGE: [&str; 4] = ["63", "000", "010", "0003"];

    let areas = vec![
        area(2024, NATION, "全國", Some((13_950_000, 100_000, 71.86))),
        area(2024, ["10", "000", "000", "0000"], "臺灣省", Some((9_000_000, 60_000, 70.1))),
        area(2024, ["09", "000", "000", "0000"], "福建省", Some((60_000, 1_000, 40.2))),
        area(2024, ["64", "000", "000", "0000"], "高雄市", Some((1_700_000, 12_000, 73.0))),
        area(2024, ["10", "004", "000", "0000"], "新竹縣", Some((330_000, 2_000, 74.5))),
        area(2024, ["10", "099", "000", "0000"], "釣魚臺", None),
        area(2024, TAIPEI, "臺北市", Some((1_600_000, 11_000, 72.2))),
        area(2024, ["09", "020", "000", "0000"], "金門縣", Some((52_000, 800, 38.0))),
        area(2024, ["10", "002", "000", "0000"], "宜蘭縣", Some((280_000, 1_900, 70.9))),
        area(2024, ["65", "000", "000", "0000"], "新北市", Some((2_500_000, 17_000, 71.3))),
        area(2024, SONGSHAN, "松山區", Some((120_000, 900, 73.4))),
        area(2024, ["63", "000", "020", "0000"], "信義區", None),
        area(2024, ["63", "000", "010", "0001"], "莊敬里", Some((2_100, 20, 69.0))),
        area(2024, VILLAGE, "東榮里", Some((3_300, 25, 75.1))),
        area(2020, NATION, "全國", Some((14_300_000, 160_000, 74.9))),
    ];

    let mut candidate_votes = Vec::new();
    for (year, a, b) in [(2024, 5_586_000_i64, 4_671_000_i64), (2020, 8_170_000, 5_522_000)] {
        candidate_votes.push(vote(year, NATION, "甲候選人", "甲黨", a, true));
        candidate_votes.push(vote(year, NATION, "乙候選人", "乙黨", b, false));
    }
    for (code, a, b) in [
        (TAIPEI, 587_000_i64, 558_000_i64),
        (["64", "000", "000", "0000"], 700_000, 500_000),
        (SONGSHAN, 45_000, 43_000),
        (["63", "000", "010", "0001"], 900, 800),
        (VILLAGE, 1_400, 1_300),
    ] {
        candidate_votes.push(vote(2024, code, "甲候選人", "甲黨", a, a > b));
        candidate_votes.push(vote(2024, code, "乙候選人", "乙黨", b, b > a));
    }

    MemoryStore::new(areas, candidate_votes)
}
