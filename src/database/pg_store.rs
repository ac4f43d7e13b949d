use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::area::{AreaCode, AreaFilter, AreaQuery};
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{AreaRecord, CandidateVoteRecord, YearRecord};
use crate::database::repository::Repository;
use crate::database::store::AreaStore;
use crate::filter::FilterData;

const AREA_VIEW: &str = "area_result";
const CANDIDATE_VIEW: &str = "candidate_result";
const CANDIDATE_TABLE: &str = "candidate";

const CODE_ORDER: &str = "province_code, city_code, town_code, village_code";

/// Postgres-backed store reading the `area_result` / `candidate_result` views.
#[derive(Clone)]
pub struct PgAreaStore {
    pool: PgPool,
}

impl PgAreaStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn areas(&self) -> Repository<AreaRecord> {
        Repository::new(AREA_VIEW, self.pool.clone())
    }

    fn candidate_votes(&self) -> Repository<CandidateVoteRecord> {
        Repository::new(CANDIDATE_VIEW, self.pool.clone())
    }
}

fn in_year(year: i32, clause: Value) -> Value {
    json!({ "$and": [ { "year": year }, clause ] })
}

pub(crate) fn area_filter_data(year: i32, query: &AreaQuery) -> FilterData {
    FilterData {
        where_clause: Some(in_year(year, query.to_where())),
        order: Some(Value::String(CODE_ORDER.to_string())),
        ..Default::default()
    }
}

pub(crate) fn candidate_filter_data(year: Option<i32>, query: &AreaQuery) -> FilterData {
    let clause = query.to_where();
    FilterData {
        where_clause: Some(match year {
            Some(year) => in_year(year, clause),
            None => clause,
        }),
        order: Some(json!(["year", CODE_ORDER, "total_votes desc"])),
        ..Default::default()
    }
}

#[async_trait]
impl AreaStore for PgAreaStore {
    async fn find_area(&self, year: i32, code: &AreaCode) -> Result<Option<AreaRecord>, DatabaseError> {
        let query = AreaQuery::single(AreaFilter::exact(code));
        self.areas().select_one(area_filter_data(year, &query)).await
    }

    async fn find_areas(&self, year: i32, query: &AreaQuery) -> Result<Vec<AreaRecord>, DatabaseError> {
        if query.is_empty() {
            return Ok(vec![]);
        }
        self.areas().select_any(area_filter_data(year, query)).await
    }

    async fn find_candidate_votes(
        &self,
        year: Option<i32>,
        query: &AreaQuery,
    ) -> Result<Vec<CandidateVoteRecord>, DatabaseError> {
        if query.is_empty() {
            return Ok(vec![]);
        }
        self.candidate_votes().select_any(candidate_filter_data(year, query)).await
    }

    async fn list_years(&self) -> Result<Vec<i32>, DatabaseError> {
        let filter = FilterData {
            select: Some(vec!["year".to_string()]),
            order: Some(Value::String("year desc".to_string())),
            distinct: true,
            ..Default::default()
        };
        let rows = Repository::<YearRecord>::new(CANDIDATE_TABLE, self.pool.clone())
            .select_any(filter)
            .await?;
        Ok(rows.into_iter().map(|r| r.year).collect())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{child_filter, placeholder_filter, AreaLevel, DEFAULT_CODES};
    use crate::filter::Filter;

    fn sql(table: &str, data: FilterData) -> (String, Vec<Value>) {
        let mut filter = Filter::new(table).unwrap();
        filter.assign(data).unwrap();
        let result = filter.to_sql().unwrap();
        (result.query, result.params)
    }

    #[test]
    fn nation_children_sql_excludes_placeholders() {
        let child = child_filter(&DEFAULT_CODES, AreaLevel::Province, &DEFAULT_CODES.root()).unwrap();
        let query = AreaQuery::single(child).excluding(&[placeholder_filter("10-000").unwrap()]);
        let (query, params) = sql(AREA_VIEW, area_filter_data(2024, &query));

        assert!(query.starts_with("SELECT * FROM \"area_result\" WHERE "));
        assert!(query.contains("\"year\" = $1"));
        assert!(query.contains("NOT ("));
        assert!(query.ends_with("ORDER BY \"province_code\" ASC, \"city_code\" ASC, \"town_code\" ASC, \"village_code\" ASC"));
        assert_eq!(params[0], json!(2024));
        assert_eq!(params.len(), 4);
        assert!(params.contains(&json!("10")));
        assert!(params.contains(&json!("000")));
    }

    #[test]
    fn history_query_spans_all_years() {
        let code = AreaCode::new("63", "000", "010", "0003");
        let (query, params) = sql(CANDIDATE_VIEW, candidate_filter_data(None, &AreaQuery::single(AreaFilter::exact(&code))));
        assert!(!query.contains("\"year\" = "));
        assert_eq!(params.len(), 4);
        assert!(query.ends_with("ORDER BY \"year\" ASC, \"province_code\" ASC, \"city_code\" ASC, \"town_code\" ASC, \"village_code\" ASC, \"total_votes\" DESC"));
    }

    #[test]
    fn ancestor_lookup_is_one_or_query() {
        let code = AreaCode::new("63", "000", "010", "0003");
        let filters = crate::area::ancestor_filters(&DEFAULT_CODES, AreaLevel::Village, &code);
        let (query, params) = sql(AREA_VIEW, area_filter_data(2024, &AreaQuery::any_of(filters)));
        assert_eq!(query.matches(" OR ").count(), 2);
        assert_eq!(params.len(), 1 + 3 * 4);
    }
}
