use async_trait::async_trait;

use crate::area::{AreaCode, AreaQuery};
use crate::database::manager::DatabaseError;
use crate::database::models::{AreaRecord, CandidateVoteRecord};

/// Read-only access to election results.
///
/// Every lookup is a point-in-time read; callers may issue them concurrently.
#[async_trait]
pub trait AreaStore: Send + Sync {
    /// The area with exactly this code in `year`, with its vote aggregate.
    async fn find_area(&self, year: i32, code: &AreaCode) -> Result<Option<AreaRecord>, DatabaseError>;

    /// Areas in `year` matched by `query`, ordered by code.
    async fn find_areas(&self, year: i32, query: &AreaQuery) -> Result<Vec<AreaRecord>, DatabaseError>;

    /// Candidate tallies for areas matched by `query`; every year when `year` is `None`.
    async fn find_candidate_votes(
        &self,
        year: Option<i32>,
        query: &AreaQuery,
    ) -> Result<Vec<CandidateVoteRecord>, DatabaseError>;

    /// Distinct election years, newest first.
    async fn list_years(&self) -> Result<Vec<i32>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
