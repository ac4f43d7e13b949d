use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::api::format;
use crate::config::AreaConfig;
use crate::database::{AreaStore, DatabaseError};

use super::code::{AreaCode, DefaultCodes};
use super::level::{resolve_level, AreaLevel};
use super::order::sort_by_display_order;
use super::predicate::{ancestor_filters, child_filter, placeholder_filter, AreaFilter, AreaQuery};
use super::result::{AreaResult, HistoryEntry, ParentArea, SubArea};

#[derive(Debug, Error)]
pub enum AreaError {
    #[error("No area {code} in {year}")]
    NotFound { year: i32, code: AreaCode },

    #[error("No election years available")]
    NoYears,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Assembles area results from independent store lookups.
#[derive(Clone)]
pub struct AreaService {
    store: Arc<dyn AreaStore>,
    defaults: DefaultCodes,
    excluded: Arc<[AreaFilter]>,
}

impl AreaService {
    pub fn new(store: Arc<dyn AreaStore>, defaults: DefaultCodes, excluded: Vec<AreaFilter>) -> Self {
        Self {
            store,
            defaults,
            excluded: excluded.into(),
        }
    }

    /// Service with placeholder exclusions taken from config; malformed entries are skipped.
    pub fn from_config(store: Arc<dyn AreaStore>, defaults: DefaultCodes, config: &AreaConfig) -> Self {
        let excluded = config
            .excluded_provinces
            .iter()
            .filter_map(|entry| {
                let filter = placeholder_filter(entry);
                if filter.is_none() {
                    warn!("Ignoring malformed excluded province entry: {:?}", entry);
                }
                filter
            })
            .collect();
        Self::new(store, defaults, excluded)
    }

    pub fn defaults(&self) -> &DefaultCodes {
        &self.defaults
    }

    pub fn store(&self) -> &Arc<dyn AreaStore> {
        &self.store
    }

    /// Area, history, children and ancestors for `code` in `year`.
    pub async fn get_area_result(&self, year: i32, code: &AreaCode) -> Result<AreaResult, AreaError> {
        let level = resolve_level(&self.defaults, code);
        debug!(year, %code, %level, "Resolving area");

        let target = AreaQuery::single(AreaFilter::exact(code));
        let (record, candidates) = futures::try_join!(
            self.store.find_area(year, code),
            self.store.find_candidate_votes(Some(year), &target),
        )?;
        let record = record.ok_or_else(|| AreaError::NotFound { year, code: code.clone() })?;

        let (history, sub_areas, parent_areas) = futures::try_join!(
            self.history(&target),
            self.sub_areas(year, level, code),
            self.parent_areas(year, level, code),
        )?;

        let candidates = candidates.iter().map(format::candidate).collect();

        Ok(AreaResult {
            year,
            area: format::area_detail(&record, candidates, history),
            sub_areas,
            parent_areas,
        })
    }

    /// Distinct years with results, newest first.
    pub async fn list_years(&self) -> Result<Vec<i32>, AreaError> {
        let mut years = self.store.list_years().await?;
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        if years.is_empty() {
            return Err(AreaError::NoYears);
        }
        Ok(years)
    }

    async fn history(&self, target: &AreaQuery) -> Result<Vec<HistoryEntry>, DatabaseError> {
        let records = self.store.find_candidate_votes(None, target).await?;
        let mut history: Vec<HistoryEntry> = records.iter().map(format::history_entry).collect();
        history.sort_by_key(|entry| entry.year);
        Ok(history)
    }

    async fn sub_areas(&self, year: i32, level: AreaLevel, code: &AreaCode) -> Result<Vec<SubArea>, DatabaseError> {
        let Some(filter) = child_filter(&self.defaults, level, code) else {
            return Ok(vec![]);
        };
        let query = AreaQuery::single(filter).excluding(&self.excluded);

        let (records, votes) = futures::try_join!(
            self.store.find_areas(year, &query),
            self.store.find_candidate_votes(Some(year), &query),
        )?;

        let mut candidates = format::candidates_by_area(&votes);
        let mut sub_areas: Vec<SubArea> = records
            .iter()
            .map(|record| {
                let area_candidates = candidates.remove(&record.code()).unwrap_or_default();
                format::sub_area(record, area_candidates)
            })
            .collect();

        if level == AreaLevel::Province {
            sort_by_display_order(&mut sub_areas, |sub| sub.name.as_str());
        }
        Ok(sub_areas)
    }

    async fn parent_areas(&self, year: i32, level: AreaLevel, code: &AreaCode) -> Result<Vec<ParentArea>, DatabaseError> {
        let filters = ancestor_filters(&self.defaults, level, code);
        if filters.is_empty() {
            return Ok(vec![]);
        }

        let records = self.store.find_areas(year, &AreaQuery::any_of(filters)).await?;
        let mut parents: Vec<ParentArea> = records.iter().map(format::parent_area).collect();
        // nation, then city, then town
        parents.sort_by_key(|parent| resolve_level(&self.defaults, &parent.code).depth());
        Ok(parents)
    }
}
