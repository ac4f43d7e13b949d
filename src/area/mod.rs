//! Administrative area hierarchy: code defaults, level resolution, child and
//! ancestor predicates, display ordering and result assembly.

pub mod code;
pub mod level;
pub mod order;
pub mod predicate;
pub mod result;
pub mod service;

pub use code::{AreaCode, DefaultCodes, Segment, DEFAULT_CODES};
pub use level::{resolve_level, AreaLevel};
pub use predicate::{ancestor_filters, child_filter, placeholder_filter, AreaFilter, AreaQuery, SegmentMatch};
pub use result::{AreaDetail, AreaResult, CandidateResult, HistoryEntry, ParentArea, SubArea, YearsResult};
pub use service::{AreaError, AreaService};
