pub mod area;
pub mod candidate;

pub use area::AreaRecord;
pub use candidate::{CandidateVoteRecord, YearRecord};
