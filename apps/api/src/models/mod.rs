pub mod analysis;
pub mod candidate;
pub mod job;

pub use analysis::{NewSkillAnalysis, SkillAnalysisRow};
pub use candidate::{CandidateResumeRow, NewCandidateResume};
pub use job::{JobDescriptionRow, NewJobDescription};

use crate::store::{StoreError, Table};

/// Converts a skill list length to the stored `INTEGER` count, refusing lengths that
/// would not fit instead of wrapping.
fn skill_count(table: Table, len: usize) -> Result<i32, StoreError> {
    i32::try_from(len).map_err(|_| {
        StoreError::InvalidRecord(format!(
            "{table} record has {len} skills, more than can be stored"
        ))
    })
}
