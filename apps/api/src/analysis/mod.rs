// Skill gap analysis: extraction (pluggable), set comparison, and orchestration with the store.
// HTTP handlers live alongside and go through `SkillGapAnalyzer` only.

pub mod analyzer;
pub mod extractor;
pub mod gap;
pub mod handlers;
