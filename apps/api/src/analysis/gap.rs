//! Gap analysis — set comparison of required job skills against candidate skills.
//!
//! Skills are case-sensitive strings. Duplicates collapse during comparison, and results
//! keep the first-occurrence order of the job skill list.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which job skill count divides the missing/matching counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenominatorPolicy {
    /// Length of the job skill list as given, duplicates included.
    /// With duplicates the two percentages no longer sum to 100.
    #[default]
    Raw,
    /// Number of distinct job skills. Percentages always sum to 100.
    Distinct,
}

#[derive(Debug, Error)]
#[error("unknown denominator policy '{0}'")]
pub struct ParsePolicyError(String);

impl FromStr for DenominatorPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "distinct" => Ok(Self::Distinct),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

impl fmt::Display for DenominatorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => f.write_str("raw"),
            Self::Distinct => f.write_str("distinct"),
        }
    }
}

/// Result of comparing a job's skills against a candidate's skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub missing_skills: Vec<String>,
    pub matching_skills: Vec<String>,
    pub gap_percentage: f64,  // 0 – 100
    pub match_percentage: f64, // 0 – 100
}

/// Compares `job_skills` against `candidate_skills`.
///
/// An empty job list yields 0 for both percentages.
pub fn analyze_skill_gap<J, C>(
    job_skills: &[J],
    candidate_skills: &[C],
    policy: DenominatorPolicy,
) -> SkillGapReport
where
    J: AsRef<str>,
    C: AsRef<str>,
{
    let candidate: HashSet<&str> = candidate_skills.iter().map(|s| s.as_ref()).collect();

    let mut seen: HashSet<&str> = HashSet::with_capacity(job_skills.len());
    let mut missing_skills = Vec::new();
    let mut matching_skills = Vec::new();

    for skill in job_skills.iter().map(|s| s.as_ref()) {
        if !seen.insert(skill) {
            continue;
        }
        if candidate.contains(skill) {
            matching_skills.push(skill.to_string());
        } else {
            missing_skills.push(skill.to_string());
        }
    }

    let denominator = match policy {
        DenominatorPolicy::Raw => job_skills.len(),
        DenominatorPolicy::Distinct => seen.len(),
    };

    SkillGapReport {
        gap_percentage: percentage(missing_skills.len(), denominator),
        match_percentage: percentage(matching_skills.len(), denominator),
        missing_skills,
        matching_skills,
    }
}

fn percentage(count: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        count as f64 / denominator as f64 * 100.0
    }
}
