use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::evaluator::{evaluate, Score};

/// How a word commit treats a typed word that differs from its target.
///
/// Chosen once per run and never switched mid-run: the two produce
/// different statistics for the same keystrokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[derive(ValueEnum, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CommitPolicy {
    /// score every commit and move on, right or wrong
    #[default]
    AlwaysAdvance,
    /// only an exact match is scored and advances; otherwise the input stays
    StrictAdvance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitDecision {
    /// fold the score into the counters and move to the next word
    Advance(Score),
    /// keep the input on screen for correction
    Retain,
}

pub fn decide(policy: CommitPolicy, target: &str, typed: &str) -> CommitDecision {
    match policy {
        CommitPolicy::AlwaysAdvance => CommitDecision::Advance(evaluate(target, typed)),
        CommitPolicy::StrictAdvance if typed == target => {
            CommitDecision::Advance(evaluate(target, typed))
        }
        CommitPolicy::StrictAdvance => CommitDecision::Retain,
    }
}
