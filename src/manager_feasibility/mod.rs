pub mod models;
mod rules;

use crate::manager_feasibility::models::{Conditions, JobSelection, JobType, Judgement, RuleSet, Verdict};

/// Returns the verdict for a single job under the given conditions.
///
/// Rules are checked in a fixed order per job and the first match wins, an observation
/// matching no rule is permitted. Jobs outside the legacy catalog are evaluated with the
/// current rules, callers are expected to reject them earlier via `RuleSet::supports`.
///
/// # Arguments
///
/// * 'rule_set' - rule table revision
/// * 'job' - job type to evaluate
/// * 'c' - weather readings and site facts
pub fn evaluate(rule_set: RuleSet, job: JobType, c: &Conditions) -> Verdict {
    match rule_set {
        RuleSet::Current => rules::current(job, c),
        RuleSet::Legacy => rules::legacy(job, c).unwrap_or_else(|| rules::current(job, c)),
    }
}

/// Returns the judgement for a job selection, evaluating every job in the rule set's
/// catalog when all jobs are selected.
///
/// # Arguments
///
/// * 'rule_set' - rule table revision
/// * 'selection' - single job or all jobs
/// * 'c' - weather readings and site facts
pub fn assess(rule_set: RuleSet, selection: JobSelection, c: &Conditions) -> Judgement {
    match selection {
        JobSelection::Single(job) => Judgement::Single(evaluate(rule_set, job, c)),
        JobSelection::All => Judgement::Composite(
            rule_set.catalog()
                .iter()
                .map(|job| (*job, evaluate(rule_set, *job, c)))
                .collect(),
        ),
    }
}
