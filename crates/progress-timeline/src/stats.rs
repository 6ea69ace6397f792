//! Day grouping, ordering and summary statistics.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::format::{day_of_week, format_date, parse_date};
use crate::problem::Problem;
use crate::TimelineResult;

/// A day with at least this many problems gets the large timeline dot.
pub const BUSY_DAY_THRESHOLD: usize = 3;

/// Problems solved on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    /// `dd/mm/yy`
    pub date: String,
    pub problems: Vec<Problem>,
}

impl DayGroup {
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.len() >= BUSY_DAY_THRESHOLD
    }

    /// Spanish weekday of the group, taken from its first problem.
    pub fn day_of_week(&self) -> TimelineResult<Option<&'static str>> {
        self.problems
            .first()
            .map(|p| day_of_week(&p.created_at))
            .transpose()
    }

    /// "1 ejercicio" / "N ejercicios".
    pub fn count_label(&self) -> String {
        match self.len() {
            1 => "1 ejercicio".to_string(),
            n => format!("{} ejercicios", n),
        }
    }
}

/// Group problems by formatted creation date.
///
/// Groups appear in the order their first problem appears in the input;
/// problems keep input order inside each group.
pub fn group_by_date(problems: &[Problem]) -> TimelineResult<Vec<DayGroup>> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for problem in problems {
        let date = format_date(&problem.created_at)?;
        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.problems.push(problem.clone()),
            None => groups.push(DayGroup {
                date,
                problems: vec![problem.clone()],
            }),
        }
    }

    Ok(groups)
}

/// Newest first. Problems created on the same day keep their input order.
pub fn sort_by_date(problems: &[Problem]) -> TimelineResult<Vec<Problem>> {
    let mut keyed = problems
        .iter()
        .map(|p| Ok((parse_date(&p.created_at)?, p)))
        .collect::<TimelineResult<Vec<_>>>()?;

    keyed.sort_by_key(|(date, _)| Reverse(*date));

    Ok(keyed.into_iter().map(|(_, p)| p.clone()).collect())
}

/// Summary numbers shown above the timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseStats {
    pub total_exercises: usize,
    pub active_days: usize,
    pub max_in_one_day: usize,
    /// Formatted date of the busiest day, empty when there are no groups
    pub max_day_date: String,
    pub source_count: BTreeMap<String, usize>,
    pub difficulty_count: BTreeMap<String, usize>,
}

/// Summarize problems and their day groups.
///
/// On ties for the busiest day, the earliest group in `groups` wins.
pub fn calculate_stats(problems: &[Problem], groups: &[DayGroup]) -> ExerciseStats {
    let mut stats = ExerciseStats {
        total_exercises: problems.len(),
        active_days: groups.len(),
        ..Default::default()
    };

    for group in groups {
        if group.len() > stats.max_in_one_day {
            stats.max_in_one_day = group.len();
            stats.max_day_date = group.date.clone();
        }
    }

    for problem in problems {
        *stats.source_count.entry(problem.source.clone()).or_insert(0) += 1;
        *stats
            .difficulty_count
            .entry(problem.difficulty.clone())
            .or_insert(0) += 1;
    }

    stats
}

/// Everything the timeline page renders, computed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub problems: Vec<Problem>,
    pub groups: Vec<DayGroup>,
    pub stats: ExerciseStats,
}

impl Timeline {
    /// Sort newest first, group the sorted list by day, then summarize.
    pub fn build(problems: &[Problem]) -> TimelineResult<Self> {
        let problems = sort_by_date(problems)?;
        let groups = group_by_date(&problems)?;
        let stats = calculate_stats(&problems, &groups);

        tracing::debug!(
            total = stats.total_exercises,
            active_days = stats.active_days,
            "Built timeline"
        );

        Ok(Self {
            problems,
            groups,
            stats,
        })
    }

    /// Parse a dataset and build its timeline.
    pub fn from_json(json: &str) -> TimelineResult<Self> {
        Self::build(&Problem::list_from_json(json)?)
    }
}
