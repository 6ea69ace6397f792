//! Solved-problem records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format::{normalize_title, parse_date};
use crate::TimelineResult;

/// One solved programming problem from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Unique slug, also the detail page path segment
    pub name: String,
    /// Path of the solution file
    pub path: String,
    pub has_implementation: bool,
    pub has_tests: bool,
    pub has_explanation: bool,
    pub has_post_solution: bool,
    /// Platform, e.g. "leetcode" or "freecodecamp"
    pub source: String,
    pub series: String,
    pub category: String,
    /// "easy", "medium", "hard" or free text
    pub difficulty: String,
    pub topics: Vec<String>,
    /// `YYYY-MM-DD`
    pub created_at: String,
    pub has_frontmatter: bool,
    /// Human-readable title, may be empty
    #[serde(default)]
    pub title: String,
}

impl Problem {
    /// Parse the dataset's JSON array.
    pub fn list_from_json(json: &str) -> TimelineResult<Vec<Problem>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn created_on(&self) -> TimelineResult<NaiveDate> {
        parse_date(&self.created_at)
    }

    /// The dataset title, or the normalized slug when the title is blank.
    pub fn display_title(&self) -> String {
        if self.title.trim().is_empty() {
            normalize_title(&self.name)
        } else {
            self.title.clone()
        }
    }
}

/// Look up a problem by its slug.
pub fn find_problem<'a>(problems: &'a [Problem], name: &str) -> Option<&'a Problem> {
    problems.iter().find(|p| p.name == name)
}
