//! Colour choices for difficulty chips and problem sources.

use serde::Serialize;

/// Chip colour role for a difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipTone {
    Success,
    Warning,
    Error,
    Default,
}

/// easy → success, medium → warning, hard → error, anything else → default.
pub fn difficulty_tone(difficulty: &str) -> ChipTone {
    match difficulty.to_lowercase().as_str() {
        "easy" => ChipTone::Success,
        "medium" => ChipTone::Warning,
        "hard" => ChipTone::Error,
        _ => ChipTone::Default,
    }
}

/// Brand colour of a problem source, grey when unknown.
pub fn source_color(source: &str) -> &'static str {
    match source.to_lowercase().as_str() {
        "leetcode" => "#FFA116",
        "freecodecamp" => "#0A0A23",
        _ => "#666",
    }
}
