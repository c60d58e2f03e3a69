// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders ranked goals into the plain-text context block handed to the
//! answer generator.
//!
//! Each goal becomes one block:
//!
//! ```text
//! **Platform reliability** (owned by Sarah Chen):
//! - Department: Engineering
//! - Health Status: On Track
//! - Last Update: SLO coverage reached 80%
//! - Key Milestones:
//!   • SLO dashboards (Status: On Track)
//! ```
//!
//! Blocks are joined with [`RECORD_SEPARATOR`]. Field values never contain a
//! line break, so the separator can always be split on.

use std::borrow::Cow;

use goalscope_core::{GoalRecord, ScoredRecord};

/// Placed between goal blocks.
pub const RECORD_SEPARATOR: &str = "\n---\n";

/// Returned instead of an empty context.
pub const NO_DATA: &str = "No relevant goals or milestones found.";

/// Milestones listed per goal.
pub const MAX_MILESTONES: usize = 3;

const MISSING: &str = "N/A";
const NO_UPDATE: &str = "No update available";

/// Render the first `max_records` results, in order.
pub fn assemble(results: &[ScoredRecord], max_records: usize) -> String {
    let blocks: Vec<String> = results
        .iter()
        .take(max_records)
        .map(|r| render_block(&r.record))
        .collect();
    if blocks.is_empty() {
        return NO_DATA.to_string();
    }
    blocks.join(RECORD_SEPARATOR)
}

/// Split an assembled context back into its blocks.
pub fn split_blocks(context: &str) -> Vec<&str> {
    if context == NO_DATA {
        return Vec::new();
    }
    context.split(RECORD_SEPARATOR).collect()
}

/// One goal's block.
pub fn render_block(record: &GoalRecord) -> String {
    let update = match record.last_update() {
        "" => Cow::Borrowed(NO_UPDATE),
        text => single_line(text),
    };
    let mut lines = vec![
        format!(
            "**{}** (owned by {}):",
            or_missing(record.title()),
            or_missing(record.owner())
        ),
        format!("- Department: {}", or_missing(record.department())),
        format!("- Health Status: {}", or_missing(record.health())),
        format!("- Last Update: {update}"),
    ];

    let mut milestones = record
        .milestones
        .iter()
        .filter(|m| !m.title().is_empty())
        .take(MAX_MILESTONES)
        .peekable();
    if milestones.peek().is_some() {
        lines.push("- Key Milestones:".to_string());
        lines.extend(milestones.map(|m| match m.health() {
            "" => format!("  • {}", single_line(m.title())),
            health => format!("  • {} (Status: {})", single_line(m.title()), single_line(health)),
        }));
    }
    lines.join("\n")
}

fn or_missing(value: &str) -> Cow<'_, str> {
    if value.is_empty() {
        Cow::Borrowed(MISSING)
    } else {
        single_line(value)
    }
}

/// Collapse every run of whitespace containing a line break into one space.
fn single_line(value: &str) -> Cow<'_, str> {
    if !value.contains(['\n', '\r']) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.split_whitespace().collect::<Vec<_>>().join(" "))
}
