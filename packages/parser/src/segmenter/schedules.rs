//! Schedules: the lines after the stop marker, split at ordinal headings.
//!
//! Each schedule starts at a line such as "FIRST SCHEDULE". The first
//! `Article ...` line becomes its reference, the next plain line its title,
//! numbered or lettered lines its items. Anything else extends the last item,
//! or the schedule text when no item has started.

use std::sync::LazyLock;

use regex::Regex;

use crate::classifier::ordinal_word_value;
use crate::text::{append_text, normalize_title};
use crate::types::{Schedule, ScheduleItem};

#[allow(clippy::expect_used)]
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\w+)\s+SCHEDULE\b\s*(.*)$").expect("valid regex")
});

#[allow(clippy::expect_used)]
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\[?\s*(Articles?\s+[0-9].*?)\s*\]?$").expect("valid regex")
});

/// "1. Mombasa." or "(a) The National Flag".
#[allow(clippy::expect_used)]
static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([0-9]+)\.\s+|\(([0-9]+|[a-z]+)\)\s*)(.*)$").expect("valid regex")
});

/// Schedule number and any text after the heading on the same line.
fn schedule_heading(line: &str) -> Option<(u32, &str)> {
    let caps = HEADING_RE.captures(line)?;
    let number = ordinal_word_value(caps.get(1)?.as_str())?;
    let rest = caps.get(2).map_or("", |m| m.as_str().trim());
    Some((number, rest))
}

fn apply_line(schedule: &mut Schedule, line: &str) {
    if let Some(caps) = ITEM_RE.captures(line) {
        let label = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        let text = caps.get(3).map_or("", |m| m.as_str().trim());
        schedule.items.push(ScheduleItem {
            label: label.to_string(),
            text: text.to_string(),
        });
        return;
    }

    if let Some(item) = schedule.items.last_mut() {
        append_text(&mut item.text, line);
        return;
    }

    if schedule.reference.is_empty() {
        if let Some(reference) = REFERENCE_RE.captures(line).and_then(|c| c.get(1)) {
            schedule.reference = reference.as_str().to_string();
            return;
        }
    }

    if schedule.title.is_empty() {
        schedule.title = normalize_title(line);
    } else {
        append_text(&mut schedule.text, line);
    }
}

/// Split the lines after the stop marker into schedules.
///
/// Lines before the first schedule heading belong to no schedule and are
/// reported as a warning.
#[must_use]
pub fn split_schedules(lines: &[String]) -> Vec<Schedule> {
    let mut schedules: Vec<Schedule> = Vec::new();

    for line in lines {
        if let Some((number, rest)) = schedule_heading(line) {
            tracing::debug!(schedule = number, "Found schedule heading");
            let mut schedule = Schedule::new(number);
            if !rest.is_empty() {
                apply_line(&mut schedule, rest);
            }
            schedules.push(schedule);
            continue;
        }

        match schedules.last_mut() {
            Some(schedule) => apply_line(schedule, line),
            None => tracing::warn!(line = %line, "Text before the first schedule heading"),
        }
    }

    schedules
}
