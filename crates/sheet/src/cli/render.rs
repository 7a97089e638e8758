//! Terminal rendering.
//!
//! Every function here turns library data into a `String`; the command
//! handlers decide when to print. Colors come from `colored` and are turned
//! off globally when stdout is not a terminal.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use sheetapp::commands::{CmdMessage, MessageLevel};
use sheetapp::filter::VisibleTopic;
use sheetapp::goals::GoalItem;
use sheetapp::index::DisplayPath;
use sheetapp::model::{Difficulty, Question, Sheet};
use sheetapp::stats::{DifficultyCount, SheetStats, TopicProgress};
use sheetapp::timer::{format_duration, live_elapsed, TimerState};
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const BAR_WIDTH: usize = 20;
const DIFFICULTY_WIDTH: usize = 7;
const EXPANDED: &str = "▾";
const COLLAPSED: &str = "▸";
const FAVORITE: &str = "★";
const RUNNING: &str = "⏱";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn heading(text: &str, dark: bool) -> ColoredString {
    if dark {
        text.bright_cyan().bold()
    } else {
        text.blue().bold()
    }
}

fn difficulty_label(difficulty: Difficulty) -> ColoredString {
    let label = format!("{:<width$}", difficulty.to_string(), width = DIFFICULTY_WIDTH);
    match difficulty.bucket() {
        Difficulty::Easy => label.green(),
        Difficulty::Medium => label.yellow(),
        _ => label.red(),
    }
}

fn ratio(solved: usize, total: usize, pct: u8) -> String {
    format!("{}/{} ({}%)", solved, total, pct)
}

/// The tree listing. Paths are positions in the full sheet, so they stay
/// valid as addresses whatever filter produced `visible`.
pub(super) fn render_sheet(
    sheet: &Sheet,
    visible: &[VisibleTopic<'_>],
    progress: &[TopicProgress],
    stats: &SheetStats,
    dark: bool,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}",
        heading(&sheet.sheet_name, dark),
        ratio(
            stats.solved_questions,
            stats.total_questions,
            stats.overall_progress
        )
        .dimmed()
    );

    if sheet.topics.is_empty() {
        let _ = writeln!(
            out,
            "\n{}",
            "No topics yet. Run `sheet fetch`, `sheet seed --file <path>` or `sheet topic add <title>`."
                .dimmed()
        );
        return out;
    }
    if visible.is_empty() {
        let _ = writeln!(out, "\n{}", "No questions match the current filter.".dimmed());
        return out;
    }

    for vt in visible {
        let Some(t) = sheet.topics.iter().position(|x| x.id == vt.topic.id) else {
            continue;
        };
        let path = DisplayPath::Topic(t + 1);
        let counts = progress
            .iter()
            .find(|p| p.id == vt.topic.id)
            .map(|p| ratio(p.solved, p.total, p.percent()))
            .unwrap_or_default();
        let marker = if vt.expanded { EXPANDED } else { COLLAPSED };
        let title = if progress
            .iter()
            .any(|p| p.id == vt.topic.id && p.is_completed())
        {
            vt.topic.title.green().bold()
        } else {
            vt.topic.title.bold()
        };
        let _ = writeln!(
            out,
            "\n{} {} {}  {}",
            path.to_string().yellow(),
            marker,
            title,
            counts.dimmed()
        );
        if !vt.expanded {
            continue;
        }

        for vs in &vt.sub_topics {
            let Some(s) = vt
                .topic
                .sub_topics
                .iter()
                .position(|x| x.id == vs.sub_topic.id)
            else {
                continue;
            };
            let path = DisplayPath::SubTopic(t + 1, s + 1);
            let solved = vs.questions.iter().filter(|q| q.is_completed).count();
            let marker = if vs.expanded { EXPANDED } else { COLLAPSED };
            let _ = writeln!(
                out,
                "  {} {} {}  {}",
                path.to_string().yellow(),
                marker,
                vs.sub_topic.title,
                format!("{}/{}", solved, vs.questions.len()).dimmed()
            );
            if !vs.expanded {
                continue;
            }
            for q in &vs.questions {
                let Some(i) = vs.sub_topic.questions.iter().position(|x| x.id == q.id) else {
                    continue;
                };
                let path = DisplayPath::Question(t + 1, s + 1, i + 1);
                out.push_str(&question_line(&path, q, now));
                out.push('\n');
            }
        }
    }
    out
}

fn question_line(path: &DisplayPath, q: &Question, now: DateTime<Utc>) -> String {
    let check = if q.is_completed {
        "✓".green()
    } else {
        "·".dimmed()
    };
    let idx = format!("{} ", path);
    let left = format!("    {} ", check);
    let left_width = 6;

    let mut right = String::new();
    if q.is_favorite {
        let _ = write!(right, " {}", FAVORITE.yellow());
    }
    let mut right_width = if q.is_favorite { 2 } else { 0 };

    let tags: String = q.tags.iter().map(|t| format!(" #{}", t)).collect();
    right_width += tags.width();
    let _ = write!(right, "{}", tags.dimmed());

    let elapsed = live_elapsed(q, now);
    let running = TimerState::of(q).is_running();
    if elapsed > 0 || running {
        let time = format_duration(elapsed);
        right_width += time.width() + 1;
        let _ = write!(right, " {}", time.dimmed());
        if running {
            right_width += 2;
            let _ = write!(right, " {}", RUNNING.red());
        }
    }

    let fixed = left_width + idx.width() + DIFFICULTY_WIDTH + 1 + right_width;
    let available = LINE_WIDTH.saturating_sub(fixed).max(12);
    let title = truncate_to_width(&q.title, available);
    let padding = available.saturating_sub(title.width());
    let title = if q.is_completed {
        title.dimmed()
    } else {
        title.normal()
    };

    format!(
        "{}{}{}{} {}{}",
        left,
        idx.yellow(),
        title,
        " ".repeat(padding),
        difficulty_label(q.difficulty),
        right
    )
}

pub(super) fn render_stats(stats: &SheetStats, dark: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}",
        heading("Progress", dark),
        progress_bar(stats.overall_progress)
    );
    let _ = writeln!(
        out,
        "  Solved     {}/{} ({}%)",
        stats.solved_questions, stats.total_questions, stats.overall_progress
    );
    let _ = writeln!(
        out,
        "  Topics     {}/{} completed",
        stats.completed_topics, stats.total_topics
    );
    let _ = writeln!(out, "  Favorites  {}", stats.favorite_count);

    let _ = writeln!(out, "\n{}", heading("By difficulty", dark));
    for (label, count) in [
        (Difficulty::Easy, stats.easy),
        (Difficulty::Medium, stats.medium),
        (Difficulty::Hard, stats.hard),
    ] {
        let _ = writeln!(
            out,
            "  {} {}",
            difficulty_label(label),
            difficulty_counts(count)
        );
    }

    if !stats.topic_breakdown.is_empty() {
        let _ = writeln!(out, "\n{}", heading("By topic", dark));
        let name_width = stats
            .topic_breakdown
            .iter()
            .map(|t| t.title.width())
            .max()
            .unwrap_or(0)
            .min(40);
        for topic in &stats.topic_breakdown {
            let title = truncate_to_width(&topic.title, name_width + 1);
            let padding = name_width.saturating_sub(title.width());
            let _ = writeln!(
                out,
                "  {}{}  {}  {}",
                title,
                " ".repeat(padding),
                progress_bar(topic.percent()),
                format!("{}/{}", topic.solved, topic.total).dimmed()
            );
        }
    }
    out
}

fn difficulty_counts(count: DifficultyCount) -> String {
    format!(
        "{}/{} ({}%)",
        count.solved,
        count.total,
        sheetapp::stats::percent(count.solved, count.total)
    )
}

fn progress_bar(pct: u8) -> String {
    let filled = (pct as usize * BAR_WIDTH + 50) / 100;
    format!(
        "{}{} {:>3}%",
        "█".repeat(filled).green(),
        "░".repeat(BAR_WIDTH - filled).dimmed(),
        pct
    )
}

pub(super) fn render_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return format!("{}\n", "No tags in use.".dimmed());
    }
    tags.iter().map(|t| format!("#{}\n", t)).collect()
}

pub(super) fn render_goals(goals: &[GoalItem]) -> String {
    if goals.is_empty() {
        return format!("{}\n", "No goals yet. Add one with `sheet goal add <text>`.".dimmed());
    }
    let mut out = String::new();
    for (i, goal) in goals.iter().enumerate() {
        let line = if goal.done {
            format!("{} {}", "[x]".green(), goal.text.dimmed().strikethrough())
        } else {
            format!("[ ] {}", goal.text)
        };
        let _ = writeln!(out, "{} {}", format!("{:>2}.", i + 1).yellow(), line);
    }
    out
}

/// One question's timer, e.g. `1.2.3 Two Sum  2m 05s (running)`.
pub(super) fn render_timer(path: &str, q: &Question, now: DateTime<Utc>) -> String {
    let state = if TimerState::of(q).is_running() {
        format!("{} running", RUNNING).red().to_string()
    } else {
        "stopped".dimmed().to_string()
    };
    format!(
        "{} {}  {}  {}\n",
        path.yellow(),
        q.title,
        format_duration(live_elapsed(q, now)),
        state
    )
}

pub(super) fn render_notes(q: &Question) -> String {
    match q.notes.as_deref() {
        Some(notes) if !notes.trim().is_empty() => format!("{}\n", notes),
        _ => format!("{}\n", "No notes.".dimmed()),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
