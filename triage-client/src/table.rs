use tabled::{
    builder::Builder,
    settings::{
        object::{Columns, Rows},
        Color, Style, Width,
    },
};
use triage_core::{rank, AnalyzedTask, Strategy, Summary, TaskRecord, Tier, DATE_FORMAT};

const REASON_WIDTH: usize = 48;

fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".into(), |value| value.to_string())
}

fn title_cell(task: &AnalyzedTask) -> String {
    let title = task
        .title
        .clone()
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "(No title)".into());

    if task.is_valid() {
        title
    } else {
        format!("{title} (rejected)")
    }
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::High => Color::FG_RED,
        Tier::Medium => Color::FG_YELLOW,
        Tier::Low => Color::FG_GREEN,
    }
}

/// Ranks `results` under `strategy` and renders them as a table with a
/// summary line on top.
pub fn render_results(results: &[AnalyzedTask], strategy: Strategy) -> String {
    if results.is_empty() {
        return "No results yet. Analyze tasks or get suggestions.".into();
    }

    let ranked = rank(results, strategy);

    let mut builder = Builder::new();
    builder.push_record([
        "Title",
        "Priority",
        "Score",
        "Due",
        "Importance",
        "Effort",
        "Reason",
    ]);

    for task in &ranked {
        builder.push_record([
            title_cell(task),
            task.tier().badge().to_string(),
            task.score().to_string(),
            or_na(task.due_date.as_deref()),
            or_na(task.importance),
            task.estimated_hours
                .map_or_else(|| "N/A".into(), |hours| format!("{hours}h")),
            task.reason.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::modern_rounded())
        .modify(Columns::last(), Width::wrap(REASON_WIDTH).keep_words())
        .modify(Rows::first(), Color::FG_WHITE | Color::BOLD);

    for (index, task) in ranked.iter().enumerate() {
        table.modify(Rows::single(index + 1), tier_color(task.tier()));
    }

    format!("{}\n{table}", Summary::new(&ranked, strategy))
}

/// Renders the tasks waiting to be analyzed, numbered from 1.
pub fn render_pending(tasks: &[TaskRecord]) -> String {
    if tasks.is_empty() {
        return "No tasks added yet.".into();
    }

    let mut builder = Builder::new();
    builder.push_record(["#", "Title", "Due", "Importance", "Hours", "Depends on"]);

    for (index, task) in tasks.iter().enumerate() {
        builder.push_record([
            (index + 1).to_string(),
            task.title.clone(),
            task.due_date.format(DATE_FORMAT).to_string(),
            task.importance.to_string(),
            task.estimated_hours.to_string(),
            task.dependencies.join(", "),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::modern_rounded())
        .modify(Rows::first(), Color::FG_WHITE | Color::BOLD);
    table.to_string()
}
