use crate::{
    client::ScoringClient,
    session::Session,
    status,
    table::render_results,
};
use anyhow::{bail, Context};
use clap::Args;
use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};
use triage_core::{ScoringWeights, Strategy, TaskRecord, TaskStore};

#[derive(Debug, Args)]
pub struct StrategyArgs {
    #[clap(
        long,
        default_value = "smart",
        help = "Sort strategy: smart, fastest, impact or deadline"
    )]
    strategy: String,
}

impl StrategyArgs {
    pub fn resolve(&self) -> Strategy {
        resolve_strategy(&self.strategy)
    }
}

fn unknown_strategy_warning(name: &str, strategy: Strategy) -> Option<String> {
    (strategy.to_string() != name.trim().to_ascii_lowercase())
        .then(|| format!("Unknown strategy {name:?}, using {strategy}"))
}

/// Parses a strategy name, warning when it falls back to the default.
pub fn resolve_strategy(name: &str) -> Strategy {
    let strategy = Strategy::parse_or_default(name);
    if let Some(warning) = unknown_strategy_warning(name, strategy) {
        status::warning(warning);
    }
    strategy
}

#[derive(Debug, Default, Args)]
pub struct WeightArgs {
    #[clap(long, help = "Points per importance level")]
    importance_weight: Option<i64>,
    #[clap(long, help = "Bonus for tasks under two hours")]
    quick_win_bonus: Option<i64>,
    #[clap(long, help = "Penalty for tasks over eight hours")]
    high_effort_penalty: Option<i64>,
    #[clap(long, help = "Bonus for tasks with dependencies")]
    dependency_bonus: Option<i64>,
    #[clap(long, help = "Bonus for overdue tasks")]
    overdue_bonus: Option<i64>,
    #[clap(long, help = "Bonus for tasks due within three days")]
    due_soon_bonus: Option<i64>,
    #[clap(long, help = "Bonus for tasks due within a week")]
    due_week_bonus: Option<i64>,
    #[clap(long, help = "Bonus for tasks due later than a week")]
    low_urgency_bonus: Option<i64>,
}

impl From<WeightArgs> for ScoringWeights {
    fn from(args: WeightArgs) -> Self {
        Self {
            importance_weight: args.importance_weight,
            quick_win_bonus: args.quick_win_bonus,
            high_effort_penalty: args.high_effort_penalty,
            dependency_bonus: args.dependency_bonus,
            overdue_bonus: args.overdue_bonus,
            due_soon_bonus: args.due_soon_bonus,
            due_week_bonus: args.due_week_bonus,
            low_urgency_bonus: args.low_urgency_bonus,
        }
    }
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[clap(
        long,
        required = true,
        help = "JSON file holding an array of tasks, - for stdin"
    )]
    file: PathBuf,

    #[command(flatten)]
    strategy: StrategyArgs,

    #[command(flatten)]
    weights: WeightArgs,
}

fn read_tasks(path: &Path) -> anyhow::Result<Vec<TaskRecord>> {
    let raw = if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read tasks from stdin")?;
        raw
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&raw).context("Expected a JSON array of tasks")
}

/// Validates every record into a fresh store, naming the first bad one.
pub fn load_store(records: Vec<TaskRecord>) -> anyhow::Result<TaskStore> {
    let mut store = TaskStore::new();
    for (index, record) in records.into_iter().enumerate() {
        store
            .add(record)
            .with_context(|| format!("Task #{} is invalid", index + 1))?;
    }

    if store.is_empty() {
        bail!("Add at least one task before analyzing.")
    }

    Ok(store)
}

pub async fn analyze_command(args: AnalyzeArgs, client: ScoringClient) -> anyhow::Result<()> {
    let strategy = args.strategy.resolve();
    let store = load_store(read_tasks(&args.file)?)?;

    status::progress("Analyzing tasks...");
    let results = client
        .analyze(store.list(), &args.weights.into())
        .await
        .map_err(|error| anyhow::anyhow!(error.status_message("Failed to analyze tasks")))?;

    println!("{}", render_results(&results, strategy));
    status::success("Analysis complete.");
    Ok(())
}

#[derive(Debug, Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    strategy: StrategyArgs,

    #[command(flatten)]
    weights: WeightArgs,
}

pub async fn suggest_command(args: SuggestArgs, client: ScoringClient) -> anyhow::Result<()> {
    let strategy = args.strategy.resolve();

    status::progress("Fetching suggested tasks...");
    let results = client
        .suggest(&args.weights.into())
        .await
        .map_err(|error| anyhow::anyhow!(error.status_message("Failed to fetch suggestions")))?;

    println!("{}", render_results(&results, strategy));
    status::success("Loaded suggested tasks.");
    Ok(())
}

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(flatten)]
    strategy: StrategyArgs,

    #[command(flatten)]
    weights: WeightArgs,
}

pub async fn session_command(args: SessionArgs, client: ScoringClient) -> anyhow::Result<()> {
    let strategy = args.strategy.resolve();
    Session::new(client, strategy, args.weights.into()).run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(title: &str) -> TaskRecord {
        TaskRecord {
            title: title.into(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            importance: 4,
            estimated_hours: 2.0,
            dependencies: vec![],
        }
    }

    #[test]
    fn load_store_keeps_file_order() {
        let store = load_store(vec![record("b"), record("a")]).unwrap();
        let titles: Vec<_> = store.list().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    #[test]
    fn load_store_names_the_invalid_task() {
        let error = load_store(vec![record("ok"), record("")]).unwrap_err();
        assert_eq!(error.to_string(), "Task #2 is invalid");
        assert_eq!(error.root_cause().to_string(), "title is required");
    }

    #[test]
    fn load_store_refuses_empty_input() {
        let error = load_store(vec![]).unwrap_err();
        assert_eq!(error.to_string(), "Add at least one task before analyzing.");
    }

    #[test]
    fn tasks_are_read_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"[{"title": "Ship", "due_date": "2024-03-01", "importance": 8, "estimated_hours": 3}]"#,
        )
        .unwrap();

        let records = read_tasks(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Ship");
        assert_eq!(records[0].estimated_hours, 3.0);
        assert!(records[0].dependencies.is_empty());
    }

    #[test]
    fn unreadable_or_invalid_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        let error = read_tasks(&missing).unwrap_err();
        assert!(error.to_string().starts_with("Failed to read "));

        let object = dir.path().join("object.json");
        fs::write(&object, r#"{"title": "Ship"}"#).unwrap();
        let error = read_tasks(&object).unwrap_err();
        assert_eq!(error.to_string(), "Expected a JSON array of tasks");
    }

    #[test]
    fn unknown_strategies_warn() {
        assert_eq!(unknown_strategy_warning("impact", Strategy::Impact), None);
        assert_eq!(unknown_strategy_warning(" Deadline ", Strategy::Deadline), None);
        assert_eq!(
            unknown_strategy_warning("balanced", Strategy::Smart).as_deref(),
            Some("Unknown strategy \"balanced\", using smart")
        );
        assert_eq!(resolve_strategy("balanced"), Strategy::Smart);
        assert_eq!(resolve_strategy("fastest"), Strategy::Fastest);
    }
}
