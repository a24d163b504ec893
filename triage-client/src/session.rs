use crate::{
    client::ScoringClient,
    commands::resolve_strategy,
    status,
    table::{render_pending, render_results},
};
use anyhow::{bail, Context};
use std::{io::Write, str::FromStr};
use tokio::io::{AsyncBufReadExt, BufReader};
use triage_core::{ResultCache, ScoringWeights, Strategy, TaskForm, TaskStore};

const HELP: &str = "\
Commands:
  add <title> | <due YYYY-MM-DD> | <importance> | <hours> [| <dep, dep...>]
  remove <n>          remove the n-th pending task
  list                show pending tasks
  analyze             score pending tasks
  suggest             fetch suggested tasks
  strategy <name>     smart, fastest, impact or deadline
  show                show the last results
  clear               forget the last results
  help
  quit";

#[derive(Debug, PartialEq)]
pub enum SessionCommand {
    Add(TaskForm),
    Remove(usize),
    List,
    Analyze,
    Suggest,
    Strategy(String),
    Show,
    Clear,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;
    fn from_str(line: &str) -> anyhow::Result<Self> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));

        Ok(match name.to_ascii_lowercase().as_str() {
            "add" => {
                let mut fields = rest.splitn(5, '|').map(str::trim).map(String::from);
                let mut next = || fields.next().unwrap_or_default();
                Self::Add(TaskForm {
                    title: next(),
                    due_date: next(),
                    importance: next(),
                    estimated_hours: next(),
                    dependencies: next(),
                })
            }
            "remove" | "rm" => Self::Remove(
                rest.parse()
                    .with_context(|| format!("Expected a task number, got {rest:?}"))?,
            ),
            "list" | "ls" => Self::List,
            "analyze" => Self::Analyze,
            "suggest" => Self::Suggest,
            "strategy" => Self::Strategy(rest.to_string()),
            "show" => Self::Show,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => bail!("Unknown command {name:?}, type help for a list of commands"),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive, in-memory session. Nothing outlives the process.
pub struct Session {
    client: ScoringClient,
    store: TaskStore,
    results: ResultCache,
    strategy: Strategy,
    weights: ScoringWeights,
}

impl Session {
    pub fn new(client: ScoringClient, strategy: Strategy, weights: ScoringWeights) -> Self {
        Self {
            client,
            store: TaskStore::new(),
            results: ResultCache::new(),
            strategy,
            weights,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        println!("{HELP}");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<SessionCommand>() {
                Ok(command) => command,
                Err(error) => {
                    status::failure(error);
                    continue;
                }
            };

            if self.handle(command).await == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    pub async fn handle(&mut self, command: SessionCommand) -> Flow {
        match command {
            SessionCommand::Add(form) => match self.store.add_form(&form) {
                Ok(record) => {
                    tracing::debug!("Added task {:?}", record.title);
                    status::success("Task added.");
                }
                Err(error) => status::failure(format!(
                    "Please fill all required fields (title, due date, importance, hours): {error}"
                )),
            },
            SessionCommand::Remove(position) => {
                match position.checked_sub(1).and_then(|index| self.store.remove_at(index)) {
                    Some(record) => status::success(format!("Removed {:?}.", record.title)),
                    None => status::warning(format!("No task at position {position}.")),
                }
                println!("{}", render_pending(self.store.list()));
            }
            SessionCommand::List => println!("{}", render_pending(self.store.list())),
            SessionCommand::Analyze => self.analyze().await,
            SessionCommand::Suggest => self.suggest().await,
            SessionCommand::Strategy(name) => {
                self.strategy = resolve_strategy(&name);
                status::success(format!("Strategy set to {}.", self.strategy));
                if !self.results.is_empty() {
                    self.show();
                }
            }
            SessionCommand::Show => self.show(),
            SessionCommand::Clear => {
                self.results.clear();
                status::success("Results cleared.");
            }
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    fn show(&self) {
        println!("{}", render_results(self.results.results(), self.strategy));
    }

    async fn analyze(&mut self) {
        if self.store.is_empty() {
            status::failure("Add at least one task before analyzing.");
            return;
        }

        status::progress("Analyzing tasks...");
        match self.client.analyze(self.store.list(), &self.weights).await {
            Ok(results) => {
                self.results.replace(results);
                tracing::debug!("Showing result set #{}", self.results.generation());
                self.show();
                status::success("Analysis complete.");
            }
            Err(error) => status::failure(error.status_message("Failed to analyze tasks")),
        }
    }

    async fn suggest(&mut self) {
        status::progress("Fetching suggested tasks...");
        match self.client.suggest(&self.weights).await {
            Ok(results) => {
                self.results.replace(results);
                tracing::debug!("Showing result set #{}", self.results.generation());
                self.show();
                status::success("Loaded suggested tasks.");
            }
            Err(error) => status::failure(error.status_message("Failed to fetch suggestions")),
        }
    }
}
