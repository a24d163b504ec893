use crate::{AnalyzedTask, Strategy, Tier};
use std::{cmp::Ordering, fmt::Display};

/// Returns a copy of `tasks` ordered for display under `strategy`.
///
/// The sort is stable: tasks with equal keys keep their relative order, so
/// re-ranking the same input always yields the same output.
pub fn rank(tasks: &[AnalyzedTask], strategy: Strategy) -> Vec<AnalyzedTask> {
    let mut ranked = tasks.to_vec();
    ranked.sort_by(|a, b| compare(a, b, strategy));
    ranked
}

// Adding 0.0 folds -0.0 into 0.0, which `total_cmp` would otherwise order first.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}

pub fn compare(a: &AnalyzedTask, b: &AnalyzedTask, strategy: Strategy) -> Ordering {
    match strategy {
        Strategy::Fastest => cmp_f64(a.hours(), b.hours()),
        Strategy::Impact => b.importance().cmp(&a.importance()),
        // Undated tasks go last.
        Strategy::Deadline => match (a.due(), b.due()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        Strategy::Smart => cmp_f64(b.score(), a.score()),
    }
}

impl AnalyzedTask {
    pub fn tier(&self) -> Tier {
        Tier::classify(self.score())
    }
}

/// One-line description of a ranked result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub strategy: Strategy,
}

impl Summary {
    pub fn new(tasks: &[AnalyzedTask], strategy: Strategy) -> Self {
        Self {
            count: tasks.len(),
            strategy,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "{} task(s) · Strategy: {}", self.count, self.strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn task(title: &str) -> AnalyzedTask {
        AnalyzedTask {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    fn titles(tasks: &[AnalyzedTask]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_deref().unwrap_or("")).collect()
    }

    fn sample() -> Vec<AnalyzedTask> {
        let mut a = task("a");
        a.estimated_hours = Some(5.0);
        a.importance = Some(3);
        a.due_date = Some("2024-03-01".into());
        a.priority_score = Some(85.0);

        let mut b = task("b");
        b.estimated_hours = Some(1.0);
        b.importance = Some(9);
        b.due_date = Some("2024-01-15".into());
        b.priority_score = Some(130.0);

        let mut c = task("c");
        c.estimated_hours = Some(3.0);
        c.importance = Some(1);
        c.due_date = Some("2024-02-10".into());
        c.priority_score = Some(40.0);

        vec![a, b, c]
    }

    #[rstest]
    #[case(Strategy::Fastest, vec!["b", "c", "a"])]
    #[case(Strategy::Impact, vec!["b", "a", "c"])]
    #[case(Strategy::Deadline, vec!["b", "c", "a"])]
    #[case(Strategy::Smart, vec!["b", "a", "c"])]
    fn strategies_order_tasks(#[case] strategy: Strategy, #[case] expected: Vec<&str>) {
        assert_eq!(titles(&rank(&sample(), strategy)), expected);
    }

    #[test]
    fn fastest_orders_by_hours() {
        let hours: Vec<f64> = rank(&sample(), Strategy::Fastest)
            .iter()
            .map(AnalyzedTask::hours)
            .collect();
        assert_eq!(hours, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn impact_orders_by_importance() {
        let importance: Vec<i64> = rank(&sample(), Strategy::Impact)
            .iter()
            .map(AnalyzedTask::importance)
            .collect();
        assert_eq!(importance, vec![9, 3, 1]);
    }

    #[test]
    fn deadline_orders_earliest_first() {
        let mut early = task("early");
        early.due_date = Some("2024-01-15".into());
        let mut late = task("late");
        late.due_date = Some("2024-03-01".into());

        let ranked = rank(&[late, early], Strategy::Deadline);
        let dates: Vec<_> = ranked.iter().map(|t| t.due_date.clone().unwrap()).collect();
        assert_eq!(dates, vec!["2024-01-15", "2024-03-01"]);
    }

    #[test]
    fn deadline_compares_dates_not_text() {
        // As text, " 2024-12-01" sorts before "2024-01-15".
        let mut december = task("december");
        december.due_date = Some(" 2024-12-01".into());
        let mut january = task("january");
        january.due_date = Some("2024-01-15".into());

        assert!(december.due_date < january.due_date);
        let ranked = rank(&[december, january], Strategy::Deadline);
        assert_eq!(titles(&ranked), vec!["january", "december"]);
    }

    #[test]
    fn negative_zero_ties_with_zero_and_missing() {
        let mut negative = task("negative");
        negative.priority_score = Some(-0.0);
        negative.estimated_hours = Some(-0.0);
        let missing = task("missing");
        let mut zero = task("zero");
        zero.priority_score = Some(0.0);
        zero.estimated_hours = Some(0.0);

        let input = [negative, missing, zero];
        assert_eq!(
            titles(&rank(&input, Strategy::Smart)),
            vec!["negative", "missing", "zero"]
        );
        assert_eq!(
            titles(&rank(&input, Strategy::Fastest)),
            vec!["negative", "missing", "zero"]
        );
    }

    #[test]
    fn undated_tasks_sort_after_dated_ones() {
        let mut dated = task("dated");
        dated.due_date = Some("2030-12-31".into());
        let mut garbage = task("garbage");
        garbage.due_date = Some("someday".into());
        let missing = task("missing");

        let ranked = rank(&[missing, garbage, dated], Strategy::Deadline);
        assert_eq!(titles(&ranked), vec!["dated", "missing", "garbage"]);
    }

    #[test]
    fn missing_numbers_count_as_zero() {
        let mut scored = task("scored");
        scored.priority_score = Some(-5.0);
        let unscored = task("unscored");
        let mut high = task("high");
        high.priority_score = Some(10.0);

        let ranked = rank(&[scored, unscored, high], Strategy::Smart);
        assert_eq!(titles(&ranked), vec!["high", "unscored", "scored"]);
    }

    #[rstest]
    #[case(Strategy::Fastest)]
    #[case(Strategy::Impact)]
    #[case(Strategy::Deadline)]
    #[case(Strategy::Smart)]
    fn ties_keep_input_order(#[case] strategy: Strategy) {
        let tasks: Vec<_> = ["first", "second", "third", "fourth"]
            .into_iter()
            .map(|title| {
                let mut t = task(title);
                t.estimated_hours = Some(2.0);
                t.importance = Some(5);
                t.due_date = Some("2024-05-05".into());
                t.priority_score = Some(90.0);
                t
            })
            .collect();

        assert_eq!(
            titles(&rank(&tasks, strategy)),
            vec!["first", "second", "third", "fourth"]
        );
    }

    #[rstest]
    #[case(Strategy::Fastest)]
    #[case(Strategy::Impact)]
    #[case(Strategy::Deadline)]
    #[case(Strategy::Smart)]
    fn ranking_is_idempotent_and_leaves_input_alone(#[case] strategy: Strategy) {
        let input = sample();
        let once = rank(&input, strategy);
        let twice = rank(&once, strategy);

        assert_eq!(once, twice);
        assert_eq!(input, sample());
        assert_eq!(once.len(), input.len());
        for t in &input {
            assert!(once.contains(t));
        }
    }

    #[test]
    fn empty_input_ranks_to_empty_summary() {
        let ranked = rank(&[], Strategy::Smart);
        assert!(ranked.is_empty());

        let summary = Summary::new(&ranked, Strategy::Smart);
        assert!(summary.is_empty());
        assert_eq!(summary.to_string(), "");
    }

    #[test]
    fn summary_names_count_and_strategy() {
        let summary = Summary::new(&sample(), Strategy::Deadline);
        assert_eq!(summary.to_string(), "3 task(s) · Strategy: deadline");
    }

    #[test]
    fn tier_follows_score() {
        let tiers: Vec<Tier> = rank(&sample(), Strategy::Smart)
            .iter()
            .map(AnalyzedTask::tier)
            .collect();
        assert_eq!(tiers, vec![Tier::High, Tier::Medium, Tier::Low]);
    }
}
