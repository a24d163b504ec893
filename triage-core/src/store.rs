use crate::{AnalyzedTask, TaskForm, TaskRecord, ValidationError};

/// Ordered list of tasks waiting to be analyzed.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<TaskRecord>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: TaskRecord) -> Result<&TaskRecord, ValidationError> {
        record.validate()?;
        self.tasks.push(record);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Validates `form` and appends it; the store is untouched on error.
    pub fn add_form(&mut self, form: &TaskForm) -> Result<&TaskRecord, ValidationError> {
        let record = form.validate()?;
        self.add(record)
    }

    /// Removes the task at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<TaskRecord> {
        (index < self.tasks.len()).then(|| self.tasks.remove(index))
    }

    pub fn list(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// The most recently received analysis results.
///
/// Results are replaced wholesale; whichever response is applied last is
/// what gets displayed. Failed requests never touch the cache.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    results: Vec<AnalyzedTask>,
    generation: u64,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, results: Vec<AnalyzedTask>) {
        self.results = results;
        self.generation += 1;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn results(&self) -> &[AnalyzedTask] {
        &self.results
    }

    /// Number of times the cache has been replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
