//! Ordered composition of tasks

use async_trait::async_trait;

use super::{Task, TaskContext};
use crate::target::{Repo, Scratchpad};
use crate::Result;

/// Applies tasks in order, stopping at the first failure.
///
/// Nothing is rolled back when a task fails; the tasks are expected to be
/// reentrant so the whole sequence can simply be run again.
#[derive(Default)]
pub struct Sequence {
    tasks: Vec<Box<dyn Task>>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to the end of the sequence
    pub fn then(mut self, task: impl Task + 'static) -> Self {
        self.tasks.push(Box::new(task));
        self
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[async_trait]
impl Task for Sequence {
    async fn apply_repo(&self, ctx: &TaskContext, repo: &Repo) -> Result<()> {
        for task in &self.tasks {
            task.apply_repo(ctx, repo).await?;
        }

        Ok(())
    }

    async fn apply_scratchpad(&self, ctx: &TaskContext, scratch: &Scratchpad) -> Result<()> {
        for task in &self.tasks {
            task.apply_scratchpad(ctx, scratch).await?;
        }

        Ok(())
    }
}
