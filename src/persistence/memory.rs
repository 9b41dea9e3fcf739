use super::{PersistenceError, PersistenceResult, TaskStore};
use crate::task::{Dependency, Task, TaskScheduleUpdate};
use std::sync::Mutex;

/// Mutex-backed store for tests and embedders that already hold the
/// project snapshot in memory.
#[derive(Default)]
pub struct InMemoryTaskStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    dependencies: Vec<Dependency>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a task, replacing any existing task with the same id.
    pub fn insert_task(&self, task: Task) {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if let Some(existing) = inner.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        } else {
            inner.tasks.push(task);
        }
    }

    pub fn insert_dependency(&self, dependency: Dependency) {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.dependencies.push(dependency);
    }

    pub fn task(&self, task_id: i32) -> Option<Task> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        inner.tasks.iter().find(|t| t.id == task_id).cloned()
    }
}

impl TaskStore for InMemoryTaskStore {
    fn load_tasks(&self, project_id: i32) -> PersistenceResult<Vec<Task>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    fn load_dependencies(&self, project_id: i32) -> PersistenceResult<Vec<Dependency>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        // An edge belongs to the project if either endpoint does; dangling
        // edges are the graph builder's concern, not ours.
        let deps = inner
            .dependencies
            .iter()
            .filter(|dep| {
                inner.tasks.iter().any(|t| {
                    t.project_id == project_id
                        && (t.id == dep.predecessor_id || t.id == dep.successor_id)
                })
            })
            .copied()
            .collect();
        Ok(deps)
    }

    fn save_task_schedule(
        &self,
        task_id: i32,
        update: &TaskScheduleUpdate,
    ) -> PersistenceResult<()> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(PersistenceError::TaskNotFound(task_id))?;
        task.apply_schedule(update);
        Ok(())
    }
}
