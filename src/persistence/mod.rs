use crate::task::{Dependency, Task, TaskScheduleUpdate};
use serde_json::Error as SerdeJsonError;
use std::collections::HashSet;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    Csv(csv::Error),
    InvalidData(String),
    TaskNotFound(i32),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            PersistenceError::TaskNotFound(id) => write!(f, "task {id} not found"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// The engine's only boundary: a task-storage collaborator supplying the
/// project snapshot and receiving the computed schedule fields.
pub trait TaskStore {
    fn load_tasks(&self, project_id: i32) -> PersistenceResult<Vec<Task>>;
    fn load_dependencies(&self, project_id: i32) -> PersistenceResult<Vec<Dependency>>;
    fn save_task_schedule(
        &self,
        task_id: i32,
        update: &TaskScheduleUpdate,
    ) -> PersistenceResult<()>;
}

/// Import-time sanity checks. The engine itself is permissive (it treats a
/// date-requiring constraint without a date as absent); stores reject such
/// rows up front so bad data is caught where it enters.
pub fn validate_tasks(tasks: &[Task]) -> PersistenceResult<()> {
    let mut seen = HashSet::new();
    for task in tasks {
        if !seen.insert(task.id) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        if task.constraint_type.requires_date() && task.constraint_date.is_none() {
            return Err(PersistenceError::InvalidData(format!(
                "task {} constraint {} requires a date",
                task.id,
                task.constraint_type.as_str()
            )));
        }
        if let Some(hours) = task.estimated_hours {
            if !hours.is_finite() {
                return Err(PersistenceError::InvalidData(format!(
                    "task {} has non-finite estimated_hours",
                    task.id
                )));
            }
        }
    }
    Ok(())
}

pub mod file;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    ProjectSnapshot, load_dependencies_from_csv, load_project_from_json, load_tasks_from_csv,
    save_dependencies_to_csv, save_project_to_json, save_tasks_to_csv,
};
pub use memory::InMemoryTaskStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteTaskStore;
