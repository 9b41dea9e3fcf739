pub mod calculations;
pub mod calendar;
pub mod graph;
pub mod persistence;
pub mod schedule;
pub mod task;

pub use calendar::WorkCalendar;
pub use graph::{GraphBuilder, ScheduleDag};
#[cfg(feature = "sqlite")]
pub use persistence::SqliteTaskStore;
pub use persistence::{
    InMemoryTaskStore, PersistenceError, ProjectSnapshot, TaskStore, load_dependencies_from_csv,
    load_project_from_json, load_tasks_from_csv, save_dependencies_to_csv, save_project_to_json,
    save_tasks_to_csv, validate_tasks,
};
pub use schedule::{ConstraintConflict, ScheduleResult, Scheduler, SchedulerError};
pub use task::{
    ConstraintType, Dependency, DependencyKind, DependencyLink, ScheduleTask, Task,
    TaskScheduleUpdate,
};
