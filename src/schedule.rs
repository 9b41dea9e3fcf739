use crate::calculations::{BackwardPass, FloatCalculator, ForwardPass};
use crate::calendar::WorkCalendar;
use crate::graph::{GraphBuilder, ScheduleDag};
use crate::persistence::{PersistenceError, TaskStore};
use crate::task::{ConstraintType, TaskScheduleUpdate};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum SchedulerError {
    Storage(PersistenceError),
    CyclicDependency,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::Storage(err) => write!(f, "storage error: {err}"),
            SchedulerError::CyclicDependency => {
                write!(f, "cyclic dependency detected in task graph")
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

impl From<PersistenceError> for SchedulerError {
    fn from(value: PersistenceError) -> Self {
        Self::Storage(value)
    }
}

/// A hard constraint date that contradicted the graph-implied date. The
/// constraint wins; both dates are surfaced for the caller to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstraintConflict {
    pub task_id: i32,
    pub constraint: ConstraintType,
    pub graph_implied: NaiveDate,
    pub forced: NaiveDate,
}

/// Outcome of one scheduling run. Created fresh per invocation; callers may
/// log it but it is never persisted itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleResult {
    pub success: bool,
    pub message: String,
    pub tasks_updated: usize,
    pub critical_path_length: i64,
    pub project_end_date: Option<NaiveDate>,
    pub critical_tasks: Vec<i32>,
    pub constraint_conflicts: Vec<ConstraintConflict>,
}

impl ScheduleResult {
    fn empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            tasks_updated: 0,
            critical_path_length: 0,
            project_end_date: None,
            critical_tasks: Vec::new(),
            constraint_conflicts: Vec::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::empty(message)
        }
    }
}

/// Sequences one full recomputation: load snapshot, build graph, forward
/// pass, backward pass, floats, persist. Stateless; holds only a borrow of
/// the task store, so concurrent runs over different projects are safe.
/// Runs against the same project must be serialized by the caller.
pub struct Scheduler<'a, S: TaskStore + ?Sized> {
    store: &'a S,
    calendar: WorkCalendar,
    builder: GraphBuilder,
}

impl<'a, S: TaskStore + ?Sized> Scheduler<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            calendar: WorkCalendar::new(),
            builder: GraphBuilder::new(),
        }
    }

    /// # Panics
    ///
    /// Panics if `hours_per_day` is not strictly positive.
    pub fn with_hours_per_day(store: &'a S, hours_per_day: f64) -> Self {
        Self {
            store,
            calendar: WorkCalendar::new(),
            builder: GraphBuilder::with_hours_per_day(hours_per_day),
        }
    }

    /// Run a full scheduling pass for one project. Never returns an error:
    /// any failure is reported through the result shape with zeroed
    /// counters. Partial writes from a failed run are not rolled back.
    pub fn run_schedule(
        &self,
        project_id: i32,
        project_start: Option<NaiveDate>,
    ) -> ScheduleResult {
        let start = project_start.unwrap_or_else(|| chrono::Local::now().date_naive());
        match self.run_inner(project_id, start) {
            Ok(result) => result,
            Err(err) => ScheduleResult::failure(err.to_string()),
        }
    }

    fn run_inner(
        &self,
        project_id: i32,
        project_start: NaiveDate,
    ) -> Result<ScheduleResult, SchedulerError> {
        let tasks = self.store.load_tasks(project_id)?;
        if tasks.is_empty() {
            return Ok(ScheduleResult::empty("no tasks to schedule"));
        }
        let dependencies = self.store.load_dependencies(project_id)?;

        let mut task_map = self.builder.build(&tasks, &dependencies);
        let order = ScheduleDag::build(&task_map).topo_order()?;

        let mut conflicts =
            ForwardPass::new(&self.calendar).execute(&mut task_map, &order, project_start);

        let project_end = task_map
            .values()
            .filter_map(|task| task.early_finish)
            .max()
            .unwrap_or(project_start);

        conflicts.extend(BackwardPass::new(&self.calendar).execute(
            &mut task_map,
            &order,
            project_end,
        ));

        let critical_tasks = FloatCalculator::new(&self.calendar).execute(&mut task_map);

        // Write back in ascending id order for deterministic persistence.
        let mut ids: Vec<i32> = task_map.keys().copied().collect();
        ids.sort_unstable();
        let mut tasks_updated = 0;
        for id in &ids {
            let update = TaskScheduleUpdate::from(&task_map[id]);
            self.store.save_task_schedule(*id, &update)?;
            tasks_updated += 1;
        }

        let critical_path_length: i64 = critical_tasks
            .iter()
            .filter_map(|id| task_map.get(id))
            .map(|task| task.duration_days)
            .sum();

        conflicts.sort_by_key(|c| c.task_id);

        Ok(ScheduleResult {
            success: true,
            message: format!("scheduled {tasks_updated} tasks"),
            tasks_updated,
            critical_path_length,
            project_end_date: Some(project_end),
            critical_tasks,
            constraint_conflicts: conflicts,
        })
    }
}
