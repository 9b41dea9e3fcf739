use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hard scheduling rule a task may carry on top of its graph-implied dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    #[default]
    AsSoonAsPossible,
    StartNoEarlierThan,
    MustStartOn,
    FinishNoLaterThan,
    MustFinishOn,
}

impl ConstraintType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AsSoonAsPossible => "as_soon_as_possible",
            Self::StartNoEarlierThan => "start_no_earlier_than",
            Self::MustStartOn => "must_start_on",
            Self::FinishNoLaterThan => "finish_no_later_than",
            Self::MustFinishOn => "must_finish_on",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "as_soon_as_possible" | "" => Some(Self::AsSoonAsPossible),
            "start_no_earlier_than" => Some(Self::StartNoEarlierThan),
            "must_start_on" => Some(Self::MustStartOn),
            "finish_no_later_than" => Some(Self::FinishNoLaterThan),
            "must_finish_on" => Some(Self::MustFinishOn),
            _ => None,
        }
    }

    /// Every constraint except the default needs an accompanying date.
    pub fn requires_date(&self) -> bool {
        !matches!(self, Self::AsSoonAsPossible)
    }
}

/// Dependency relationship between a predecessor and a successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DependencyKind {
    #[default]
    #[serde(rename = "FS")]
    FinishToStart,
    #[serde(rename = "SS")]
    StartToStart,
    #[serde(rename = "FF")]
    FinishToFinish,
    #[serde(rename = "SF")]
    StartToFinish,
}

impl DependencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FinishToStart => "FS",
            Self::StartToStart => "SS",
            Self::FinishToFinish => "FF",
            Self::StartToFinish => "SF",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FS" | "" => Some(Self::FinishToStart),
            "SS" => Some(Self::StartToStart),
            "FF" => Some(Self::FinishToFinish),
            "SF" => Some(Self::StartToFinish),
            _ => None,
        }
    }
}

/// Persisted view of a task, as loaded from and written back to the store.
///
/// `duration_days` and the date/float fields are computed by a scheduling
/// run; `estimated_hours` is the authoritative input for duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub project_id: i32,
    pub name: String,
    pub wbs_code: Option<String>,
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub constraint_type: ConstraintType,
    pub constraint_date: Option<NaiveDate>,
    pub duration_days: Option<i64>,
    pub early_start: Option<NaiveDate>,
    pub early_finish: Option<NaiveDate>,
    pub late_start: Option<NaiveDate>,
    pub late_finish: Option<NaiveDate>,
    pub total_float: Option<i64>,
    pub free_float: Option<i64>,
    #[serde(default)]
    pub is_critical_path: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(id: i32, project_id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            project_id,
            name: name.into(),
            wbs_code: None,
            estimated_hours: None,
            constraint_type: ConstraintType::AsSoonAsPossible,
            constraint_date: None,
            duration_days: None,
            early_start: None,
            early_finish: None,
            late_start: None,
            late_finish: None,
            total_float: None,
            free_float: None,
            is_critical_path: false,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_constraint(mut self, constraint: ConstraintType, date: NaiveDate) -> Self {
        self.constraint_type = constraint;
        self.constraint_date = Some(date);
        self
    }

    pub fn with_wbs_code(mut self, wbs: impl Into<String>) -> Self {
        self.wbs_code = Some(wbs.into());
        self
    }

    /// Overwrite the computed schedule fields from a finished run. The
    /// user-facing planned dates are overwritten with early start/finish.
    pub fn apply_schedule(&mut self, update: &TaskScheduleUpdate) {
        self.duration_days = Some(update.duration_days);
        self.early_start = update.early_start;
        self.early_finish = update.early_finish;
        self.late_start = update.late_start;
        self.late_finish = update.late_finish;
        self.total_float = update.total_float;
        self.free_float = update.free_float;
        self.is_critical_path = update.is_critical_path;
        self.start_date = update.start_date;
        self.end_date = update.end_date;
    }
}

/// Directed dependency edge between two tasks of the same project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub predecessor_id: i32,
    pub successor_id: i32,
    #[serde(default)]
    pub kind: DependencyKind,
    #[serde(default)]
    pub lag_days: i64,
}

impl Dependency {
    pub fn new(predecessor_id: i32, successor_id: i32) -> Self {
        Self {
            predecessor_id,
            successor_id,
            kind: DependencyKind::FinishToStart,
            lag_days: 0,
        }
    }

    pub fn with_kind(mut self, kind: DependencyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_lag(mut self, lag_days: i64) -> Self {
        self.lag_days = lag_days;
        self
    }
}

/// Resolved edge as seen from one endpoint of a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyLink {
    pub task_id: i32,
    pub kind: DependencyKind,
    pub lag_days: i64,
}

/// Mutable working node for a single scheduling run. Built from the
/// persisted snapshot, mutated through the passes, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleTask {
    pub id: i32,
    pub name: String,
    pub duration_days: i64,
    pub constraint_type: ConstraintType,
    pub constraint_date: Option<NaiveDate>,
    pub predecessors: Vec<DependencyLink>,
    pub successors: Vec<DependencyLink>,
    pub early_start: Option<NaiveDate>,
    pub early_finish: Option<NaiveDate>,
    pub late_start: Option<NaiveDate>,
    pub late_finish: Option<NaiveDate>,
    pub total_float: Option<i64>,
    pub free_float: Option<i64>,
    pub is_critical_path: bool,
}

impl ScheduleTask {
    pub fn from_task(task: &Task, duration_days: i64) -> Self {
        Self {
            id: task.id,
            name: task.name.clone(),
            duration_days,
            constraint_type: task.constraint_type,
            constraint_date: task.constraint_date,
            predecessors: Vec::new(),
            successors: Vec::new(),
            early_start: None,
            early_finish: None,
            late_start: None,
            late_finish: None,
            total_float: None,
            free_float: None,
            is_critical_path: false,
        }
    }
}

/// Field bundle written back to the store for each task after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskScheduleUpdate {
    pub duration_days: i64,
    pub early_start: Option<NaiveDate>,
    pub early_finish: Option<NaiveDate>,
    pub late_start: Option<NaiveDate>,
    pub late_finish: Option<NaiveDate>,
    pub total_float: Option<i64>,
    pub free_float: Option<i64>,
    pub is_critical_path: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<&ScheduleTask> for TaskScheduleUpdate {
    fn from(task: &ScheduleTask) -> Self {
        Self {
            duration_days: task.duration_days,
            early_start: task.early_start,
            early_finish: task.early_finish,
            late_start: task.late_start,
            late_finish: task.late_finish,
            total_float: task.total_float,
            free_float: task.free_float,
            is_critical_path: task.is_critical_path,
            // Planned dates always reflect the latest forward-pass result.
            start_date: task.early_start,
            end_date: task.early_finish,
        }
    }
}
