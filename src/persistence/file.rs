use super::{PersistenceError, PersistenceResult};
use crate::task::{ConstraintType, Dependency, DependencyKind, Task};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One project's input snapshot: the shape exchanged with external tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub project_id: i32,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

pub fn save_project_to_json<P: AsRef<Path>>(
    snapshot: &ProjectSnapshot,
    path: P,
) -> PersistenceResult<()> {
    super::validate_tasks(&snapshot.tasks)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, snapshot)?;
    Ok(())
}

pub fn load_project_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<ProjectSnapshot> {
    let file = File::open(path)?;
    let snapshot: ProjectSnapshot = serde_json::from_reader(file)?;
    super::validate_tasks(&snapshot.tasks)?;
    Ok(snapshot)
}

// CSV rows carry optional fields as empty strings, matching how most
// spreadsheet exports round-trip blanks.
#[derive(Default, Serialize, Deserialize)]
struct TaskCsvRecord {
    id: i32,
    project_id: i32,
    name: String,
    wbs_code: String,
    estimated_hours: String,
    constraint_type: String,
    constraint_date: String,
}

#[derive(Default, Serialize, Deserialize)]
struct DependencyCsvRecord {
    predecessor_id: i32,
    successor_id: i32,
    kind: String,
    lag_days: i64,
}

impl From<&Task> for TaskCsvRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            project_id: task.project_id,
            name: task.name.clone(),
            wbs_code: task.wbs_code.clone().unwrap_or_default(),
            estimated_hours: task
                .estimated_hours
                .map(|h| h.to_string())
                .unwrap_or_default(),
            constraint_type: task.constraint_type.as_str().to_string(),
            constraint_date: format_date(task.constraint_date),
        }
    }
}

impl From<&Dependency> for DependencyCsvRecord {
    fn from(dep: &Dependency) -> Self {
        Self {
            predecessor_id: dep.predecessor_id,
            successor_id: dep.successor_id,
            kind: dep.kind.as_str().to_string(),
            lag_days: dep.lag_days,
        }
    }
}

pub fn save_tasks_to_csv<P: AsRef<Path>>(tasks: &[Task], path: P) -> PersistenceResult<()> {
    super::validate_tasks(tasks)?;
    let mut writer = csv::Writer::from_path(path)?;
    for task in tasks {
        writer.serialize(TaskCsvRecord::from(task))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_tasks_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Task>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut tasks = Vec::new();
    for record in reader.deserialize() {
        let record: TaskCsvRecord = record?;
        tasks.push(record_to_task(record)?);
    }
    super::validate_tasks(&tasks)?;
    Ok(tasks)
}

pub fn save_dependencies_to_csv<P: AsRef<Path>>(
    dependencies: &[Dependency],
    path: P,
) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for dep in dependencies {
        writer.serialize(DependencyCsvRecord::from(dep))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_dependencies_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Dependency>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut dependencies = Vec::new();
    for record in reader.deserialize() {
        let record: DependencyCsvRecord = record?;
        let kind = DependencyKind::parse(&record.kind).ok_or_else(|| {
            PersistenceError::InvalidData(format!("unknown dependency kind '{}'", record.kind))
        })?;
        dependencies.push(Dependency {
            predecessor_id: record.predecessor_id,
            successor_id: record.successor_id,
            kind,
            lag_days: record.lag_days,
        });
    }
    Ok(dependencies)
}

fn record_to_task(record: TaskCsvRecord) -> PersistenceResult<Task> {
    let mut task = Task::new(record.id, record.project_id, record.name);
    if !record.wbs_code.is_empty() {
        task.wbs_code = Some(record.wbs_code);
    }
    if !record.estimated_hours.is_empty() {
        let hours: f64 = record.estimated_hours.parse().map_err(|_| {
            PersistenceError::InvalidData(format!(
                "task {} has unparseable estimated_hours '{}'",
                record.id, record.estimated_hours
            ))
        })?;
        task.estimated_hours = Some(hours);
    }
    task.constraint_type = ConstraintType::parse(&record.constraint_type).ok_or_else(|| {
        PersistenceError::InvalidData(format!(
            "task {} has unknown constraint type '{}'",
            record.id, record.constraint_type
        ))
    })?;
    task.constraint_date = parse_date(&record.constraint_date, record.id)?;
    Ok(task)
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse_date(value: &str, task_id: i32) -> PersistenceResult<Option<NaiveDate>> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| {
            PersistenceError::InvalidData(format!("task {task_id} has unparseable date '{value}'"))
        })
}
