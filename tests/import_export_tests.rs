use chrono::NaiveDate;
use cpm_engine::persistence::ProjectSnapshot;
use cpm_engine::{
    ConstraintType, Dependency, DependencyKind, Task, load_dependencies_from_csv,
    load_project_from_json, load_tasks_from_csv, save_dependencies_to_csv, save_project_to_json,
    save_tasks_to_csv, validate_tasks,
};
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_snapshot() -> ProjectSnapshot {
    ProjectSnapshot {
        project_id: 7,
        tasks: vec![
            Task::new(1, 7, "design")
                .with_estimated_hours(16.0)
                .with_wbs_code("1.1"),
            Task::new(2, 7, "build")
                .with_estimated_hours(40.0)
                .with_constraint(ConstraintType::StartNoEarlierThan, d(2025, 2, 3)),
        ],
        dependencies: vec![
            Dependency::new(1, 2)
                .with_kind(DependencyKind::StartToStart)
                .with_lag(1),
        ],
    }
}

#[test]
fn json_snapshot_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("project.json");
    let snapshot = sample_snapshot();

    save_project_to_json(&snapshot, &path).unwrap();
    let loaded = load_project_from_json(&path).unwrap();
    assert_eq!(loaded, snapshot);
}

#[test]
fn json_save_rejects_invalid_tasks() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    let mut snapshot = sample_snapshot();
    // Date-requiring constraint with no date
    snapshot.tasks[1].constraint_date = None;
    assert!(save_project_to_json(&snapshot, &path).is_err());
}

#[test]
fn task_csv_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.csv");
    let tasks = sample_snapshot().tasks;

    save_tasks_to_csv(&tasks, &path).unwrap();
    let loaded = load_tasks_from_csv(&path).unwrap();
    assert_eq!(loaded, tasks);
}

#[test]
fn dependency_csv_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deps.csv");
    let deps = vec![
        Dependency::new(1, 2),
        Dependency::new(2, 3)
            .with_kind(DependencyKind::FinishToFinish)
            .with_lag(-2),
    ];

    save_dependencies_to_csv(&deps, &path).unwrap();
    let loaded = load_dependencies_from_csv(&path).unwrap();
    assert_eq!(loaded, deps);
}

#[test]
fn unknown_dependency_kind_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deps.csv");
    std::fs::write(
        &path,
        "predecessor_id,successor_id,kind,lag_days\n1,2,XX,0\n",
    )
    .unwrap();
    assert!(load_dependencies_from_csv(&path).is_err());
}

#[test]
fn unknown_constraint_type_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.csv");
    std::fs::write(
        &path,
        "id,project_id,name,wbs_code,estimated_hours,constraint_type,constraint_date\n\
         1,7,design,,16,sometime_maybe,\n",
    )
    .unwrap();
    assert!(load_tasks_from_csv(&path).is_err());
}

#[test]
fn validate_tasks_flags_duplicates_and_missing_dates() {
    let duplicate = vec![Task::new(1, 7, "a"), Task::new(1, 7, "b")];
    assert!(validate_tasks(&duplicate).is_err());

    let mut missing_date = Task::new(1, 7, "a");
    missing_date.constraint_type = ConstraintType::MustStartOn;
    assert!(validate_tasks(&[missing_date]).is_err());

    let fine = vec![Task::new(1, 7, "a"), Task::new(2, 7, "b")];
    assert!(validate_tasks(&fine).is_ok());
}
