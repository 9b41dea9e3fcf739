use super::{PersistenceError, PersistenceResult, TaskStore};
use crate::task::{Dependency, Task, TaskScheduleUpdate};
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

/// SQLite-backed task store. Rows carry the full record as JSON, keyed by
/// id and project for the per-project snapshot queries the engine makes.
pub struct SqliteTaskStore {
    connection: Mutex<Connection>,
}

impl SqliteTaskStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY,
                project_id INTEGER NOT NULL,
                task_json TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks (project_id);
            CREATE TABLE IF NOT EXISTS dependencies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project_id INTEGER NOT NULL,
                dependency_json TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_dependencies_project ON dependencies (project_id);
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    pub fn insert_task(&self, task: &Task) -> PersistenceResult<()> {
        let json = serde_json::to_string(task)?;
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        conn.execute(
            "INSERT OR REPLACE INTO tasks (id, project_id, task_json) VALUES (?1, ?2, ?3)",
            params![task.id, task.project_id, json],
        )?;
        Ok(())
    }

    pub fn insert_dependency(
        &self,
        project_id: i32,
        dependency: &Dependency,
    ) -> PersistenceResult<()> {
        let json = serde_json::to_string(dependency)?;
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        conn.execute(
            "INSERT INTO dependencies (project_id, dependency_json) VALUES (?1, ?2)",
            params![project_id, json],
        )?;
        Ok(())
    }

    pub fn task(&self, task_id: i32) -> PersistenceResult<Option<Task>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare("SELECT task_json FROM tasks WHERE id = ?1")?;
        let json_opt: Option<String> = stmt
            .query_row(params![task_id], |row| row.get(0))
            .optional()?;
        match json_opt {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

impl TaskStore for SqliteTaskStore {
    fn load_tasks(&self, project_id: i32) -> PersistenceResult<Vec<Task>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt =
            conn.prepare("SELECT task_json FROM tasks WHERE project_id = ?1 ORDER BY id ASC")?;
        let rows = stmt.query_map(params![project_id], |row| row.get::<_, String>(0))?;

        let mut tasks = Vec::new();
        for json in rows {
            let task: Task = serde_json::from_str(&json?)?;
            tasks.push(task);
        }
        drop(stmt);
        drop(conn);

        super::validate_tasks(&tasks)?;
        Ok(tasks)
    }

    fn load_dependencies(&self, project_id: i32) -> PersistenceResult<Vec<Dependency>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT dependency_json FROM dependencies WHERE project_id = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![project_id], |row| row.get::<_, String>(0))?;

        let mut dependencies = Vec::new();
        for json in rows {
            let dependency: Dependency = serde_json::from_str(&json?)?;
            dependencies.push(dependency);
        }
        Ok(dependencies)
    }

    fn save_task_schedule(
        &self,
        task_id: i32,
        update: &TaskScheduleUpdate,
    ) -> PersistenceResult<()> {
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;

        let json_opt: Option<String> = tx
            .query_row(
                "SELECT task_json FROM tasks WHERE id = ?1",
                params![task_id],
                |row| row.get(0),
            )
            .optional()?;
        let json = json_opt.ok_or(PersistenceError::TaskNotFound(task_id))?;

        let mut task: Task = serde_json::from_str(&json)?;
        task.apply_schedule(update);
        let updated = serde_json::to_string(&task)?;
        tx.execute(
            "UPDATE tasks SET task_json = ?1 WHERE id = ?2",
            params![updated, task_id],
        )?;

        tx.commit()?;
        Ok(())
    }
}
