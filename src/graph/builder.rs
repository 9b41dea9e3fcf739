use crate::task::{Dependency, DependencyLink, ScheduleTask, Task};
use std::collections::HashMap;

pub const DEFAULT_HOURS_PER_DAY: f64 = 8.0;

/// Assembles the in-memory scheduling graph for one run: a map from task id
/// to a working node carrying duration and resolved edge lists.
pub struct GraphBuilder {
    hours_per_day: f64,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            hours_per_day: DEFAULT_HOURS_PER_DAY,
        }
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if `hours_per_day` is not strictly positive.
    pub fn with_hours_per_day(hours_per_day: f64) -> Self {
        if !(hours_per_day > 0.0) {
            panic!("GraphBuilder requires a positive hours_per_day");
        }
        Self { hours_per_day }
    }

    /// Duration in working days derived from estimated effort. Tasks with
    /// no estimate (or a non-positive one) default to a 1-day minimum.
    pub fn duration_days(&self, estimated_hours: Option<f64>) -> i64 {
        match estimated_hours {
            Some(hours) if hours > 0.0 => ((hours / self.hours_per_day).ceil() as i64).max(1),
            _ => 1,
        }
    }

    /// Build the task map. Dependency edges referencing a task id that is
    /// not in the snapshot are dropped; they contribute no constraint.
    pub fn build(
        &self,
        tasks: &[Task],
        dependencies: &[Dependency],
    ) -> HashMap<i32, ScheduleTask> {
        let mut map: HashMap<i32, ScheduleTask> = tasks
            .iter()
            .map(|task| {
                let duration = self.duration_days(task.estimated_hours);
                (task.id, ScheduleTask::from_task(task, duration))
            })
            .collect();

        for dep in dependencies {
            if !map.contains_key(&dep.predecessor_id) || !map.contains_key(&dep.successor_id) {
                continue;
            }
            if let Some(successor) = map.get_mut(&dep.successor_id) {
                successor.predecessors.push(DependencyLink {
                    task_id: dep.predecessor_id,
                    kind: dep.kind,
                    lag_days: dep.lag_days,
                });
            }
            if let Some(predecessor) = map.get_mut(&dep.predecessor_id) {
                predecessor.successors.push(DependencyLink {
                    task_id: dep.successor_id,
                    kind: dep.kind,
                    lag_days: dep.lag_days,
                });
            }
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_rounds_up_and_floors_at_one() {
        let builder = GraphBuilder::new();
        assert_eq!(builder.duration_days(Some(40.0)), 5);
        assert_eq!(builder.duration_days(Some(9.0)), 2);
        assert_eq!(builder.duration_days(Some(0.5)), 1);
        assert_eq!(builder.duration_days(Some(0.0)), 1);
        assert_eq!(builder.duration_days(Some(-3.0)), 1);
        assert_eq!(builder.duration_days(None), 1);
    }

    #[test]
    fn duration_honours_custom_hours_per_day() {
        let builder = GraphBuilder::with_hours_per_day(6.0);
        assert_eq!(builder.duration_days(Some(12.0)), 2);
    }
}
