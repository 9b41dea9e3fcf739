use crate::calendar::WorkCalendar;
use crate::task::ScheduleTask;
use std::collections::HashMap;

/// Derives total float, free float, and the critical-path flag once both
/// passes have populated all four dates.
pub struct FloatCalculator<'a> {
    calendar: &'a WorkCalendar,
}

impl<'a> FloatCalculator<'a> {
    pub fn new(calendar: &'a WorkCalendar) -> Self {
        Self { calendar }
    }

    /// Mutates the task map in place and returns the critical task ids,
    /// sorted ascending for deterministic output.
    pub fn execute(&self, task_map: &mut HashMap<i32, ScheduleTask>) -> Vec<i32> {
        let mut computed: Vec<(i32, i64, i64)> = Vec::new();

        for task in task_map.values() {
            let (Some(early_finish), Some(late_finish)) = (task.early_finish, task.late_finish)
            else {
                continue;
            };
            if task.early_start.is_none() || task.late_start.is_none() {
                continue;
            }

            let total_float = self.calendar.business_days_between(early_finish, late_finish);

            let free_float = if task.successors.is_empty() {
                total_float
            } else {
                let min_successor_start = task
                    .successors
                    .iter()
                    .filter_map(|link| task_map.get(&link.task_id).and_then(|s| s.early_start))
                    .min();
                match min_successor_start {
                    Some(start) => self
                        .calendar
                        .business_days_between(early_finish, start)
                        .max(0),
                    None => total_float,
                }
            };

            computed.push((task.id, total_float, free_float));
        }

        let mut critical = Vec::new();
        for (task_id, total_float, free_float) in computed {
            if let Some(task) = task_map.get_mut(&task_id) {
                task.total_float = Some(total_float);
                task.free_float = Some(free_float);
                task.is_critical_path = total_float == 0;
                if total_float == 0 {
                    critical.push(task_id);
                }
            }
        }

        critical.sort_unstable();
        critical
    }
}
