use crate::calendar::WorkCalendar;
use crate::schedule::ConstraintConflict;
use crate::task::{ConstraintType, DependencyKind, DependencyLink, ScheduleTask};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Computes late start / late finish in reverse topological order, seeded
/// from the project end date found by the forward pass.
pub struct BackwardPass<'a> {
    calendar: &'a WorkCalendar,
}

impl<'a> BackwardPass<'a> {
    pub fn new(calendar: &'a WorkCalendar) -> Self {
        Self { calendar }
    }

    /// Must run only after the forward pass has populated early dates for
    /// all tasks. `order` is the forward topological order; it is walked in
    /// reverse so successors are finalized before their predecessors.
    pub fn execute(
        &self,
        task_map: &mut HashMap<i32, ScheduleTask>,
        order: &[i32],
        project_end: NaiveDate,
    ) -> Vec<ConstraintConflict> {
        let mut conflicts = Vec::new();

        for &task_id in order.iter().rev() {
            let Some(task) = task_map.get(&task_id) else {
                continue;
            };
            let duration = task.duration_days;
            let constraint_type = task.constraint_type;
            let constraint_date = task.constraint_date;
            let links: Vec<DependencyLink> = task.successors.clone();

            // Tightest constraint: the earliest of all successor-implied
            // late finishes.
            let implied = if links.is_empty() {
                project_end
            } else {
                links
                    .iter()
                    .map(|link| {
                        self.candidate(task_map.get(&link.task_id), link, duration, project_end)
                    })
                    .min()
                    .unwrap_or(project_end)
            };

            let mut late_finish = implied;
            match (constraint_type, constraint_date) {
                (ConstraintType::FinishNoLaterThan, Some(date)) if date < late_finish => {
                    late_finish = date;
                }
                (ConstraintType::MustFinishOn, Some(date)) => {
                    if date > implied {
                        conflicts.push(ConstraintConflict {
                            task_id,
                            constraint: ConstraintType::MustFinishOn,
                            graph_implied: implied,
                            forced: date,
                        });
                    }
                    late_finish = date;
                }
                _ => {}
            }

            let late_start = if duration <= 1 {
                late_finish
            } else {
                self.calendar.subtract_business_days(late_finish, duration - 1)
            };

            if let Some(task) = task_map.get_mut(&task_id) {
                task.late_finish = Some(late_finish);
                task.late_start = Some(late_start);
            }
        }

        conflicts
    }

    // Inverse of the forward-pass edge formulas: each successor implies an
    // upper bound on this task's late finish.
    fn candidate(
        &self,
        successor: Option<&ScheduleTask>,
        link: &DependencyLink,
        duration: i64,
        project_end: NaiveDate,
    ) -> NaiveDate {
        let Some(succ) = successor else {
            return project_end;
        };
        let cal = self.calendar;
        match link.kind {
            DependencyKind::FinishToStart => match succ.late_start {
                Some(ls) => cal.shift_business_days(ls, -(1 + link.lag_days)),
                None => project_end,
            },
            DependencyKind::StartToStart => match succ.late_start {
                Some(ls) => cal.shift_business_days(ls, (duration - 1) - link.lag_days),
                None => project_end,
            },
            DependencyKind::FinishToFinish => match succ.late_finish {
                Some(lf) => cal.shift_business_days(lf, -link.lag_days),
                None => project_end,
            },
            DependencyKind::StartToFinish => match succ.late_finish {
                Some(lf) => cal.shift_business_days(lf, (duration - 1) - link.lag_days),
                None => project_end,
            },
        }
    }
}
