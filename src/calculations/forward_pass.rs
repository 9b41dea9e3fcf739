use crate::calendar::WorkCalendar;
use crate::schedule::ConstraintConflict;
use crate::task::{ConstraintType, DependencyKind, DependencyLink, ScheduleTask};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Computes early start / early finish for every task, walking the graph in
/// topological order so each predecessor is finalized before its successors.
pub struct ForwardPass<'a> {
    calendar: &'a WorkCalendar,
}

impl<'a> ForwardPass<'a> {
    pub fn new(calendar: &'a WorkCalendar) -> Self {
        Self { calendar }
    }

    /// Mutates the task map in place. Returns the conflicts where a
    /// `must_start_on` date forced a start earlier than the graph allows;
    /// the constraint still wins (the engine trusts constraint data).
    pub fn execute(
        &self,
        task_map: &mut HashMap<i32, ScheduleTask>,
        order: &[i32],
        project_start: NaiveDate,
    ) -> Vec<ConstraintConflict> {
        let mut conflicts = Vec::new();

        for &task_id in order {
            let Some(task) = task_map.get(&task_id) else {
                continue;
            };
            let duration = task.duration_days;
            let constraint_type = task.constraint_type;
            let constraint_date = task.constraint_date;
            let links: Vec<DependencyLink> = task.predecessors.clone();

            // Binding constraint: the latest of all predecessor-implied
            // dates. Anything earlier would violate at least one edge.
            let implied = if links.is_empty() {
                project_start
            } else {
                links
                    .iter()
                    .map(|link| {
                        self.candidate(task_map.get(&link.task_id), link, duration, project_start)
                    })
                    .max()
                    .unwrap_or(project_start)
            };

            let mut early_start = implied;
            match (constraint_type, constraint_date) {
                (ConstraintType::StartNoEarlierThan, Some(date)) if date > early_start => {
                    early_start = date;
                }
                (ConstraintType::MustStartOn, Some(date)) => {
                    if date < implied {
                        conflicts.push(ConstraintConflict {
                            task_id,
                            constraint: ConstraintType::MustStartOn,
                            graph_implied: implied,
                            forced: date,
                        });
                    }
                    early_start = date;
                }
                _ => {}
            }

            let early_finish = if duration <= 1 {
                early_start
            } else {
                self.calendar.add_business_days(early_start, duration - 1)
            };

            if let Some(task) = task_map.get_mut(&task_id) {
                task.early_start = Some(early_start);
                task.early_finish = Some(early_finish);
            }
        }

        conflicts
    }

    fn candidate(
        &self,
        predecessor: Option<&ScheduleTask>,
        link: &DependencyLink,
        duration: i64,
        project_start: NaiveDate,
    ) -> NaiveDate {
        let Some(pred) = predecessor else {
            return project_start;
        };
        let cal = self.calendar;
        match link.kind {
            DependencyKind::FinishToStart => match pred.early_finish {
                Some(ef) => cal.shift_business_days(ef, 1 + link.lag_days),
                None => project_start,
            },
            DependencyKind::StartToStart => match (pred.early_start, pred.early_finish) {
                (Some(es), _) => cal.shift_business_days(es, link.lag_days),
                (None, Some(ef)) => cal.shift_business_days(ef, link.lag_days - duration),
                (None, None) => project_start,
            },
            DependencyKind::FinishToFinish => match pred.early_finish {
                Some(ef) => cal.shift_business_days(ef, link.lag_days - (duration - 1)),
                None => project_start,
            },
            DependencyKind::StartToFinish => match pred.early_start {
                Some(es) => cal.shift_business_days(es, link.lag_days - (duration - 1)),
                None => project_start,
            },
        }
    }
}
