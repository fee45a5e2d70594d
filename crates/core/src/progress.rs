//! Course completion progress.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::DbId;

/// Completed-vs-total lesson counts for one student in one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub completed: i64,
    pub total: i64,
    /// Rounded to the nearest whole percent. Zero for an empty course.
    pub percent: i64,
    /// e.g. `"3 de 10 lecciones"`.
    pub label: String,
}

impl ProgressSummary {
    pub fn new(completed: i64, total: i64) -> Self {
        let completed = completed.clamp(0, total.max(0));
        Self {
            completed,
            total,
            percent: percent(completed, total),
            label: format!("{completed} de {total} lecciones"),
        }
    }

    /// Count how many of `course_lessons` appear in `completed_lessons`.
    ///
    /// Completed ids that belong to other courses are ignored.
    pub fn from_ids(course_lessons: &[DbId], completed_lessons: &HashSet<DbId>) -> Self {
        let completed = course_lessons
            .iter()
            .filter(|id| completed_lessons.contains(id))
            .count();
        Self::new(completed as i64, course_lessons.len() as i64)
    }
}

/// `round(completed / total * 100)`, or 0 when `total` is 0.
pub fn percent(completed: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i64
}
