//! Course outline ordering and lesson navigation.
//!
//! Lessons are ordered first by their module's `order_index`, then by their
//! own `order_index` within the module.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// A lesson flattened out of its module for course-wide navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedLesson {
    pub id: DbId,
    pub title: String,
    pub module_order_index: i32,
    pub order_index: i32,
}

/// Sort lessons into course order. Ties fall back to the lesson id.
pub fn order_lessons(lessons: &mut [OrderedLesson]) {
    lessons.sort_by_key(|l| (l.module_order_index, l.order_index, l.id));
}

/// A lesson's place within the ordered course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbours<'a> {
    /// 1-based position of the lesson.
    pub position: usize,
    pub total: usize,
    pub previous: Option<&'a OrderedLesson>,
    pub next: Option<&'a OrderedLesson>,
}

/// Locate `lesson_id` in an already ordered slice.
pub fn neighbours(ordered: &[OrderedLesson], lesson_id: DbId) -> Option<Neighbours<'_>> {
    let index = ordered.iter().position(|l| l.id == lesson_id)?;
    Some(Neighbours {
        position: index + 1,
        total: ordered.len(),
        previous: index.checked_sub(1).and_then(|i| ordered.get(i)),
        next: ordered.get(index + 1),
    })
}

/// `order_index` for a module or lesson appended after `last`.
///
/// Fails once `last` is already `i32::MAX`.
pub fn next_order_index(last: Option<i32>) -> Result<i32, CoreError> {
    match last {
        None => Ok(0),
        Some(last) => last.checked_add(1).ok_or_else(|| {
            CoreError::Validation("No se pueden añadir más elementos en esta posición".into())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: DbId, module_order_index: i32, order_index: i32) -> OrderedLesson {
        OrderedLesson {
            id,
            title: format!("Lesson {id}"),
            module_order_index,
            order_index,
        }
    }

    fn ordered_ids(mut lessons: Vec<OrderedLesson>) -> Vec<DbId> {
        order_lessons(&mut lessons);
        lessons.into_iter().map(|l| l.id).collect()
    }

    #[test]
    fn module_order_wins_over_lesson_order() {
        let ids = ordered_ids(vec![lesson(1, 1, 0), lesson(2, 0, 5), lesson(3, 0, 1)]);
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn neighbours_in_the_middle() {
        let mut lessons = vec![lesson(10, 0, 0), lesson(11, 0, 1), lesson(12, 1, 0)];
        order_lessons(&mut lessons);

        let n = neighbours(&lessons, 11).unwrap();
        assert_eq!(n.position, 2);
        assert_eq!(n.total, 3);
        assert_eq!(n.previous.map(|l| l.id), Some(10));
        assert_eq!(n.next.map(|l| l.id), Some(12));
    }

    #[test]
    fn first_and_last_have_one_neighbour() {
        let lessons = vec![lesson(1, 0, 0), lesson(2, 0, 1)];

        let first = neighbours(&lessons, 1).unwrap();
        assert!(first.previous.is_none());
        assert_eq!(first.next.map(|l| l.id), Some(2));

        let last = neighbours(&lessons, 2).unwrap();
        assert_eq!(last.previous.map(|l| l.id), Some(1));
        assert!(last.next.is_none());
    }

    #[test]
    fn unknown_lesson_has_no_neighbours() {
        assert!(neighbours(&[lesson(1, 0, 0)], 42).is_none());
    }

    #[test]
    fn order_index_starts_at_zero() {
        assert_eq!(next_order_index(None).unwrap(), 0);
        assert_eq!(next_order_index(Some(4)).unwrap(), 5);
    }

    #[test]
    fn order_index_at_max_is_rejected() {
        assert!(matches!(
            next_order_index(Some(i32::MAX)),
            Err(CoreError::Validation(_))
        ));
    }
}
