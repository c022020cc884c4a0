//! Completion Sequencing
//!
//! Decides where a user goes after finishing a simulator, and what entering
//! a lesson from the course overview does. Order is the position in the
//! lists returned by the backend.

use crate::models::Lesson;
use crate::route::Route;

/// Backend call that must succeed before navigating to the next step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreAction {
    StartSimulator { simulator_id: u64, lesson_user_id: Option<u64> },
    StartLesson { lesson_id: u64 },
}

/// Outcome after a simulator is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    NextSimulator { lesson_id: u64, simulator_id: u64, lesson_user_id: Option<u64> },
    NextLesson { lesson_id: u64, simulator_id: u64 },
    CourseCompleted,
}

impl NextStep {
    pub fn target(&self) -> Option<Route> {
        match *self {
            NextStep::NextSimulator { lesson_id, simulator_id, .. }
            | NextStep::NextLesson { lesson_id, simulator_id } => {
                Some(Route::simulator(lesson_id, simulator_id))
            }
            NextStep::CourseCompleted => None,
        }
    }

    pub fn pre_action(&self) -> Option<PreAction> {
        match *self {
            NextStep::NextSimulator { simulator_id, lesson_user_id, .. } => {
                Some(PreAction::StartSimulator { simulator_id, lesson_user_id })
            }
            NextStep::NextLesson { lesson_id, .. } => Some(PreAction::StartLesson { lesson_id }),
            NextStep::CourseCompleted => None,
        }
    }
}

/// Resolve the step following `simulator_id` in `lesson_id`.
///
/// Returns `None` when either id is not found in `lessons`. Lessons without
/// simulators are skipped; when nothing follows, the course is completed.
pub fn resolve_next_step(lessons: &[Lesson], lesson_id: u64, simulator_id: u64) -> Option<NextStep> {
    let lesson_index = lessons.iter().position(|l| l.id == lesson_id)?;
    let lesson = &lessons[lesson_index];
    let simulator_index = lesson.simulators.iter().position(|s| s.id == simulator_id)?;

    if let Some(next) = lesson.simulators.get(simulator_index + 1) {
        return Some(NextStep::NextSimulator {
            lesson_id: lesson.id,
            simulator_id: next.id,
            lesson_user_id: lesson.user.as_ref().and_then(|u| u.id),
        });
    }

    let next_lesson = lessons[lesson_index + 1..]
        .iter()
        .find_map(|l| l.first_simulator().map(|s| (l.id, s.id)));

    Some(match next_lesson {
        Some((lesson_id, simulator_id)) => NextStep::NextLesson { lesson_id, simulator_id },
        None => NextStep::CourseCompleted,
    })
}

/// What clicking a lesson on the course overview does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonEntry {
    /// Available but never started: start it, then open the simulator the backend returns
    Start { lesson_id: u64 },
    /// Already started: mark as current and reopen the last simulator
    Resume { lesson_id: u64, simulator_id: u64 },
    Locked,
}

pub fn lesson_entry(lesson: &Lesson) -> LessonEntry {
    match &lesson.user {
        Some(user) => {
            let simulator_id = user
                .last_simulator
                .filter(|id| lesson.contains_simulator(*id))
                .or_else(|| lesson.first_simulator().map(|s| s.id));
            match simulator_id {
                Some(simulator_id) => LessonEntry::Resume { lesson_id: lesson.id, simulator_id },
                None => LessonEntry::Locked,
            }
        }
        None if lesson.is_available => LessonEntry::Start { lesson_id: lesson.id },
        None => LessonEntry::Locked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LessonUser, SimulatorStub};

    fn lesson(id: u64, simulators: &[u64]) -> Lesson {
        Lesson {
            id,
            name: format!("Lesson {}", id),
            description: String::new(),
            course_id: Some(1),
            image: None,
            is_available: true,
            simulators: simulators
                .iter()
                .map(|&id| SimulatorStub { id, name: format!("Simulator {}", id) })
                .collect(),
            user: None,
        }
    }

    fn started(mut lesson: Lesson, lesson_user_id: u64, last_simulator: Option<u64>) -> Lesson {
        lesson.user = Some(LessonUser {
            id: Some(lesson_user_id),
            completed: false,
            last_simulator,
            completed_simulators_count: 0,
        });
        lesson
    }

    fn course() -> Vec<Lesson> {
        vec![
            started(lesson(1, &[10, 11, 12]), 100, Some(11)),
            lesson(2, &[20, 21]),
            lesson(3, &[30]),
        ]
    }

    #[test]
    fn test_next_simulator_in_same_lesson() {
        let step = resolve_next_step(&course(), 1, 11).unwrap();
        assert_eq!(
            step,
            NextStep::NextSimulator { lesson_id: 1, simulator_id: 12, lesson_user_id: Some(100) }
        );
        assert_eq!(step.target(), Some(Route::simulator(1, 12)));
        assert_eq!(
            step.pre_action(),
            Some(PreAction::StartSimulator { simulator_id: 12, lesson_user_id: Some(100) })
        );
    }

    #[test]
    fn test_last_simulator_moves_to_next_lesson() {
        let step = resolve_next_step(&course(), 1, 12).unwrap();
        assert_eq!(step, NextStep::NextLesson { lesson_id: 2, simulator_id: 20 });
        assert_eq!(step.pre_action(), Some(PreAction::StartLesson { lesson_id: 2 }));
    }

    #[test]
    fn test_last_simulator_of_last_lesson_completes_course() {
        let step = resolve_next_step(&course(), 3, 30).unwrap();
        assert_eq!(step, NextStep::CourseCompleted);
        assert_eq!(step.target(), None);
        assert_eq!(step.pre_action(), None);
    }

    #[test]
    fn test_every_position_resolves_consistently() {
        let lessons = course();
        for (li, lesson) in lessons.iter().enumerate() {
            for (si, sim) in lesson.simulators.iter().enumerate() {
                let step = resolve_next_step(&lessons, lesson.id, sim.id).unwrap();
                if si + 1 < lesson.simulators.len() {
                    assert_eq!(step.target(), Some(Route::simulator(lesson.id, lesson.simulators[si + 1].id)));
                } else if li + 1 < lessons.len() {
                    let next = &lessons[li + 1];
                    assert_eq!(step, NextStep::NextLesson { lesson_id: next.id, simulator_id: next.simulators[0].id });
                } else {
                    assert_eq!(step, NextStep::CourseCompleted);
                }
            }
        }
    }

    #[test]
    fn test_unknown_ids_fail_closed() {
        assert_eq!(resolve_next_step(&course(), 9, 10), None);
        assert_eq!(resolve_next_step(&course(), 1, 20), None);
        assert_eq!(resolve_next_step(&[], 1, 10), None);
    }

    #[test]
    fn test_empty_lessons_are_skipped() {
        let lessons = vec![lesson(1, &[10]), lesson(2, &[]), lesson(3, &[30])];
        assert_eq!(
            resolve_next_step(&lessons, 1, 10),
            Some(NextStep::NextLesson { lesson_id: 3, simulator_id: 30 })
        );

        let trailing_empty = vec![lesson(1, &[10]), lesson(2, &[])];
        assert_eq!(resolve_next_step(&trailing_empty, 1, 10), Some(NextStep::CourseCompleted));
    }

    #[test]
    fn test_lesson_entry() {
        assert_eq!(lesson_entry(&lesson(2, &[20])), LessonEntry::Start { lesson_id: 2 });

        let mut locked = lesson(2, &[20]);
        locked.is_available = false;
        assert_eq!(lesson_entry(&locked), LessonEntry::Locked);

        assert_eq!(
            lesson_entry(&started(lesson(1, &[10, 11]), 5, Some(11))),
            LessonEntry::Resume { lesson_id: 1, simulator_id: 11 }
        );
        // A pointer outside the lesson falls back to its first simulator
        assert_eq!(
            lesson_entry(&started(lesson(1, &[10, 11]), 5, Some(99))),
            LessonEntry::Resume { lesson_id: 1, simulator_id: 10 }
        );
        assert_eq!(lesson_entry(&started(lesson(1, &[]), 5, None)), LessonEntry::Locked);
    }
}
