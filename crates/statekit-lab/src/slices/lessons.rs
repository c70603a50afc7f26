//! Lessons slice: course lessons and their completion

use serde::{Deserialize, Serialize};
use statekit::{Action, Slice};

pub const NAME: &str = "lessons";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u64,
    pub name: String,
    pub complete: bool,
}

impl Lesson {
    fn new(id: u64, name: &str, complete: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            complete,
        }
    }
}

pub fn initial_lessons() -> Vec<Lesson> {
    vec![
        Lesson::new(1, "Design", true),
        Lesson::new(2, "HTML", false),
        Lesson::new(3, "CSS", false),
        Lesson::new(4, "JavaScript", false),
    ]
}

pub fn slice() -> Slice<Vec<Lesson>> {
    Slice::new(NAME, initial_lessons())
        .case("completeLesson", |lessons, action| {
            match action.payload_as::<u64>() {
                Ok(id) => lessons
                    .iter_mut()
                    .filter(|lesson| lesson.id == id)
                    .for_each(|lesson| lesson.complete = true),
                Err(err) => log::warn!("{}", err),
            }
        })
        .case("completeCourse", |lessons, _| {
            lessons.iter_mut().for_each(|lesson| lesson.complete = true)
        })
        .case("resetCourse", |lessons, _| {
            lessons.iter_mut().for_each(|lesson| lesson.complete = false)
        })
}

/// `lessons/completeLesson` for one lesson id
pub fn complete_lesson(id: u64) -> Action {
    Action::new(format!("{}/completeLesson", NAME)).with_payload(id)
}

/// Completed and total lesson count
pub fn progress(lessons: &[Lesson]) -> (usize, usize) {
    let done = lessons.iter().filter(|lesson| lesson.complete).count();
    (done, lessons.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn completed(lessons: &[Lesson]) -> Vec<u64> {
        lessons
            .iter()
            .filter(|lesson| lesson.complete)
            .map(|lesson| lesson.id)
            .collect()
    }

    #[test]
    fn test_complete_lesson() {
        let lessons = slice();
        let next = lessons
            .reduce(&initial_lessons(), &complete_lesson(3))
            .unwrap();
        assert_eq!(completed(&next), vec![1, 3]);
        assert_eq!(progress(&next), (2, 4));
    }

    #[test]
    fn test_complete_unknown_lesson_changes_nothing() {
        let lessons = slice();
        let next = lessons
            .reduce(&initial_lessons(), &complete_lesson(42))
            .unwrap();
        assert_eq!(next, initial_lessons());
    }

    #[test]
    fn test_complete_lesson_without_id_changes_nothing() {
        let lessons = slice();
        let next = lessons
            .reduce(&initial_lessons(), &lessons.action("completeLesson"))
            .unwrap();
        assert_eq!(next, initial_lessons());
    }

    #[test]
    fn test_complete_and_reset_course() {
        let lessons = slice();
        let done = lessons
            .reduce(&initial_lessons(), &lessons.action("completeCourse"))
            .unwrap();
        assert_eq!(progress(&done), (4, 4));

        let reset = lessons.reduce(&done, &lessons.action("resetCourse")).unwrap();
        assert_eq!(progress(&reset), (0, 4));
        assert_eq!(
            reset.iter().map(|lesson| lesson.name.as_str()).collect::<Vec<_>>(),
            vec!["Design", "HTML", "CSS", "JavaScript"]
        );
    }
}
