//! Student slice: remaining course days and contact email

use serde::{Deserialize, Serialize};
use statekit::{Action, Slice};

pub const NAME: &str = "student";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub email: String,
    pub days_left: i64,
}

impl Default for Student {
    fn default() -> Self {
        Self {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            days_left: 120,
        }
    }
}

pub fn slice() -> Slice<Student> {
    Slice::new(NAME, Student::default())
        .case("incrementDays", |student, _| student.days_left += 1)
        .case("decrementDays", |student, _| student.days_left -= 1)
        .case("changeEmail", |student, action| {
            match action.payload_as::<String>() {
                Ok(email) => student.email = email,
                Err(err) => log::warn!("{}", err),
            }
        })
}

/// `student/changeEmail` with the new address
pub fn change_email(email: &str) -> Action {
    Action::new(format!("{}/changeEmail", NAME)).with_payload(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_days() {
        let student = slice();
        let next = student
            .reduce(&Student::default(), &student.action("incrementDays"))
            .unwrap();
        assert_eq!(next.days_left, 121);

        let next = student.reduce(&next, &student.action("decrementDays")).unwrap();
        assert_eq!(next, Student::default());
    }

    #[test]
    fn test_change_email() {
        let student = slice();
        let next = student
            .reduce(&Student::default(), &change_email("ada@analytical.engine"))
            .unwrap();
        assert_eq!(next.email, "ada@analytical.engine");
        assert_eq!(next.name, "Ada Lovelace");
    }

    #[test]
    fn test_change_email_without_payload_keeps_email() {
        let student = slice();
        let next = student
            .reduce(&Student::default(), &student.action("changeEmail"))
            .unwrap();
        assert_eq!(next.email, "ada@example.com");
    }
}
