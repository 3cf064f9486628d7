//! Bootstrap records loaded at process start.

use crate::domain::{AgendaError, HomeworkDraft, Timestamp};

/// (name, course, dueDate, subDate)
const BOOTSTRAP: [(&str, &str, &str, &str); 3] = [
    (
        "a2-shortstack",
        "Webware",
        "2021-09-09T11:59:00-0400",
        "2021-09-08T11:59:00-0400",
    ),
    (
        "CSS Grid Garden",
        "Webware",
        "2021-09-09T11:59:00-0400",
        "2021-09-08T12:00:00-0400",
    ),
    (
        "Project 2",
        "Mobile Computing",
        "2021-09-17T23:59:00-0400",
        "2021-09-08T12:01:00-0400",
    ),
];

/// Demo records, in listing order.
pub fn bootstrap_drafts() -> Result<Vec<HomeworkDraft>, AgendaError> {
    BOOTSTRAP
        .iter()
        .map(|&(name, course, due, sub)| {
            Ok(HomeworkDraft {
                name: name.to_string(),
                course: course.to_string(),
                due_date: Timestamp::parse(due)?,
                sub_date: Timestamp::parse(sub)?,
            })
        })
        .collect()
}
