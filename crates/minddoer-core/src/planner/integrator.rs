//! Turns user-supplied task specs into tracked tasks.

use crate::task::{Task, TaskSpec};

/// Materialize one pending, user-created task per spec, preserving order.
pub fn integrate_user_tasks(specs: Vec<TaskSpec>) -> Vec<Task> {
    specs
        .into_iter()
        .map(|spec| Task::from_spec(spec.normalized()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, TaskStatus};
    use std::collections::HashSet;

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(integrate_user_tasks(Vec::new()).is_empty());
    }

    #[test]
    fn one_task_per_spec_in_order() {
        let specs = vec![
            TaskSpec::new("Write report"),
            TaskSpec {
                priority: Priority::Urgent,
                ..TaskSpec::new("Pay rent")
            },
            TaskSpec::new("Stretch"),
        ];

        let tasks = integrate_user_tasks(specs);
        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Write report", "Pay rent", "Stretch"]);
        assert_eq!(tasks[1].priority, Priority::Urgent);

        let ids: HashSet<_> = tasks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert!(tasks.iter().all(|t| t.user_created));
        assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));
        assert!(tasks.iter().all(|t| t.completed_at.is_none()));
    }

    #[test]
    fn blank_description_falls_back_to_title() {
        let spec = TaskSpec {
            description: "  ".to_string(),
            ..TaskSpec::new("Groceries")
        };
        let tasks = integrate_user_tasks(vec![spec]);
        assert_eq!(tasks[0].description, "Groceries");
    }
}
