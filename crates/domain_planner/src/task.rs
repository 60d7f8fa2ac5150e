//! To-do tasks

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CoreError, TaskId};

use crate::error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Baixa,
    #[default]
    Media,
    Alta,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Baixa => "baixa",
            TaskPriority::Media => "media",
            TaskPriority::Alta => "alta",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baixa" => Ok(TaskPriority::Baixa),
            "media" => Ok(TaskPriority::Media),
            "alta" => Ok(TaskPriority::Alta),
            other => Err(CoreError::unknown_variant("task priority", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
    pub completed_on: Option<NaiveDate>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Result<Self, PlannerError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PlannerError::MissingField("title"));
        }
        Ok(Self {
            id: TaskId::new_v7(),
            title,
            done: false,
            due_date: None,
            priority: TaskPriority::default(),
            completed_on: None,
        })
    }

    pub fn due_on(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn complete(&mut self, today: NaiveDate) {
        self.done = true;
        self.completed_on = Some(today);
    }

    pub fn reopen(&mut self) {
        self.done = false;
        self.completed_on = None;
    }

    /// Flips the done flag and returns the new state
    pub fn toggle(&mut self, today: NaiveDate) -> bool {
        if self.done {
            self.reopen();
        } else {
            self.complete(today);
        }
        self.done
    }

    /// Open and past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.done && self.due_date.is_some_and(|due| due < today)
    }
}

/// Orders tasks for the list widget: open before done, then by due date
/// (undated last), then higher priority first
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.done
            .cmp(&b.done)
            .then_with(|| match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
            .then_with(|| b.priority.cmp(&a.priority))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    #[test]
    fn test_toggle() {
        let mut task = Task::new("Conciliar extrato").unwrap();
        assert!(task.toggle(d(3)));
        assert_eq!(task.completed_on, Some(d(3)));
        assert!(!task.toggle(d(4)));
        assert_eq!(task.completed_on, None);
    }

    #[test]
    fn test_overdue() {
        let mut task = Task::new("Emitir nota").unwrap().due_on(d(10));
        assert!(!task.is_overdue(d(10)));
        assert!(task.is_overdue(d(11)));
        task.complete(d(12));
        assert!(!task.is_overdue(d(12)));
        assert!(!Task::new("Sem prazo").unwrap().is_overdue(d(30)));
    }

    #[test]
    fn test_sort_for_display() {
        let mut done = Task::new("feito").unwrap().due_on(d(1));
        done.complete(d(1));
        let mut tasks = vec![
            done,
            Task::new("sem prazo").unwrap(),
            Task::new("depois").unwrap().due_on(d(9)),
            Task::new("urgente").unwrap().due_on(d(9)).with_priority(TaskPriority::Alta),
            Task::new("antes").unwrap().due_on(d(2)),
        ];
        sort_for_display(&mut tasks);

        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["antes", "urgente", "depois", "sem prazo", "feito"]);
    }
}
