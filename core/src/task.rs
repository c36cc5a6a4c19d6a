use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single task record as returned by the backend. The client never
/// constructs these itself; it only reads them and requests mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
}

/// The full workflow-state enumeration. The action form's status select is
/// populated from `TaskStatus::ALL`; the list view only exposes the subset
/// in `Tab::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Available,
    Assigned,
    InProgress,
    SmokeTesting,
    NeedsReview,
    InReview,
    Approved,
    Merged,
    SanityCheck,
    RegressionCheck,
    Released,
    Verified,
    Completed,
    Backlog,
    Blocked,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 15] = [
        TaskStatus::Available,
        TaskStatus::Assigned,
        TaskStatus::InProgress,
        TaskStatus::SmokeTesting,
        TaskStatus::NeedsReview,
        TaskStatus::InReview,
        TaskStatus::Approved,
        TaskStatus::Merged,
        TaskStatus::SanityCheck,
        TaskStatus::RegressionCheck,
        TaskStatus::Released,
        TaskStatus::Verified,
        TaskStatus::Completed,
        TaskStatus::Backlog,
        TaskStatus::Blocked,
    ];

    /// Wire name, e.g. `IN_PROGRESS`.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Available => "AVAILABLE",
            TaskStatus::Assigned => "ASSIGNED",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::SmokeTesting => "SMOKE_TESTING",
            TaskStatus::NeedsReview => "NEEDS_REVIEW",
            TaskStatus::InReview => "IN_REVIEW",
            TaskStatus::Approved => "APPROVED",
            TaskStatus::Merged => "MERGED",
            TaskStatus::SanityCheck => "SANITY_CHECK",
            TaskStatus::RegressionCheck => "REGRESSION_CHECK",
            TaskStatus::Released => "RELEASED",
            TaskStatus::Verified => "VERIFIED",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Backlog => "BACKLOG",
            TaskStatus::Blocked => "BLOCKED",
        }
    }

    /// Human-readable name for selects and list rows, e.g. `In Progress`.
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Available => "Available",
            TaskStatus::Assigned => "Assigned",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::SmokeTesting => "Smoke Testing",
            TaskStatus::NeedsReview => "Needs Review",
            TaskStatus::InReview => "In Review",
            TaskStatus::Approved => "Approved",
            TaskStatus::Merged => "Merged",
            TaskStatus::SanityCheck => "Sanity Check",
            TaskStatus::RegressionCheck => "Regression Check",
            TaskStatus::Released => "Released",
            TaskStatus::Verified => "Verified",
            TaskStatus::Completed => "Completed",
            TaskStatus::Backlog => "Backlog",
            TaskStatus::Blocked => "Blocked",
        }
    }

    pub fn parse(s: &str) -> Option<TaskStatus> {
        TaskStatus::ALL.into_iter().find(|st| st.as_str() == s)
    }
}

/// The status tabs of the list view, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    InProgress,
    Assigned,
    #[default]
    Available,
    NeedsReview,
    InReview,
    Verified,
    Merged,
    Completed,
}

impl Tab {
    pub const ALL: [Tab; 8] = [
        Tab::InProgress,
        Tab::Assigned,
        Tab::Available,
        Tab::NeedsReview,
        Tab::InReview,
        Tab::Verified,
        Tab::Merged,
        Tab::Completed,
    ];

    pub fn status(self) -> TaskStatus {
        match self {
            Tab::InProgress => TaskStatus::InProgress,
            Tab::Assigned => TaskStatus::Assigned,
            Tab::Available => TaskStatus::Available,
            Tab::NeedsReview => TaskStatus::NeedsReview,
            Tab::InReview => TaskStatus::InReview,
            Tab::Verified => TaskStatus::Verified,
            Tab::Merged => TaskStatus::Merged,
            Tab::Completed => TaskStatus::Completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.status().as_str()
    }

    pub fn label(self) -> &'static str {
        self.status().label()
    }

    /// Position within `Tab::ALL`.
    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// One page of the query endpoint's response. An empty `next` means the
/// tab is exhausted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasksPage {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub next: String,
}

/// Partial field update for the mutation endpoint. Only present fields are
/// serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_select_has_fifteen_options() {
        assert_eq!(TaskStatus::ALL.len(), 15);
    }

    #[test]
    fn status_serializes_as_wire_name() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let back: TaskStatus = serde_json::from_str("\"NEEDS_REVIEW\"").unwrap();
        assert_eq!(back, TaskStatus::NeedsReview);
    }

    #[test]
    fn status_parse_round_trips() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("NOT_A_STATUS"), None);
    }

    #[test]
    fn default_tab_is_available() {
        assert_eq!(Tab::default(), Tab::Available);
    }

    #[test]
    fn tab_cycle_wraps() {
        assert_eq!(Tab::Completed.next(), Tab::InProgress);
        assert_eq!(Tab::InProgress.prev(), Tab::Completed);
    }

    #[test]
    fn page_tolerates_missing_next() {
        let page: TasksPage = serde_json::from_str(r#"{"tasks":[]}"#).unwrap();
        assert!(page.next.is_empty());
        assert!(page.tasks.is_empty());
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let update = TaskUpdate {
            assignee: Some("ankita".to_string()),
            ..TaskUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"assignee": "ankita"}));
    }

    #[test]
    fn task_deserializes_optional_fields() {
        let task: Task = serde_json::from_str(
            r#"{"id":"t1","title":"Fix login","status":"ASSIGNED","assignee":"joy","ends_on":"2020-05-12"}"#,
        )
        .unwrap();
        assert_eq!(task.assignee.as_deref(), Some("joy"));
        assert_eq!(
            task.ends_on,
            Some(chrono::NaiveDate::from_ymd_opt(2020, 5, 12).unwrap())
        );
    }
}
