use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Member,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl OnboardingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AtRisk {
    Overdue,
    DueSoon,
    OnTime,
}

impl AtRisk {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::DueSoon => "due-soon",
            Self::OnTime => "on-time",
        }
    }
}

// ─── Entities ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub description: String,
    pub repo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub workspace_id: String,
    pub project_id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub created_by_user_id: String,
    pub updated_by_user_id: String,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistTemplate {
    pub id: String,
    pub workspace_id: String,
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub created_by_user_id: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemTemplate {
    pub id: String,
    pub checklist_template_id: String,
    pub title: String,
    pub description: String,
    pub linked_document_id: Option<String>,
    pub order_index: i32,
    pub estimated_minutes: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub workspace_id: String,
    pub checklist_template_id: String,
    pub project_id: String,
    pub assigned_to_user_id: String,
    pub assigned_by_user_id: String,
    pub status: OnboardingStatus,
    pub due_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentItemStatus {
    pub id: String,
    pub assignment_id: String,
    pub checklist_item_template_id: String,
    pub status: OnboardingStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "entityType", content = "entityId", rename_all = "camelCase")]
pub enum CommentTarget {
    Document(String),
    Assignment(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub workspace_id: String,
    #[serde(flatten)]
    pub target: CommentTarget,
    pub author_user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistSubscriber {
    pub id: String,
    pub email: String,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ─── Write payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspacePayload {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    pub workspace_id: String,
    pub name: String,
    pub description: String,
    pub repo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentPayload {
    pub workspace_id: String,
    pub project_id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub created_by_user_id: String,
    pub updated_by_user_id: String,
    pub is_pinned: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub updated_by_user_id: Option<String>,
    pub is_pinned: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplatePayload {
    pub id: Option<String>,
    pub workspace_id: String,
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub created_by_user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateItemPayload {
    pub checklist_template_id: String,
    pub title: String,
    pub description: String,
    pub linked_document_id: Option<String>,
    pub order_index: i32,
    pub estimated_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub linked_document_id: Option<String>,
    pub order_index: Option<i32>,
    pub estimated_minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentPayload {
    pub workspace_id: String,
    pub checklist_template_id: String,
    pub project_id: String,
    pub assigned_to_user_id: String,
    pub due_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    pub workspace_id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

// ─── Query results ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub documents: Vec<Document>,
    pub templates: Vec<ChecklistTemplate>,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucket {
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsMetrics {
    pub avg_completion_days: i64,
    pub status_counts: StatusCounts,
    pub assignments_over_time: Vec<WeekBucket>,
}

#[cfg(test)]
mod tests {
    use super::{Comment, CommentTarget, OnboardingStatus};
    use chrono::Utc;

    #[test]
    fn status_serializes_to_snake_case() {
        let json = serde_json::to_string(&OnboardingStatus::NotStarted).expect("serialize status");
        assert_eq!(json, "\"not_started\"");
    }

    #[test]
    fn comment_target_flattens_to_entity_pair() {
        let comment = Comment {
            id: "c1".to_string(),
            workspace_id: "w1".to_string(),
            target: CommentTarget::Document("d1".to_string()),
            author_user_id: "u1".to_string(),
            content: "hello".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&comment).expect("serialize comment");
        assert_eq!(value["entityType"], "document");
        assert_eq!(value["entityId"], "d1");
    }
}
