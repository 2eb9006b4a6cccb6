pub mod seed;

use crate::errors::{AppError, AppResult};
use crate::models::{
    Assignment, AssignmentItemStatus, AtRisk, ChecklistItemTemplate, ChecklistTemplate, Comment,
    CommentTarget, CreateAssignmentPayload, CreateDocumentPayload, CreateProjectPayload,
    CreateTemplateItemPayload, CreateTemplatePayload, CreateUserPayload, CreateWorkspacePayload,
    Document, DocumentPatch, InsightsMetrics, OnboardingStatus, Project, SearchResults,
    TemplateItemPatch, User, UserRole, WaitlistSubscriber, Workspace,
};
use crate::progress::RollupTransition;
use crate::{insights, progress, risk, sanitize, search};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Default)]
struct StoreInner {
    current_user_id: Option<String>,
    workspaces: Vec<Workspace>,
    users: Vec<User>,
    projects: Vec<Project>,
    documents: Vec<Document>,
    templates: Vec<ChecklistTemplate>,
    template_items: Vec<ChecklistItemTemplate>,
    assignments: Vec<Assignment>,
    item_statuses: Vec<AssignmentItemStatus>,
    comments: Vec<Comment>,
    waitlist: Vec<WaitlistSubscriber>,
    demo_seeded: bool,
}

impl StoreInner {
    fn current_user(&self) -> Option<&User> {
        let id = self.current_user_id.as_deref()?;
        self.users.iter().find(|user| user.id == id)
    }
}

#[derive(Debug, Default)]
pub struct Store {
    inner: Mutex<StoreInner>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::Internal("store mutex poisoned".to_string()))
    }

    // ─── Auth ───────────────────────────────────────────────────────────────

    pub fn login(&self, email: &str, _password: &str) -> AppResult<User> {
        let mut inner = self.lock()?;
        let user = inner
            .users
            .iter()
            .find(|user| user.email == email)
            .cloned()
            .ok_or_else(|| AppError::Validation("Invalid credentials".to_string()))?;
        inner.current_user_id = Some(user.id.clone());
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(user)
    }

    pub fn signup(
        &self,
        name: &str,
        email: &str,
        _password: &str,
        role: UserRole,
    ) -> AppResult<User> {
        let mut inner = self.lock()?;
        if inner.users.iter().any(|user| user.email == email) {
            return Err(AppError::Validation("User already exists".to_string()));
        }

        let now = Utc::now();
        let workspace_id = match role {
            UserRole::Admin => {
                let workspace = Workspace {
                    id: generate_id(),
                    name: format!("{name}'s Workspace"),
                    description: "My workspace".to_string(),
                    created_at: now,
                    updated_at: now,
                };
                let id = workspace.id.clone();
                inner.workspaces.push(workspace);
                id
            }
            // Members join the first workspace; the id stays empty when none
            // exists yet.
            UserRole::Member => inner
                .workspaces
                .first()
                .map(|workspace| workspace.id.clone())
                .unwrap_or_default(),
        };

        let user = User {
            id: generate_id(),
            workspace_id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());
        inner.current_user_id = Some(user.id.clone());
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "user signed up");
        Ok(user)
    }

    pub fn logout(&self) -> AppResult<()> {
        let mut inner = self.lock()?;
        inner.current_user_id = None;
        Ok(())
    }

    pub fn current_user(&self) -> AppResult<Option<User>> {
        let inner = self.lock()?;
        Ok(inner.current_user().cloned())
    }

    pub fn login_as_demo(&self) -> AppResult<User> {
        let mut inner = self.lock()?;
        seed::seed_demo_data(&mut inner);
        let user = inner
            .users
            .iter()
            .find(|user| user.email == seed::DEMO_ADMIN_EMAIL)
            .cloned()
            .ok_or_else(|| AppError::Internal("demo admin missing after seed".to_string()))?;
        inner.current_user_id = Some(user.id.clone());
        Ok(user)
    }

    pub fn is_demo_user(&self) -> AppResult<bool> {
        let inner = self.lock()?;
        Ok(inner
            .current_user()
            .is_some_and(|user| user.workspace_id == seed::DEMO_WORKSPACE_ID))
    }

    // ─── Workspaces, projects, users ────────────────────────────────────────

    pub fn create_workspace(&self, payload: CreateWorkspacePayload) -> AppResult<Workspace> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        let workspace = Workspace {
            id: generate_id(),
            name: payload.name,
            description: payload.description,
            created_at: now,
            updated_at: now,
        };
        inner.workspaces.push(workspace.clone());
        Ok(workspace)
    }

    pub fn create_project(&self, payload: CreateProjectPayload) -> AppResult<Project> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        let project = Project {
            id: generate_id(),
            workspace_id: payload.workspace_id,
            name: payload.name,
            description: payload.description,
            repo_url: payload.repo_url,
            created_at: now,
            updated_at: now,
        };
        inner.projects.push(project.clone());
        Ok(project)
    }

    pub fn create_user(&self, payload: CreateUserPayload) -> AppResult<User> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        let user = User {
            id: generate_id(),
            workspace_id: payload.workspace_id,
            name: payload.name,
            email: payload.email,
            role: payload.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    pub fn find_workspace(&self, id: &str) -> AppResult<Option<Workspace>> {
        let inner = self.lock()?;
        Ok(inner.workspaces.iter().find(|w| w.id == id).cloned())
    }

    pub fn find_project(&self, id: &str) -> AppResult<Option<Project>> {
        let inner = self.lock()?;
        Ok(inner.projects.iter().find(|p| p.id == id).cloned())
    }

    pub fn projects_for_workspace(&self, workspace_id: &str) -> AppResult<Vec<Project>> {
        let inner = self.lock()?;
        Ok(inner
            .projects
            .iter()
            .filter(|project| project.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    pub fn users_for_workspace(&self, workspace_id: &str) -> AppResult<Vec<User>> {
        let inner = self.lock()?;
        Ok(inner
            .users
            .iter()
            .filter(|user| user.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    // ─── Documents ──────────────────────────────────────────────────────────

    pub fn create_document(&self, payload: CreateDocumentPayload) -> AppResult<Document> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        let document = Document {
            id: generate_id(),
            workspace_id: payload.workspace_id,
            project_id: payload.project_id,
            title: payload.title,
            summary: payload.summary,
            content: payload.content,
            created_by_user_id: payload.created_by_user_id,
            updated_by_user_id: payload.updated_by_user_id,
            is_pinned: payload.is_pinned,
            created_at: now,
            updated_at: now,
        };
        inner.documents.push(document.clone());
        Ok(document)
    }

    pub fn update_document(&self, id: &str, patch: DocumentPatch) -> AppResult<Option<Document>> {
        let mut inner = self.lock()?;
        let Some(document) = inner.documents.iter_mut().find(|doc| doc.id == id) else {
            // Stale id from the caller; tolerated as a no-op.
            return Ok(None);
        };
        if let Some(title) = patch.title {
            document.title = title;
        }
        if let Some(summary) = patch.summary {
            document.summary = summary;
        }
        if let Some(content) = patch.content {
            document.content = content;
        }
        if let Some(updated_by) = patch.updated_by_user_id {
            document.updated_by_user_id = updated_by;
        }
        if let Some(is_pinned) = patch.is_pinned {
            document.is_pinned = is_pinned;
        }
        document.updated_at = Utc::now();
        Ok(Some(document.clone()))
    }

    pub fn delete_document(&self, id: &str) -> AppResult<bool> {
        let mut inner = self.lock()?;
        let before = inner.documents.len();
        // No cascade: template items may keep a dangling linkedDocumentId.
        inner.documents.retain(|doc| doc.id != id);
        Ok(inner.documents.len() < before)
    }

    pub fn find_document(&self, id: &str) -> AppResult<Option<Document>> {
        let inner = self.lock()?;
        Ok(inner.documents.iter().find(|doc| doc.id == id).cloned())
    }

    pub fn documents_for_project(&self, project_id: &str) -> AppResult<Vec<Document>> {
        let inner = self.lock()?;
        Ok(inner
            .documents
            .iter()
            .filter(|doc| doc.project_id == project_id)
            .cloned()
            .collect())
    }

    pub fn documents_for_workspace(&self, workspace_id: &str) -> AppResult<Vec<Document>> {
        let inner = self.lock()?;
        Ok(inner
            .documents
            .iter()
            .filter(|doc| doc.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    // ─── Templates ──────────────────────────────────────────────────────────

    pub fn create_template(&self, payload: CreateTemplatePayload) -> AppResult<ChecklistTemplate> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        let template = ChecklistTemplate {
            id: payload.id.unwrap_or_else(generate_id),
            workspace_id: payload.workspace_id,
            project_id: payload.project_id,
            name: payload.name,
            description: payload.description,
            created_by_user_id: payload.created_by_user_id,
            is_active: payload.is_active,
            created_at: now,
            updated_at: now,
        };
        inner.templates.push(template.clone());
        Ok(template)
    }

    pub fn create_template_item(
        &self,
        payload: CreateTemplateItemPayload,
    ) -> AppResult<ChecklistItemTemplate> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        let item = ChecklistItemTemplate {
            id: generate_id(),
            checklist_template_id: payload.checklist_template_id,
            title: payload.title,
            description: payload.description,
            linked_document_id: payload.linked_document_id,
            order_index: payload.order_index,
            estimated_minutes: payload.estimated_minutes,
            created_at: now,
            updated_at: now,
        };
        inner.template_items.push(item.clone());
        Ok(item)
    }

    pub fn update_template_item(
        &self,
        id: &str,
        patch: TemplateItemPatch,
    ) -> AppResult<Option<ChecklistItemTemplate>> {
        let mut inner = self.lock()?;
        let Some(item) = inner.template_items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(linked) = patch.linked_document_id {
            item.linked_document_id = Some(linked);
        }
        if let Some(order_index) = patch.order_index {
            item.order_index = order_index;
        }
        if let Some(estimated) = patch.estimated_minutes {
            item.estimated_minutes = Some(estimated);
        }
        item.updated_at = Utc::now();
        Ok(Some(item.clone()))
    }

    pub fn delete_template_item(&self, id: &str) -> AppResult<bool> {
        let mut inner = self.lock()?;
        let before = inner.template_items.len();
        inner.template_items.retain(|item| item.id != id);
        Ok(inner.template_items.len() < before)
    }

    pub fn find_template(&self, id: &str) -> AppResult<Option<ChecklistTemplate>> {
        let inner = self.lock()?;
        Ok(inner.templates.iter().find(|t| t.id == id).cloned())
    }

    pub fn templates_for_project(&self, project_id: &str) -> AppResult<Vec<ChecklistTemplate>> {
        let inner = self.lock()?;
        Ok(inner
            .templates
            .iter()
            .filter(|template| template.project_id == project_id)
            .cloned()
            .collect())
    }

    pub fn templates_for_workspace(&self, workspace_id: &str) -> AppResult<Vec<ChecklistTemplate>> {
        let inner = self.lock()?;
        Ok(inner
            .templates
            .iter()
            .filter(|template| template.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    pub fn items_for_template(&self, template_id: &str) -> AppResult<Vec<ChecklistItemTemplate>> {
        let inner = self.lock()?;
        let mut items: Vec<ChecklistItemTemplate> = inner
            .template_items
            .iter()
            .filter(|item| item.checklist_template_id == template_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.order_index);
        Ok(items)
    }

    // ─── Assignments ────────────────────────────────────────────────────────

    pub fn create_assignment(&self, payload: CreateAssignmentPayload) -> AppResult<Assignment> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        let assigned_by = inner.current_user_id.clone().unwrap_or_default();
        let assignment = Assignment {
            id: generate_id(),
            workspace_id: payload.workspace_id,
            checklist_template_id: payload.checklist_template_id.clone(),
            project_id: payload.project_id,
            assigned_to_user_id: payload.assigned_to_user_id,
            assigned_by_user_id: assigned_by,
            status: OnboardingStatus::NotStarted,
            due_at: payload.due_at,
            started_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        inner.assignments.push(assignment.clone());

        // An unknown template leaves the assignment with zero item statuses,
        // which is a valid assignment reporting 0% progress.
        if inner
            .templates
            .iter()
            .any(|template| template.id == payload.checklist_template_id)
        {
            let item_ids: Vec<String> = inner
                .template_items
                .iter()
                .filter(|item| item.checklist_template_id == payload.checklist_template_id)
                .map(|item| item.id.clone())
                .collect();
            for item_id in item_ids {
                inner.item_statuses.push(AssignmentItemStatus {
                    id: generate_id(),
                    assignment_id: assignment.id.clone(),
                    checklist_item_template_id: item_id,
                    status: OnboardingStatus::NotStarted,
                    completed_at: None,
                    created_at: now,
                    updated_at: now,
                });
            }
        }

        tracing::debug!(assignment_id = %assignment.id, "assignment created");
        Ok(assignment)
    }

    pub fn update_assignment_item_status(
        &self,
        assignment_id: &str,
        item_id: &str,
        status: OnboardingStatus,
    ) -> AppResult<()> {
        let mut inner = self.lock()?;
        let now = Utc::now();

        if let Some(row) = inner.item_statuses.iter_mut().find(|row| {
            row.assignment_id == assignment_id && row.checklist_item_template_id == item_id
        }) {
            row.status = status;
            row.completed_at = (status == OnboardingStatus::Completed).then_some(now);
            row.updated_at = now;
        }

        // Rollup over the effective set: the just-applied value substituted
        // for the target item, so the result does not depend on the write
        // above being observed.
        let effective: Vec<OnboardingStatus> = inner
            .item_statuses
            .iter()
            .filter(|row| row.assignment_id == assignment_id)
            .map(|row| {
                if row.checklist_item_template_id == item_id {
                    status
                } else {
                    row.status
                }
            })
            .collect();

        let Some(assignment) = inner
            .assignments
            .iter_mut()
            .find(|assignment| assignment.id == assignment_id)
        else {
            return Ok(());
        };

        match progress::rollup_transition(assignment.status, &effective) {
            Some(RollupTransition::Complete) => {
                assignment.status = OnboardingStatus::Completed;
                assignment.completed_at = Some(now);
                assignment.updated_at = now;
                tracing::info!(assignment_id = %assignment.id, "assignment completed");
            }
            Some(RollupTransition::Start) => {
                assignment.status = OnboardingStatus::InProgress;
                assignment.started_at = Some(now);
                assignment.updated_at = now;
            }
            None => {}
        }
        Ok(())
    }

    pub fn find_assignment(&self, id: &str) -> AppResult<Option<Assignment>> {
        let inner = self.lock()?;
        Ok(inner.assignments.iter().find(|a| a.id == id).cloned())
    }

    pub fn assignments_for_workspace(&self, workspace_id: &str) -> AppResult<Vec<Assignment>> {
        let inner = self.lock()?;
        Ok(inner
            .assignments
            .iter()
            .filter(|assignment| assignment.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    pub fn assignments_for_user(&self, user_id: &str) -> AppResult<Vec<Assignment>> {
        let inner = self.lock()?;
        Ok(inner
            .assignments
            .iter()
            .filter(|assignment| assignment.assigned_to_user_id == user_id)
            .cloned()
            .collect())
    }

    pub fn item_statuses_for_assignment(
        &self,
        assignment_id: &str,
    ) -> AppResult<Vec<AssignmentItemStatus>> {
        let inner = self.lock()?;
        Ok(inner
            .item_statuses
            .iter()
            .filter(|row| row.assignment_id == assignment_id)
            .cloned()
            .collect())
    }

    pub fn assignment_progress(&self, assignment_id: &str) -> AppResult<u8> {
        let inner = self.lock()?;
        let statuses: Vec<OnboardingStatus> = inner
            .item_statuses
            .iter()
            .filter(|row| row.assignment_id == assignment_id)
            .map(|row| row.status)
            .collect();
        Ok(progress::completion_percent(&statuses))
    }

    pub fn at_risk_status(&self, assignment: &Assignment) -> Option<AtRisk> {
        risk::at_risk_status(assignment, Utc::now())
    }

    // ─── Read-side queries ──────────────────────────────────────────────────

    pub fn insights_metrics(&self, project_id: Option<&str>) -> AppResult<InsightsMetrics> {
        let inner = self.lock()?;
        let Some(user) = inner.current_user() else {
            return Ok(InsightsMetrics::default());
        };
        let scoped: Vec<Assignment> = inner
            .assignments
            .iter()
            .filter(|assignment| {
                assignment.workspace_id == user.workspace_id
                    && project_id.map_or(true, |p| assignment.project_id == p)
            })
            .cloned()
            .collect();
        Ok(insights::aggregate(&scoped))
    }

    pub fn search_global(&self, query: &str) -> AppResult<SearchResults> {
        let inner = self.lock()?;
        let Some(user) = inner.current_user() else {
            return Ok(SearchResults::default());
        };
        Ok(search::search_global(
            user,
            &inner.documents,
            &inner.templates,
            &inner.assignments,
            query,
        ))
    }

    // ─── Comments ───────────────────────────────────────────────────────────

    pub fn create_comment(
        &self,
        target: CommentTarget,
        content: &str,
    ) -> AppResult<Option<Comment>> {
        let mut inner = self.lock()?;
        let Some(user) = inner.current_user().cloned() else {
            return Ok(None);
        };
        let sanitized = sanitize::sanitize_comment(content);
        if sanitized.is_empty() {
            return Ok(None);
        }
        let now = Utc::now();
        let comment = Comment {
            id: generate_id(),
            workspace_id: user.workspace_id,
            target,
            author_user_id: user.id,
            content: sanitized,
            created_at: now,
            updated_at: now,
        };
        inner.comments.push(comment.clone());
        Ok(Some(comment))
    }

    pub fn delete_comment(&self, comment_id: &str) -> AppResult<bool> {
        let mut inner = self.lock()?;
        let Some(user) = inner.current_user().cloned() else {
            return Ok(false);
        };
        let Some(position) = inner
            .comments
            .iter()
            .position(|comment| comment.id == comment_id)
        else {
            return Ok(false);
        };
        let comment = &inner.comments[position];
        if comment.author_user_id != user.id && user.role != UserRole::Admin {
            return Ok(false);
        }
        inner.comments.remove(position);
        Ok(true)
    }

    pub fn get_comments(&self, target: &CommentTarget) -> AppResult<Vec<Comment>> {
        let inner = self.lock()?;
        let Some(user) = inner.current_user() else {
            return Ok(Vec::new());
        };
        let mut list: Vec<Comment> = inner
            .comments
            .iter()
            .filter(|comment| {
                comment.workspace_id == user.workspace_id && &comment.target == target
            })
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    // ─── Waitlist ───────────────────────────────────────────────────────────

    pub fn submit_waitlist(
        &self,
        email: &str,
        role: Option<&str>,
    ) -> AppResult<WaitlistSubscriber> {
        if !EMAIL_PATTERN.is_match(email) {
            return Err(AppError::Validation("Invalid email format".to_string()));
        }
        let normalized = email.trim().to_lowercase();

        let mut inner = self.lock()?;
        if inner
            .waitlist
            .iter()
            .any(|subscriber| subscriber.email == normalized)
        {
            return Err(AppError::Validation("Email already registered".to_string()));
        }

        let subscriber = WaitlistSubscriber {
            id: generate_id(),
            email: normalized,
            role: role.map(str::to_string),
            created_at: Utc::now(),
        };
        inner.waitlist.push(subscriber.clone());
        tracing::debug!(subscriber_id = %subscriber.id, "waitlist subscriber added");
        Ok(subscriber)
    }

    pub fn waitlist_subscribers(&self) -> AppResult<Vec<WaitlistSubscriber>> {
        let inner = self.lock()?;
        Ok(inner.waitlist.clone())
    }
}
