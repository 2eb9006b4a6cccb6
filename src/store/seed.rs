use super::StoreInner;
use crate::models::{
    Assignment, AssignmentItemStatus, ChecklistItemTemplate, ChecklistTemplate, Comment,
    CommentTarget, Document, OnboardingStatus, Project, User, UserRole, Workspace,
};
use chrono::{DateTime, Duration, Utc};

pub const DEMO_WORKSPACE_ID: &str = "demo-workspace";
pub const DEMO_ADMIN_EMAIL: &str = "admin@demo.devhive.com";
pub const DEMO_DEV_EMAIL: &str = "alex.dev@demo.devhive.com";

// Loads the demo fixture once per store. Uses fixed ids and relative past
// dates so the dashboard, insights and at-risk views all have data to show.
pub(crate) fn seed_demo_data(inner: &mut StoreInner) {
    if inner.demo_seeded {
        return;
    }
    let now = Utc::now();
    let days_ago = |days: i64| now - Duration::days(days);

    inner.workspaces.push(Workspace {
        id: DEMO_WORKSPACE_ID.to_string(),
        name: "Acme Dev Co - Demo".to_string(),
        description: "Demo workspace showcasing DevHive features".to_string(),
        created_at: now,
        updated_at: now,
    });

    let users = [
        ("demo-admin-id", "Demo Admin", DEMO_ADMIN_EMAIL, UserRole::Admin),
        ("demo-dev-id", "Alex Developer", DEMO_DEV_EMAIL, UserRole::Member),
        ("demo-dev-sarah", "Sarah Chen", "sarah.chen@demo.devhive.com", UserRole::Member),
        ("demo-dev-mike", "Mike Rodriguez", "mike.r@demo.devhive.com", UserRole::Member),
        ("demo-tech-lead", "Priya Sharma", "priya.sharma@demo.devhive.com", UserRole::Admin),
    ];
    for (id, name, email, role) in users {
        inner.users.push(User {
            id: id.to_string(),
            workspace_id: DEMO_WORKSPACE_ID.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        });
    }

    let projects = [
        ("demo-project-backend", "Backend API (Java)", "REST API service built with Spring Boot"),
        ("demo-project-frontend", "Web App (React)", "Customer-facing web application"),
        ("demo-project-data", "Data Pipeline", "ETL and analytics infrastructure"),
    ];
    for (id, name, description) in projects {
        inner.projects.push(Project {
            id: id.to_string(),
            workspace_id: DEMO_WORKSPACE_ID.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            repo_url: None,
            created_at: now,
            updated_at: now,
        });
    }

    let documents = [
        (
            "demo-doc-backend-1",
            "demo-project-backend",
            "Architecture Overview",
            "High-level system design and component interactions",
            "# Architecture Overview\n\nOur backend follows a microservices architecture:\n\n- **API Gateway**: routes requests and handles authentication\n- **User Service**: manages user accounts and profiles\n- **Order Service**: processes orders and payments\n\nPostgreSQL for persistent data, Redis for caching, RabbitMQ for async messaging.",
            "demo-admin-id",
            false,
        ),
        (
            "demo-doc-backend-2",
            "demo-project-backend",
            "Local Setup Guide",
            "Step-by-step instructions to run the backend locally",
            "# Local Setup Guide\n\n1. Clone the repository\n2. Run `docker-compose up -d` to start dependencies\n3. Run `mvn clean install` to build\n4. Run `mvn spring-boot:run` and access http://localhost:8080",
            "demo-admin-id",
            false,
        ),
        (
            "demo-doc-frontend-1",
            "demo-project-frontend",
            "Component Library",
            "Reusable UI components and design system",
            "# Component Library\n\nImport from `@/components/ui` and use consistent props across the app.",
            "demo-admin-id",
            false,
        ),
        (
            "demo-doc-frontend-2",
            "demo-project-frontend",
            "Testing Strategy",
            "Unit tests, integration tests, and E2E testing approach",
            "# Testing Strategy\n\nUnit tests with Jest + React Testing Library, E2E with Playwright. Minimum 80% coverage on new features.",
            "demo-tech-lead",
            true,
        ),
        (
            "demo-doc-data-1",
            "demo-project-data",
            "Pipeline Architecture",
            "ETL workflow and data processing stages",
            "# Pipeline Architecture\n\nExtract from source systems, transform with Python, load into Snowflake. Orchestrated by Apache Airflow.",
            "demo-admin-id",
            false,
        ),
        (
            "demo-doc-data-2",
            "demo-project-data",
            "Data Quality Standards",
            "Validation rules and data quality checks",
            "# Data Quality Standards\n\nSchema validation on ingestion, null checks for required fields, freshness SLAs per table.",
            "demo-tech-lead",
            true,
        ),
    ];
    for (id, project_id, title, summary, content, author, pinned) in documents {
        inner.documents.push(Document {
            id: id.to_string(),
            workspace_id: DEMO_WORKSPACE_ID.to_string(),
            project_id: project_id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            content: content.to_string(),
            created_by_user_id: author.to_string(),
            updated_by_user_id: author.to_string(),
            is_pinned: pinned,
            created_at: now,
            updated_at: now,
        });
    }

    let templates = [
        (
            "demo-template-backend",
            "demo-project-backend",
            "Backend Developer Onboarding",
            "Complete this checklist to get up to speed on our backend systems",
            "demo-admin-id",
        ),
        (
            "demo-template-frontend",
            "demo-project-frontend",
            "Frontend Developer Onboarding",
            "Learn our frontend stack and conventions",
            "demo-admin-id",
        ),
        (
            "demo-template-data",
            "demo-project-data",
            "Data Engineer Onboarding",
            "Get familiar with our data infrastructure",
            "demo-tech-lead",
        ),
    ];
    for (id, project_id, name, description, author) in templates {
        inner.templates.push(ChecklistTemplate {
            id: id.to_string(),
            workspace_id: DEMO_WORKSPACE_ID.to_string(),
            project_id: project_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            created_by_user_id: author.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        });
    }

    let items = [
        ("demo-item-backend-1", "demo-template-backend", "Read Architecture Overview", "Understand our microservices architecture", Some("demo-doc-backend-1"), 1, Some(30)),
        ("demo-item-backend-2", "demo-template-backend", "Set up local environment", "Get the backend running on your machine", Some("demo-doc-backend-2"), 2, Some(60)),
        ("demo-item-backend-3", "demo-template-backend", "Complete first bugfix", "Pick a starter issue and submit a PR", None, 3, Some(120)),
        ("demo-item-frontend-1", "demo-template-frontend", "Explore Component Library", "Review our UI components and design system", Some("demo-doc-frontend-1"), 1, Some(30)),
        ("demo-item-frontend-2", "demo-template-frontend", "Set up Testing Environment", "Configure Jest and write your first test", Some("demo-doc-frontend-2"), 2, Some(60)),
        ("demo-item-data-1", "demo-template-data", "Understand Pipeline Architecture", "Learn how our ETL workflows are structured", Some("demo-doc-data-1"), 1, Some(40)),
        ("demo-item-data-2", "demo-template-data", "Review Data Quality Standards", "Learn validation rules and quality metrics", Some("demo-doc-data-2"), 2, Some(30)),
        ("demo-item-data-3", "demo-template-data", "Create Your First DAG", "Build a simple Airflow DAG with unit tests", None, 3, Some(120)),
    ];
    for (id, template_id, title, description, linked, order_index, minutes) in items {
        inner.template_items.push(ChecklistItemTemplate {
            id: id.to_string(),
            checklist_template_id: template_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            linked_document_id: linked.map(str::to_string),
            order_index,
            estimated_minutes: minutes,
            created_at: now,
            updated_at: now,
        });
    }

    let assignment = |id: &str,
                      template_id: &str,
                      project_id: &str,
                      assigned_to: &str,
                      assigned_by: &str,
                      status: OnboardingStatus,
                      due_at: Option<DateTime<Utc>>,
                      started_at: Option<DateTime<Utc>>,
                      completed_at: Option<DateTime<Utc>>,
                      created_at: DateTime<Utc>| Assignment {
        id: id.to_string(),
        workspace_id: DEMO_WORKSPACE_ID.to_string(),
        checklist_template_id: template_id.to_string(),
        project_id: project_id.to_string(),
        assigned_to_user_id: assigned_to.to_string(),
        assigned_by_user_id: assigned_by.to_string(),
        status,
        due_at,
        started_at,
        completed_at,
        created_at,
        updated_at: created_at,
    };

    inner.assignments.push(assignment(
        "demo-assignment-completed",
        "demo-template-backend",
        "demo-project-backend",
        "demo-dev-id",
        "demo-admin-id",
        OnboardingStatus::Completed,
        Some(days_ago(5)),
        Some(days_ago(12)),
        Some(days_ago(5)),
        days_ago(14),
    ));
    inner.assignments.push(assignment(
        "demo-assignment-inprogress",
        "demo-template-backend",
        "demo-project-backend",
        "demo-dev-id",
        "demo-admin-id",
        OnboardingStatus::InProgress,
        Some(now + Duration::days(2)),
        Some(days_ago(3)),
        None,
        days_ago(7),
    ));
    inner.assignments.push(assignment(
        "demo-assignment-overdue",
        "demo-template-frontend",
        "demo-project-frontend",
        "demo-dev-id",
        "demo-admin-id",
        OnboardingStatus::NotStarted,
        Some(days_ago(2)),
        None,
        None,
        days_ago(10),
    ));
    inner.assignments.push(assignment(
        "demo-assignment-sarah-data",
        "demo-template-data",
        "demo-project-data",
        "demo-dev-sarah",
        "demo-tech-lead",
        OnboardingStatus::InProgress,
        Some(now + Duration::days(5)),
        Some(days_ago(2)),
        None,
        days_ago(4),
    ));

    let statuses = [
        ("demo-status-backend-0", "demo-assignment-inprogress", "demo-item-backend-1", OnboardingStatus::Completed, Some(days_ago(2))),
        ("demo-status-backend-1", "demo-assignment-inprogress", "demo-item-backend-2", OnboardingStatus::Completed, Some(days_ago(1))),
        ("demo-status-backend-2", "demo-assignment-inprogress", "demo-item-backend-3", OnboardingStatus::NotStarted, None),
        ("demo-status-frontend-0", "demo-assignment-overdue", "demo-item-frontend-1", OnboardingStatus::NotStarted, None),
        ("demo-status-frontend-1", "demo-assignment-overdue", "demo-item-frontend-2", OnboardingStatus::NotStarted, None),
        ("demo-status-sarah-0", "demo-assignment-sarah-data", "demo-item-data-1", OnboardingStatus::Completed, Some(days_ago(1))),
        ("demo-status-sarah-1", "demo-assignment-sarah-data", "demo-item-data-2", OnboardingStatus::InProgress, None),
        ("demo-status-sarah-2", "demo-assignment-sarah-data", "demo-item-data-3", OnboardingStatus::InProgress, None),
    ];
    for (id, assignment_id, item_id, status, completed_at) in statuses {
        inner.item_statuses.push(AssignmentItemStatus {
            id: id.to_string(),
            assignment_id: assignment_id.to_string(),
            checklist_item_template_id: item_id.to_string(),
            status,
            completed_at,
            created_at: now,
            updated_at: now,
        });
    }

    let hours_ago = |hours: i64| now - Duration::hours(hours);
    let comments = [
        (
            "demo-comment-1",
            CommentTarget::Document("demo-doc-backend-2".to_string()),
            "demo-dev-id",
            "Quick question: do we need Docker Enterprise or is Docker Desktop sufficient for local dev?",
            hours_ago(48),
        ),
        (
            "demo-comment-2",
            CommentTarget::Document("demo-doc-backend-2".to_string()),
            "demo-admin-id",
            "Docker Desktop is fine! No need for Enterprise for local development.",
            hours_ago(24),
        ),
        (
            "demo-comment-3",
            CommentTarget::Assignment("demo-assignment-inprogress".to_string()),
            "demo-admin-id",
            "Great progress so far! Let me know when you are ready to pair on the bugfix task.",
            hours_ago(12),
        ),
        (
            "demo-comment-4",
            CommentTarget::Assignment("demo-assignment-overdue".to_string()),
            "demo-admin-id",
            "Hey Alex, noticed this is past due. Any blockers I can help with?",
            hours_ago(6),
        ),
        (
            "demo-comment-5",
            CommentTarget::Assignment("demo-assignment-sarah-data".to_string()),
            "demo-tech-lead",
            "Nice work on completing the first task! Reach out if you need help with the DAG implementation.",
            hours_ago(3),
        ),
    ];
    for (id, target, author, content, created_at) in comments {
        inner.comments.push(Comment {
            id: id.to_string(),
            workspace_id: DEMO_WORKSPACE_ID.to_string(),
            target,
            author_user_id: author.to_string(),
            content: content.to_string(),
            created_at,
            updated_at: created_at,
        });
    }

    inner.demo_seeded = true;
    tracing::debug!("demo fixture seeded");
}
