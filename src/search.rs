use crate::models::{Assignment, ChecklistTemplate, Document, SearchResults, User, UserRole};

pub fn search_global(
    user: &User,
    documents: &[Document],
    templates: &[ChecklistTemplate],
    assignments: &[Assignment],
    query: &str,
) -> SearchResults {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return SearchResults::default();
    }

    let documents = documents
        .iter()
        .filter(|doc| doc.workspace_id == user.workspace_id && matches_document(doc, &q))
        .cloned()
        .collect();

    let templates = templates
        .iter()
        .filter(|template| {
            template.workspace_id == user.workspace_id && matches_template(template, &q)
        })
        .cloned()
        .collect();

    // Assignments are scoped by workspace and role only. The text query is not
    // applied to them; see the open question in DESIGN.md.
    let assignments = assignments
        .iter()
        .filter(|assignment| {
            assignment.workspace_id == user.workspace_id
                && (user.role == UserRole::Admin || assignment.assigned_to_user_id == user.id)
        })
        .cloned()
        .collect();

    SearchResults {
        documents,
        templates,
        assignments,
    }
}

fn matches_document(doc: &Document, q: &str) -> bool {
    contains_ci(&doc.title, q) || contains_ci(&doc.summary, q) || contains_ci(&doc.content, q)
}

fn matches_template(template: &ChecklistTemplate, q: &str) -> bool {
    contains_ci(&template.name, q) || contains_ci(&template.description, q)
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[cfg(test)]
mod tests {
    use super::search_global;
    use crate::models::{ChecklistTemplate, Document, User, UserRole};
    use chrono::Utc;

    fn user(role: UserRole) -> User {
        User {
            id: "u1".to_string(),
            workspace_id: "w1".to_string(),
            name: "Tester".to_string(),
            email: "tester@example.com".to_string(),
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn document(workspace_id: &str, title: &str, content: &str) -> Document {
        Document {
            id: "d1".to_string(),
            workspace_id: workspace_id.to_string(),
            project_id: "p1".to_string(),
            title: title.to_string(),
            summary: String::new(),
            content: content.to_string(),
            created_by_user_id: "u1".to_string(),
            updated_by_user_id: "u1".to_string(),
            is_pinned: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn template(workspace_id: &str, name: &str) -> ChecklistTemplate {
        ChecklistTemplate {
            id: "t1".to_string(),
            workspace_id: workspace_id.to_string(),
            project_id: "p1".to_string(),
            name: name.to_string(),
            description: String::new(),
            created_by_user_id: "u1".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn blank_query_returns_nothing() {
        let results = search_global(
            &user(UserRole::Admin),
            &[document("w1", "Architecture Overview", "")],
            &[],
            &[],
            "   ",
        );
        assert!(results.documents.is_empty());
        assert!(results.templates.is_empty());
        assert!(results.assignments.is_empty());
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let results = search_global(
            &user(UserRole::Admin),
            &[document("w1", "Architecture Overview", "")],
            &[template("w1", "Backend Onboarding")],
            &[],
            "ARCHITECT",
        );
        assert_eq!(results.documents.len(), 1);
        assert!(results.templates.is_empty());
    }

    #[test]
    fn document_content_is_searched() {
        let results = search_global(
            &user(UserRole::Admin),
            &[document("w1", "Setup", "run docker-compose up")],
            &[],
            &[],
            "docker",
        );
        assert_eq!(results.documents.len(), 1);
    }

    #[test]
    fn other_workspaces_are_excluded() {
        let results = search_global(
            &user(UserRole::Admin),
            &[document("w2", "Architecture Overview", "")],
            &[template("w2", "Architecture Onboarding")],
            &[],
            "architecture",
        );
        assert!(results.documents.is_empty());
        assert!(results.templates.is_empty());
    }
}
