//! Local text filtering over an already-fetched project list.

use crate::models::Project;

/// Whether `project` matches `query`.
///
/// The query is trimmed and compared case-insensitively against the
/// space-joined, non-empty name, URL and branch fields. A blank query matches
/// every project.
pub fn matches(project: &Project, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || haystack(project).contains(&needle)
}

/// Projects matching `query`, in their original order.
pub fn filter<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return projects.iter().collect();
    }
    projects
        .iter()
        .filter(|p| haystack(p).contains(&needle))
        .collect()
}

fn haystack(project: &Project) -> String {
    [
        &project.name,
        &project.render_worker_url,
        &project.render_backend_url,
        &project.proxied_backend_url,
        &project.proxied_worker_url,
        &project.dashboard_url,
        &project.proxied_dashboard_url,
        &project.website_url,
        &project.dashboard_branch,
        &project.backend_branch,
        &project.worker_branch,
    ]
    .iter()
    .filter(|field| !field.is_empty())
    .map(|field| field.as_str())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::NewProject;

    fn project(name: &str, website: &str, worker_branch: &str) -> Project {
        NewProject {
            name: name.to_string(),
            render_worker_url: String::new(),
            render_backend_url: String::new(),
            proxied_backend_url: String::new(),
            proxied_worker_url: String::new(),
            dashboard_url: String::new(),
            proxied_dashboard_url: String::new(),
            website_url: website.to_string(),
            dashboard_branch: "main".to_string(),
            backend_branch: "main".to_string(),
            worker_branch: worker_branch.to_string(),
        }
        .into_project(Uuid::now_v7(), Utc::now())
    }

    #[test]
    fn blank_query_returns_everything() {
        let projects = vec![project("Alpha", "", "main"), project("Beta", "", "main")];
        assert_eq!(filter(&projects, "   ").len(), 2);
        assert!(matches(&projects[0], ""));
    }

    #[test]
    fn match_is_case_insensitive_and_trimmed() {
        let projects = vec![
            project("Alpha", "https://alpha.example.com", "main"),
            project("Beta", "https://beta.example.com", "main"),
        ];
        let found = filter(&projects, "  ALPHA.Example ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alpha");
    }

    #[test]
    fn branch_fields_are_searched() {
        let projects = vec![
            project("Alpha", "", "main"),
            project("Beta", "", "feature/queue-retry"),
        ];
        let found = filter(&projects, "queue-retry");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Beta");
    }

    #[test]
    fn empty_fields_do_not_add_gaps() {
        // Empty URLs are skipped, so the name and first branch are adjacent.
        let p = project("Alpha", "", "main");
        assert!(matches(&p, "alpha main"));
        assert!(!matches(&p, "alpha  main"));
    }

    #[test]
    fn no_match_returns_empty() {
        let projects = vec![project("Alpha", "", "main")];
        assert!(filter(&projects, "gamma").is_empty());
    }
}
