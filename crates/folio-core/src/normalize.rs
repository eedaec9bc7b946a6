//! Raw GitHub repository -> [`Project`] transform.
//!
//! Every rule here is deterministic. A repository either normalizes completely
//! or produces a [`Error::MappingError`]; there is no partially filled project.

use chrono::DateTime;
use folio_api::GitHubRepo;
use tracing::debug;

use crate::{
    models::{Project, NO_LIVE_DEMO},
    Error, Result,
};

pub const DEFAULT_DESCRIPTION: &str =
    "A project developed as part of my professional journey in software engineering.";
pub const MISSING_DESCRIPTION: &str = "No description available.";
pub const DEFAULT_PROBLEM_SOLVED: &str = "Demonstrating clean code and efficient project structure.";
pub const FALLBACK_LANGUAGE_PHRASE: &str = "modern coding standards";
/// Shown in place of an `updated_at` that does not parse
pub const INVALID_DATE: &str = "Invalid Date";

pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1555066931-4365d14bab8c?auto=format&fit=crop&q=80&w=1200";
pub const JAVA_IMAGE: &str =
    "https://images.unsplash.com/photo-1517694712202-14dd9538aa97?auto=format&fit=crop&q=80&w=1200";
pub const SCRIPT_IMAGE: &str =
    "https://images.unsplash.com/photo-1498050108023-c5249f4df085?auto=format&fit=crop&q=80&w=1200";
pub const REACT_IMAGE: &str =
    "https://images.unsplash.com/photo-1633356122544-f134324a6cee?auto=format&fit=crop&q=80&w=1200";

/// A language matches a rule when it contains any of `needles`
struct ImageRule {
    needles: &'static [&'static str],
    url: &'static str,
}

// Order matters: every matching rule overwrites the previous pick, so the
// last match wins ("javascript" hits both the java and the script rule).
const IMAGE_RULES: [ImageRule; 3] = [
    ImageRule {
        needles: &["java"],
        url: JAVA_IMAGE,
    },
    ImageRule {
        needles: &["javascript", "typescript"],
        url: SCRIPT_IMAGE,
    },
    ImageRule {
        needles: &["react"],
        url: REACT_IMAGE,
    },
];

/// Pick the card image for a primary language
pub fn select_image(language: Option<&str>) -> &'static str {
    let Some(lang) = language.filter(|l| !l.is_empty()) else {
        return DEFAULT_IMAGE;
    };
    let lang = lang.to_lowercase();

    let mut chosen = DEFAULT_IMAGE;
    for rule in &IMAGE_RULES {
        if rule.needles.iter().any(|needle| lang.contains(needle)) {
            chosen = rule.url;
        }
    }
    chosen
}

/// `my-cool_project` -> `my cool project`
pub fn display_name(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
}

/// Language first, then topics, with empty entries dropped. No dedup.
pub fn tech_stack(language: Option<&str>, topics: Option<&[String]>) -> Vec<String> {
    language
        .into_iter()
        .map(str::to_string)
        .chain(topics.unwrap_or_default().iter().cloned())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Render an ISO-8601 timestamp as `M/D/YYYY` (UTC)
pub fn format_updated(updated_at: &str) -> std::result::Result<String, chrono::ParseError> {
    let parsed = DateTime::parse_from_rfc3339(updated_at)?;
    Ok(parsed.naive_utc().format("%-m/%-d/%Y").to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn required<'a>(repo: &GitHubRepo, field: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::MappingError {
            id: repo.id,
            reason: format!("missing {}", field),
        });
    }
    Ok(value)
}

/// Normalize one raw repository into a display project
///
/// A blank `name`, `html_url` or owner login is a mapping failure. An
/// unparseable `updated_at` is not: it renders as [`INVALID_DATE`].
pub fn normalize(repo: &GitHubRepo) -> Result<Project> {
    let name = required(repo, "name", &repo.name)?;
    let repo_url = required(repo, "html_url", &repo.html_url)?;
    let login = required(repo, "owner.login", &repo.owner.login)?;

    let description = non_empty(repo.description.as_deref());
    let language = non_empty(repo.language.as_deref());

    let updated = format_updated(&repo.updated_at).unwrap_or_else(|e| {
        debug!("Repository {} has unparseable updated_at {:?}: {}", repo.id, repo.updated_at, e);
        INVALID_DATE.to_string()
    });

    let long_description = format!(
        "{} This repository is part of my {} GitHub profile. It has {} stars and was last updated on {}.",
        description.unwrap_or(MISSING_DESCRIPTION),
        login,
        repo.stargazers_count,
        updated
    );

    let problem_solved = match description {
        Some(_) => format!(
            "Focused on providing a clean implementation of {} using {}.",
            name,
            language.unwrap_or(FALLBACK_LANGUAGE_PHRASE)
        ),
        None => DEFAULT_PROBLEM_SOLVED.to_string(),
    };

    Ok(Project {
        id: repo.id.to_string(),
        name: display_name(name),
        description: description.unwrap_or(DEFAULT_DESCRIPTION).to_string(),
        tech_stack: tech_stack(language, repo.topics.as_deref()),
        image_url: select_image(language).to_string(),
        repo_url: repo_url.to_string(),
        live_demo_url: non_empty(repo.homepage.as_deref())
            .unwrap_or(NO_LIVE_DEMO)
            .to_string(),
        long_description,
        problem_solved,
    })
}
