use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder stored in `live_demo_url` when a project has no demo
pub const NO_LIVE_DEMO: &str = "#";

/// Display entity for one project card / detail view.
///
/// Built once per aggregation (or taken from the seed list) and never mutated
/// afterwards. Field names serialize in camelCase to match the view model the
/// web front end reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub image_url: String,
    pub repo_url: String,
    pub live_demo_url: String,
    pub long_description: String,
    pub problem_solved: String,
}

impl Project {
    pub fn has_live_demo(&self) -> bool {
        !self.live_demo_url.is_empty() && self.live_demo_url != NO_LIVE_DEMO
    }

    /// Badge shown on the card: first tech, or a generic label
    pub fn primary_tech(&self) -> &str {
        self.tech_stack.first().map(String::as_str).unwrap_or("Project")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub category: String,
    pub items: Vec<String>,
}

/// Static biographical data for the portfolio owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub profession: String,
    pub institution: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub skills: Vec<Skill>,
    /// Source-code hosting accounts whose repositories get aggregated
    pub accounts: Vec<String>,
}

impl Profile {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One line of the chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}
