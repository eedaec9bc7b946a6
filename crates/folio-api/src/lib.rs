// API clients for the services folio talks to
pub mod gemini;
pub mod github;

// Re-export common types
pub use gemini::{GeminiClient, GeminiError, GeminiTurn};
pub use github::{GitHubClient, GitHubError, GitHubOwner, GitHubRepo};
