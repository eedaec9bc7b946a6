// Repository sources backed by real hosting APIs
pub mod github;

pub use github::GitHubSource;
