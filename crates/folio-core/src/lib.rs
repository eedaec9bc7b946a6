// Core of folio: aggregation, normalization and the data the views consume
pub mod aggregator;
pub mod chat;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod normalize;
pub mod persona;
pub mod providers;
pub mod seed;
pub mod state;

pub use aggregator::{Aggregation, Aggregator, Limit, ProjectSource, RepositorySource};
pub use chat::{ChatBackend, ChatSession, UnavailableBackend};
pub use config::Config;
pub use error::Error;
pub use export::{ExportFormat, Exporter};
pub use models::{ChatMessage, Profile, Project, Role, Skill};
pub use state::LoadState;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
