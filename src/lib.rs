pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → API → Storage)
pub mod cli; // Command-line interface
pub mod core; // Command orchestration
pub mod storage; // Configuration and credential persistence

/// Support modules (used across layers)
pub mod api; // Manifold API clients
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
