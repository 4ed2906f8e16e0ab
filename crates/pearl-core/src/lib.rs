pub mod ai;
pub mod config;
pub mod controller;
pub mod error;
pub mod markup;
pub mod prompt;
pub mod state;
pub mod surface;

// Re-export main types for convenience
pub use ai::{GenerateRequest, GenerationBackend, GenerationOptions, OllamaClient};
pub use config::{Config, OverlapPolicy};
pub use controller::{ChatController, ChatSettings, Completion, Submission, FALLBACK_MESSAGE};
pub use error::{ChatError, ConfigError};
pub use markup::{render, Block, DisplayMarkup, Inline};
pub use prompt::PromptPayload;
pub use state::{DisplayContent, PendingState, Role, SubmissionId, Turn};
pub use surface::{DisplaySurface, Transcript};
