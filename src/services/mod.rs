pub mod assistant;
pub mod gemini;
pub mod pipeline;

pub use assistant::{CatalogAssistant, RecommendationAssistant};
pub use gemini::{GeminiBackend, GenerativeBackend};
pub use pipeline::IngestionPipeline;
