pub mod exporter;
pub mod input_normalizer;
pub mod llm_service;
pub mod word_extractor;

pub use exporter::{build_artifact, write_artifact, Artifact};
pub use input_normalizer::{InputKind, InputNormalizer};
pub use llm_service::{LlmService, SolutionGenerator};
pub use word_extractor::{DocxExtractor, WordExtractor};
