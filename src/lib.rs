pub mod address;
pub mod entity;
pub mod lexicon;
pub mod numeral;
pub mod pipeline;
pub mod sec;
pub mod tokens;
pub mod tone;

// Re-export main types for convenient access
pub use entity::{detect_and_normalize, normalize_entities, Category, Entity, NormalizedEntity};
pub use pipeline::{CprError, CprModel, Pipeline};
pub use sec::SecDictionary;

// Re-export the low-level passes for callers that compose their own pipeline
pub use address::{rewrite_dash, rewrite_slash};
pub use numeral::{parse_vietnamese_number, render_vietnamese_number};
pub use tone::normalize_tone;
