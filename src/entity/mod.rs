// Numeric-entity detection and canonicalization for Vietnamese transcripts.
//
// Detection produces non-overlapping, priority-resolved spans over the raw
// text; normalization rewrites each span into its canonical form. Both halves
// are pure functions of their input.

use serde::Serialize;
use tracing::debug;

pub mod detector;
pub mod normalizer;

pub use detector::detect;
pub use normalizer::normalize_entity;

/// Closed set of entity categories. Detection priority is fixed by the
/// detector's pattern order, not by this enum's ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Decimal,
    Date,
    Time,
    PhoneAccount,
    Currency,
    Percentage,
    Measurement,
    Fraction,
    Ordinal,
    NumberSequence,
    YearDuration,
}

/// A detected span of the original text requiring normalization.
///
/// `start..end` is a half-open byte range; `text == original[start..end]`
/// prior to any merge. Spans in one detection pass never overlap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub text: String,
    pub category: Category,
    pub start: usize,
    pub end: usize,
}

/// An entity plus its category-specific canonical rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEntity {
    #[serde(flatten)]
    pub entity: Entity,
    pub normalized: String,
}

/// Detect entities and compute each one's replacement string.
pub fn detect_and_normalize(text: &str) -> Vec<NormalizedEntity> {
    detect(text)
        .into_iter()
        .map(|entity| {
            let normalized = normalize_entity(&entity.text, entity.category);
            NormalizedEntity { entity, normalized }
        })
        .collect()
}

/// Rewrite every detected entity in `text` with its canonical form.
///
/// Replacement is assembled left to right over the non-overlapping spans, so
/// one unparsable span never disturbs the rest of the sentence.
pub fn normalize_entities(text: &str) -> String {
    let entities = detect_and_normalize(text);
    if entities.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for ne in &entities {
        debug!(
            category = ?ne.entity.category,
            span = %ne.entity.text,
            normalized = %ne.normalized,
            "entity normalized"
        );
        out.push_str(&text[last..ne.entity.start]);
        out.push_str(&ne.normalized);
        last = ne.entity.end;
    }
    out.push_str(&text[last..]);
    out
}
