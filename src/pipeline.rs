// Stage orchestration: address rewriting, entity normalization, spelling
// correction, tone placement, and an optional external capitalization-and-
// punctuation-restoration (CPR) model at the end.

use thiserror::Error;
use tracing::debug;

use crate::address::{rewrite_dash, rewrite_slash};
use crate::entity::normalize_entities;
use crate::sec::SecDictionary;
use crate::tone::normalize_tone;

/// External capitalization-and-punctuation-restoration model.
///
/// Object-safe so callers can plug in anything from an in-process model to a
/// remote service behind a client.
pub trait CprModel {
    fn restore(&self, text: &str) -> anyhow::Result<String>;
}

/// CPR failure. Carries the fully normalized pre-CPR text so callers can
/// fall back to it instead of losing the whole utterance.
#[derive(Debug, Error)]
#[error("capitalization/punctuation restoration failed")]
pub struct CprError {
    pub pre_cpr_text: String,
    #[source]
    pub source: anyhow::Error,
}

/// The normalization pipeline. Owns the SEC dictionary; everything else is
/// stateless, so one instance serves any number of transcripts.
pub struct Pipeline {
    sec: SecDictionary,
}

impl Pipeline {
    pub fn new(sec: SecDictionary) -> Self {
        Self { sec }
    }

    /// Run every deterministic stage over one raw transcript.
    pub fn process(&self, raw: &str) -> String {
        let text = rewrite_dash(raw);
        let text = rewrite_slash(&text);
        debug!(stage = "address", %text);

        let text = normalize_entities(&text);
        debug!(stage = "entities", %text);

        let text = self.sec.correct(&text);
        debug!(stage = "sec", %text);

        let text = normalize_tone(&text);
        debug!(stage = "tone", %text);

        text
    }

    /// `process`, then the external CPR model.
    pub fn process_with_cpr(&self, raw: &str, cpr: &dyn CprModel) -> Result<String, CprError> {
        let text = self.process(raw);
        match cpr.restore(&text) {
            Ok(restored) => Ok(restored),
            Err(source) => Err(CprError {
                pre_cpr_text: text,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn pipeline() -> Pipeline {
        Pipeline::new(SecDictionary::empty())
    }

    struct Upcase;
    impl CprModel for Upcase {
        fn restore(&self, text: &str) -> anyhow::Result<String> {
            Ok(text.to_uppercase())
        }
    }

    struct AlwaysFails;
    impl CprModel for AlwaysFails {
        fn restore(&self, _text: &str) -> anyhow::Result<String> {
            Err(anyhow!("model unavailable"))
        }
    }

    #[test]
    fn test_full_address_and_entity_flow() {
        let p = pipeline();
        assert_eq!(
            p.process("nhà số 15 Trên 6 Trên 89 Tô Ngọc Vân"),
            "nhà số 15/6/89 Tô Ngọc Vân"
        );
    }

    #[test]
    fn test_entity_then_tone() {
        let p = pipeline();
        assert_eq!(
            p.process("giá hai triệu đồng ở Thái Hoà"),
            "giá 2000000 đồng ở Thái Hòa"
        );
    }

    #[test]
    fn test_sec_runs_after_entities() {
        let sec = SecDictionary::from_rules([("ha noi".to_string(), "Hà Nội".to_string())]).unwrap();
        let p = Pipeline::new(sec);
        // lowercase surface keeps the replacement lowercase
        assert_eq!(p.process("về Ha Noi lúc ba giờ ba mươi phút"), "về Hà Nội lúc 03:30");
    }

    #[test]
    fn test_cpr_success() {
        let p = pipeline();
        let out = p.process_with_cpr("xin chào", &Upcase).unwrap();
        assert_eq!(out, "XIN CHÀO");
    }

    #[test]
    fn test_cpr_failure_keeps_pre_cpr_text() {
        let p = pipeline();
        let err = p.process_with_cpr("giá hai triệu đồng", &AlwaysFails).unwrap_err();
        assert_eq!(err.pre_cpr_text, "giá 2000000 đồng");
    }
}
