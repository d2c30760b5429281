// src/slip.rs
//! Advice record + the `{ "slip": { "id", "advice" } }` envelope returned by the advice service.

use serde::{Deserialize, Serialize};

use crate::source::FetchError;

/// One piece of advice, as retrieved for a single display cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceRecord {
    pub id: u64,
    pub text: String,
}

impl AdviceRecord {
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Text as shown on the card, wrapped in double quotes.
    pub fn quoted_text(&self) -> String {
        format!("\"{}\"", self.text)
    }

    /// Numeric label shown above the advice.
    pub fn label(&self) -> String {
        format!("ADVICE #{}", self.id)
    }
}

#[derive(Debug, Deserialize)]
struct SlipEnvelope {
    slip: Slip,
}

#[derive(Debug, Deserialize)]
struct Slip {
    id: u64,
    advice: String,
}

/// Decode a response body into an [`AdviceRecord`].
///
/// The upstream service labels its JSON as `text/html`, so callers hand us the raw
/// body text instead of relying on content-type negotiation.
pub fn parse_slip(body: &str) -> Result<AdviceRecord, FetchError> {
    let env: SlipEnvelope = serde_json::from_str(body).map_err(FetchError::Parse)?;
    Ok(AdviceRecord {
        id: env.slip.id,
        text: env.slip.advice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_payload() {
        let body = r#"{"slip": { "id": 7, "advice": "Be yourself."}}"#;
        let rec = parse_slip(body).unwrap();
        assert_eq!(rec, AdviceRecord::new(7, "Be yourself."));
        assert_eq!(rec.quoted_text(), "\"Be yourself.\"");
        assert_eq!(rec.label(), "ADVICE #7");
    }

    #[test]
    fn ignores_extra_fields() {
        let body = r#"{"slip":{"id":12,"advice":"Sleep.","date":"2016-01-01"},"meta":1}"#;
        assert_eq!(parse_slip(body).unwrap().id, 12);
    }

    #[test]
    fn rejects_wrong_shape_and_non_json() {
        let not_found = r#"{"message":{"type":"notice","text":"No advice slips found."}}"#;
        assert!(matches!(parse_slip(not_found), Err(FetchError::Parse(_))));
        assert!(matches!(parse_slip("<html>oops</html>"), Err(FetchError::Parse(_))));
        // id must be numeric
        let bad_id = r#"{"slip":{"id":"seven","advice":"x"}}"#;
        assert!(matches!(parse_slip(bad_id), Err(FetchError::Parse(_))));
    }
}
