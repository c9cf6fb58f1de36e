//! Upstream DTOs
//!
//! Shapes of the records returned by the FIPE API.

use serde::Deserialize;

use crate::period::normalize_period;

/// One entry of the `ConsultarTabelaDeReferencia` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpstreamTableReference {
    /// Reference table code
    #[serde(rename = "Codigo")]
    pub code: u32,
    /// Month label as published, e.g. `"janeiro/2024 "`
    #[serde(rename = "Mes")]
    pub month_label: String,
}

impl UpstreamTableReference {
    /// The month label normalized into a period key.
    pub fn period(&self) -> String {
        normalize_period(&self.month_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_record() {
        let json = r#"{"Codigo": 320, "Mes": " Janeiro/2024 "}"#;
        let record: UpstreamTableReference = serde_json::from_str(json).unwrap();
        assert_eq!(record.code, 320);
        assert_eq!(record.month_label, " Janeiro/2024 ");
        assert_eq!(record.period(), "janeiro/2024");
    }

    #[test]
    fn test_deserialize_rejects_missing_code() {
        let json = r#"{"Mes": "janeiro/2024"}"#;
        assert!(serde_json::from_str::<UpstreamTableReference>(json).is_err());
    }
}
