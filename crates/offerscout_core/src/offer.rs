use serde::{Deserialize, Serialize};

/// One provider's internet plan as delivered on the NDJSON wire.
///
/// Field names match the backend records. `cost_first_years_eur` is the
/// promotional monthly price (the backend falls back to `cost_eur` when a
/// plan has no promotion) and `after_two_years_eur` is the price once the
/// promotion ends. Offers are immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub provider: String,
    pub name: String,
    pub speed_mbps: u32,
    pub cost_eur: f64,
    pub cost_first_years_eur: f64,
    pub after_two_years_eur: f64,
    pub duration_months: u32,
    /// Data cap in GB; `None` means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_from_gb: Option<u32>,
    #[serde(default)]
    pub installation_included: bool,
    /// Name of the bundled TV package, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tv: Option<String>,
    /// Upper age bound for youth tariffs; `None` means no restriction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    pub connection_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_record_with_optional_fields_absent() {
        let json = r#"{
            "provider": "ByteMe",
            "name": "Byte Basic 50",
            "speed_mbps": 50,
            "cost_eur": 29.99,
            "cost_first_years_eur": 19.99,
            "after_two_years_eur": 29.99,
            "duration_months": 24,
            "connection_type": "DSL"
        }"#;

        let offer: Offer = serde_json::from_str(json).expect("parse offer");
        assert_eq!(offer.provider, "ByteMe");
        assert_eq!(offer.speed_mbps, 50);
        assert_eq!(offer.limit_from_gb, None);
        assert_eq!(offer.tv, None);
        assert_eq!(offer.max_age, None);
        assert!(!offer.installation_included);
    }

    #[test]
    fn serialization_omits_absent_optionals() {
        let offer = Offer {
            provider: "WebWunder".to_string(),
            name: "Wunder 100".to_string(),
            speed_mbps: 100,
            cost_eur: 39.99,
            cost_first_years_eur: 29.99,
            after_two_years_eur: 39.99,
            duration_months: 12,
            limit_from_gb: None,
            installation_included: true,
            tv: None,
            max_age: None,
            connection_type: "Cable".to_string(),
        };

        let json = serde_json::to_string(&offer).expect("serialize offer");
        assert!(!json.contains("limit_from_gb"));
        assert!(!json.contains("max_age"));
        assert!(json.contains("\"installation_included\":true"));
    }
}
