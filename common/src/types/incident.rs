use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_CATEGORY: &str = "General";

/// An incident as the ticketing system returns it. Only the fields this service
/// reads are typed; everything else is carried through untouched so prompts see
/// the full record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IncidentRecord {
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn short_description_or_default(&self) -> &str {
        self.short_description.as_deref().unwrap_or_default()
    }
}

/// Table API response body: `{"result": [...]}`. A missing, null or non-list
/// `result` reads as no incidents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentList {
    #[serde(default, deserialize_with = "list_or_empty")]
    pub result: Vec<IncidentRecord>,
}

fn list_or_empty<'de, D>(deserializer: D) -> Result<Vec<IncidentRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Array(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

impl IncidentList {
    pub fn first(&self) -> Option<&IncidentRecord> {
        self.result.first()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// Payload for creating an incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIncident {
    pub short_description: String,
    pub description: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "number": "INC0010234",
            "short_description": "VPN down",
            "category": "Network",
            "priority": "2",
            "sys_id": "46d44a23a9fe19810012d100cca80666"
        });

        let record: IncidentRecord = serde_json::from_value(raw.clone()).expect("record");
        assert_eq!(record.number.as_deref(), Some("INC0010234"));
        assert_eq!(record.extra.get("priority"), Some(&json!("2")));
        assert_eq!(serde_json::to_value(&record).expect("serialize"), raw);
    }

    #[test]
    fn missing_category_and_description_fall_back() {
        let record: IncidentRecord =
            serde_json::from_value(json!({"number": "INC1"})).expect("record");

        assert_eq!(record.category_or_default(), "General");
        assert_eq!(record.short_description_or_default(), "");
    }

    #[test]
    fn missing_result_key_reads_as_empty() {
        let list: IncidentList = serde_json::from_value(json!({})).expect("list");
        assert!(list.is_empty());
        assert!(list.first().is_none());
    }

    #[test]
    fn non_list_result_reads_as_no_incidents() {
        for body in [json!({"result": {}}), json!({"result": null}), json!({"result": ""}), json!({})] {
            let list: IncidentList = serde_json::from_value(body).expect("list");
            assert!(list.is_empty());
        }
    }
}
