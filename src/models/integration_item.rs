//! Normalized representation of one remote CRM record

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntegrationItem {
    pub id: String,
    pub name: Option<String>,
    pub domain: Option<String>,
    #[serde(rename = "type")]
    pub item_type: String,
    pub parent_id: Option<String>,
    pub parent_path_or_name: Option<String>,
}

impl IntegrationItem {
    /// Maps a raw HubSpot object into the normalized item shape.
    ///
    /// Field access is best-effort: absent fields become `None`, never a
    /// panic. HubSpot serializes record ids as strings, but numeric ids are
    /// tolerated as well.
    pub fn from_record(
        record: &Value,
        item_type: &str,
        parent_id: Option<&str>,
        parent_name: Option<&str>,
    ) -> Self {
        let record_id = match record.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        let properties = record.get("properties");
        let property = |key: &str| {
            properties
                .and_then(|p| p.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            id: format!("{}_{}", record_id, item_type),
            name: property("name"),
            domain: property("domain"),
            item_type: item_type.to_string(),
            parent_id: parent_id.map(|p| format!("{}_Base", p)),
            parent_path_or_name: parent_name.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_maps_company_record() {
        let record = json!({
            "id": "512",
            "properties": {
                "name": "Acme Corp",
                "domain": "acme.example"
            }
        });

        let item = IntegrationItem::from_record(&record, "hubspot_company", None, None);

        assert_eq!(item.id, "512_hubspot_company");
        assert_eq!(item.name.as_deref(), Some("Acme Corp"));
        assert_eq!(item.domain.as_deref(), Some("acme.example"));
        assert_eq!(item.item_type, "hubspot_company");
        assert_eq!(item.parent_id, None);
        assert_eq!(item.parent_path_or_name, None);
    }

    #[test]
    fn test_parent_id_gets_base_suffix() {
        let record = json!({"id": "7", "properties": {}});

        let item =
            IntegrationItem::from_record(&record, "hubspot_company", Some("42"), Some("Parent"));

        assert_eq!(item.parent_id.as_deref(), Some("42_Base"));
        assert_eq!(item.parent_path_or_name.as_deref(), Some("Parent"));
    }

    #[test]
    fn test_missing_fields_do_not_panic() {
        let record = json!({});

        let item = IntegrationItem::from_record(&record, "hubspot_company", None, None);

        assert_eq!(item.id, "_hubspot_company");
        assert_eq!(item.name, None);
        assert_eq!(item.domain, None);
    }

    #[test]
    fn test_numeric_id_is_tolerated() {
        let record = json!({"id": 9001});

        let item = IntegrationItem::from_record(&record, "hubspot_company", None, None);

        assert_eq!(item.id, "9001_hubspot_company");
    }

    #[test]
    fn test_serializes_type_field_name() {
        let record = json!({"id": "1"});
        let item = IntegrationItem::from_record(&record, "hubspot_company", None, None);

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "hubspot_company");
        assert!(value.get("item_type").is_none());
    }
}
