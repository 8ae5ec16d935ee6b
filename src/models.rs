//! Typed projections over the shard tables and the registry.
//!
//! Every field is `Option` on purpose: source data completeness varies row
//! to row, and a missing value must survive to the JSON response as `null`
//! rather than being coerced to zero or an empty string.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One monarch sighting row from a per-day shard table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ObservationRecord {
    pub id: Option<i32>,
    pub sighting_date: Option<NaiveDate>,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub life_stage: Option<String>,
    pub number_observed: Option<i32>,
    pub town: Option<String>,
    pub state_province: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub observer_notes: Option<String>,
}

/// One construction-permit row from a range shard or the static
/// `permit_durations` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PermitRecord {
    pub permit_id: Option<String>,
    pub permit_number: Option<String>,
    pub permit_type: Option<String>,
    pub permit_subtype: Option<String>,
    pub status: Option<String>,
    pub file_date: Option<DateTime<Utc>>,
    pub issue_date: Option<DateTime<Utc>>,
    pub final_date: Option<DateTime<Utc>>,
    pub approval_duration: Option<i64>,
    pub construction_duration: Option<i64>,
    pub total_duration: Option<i64>,
    pub approval_ratio: Option<f64>,
    pub construction_ratio: Option<f64>,
    pub duration_category: Option<String>,
    pub bottleneck_phase: Option<String>,
    pub property_type: Option<String>,
    pub job_value: Option<f64>,
    /// Source column is `time without time zone`; kept as text.
    pub time_only: Option<String>,
}

/// One row of the shard registry, owned entirely by the ingestion process.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryEntry {
    pub id: Option<i32>,
    pub available_date: Option<NaiveDate>,
    pub table_name: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub record_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn absent_permit_fields_serialize_as_null_not_defaults() {
        let record = PermitRecord {
            permit_id: Some("2015-081437".to_string()),
            permit_number: None,
            permit_type: Some("otc alterations permit".to_string()),
            permit_subtype: None,
            status: None,
            file_date: None,
            issue_date: None,
            final_date: None,
            approval_duration: None,
            construction_duration: None,
            total_duration: None,
            approval_ratio: None,
            construction_ratio: None,
            duration_category: None,
            bottleneck_phase: None,
            property_type: None,
            job_value: None,
            time_only: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["permit_id"], Value::from("2015-081437"));
        assert_eq!(json["job_value"], Value::Null);
        assert_ne!(json["job_value"], Value::from(0.0));
        assert_eq!(json["status"], Value::Null);
        assert_ne!(json["status"], Value::from(""));
        assert_eq!(json["total_duration"], Value::Null);
    }

    #[test]
    fn missing_json_fields_deserialize_to_none() {
        let entry: InventoryEntry =
            serde_json::from_str(r#"{"id": 7, "table_name": "june082025"}"#).unwrap();
        assert_eq!(entry.id, Some(7));
        assert_eq!(entry.table_name.as_deref(), Some("june082025"));
        assert!(entry.available_date.is_none());
        assert!(entry.processed_at.is_none());
        assert!(entry.record_count.is_none());
    }

    #[test]
    fn empty_result_sets_serialize_as_empty_arrays() {
        // A shard or registry with no rows is a 200 with `[]`, not an error.
        assert_eq!(
            serde_json::to_value(Vec::<InventoryEntry>::new()).unwrap(),
            serde_json::json!([])
        );
        assert_eq!(
            serde_json::to_value(Vec::<PermitRecord>::new()).unwrap(),
            serde_json::json!([])
        );
        assert_eq!(
            serde_json::to_value(Vec::<ObservationRecord>::new()).unwrap(),
            serde_json::json!([])
        );
    }

    #[test]
    fn observation_nulls_round_trip() {
        let record = ObservationRecord {
            id: Some(1),
            sighting_date: Some(NaiveDate::from_ymd_opt(2025, 6, 8).unwrap()),
            common_name: Some("monarch".to_string()),
            scientific_name: Some("Danaus plexippus".to_string()),
            life_stage: None,
            number_observed: None,
            town: Some("Point Pelee".to_string()),
            state_province: Some("ON".to_string()),
            latitude: None,
            longitude: None,
            observer_notes: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["number_observed"], Value::Null);
        assert_eq!(json["latitude"], Value::Null);
        assert_eq!(json["sighting_date"], Value::from("2025-06-08"));
    }
}
