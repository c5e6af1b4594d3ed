use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{CostOutcome, DentSize, PanelType};

/// Inclusive bounds on the number of dents a record may carry.
pub const MIN_DENT_COUNT: u16 = 1;
pub const MAX_DENT_COUNT: u16 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("customer name must not be empty")]
    MissingCustomerName,

    #[error("vehicle id must not be empty")]
    MissingVehicleId,

    #[error("number of dents {0} is outside 1-300")]
    DentCountOutOfRange(i64),
}

/// Inputs for a new record (no timestamp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEstimateRecord {
    pub customer_name: String,
    pub vehicle_id: String,
    pub panel_type: PanelType,
    pub dent_size: DentSize,
    pub dent_count: u16,
    pub is_aluminum: bool,
    pub cost_result: String,
}

/// One priced panel for one customer's vehicle.
///
/// Records are immutable once built; a correction is a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "StoredRecord", try_from = "StoredRecord")]
pub struct EstimateRecord {
    customer_name: String,
    vehicle_id: String,
    panel_type: PanelType,
    dent_size: DentSize,
    dent_count: u16,
    is_aluminum: bool,
    cost_result: String,
    created_at_epoch_millis: i64,
}

impl EstimateRecord {
    /// Builds a record stamped with the current time.
    pub fn create(new: NewEstimateRecord) -> Result<Self, RecordError> {
        Self::create_at(new, Utc::now().timestamp_millis())
    }

    /// Builds a record with an explicit creation time (epoch milliseconds).
    pub fn create_at(
        new: NewEstimateRecord,
        created_at_epoch_millis: i64,
    ) -> Result<Self, RecordError> {
        if new.customer_name.trim().is_empty() {
            return Err(RecordError::MissingCustomerName);
        }
        if new.vehicle_id.trim().is_empty() {
            return Err(RecordError::MissingVehicleId);
        }
        check_dent_count(i64::from(new.dent_count))?;

        Ok(Self {
            customer_name: new.customer_name,
            vehicle_id: new.vehicle_id,
            panel_type: new.panel_type,
            dent_size: new.dent_size,
            dent_count: new.dent_count,
            is_aluminum: new.is_aluminum,
            cost_result: new.cost_result,
            created_at_epoch_millis,
        })
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn panel_type(&self) -> PanelType {
        self.panel_type
    }

    pub fn dent_size(&self) -> DentSize {
        self.dent_size
    }

    pub fn dent_count(&self) -> u16 {
        self.dent_count
    }

    pub fn is_aluminum(&self) -> bool {
        self.is_aluminum
    }

    pub fn cost_result(&self) -> &str {
        &self.cost_result
    }

    pub fn created_at_epoch_millis(&self) -> i64 {
        self.created_at_epoch_millis
    }

    /// Grouping identity: exact `(customer_name, vehicle_id)` pair.
    pub fn group_key(&self) -> (&str, &str) {
        (&self.customer_name, &self.vehicle_id)
    }

    pub fn cost_outcome(&self) -> CostOutcome {
        CostOutcome::parse(&self.cost_result)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at_epoch_millis)
    }

    /// Creation time in local time, e.g. `Aug 06, 2025 10:30`.
    pub fn formatted_date(&self) -> String {
        self.created_at()
            .map(|at| at.with_timezone(&Local).format("%b %d, %Y %H:%M").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

fn check_dent_count(count: i64) -> Result<(), RecordError> {
    if (i64::from(MIN_DENT_COUNT)..=i64::from(MAX_DENT_COUNT)).contains(&count) {
        Ok(())
    } else {
        Err(RecordError::DentCountOutOfRange(count))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// persisted shape
// ─────────────────────────────────────────────────────────────────────────────

/// Flat JSON object as written to the ledger document.
///
/// `creationTimestamp` is lenient on read: a number or numeric string is
/// used as epoch milliseconds, and a missing or unreadable value becomes the
/// load time. `calculatedCost` is accepted as
/// an older name for `estimatedCost`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    customer_name: String,
    #[serde(rename = "customerVIN")]
    customer_vin: String,
    panel_type: PanelType,
    largest_dent_size: DentSize,
    number_of_dents: i64,
    is_aluminum: bool,
    #[serde(alias = "calculatedCost")]
    estimated_cost: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    creation_timestamp: Option<i64>,
}

/// Fractional values are truncated toward zero.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_millis)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_millis))
        }
        _ => None,
    };
    Ok(millis)
}

fn truncate_millis(value: f64) -> Option<i64> {
    (value.is_finite() && value.abs() < i64::MAX as f64).then(|| value.trunc() as i64)
}

impl From<EstimateRecord> for StoredRecord {
    fn from(record: EstimateRecord) -> Self {
        Self {
            customer_name: record.customer_name,
            customer_vin: record.vehicle_id,
            panel_type: record.panel_type,
            largest_dent_size: record.dent_size,
            number_of_dents: i64::from(record.dent_count),
            is_aluminum: record.is_aluminum,
            estimated_cost: record.cost_result,
            creation_timestamp: Some(record.created_at_epoch_millis),
        }
    }
}

impl TryFrom<StoredRecord> for EstimateRecord {
    type Error = RecordError;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        check_dent_count(stored.number_of_dents)?;

        Ok(Self {
            customer_name: stored.customer_name,
            vehicle_id: stored.customer_vin,
            panel_type: stored.panel_type,
            dent_size: stored.largest_dent_size,
            // range checked above
            dent_count: stored.number_of_dents as u16,
            is_aluminum: stored.is_aluminum,
            cost_result: stored.estimated_cost,
            created_at_epoch_millis: stored
                .creation_timestamp
                .unwrap_or_else(|| Utc::now().timestamp_millis()),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn new_hood_record() -> NewEstimateRecord {
        NewEstimateRecord {
            customer_name: "Dana Reyes".to_string(),
            vehicle_id: "1HGCM82633A004352".to_string(),
            panel_type: PanelType::Hood,
            dent_size: DentSize::Dime,
            dent_count: 3,
            is_aluminum: false,
            cost_result: "$125.00".to_string(),
        }
    }

    #[test]
    fn create_rejects_blank_identity() {
        let mut blank_name = new_hood_record();
        blank_name.customer_name = "  ".to_string();
        let mut blank_vin = new_hood_record();
        blank_vin.vehicle_id = String::new();

        assert_eq!(
            EstimateRecord::create(blank_name),
            Err(RecordError::MissingCustomerName)
        );
        assert_eq!(
            EstimateRecord::create(blank_vin),
            Err(RecordError::MissingVehicleId)
        );
    }

    #[test]
    fn create_enforces_dent_count_bounds() {
        let mut zero = new_hood_record();
        zero.dent_count = 0;
        let mut too_many = new_hood_record();
        too_many.dent_count = 301;
        let mut max = new_hood_record();
        max.dent_count = 300;

        assert_eq!(
            EstimateRecord::create(zero),
            Err(RecordError::DentCountOutOfRange(0))
        );
        assert_eq!(
            EstimateRecord::create(too_many),
            Err(RecordError::DentCountOutOfRange(301))
        );
        assert!(EstimateRecord::create(max).is_ok());
    }

    #[test]
    fn create_stamps_current_time() {
        let before = Utc::now().timestamp_millis();
        let record = EstimateRecord::create(new_hood_record()).unwrap();
        let after = Utc::now().timestamp_millis();

        assert!(record.created_at_epoch_millis() >= before);
        assert!(record.created_at_epoch_millis() <= after);
    }

    #[test]
    fn serializes_with_persisted_key_names() {
        let record = EstimateRecord::create_at(new_hood_record(), 1_754_476_200_000).unwrap();

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({
                "customerName": "Dana Reyes",
                "customerVIN": "1HGCM82633A004352",
                "panelType": "HOOD",
                "largestDentSize": "D",
                "numberOfDents": 3,
                "isAluminum": false,
                "estimatedCost": "$125.00",
                "creationTimestamp": 1_754_476_200_000_i64,
            })
        );
    }

    #[test]
    fn deserialize_defaults_missing_timestamp_to_now() {
        let before = Utc::now().timestamp_millis();
        let record: EstimateRecord = serde_json::from_value(json!({
            "customerName": "Dana Reyes",
            "customerVIN": "VIN1",
            "panelType": "RQ",
            "largestDentSize": "H",
            "numberOfDents": 40,
            "isAluminum": true,
            "estimatedCost": "CR: Custom Repair Needed",
        }))
        .unwrap();

        assert!(record.created_at_epoch_millis() >= before);
        assert_eq!(record.panel_type(), PanelType::Rq);
        assert_eq!(record.cost_outcome(), CostOutcome::CustomRepair);
    }

    fn with_timestamp(stamp: serde_json::Value) -> EstimateRecord {
        serde_json::from_value(json!({
            "customerName": "A",
            "customerVIN": "B",
            "panelType": "HOOD",
            "largestDentSize": "D",
            "numberOfDents": 3,
            "isAluminum": false,
            "estimatedCost": "$125.00",
            "creationTimestamp": stamp,
        }))
        .unwrap()
    }

    #[test]
    fn deserialize_reads_numeric_timestamp_forms() {
        assert_eq!(
            with_timestamp(json!("1754476200000")).created_at_epoch_millis(),
            1_754_476_200_000
        );
        assert_eq!(
            with_timestamp(json!(" 42 ")).created_at_epoch_millis(),
            42
        );
        assert_eq!(with_timestamp(json!(42.9)).created_at_epoch_millis(), 42);
        assert_eq!(with_timestamp(json!("7.5")).created_at_epoch_millis(), 7);
    }

    #[test]
    fn deserialize_unreadable_timestamp_falls_back_to_now() {
        let before = Utc::now().timestamp_millis();

        for stamp in [json!("unknown"), json!(null), json!(true), json!({"at": 1}), json!([])] {
            assert!(with_timestamp(stamp).created_at_epoch_millis() >= before);
        }
    }

    #[test]
    fn deserialize_accepts_calculated_cost_alias() {
        let record: EstimateRecord = serde_json::from_value(json!({
            "customerName": "A",
            "customerVIN": "B",
            "panelType": "ROOF",
            "largestDentSize": "N",
            "numberOfDents": 7,
            "isAluminum": false,
            "calculatedCost": "$215.00",
            "creationTimestamp": 5,
        }))
        .unwrap();

        assert_eq!(record.cost_result(), "$215.00");
        assert_eq!(record.created_at_epoch_millis(), 5);
    }

    #[test]
    fn deserialize_rejects_out_of_range_count() {
        let result = serde_json::from_value::<EstimateRecord>(json!({
            "customerName": "A",
            "customerVIN": "B",
            "panelType": "ROOF",
            "largestDentSize": "N",
            "numberOfDents": 0,
            "isAluminum": false,
            "estimatedCost": "N/A: Invalid input.",
        }));

        assert!(result.is_err());
    }

    #[test]
    fn formatted_date_uses_month_day_year_layout() {
        let record = EstimateRecord::create_at(new_hood_record(), 1_754_476_200_000).unwrap();

        let formatted = record.formatted_date();

        // Local timezone varies; the layout does not.
        assert!(formatted.starts_with("Aug "), "got {formatted}");
        assert!(formatted.contains(", 2025 "), "got {formatted}");
    }
}
