use std::cmp::Reverse;

use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::EstimateRecord;

/// All estimates for one `(customer_name, vehicle_id)` pair.
///
/// The total is always derived from `records`; it is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSummary {
    customer_name: String,
    vehicle_id: String,
    records: Vec<EstimateRecord>,
}

impl CustomerSummary {
    pub fn new(
        customer_name: impl Into<String>,
        vehicle_id: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            vehicle_id: vehicle_id.into(),
            records: Vec::new(),
        }
    }

    /// Builds a summary from records that all share one group key.
    ///
    /// One stable sort puts them newest first; equal timestamps keep the
    /// order given.
    pub fn from_records(
        customer_name: impl Into<String>,
        vehicle_id: impl Into<String>,
        mut records: Vec<EstimateRecord>,
    ) -> Self {
        records.sort_by_key(|record| Reverse(record.created_at_epoch_millis()));
        Self {
            customer_name: customer_name.into(),
            vehicle_id: vehicle_id.into(),
            records,
        }
    }

    /// Adds a record and keeps the list newest first.
    ///
    /// Records with equal timestamps keep their insertion order.
    pub fn add_record(
        &mut self,
        record: EstimateRecord,
    ) {
        debug_assert_eq!(
            record.group_key(),
            (self.customer_name.as_str(), self.vehicle_id.as_str())
        );
        let at = record.created_at_epoch_millis();
        let index = self
            .records
            .partition_point(|existing| existing.created_at_epoch_millis() >= at);
        self.records.insert(index, record);
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    /// Records, newest first.
    pub fn records(&self) -> &[EstimateRecord] {
        &self.records
    }

    /// Sum of every record whose cost is a dollar amount.
    ///
    /// `CR` and `N/A` results contribute nothing.
    pub fn total_cost(&self) -> Decimal {
        self.records
            .iter()
            .filter_map(|record| record.cost_outcome().amount())
            .sum()
    }
}

impl Serialize for CustomerSummary {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CustomerSummary", 4)?;
        state.serialize_field("customerName", &self.customer_name)?;
        state.serialize_field("customerVIN", &self.vehicle_id)?;
        state.serialize_field("totalCost", &self.total_cost())?;
        state.serialize_field("records", &self.records)?;
        state.end()
    }
}
