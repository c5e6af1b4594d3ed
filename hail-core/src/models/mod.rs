mod cost_outcome;
mod customer_summary;
mod dent_size;
mod estimate_record;
mod panel_type;

pub use cost_outcome::{CUSTOM_REPAIR_TEXT, CostOutcome, NOT_APPLICABLE_PREFIX};
pub use customer_summary::CustomerSummary;
pub use dent_size::DentSize;
pub use estimate_record::{
    EstimateRecord, MAX_DENT_COUNT, MIN_DENT_COUNT, NewEstimateRecord, RecordError,
};
pub use panel_type::{PanelGroup, PanelType};
