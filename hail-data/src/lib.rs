mod loader;

pub use loader::{BatchLoaderError, LoadReport, PanelBatchLoader, PanelBatchRecord, SkippedRow};
