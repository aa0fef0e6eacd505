pub mod correlation;
pub mod format;
pub mod highlight;
pub mod panels;
pub mod records;
pub mod settings;
pub mod totals;

pub use correlation::{CorrelationGraph, CorrelationKey, Dimension, RowKeys, TableId};
pub use format::format_number;
pub use highlight::{ClickOutcome, HighlightEngine, RowId, VisualState};
pub use records::*;
pub use settings::{IntelSettings, ScanType};
pub use totals::SectionTotals;
