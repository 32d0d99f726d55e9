//! Domain models for the converter widget.

pub mod amount;
pub mod rates;
pub mod state;

pub use amount::{format_result, parse_amount};
pub use rates::RateTable;
pub use state::{Conversion, LookupRequest, WidgetState};
