pub mod batch;
pub mod config;
pub mod dates;
pub mod error;
pub mod io;
pub mod jurisdiction;
pub mod schema;
pub mod transform;

pub use batch::{
    process_all, process_jurisdiction, run, BatchSummary, JurisdictionFailure,
    JurisdictionReport,
};
pub use config::{BatchConfig, FailurePolicy};
pub use error::{LimitDatesError, Result};
pub use jurisdiction::{default_jurisdictions, Jurisdiction, DEFAULT_JURISDICTIONS};
pub use transform::{limit_dates_frame, LimitDates};
