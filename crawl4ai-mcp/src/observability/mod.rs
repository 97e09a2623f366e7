//! Observability utilities.

mod logging;
mod timing;

pub use logging::{default_filter, init_logging, LogFormat};
pub use timing::{CallTimer, REQUEST_ID_FIELD};
