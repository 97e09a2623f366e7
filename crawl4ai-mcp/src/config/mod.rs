//! Process-wide settings for the crawl tools.
//!
//! Settings are resolved once at startup from `C4AI_`-prefixed environment
//! variables and then shared read-only with every tool call.

mod settings;
mod types;

pub use settings::{Settings, ENV_PREFIX};
pub use types::{BrowserType, CacheMode, ContentType};
