//! Test logging.
//!
//! Every failed assertion emits a `WARN` event and every passing one a
//! `TRACE` event under the `assay` target. [`init_test_logging`] routes
//! those events to the test harness output.
//!
//! ```
//! use assay::{init_test_logging, LogSettings};
//!
//! init_test_logging(&LogSettings::default()).unwrap();
//! ```

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::{ConfigError, LogSettings};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Installs a subscriber writing through the test harness.
///
/// Calling it again, or after another global subscriber has been set, is a
/// no-op.
pub fn init_test_logging(settings: &LogSettings) -> Result<(), ConfigError> {
    if !settings.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&settings.level)?;

    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_test_writer()
        .with_target(true)
        .with_filter(filter);

    if let Err(e) = tracing_subscriber::registry().with(fmt_layer).try_init() {
        tracing::debug!(error = %e, "global subscriber already installed");
    }
    let _ = INSTALLED.set(());

    Ok(())
}

/// Creates an env filter from a directive string.
pub fn create_env_filter(filter: &str) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(filter).map_err(|e| ConfigError::LoggingInit(format!("invalid log level: {e}")))
}
