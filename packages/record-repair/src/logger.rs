//! Logger collaborator.
//!
//! The repair run reports everything through a [`Logger`] rather than
//! returning errors, so callers can capture or redirect that output.
//! [`TracingLogger`] is the default and forwards to `tracing`.

/// Sink for repair progress and failures.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str, detail: Option<&str>);

    fn warn(&self, message: &str, detail: Option<&str>);

    fn error(&self, message: &str, detail: Option<&str>);
}

/// Logger that emits `tracing` events, with the detail as a field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str, detail: Option<&str>) {
        match detail {
            Some(detail) => tracing::info!(detail, "{}", message),
            None => tracing::info!("{}", message),
        }
    }

    fn warn(&self, message: &str, detail: Option<&str>) {
        match detail {
            Some(detail) => tracing::warn!(detail, "{}", message),
            None => tracing::warn!("{}", message),
        }
    }

    fn error(&self, message: &str, detail: Option<&str>) {
        match detail {
            Some(detail) => tracing::error!(detail, "{}", message),
            None => tracing::error!("{}", message),
        }
    }
}
