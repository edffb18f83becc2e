//! Logger interface for dependency injection

use std::collections::HashMap;

/// Logger interface for dependency injection
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn info(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn warn(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn error(&self, message: &str, meta: Option<&HashMap<String, String>>);
}

fn render_meta(meta: Option<&HashMap<String, String>>) -> String {
    let Some(meta) = meta else {
        return String::new();
    };
    let mut pairs: Vec<_> = meta.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    pairs.sort();
    pairs.join(" ")
}

/// Logger that forwards to the `tracing` subscriber
#[derive(Debug, Clone, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::debug!(meta = %render_meta(meta), "{}", message);
    }

    fn info(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::info!(meta = %render_meta(meta), "{}", message);
    }

    fn warn(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::warn!(meta = %render_meta(meta), "{}", message);
    }

    fn error(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::error!(meta = %render_meta(meta), "{}", message);
    }
}

/// No-op logger for testing
#[derive(Debug, Clone, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn info(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn warn(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn error(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
}
