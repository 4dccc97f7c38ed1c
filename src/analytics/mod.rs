//! Consumption monitoring

pub mod alerts;

pub use alerts::{
    evaluate, evaluate_at, percentage_over, Alert, AlertConfig, AlertEvaluator, AlertHandler,
    AlertLevel, LoggingAlertHandler, DEFAULT_ALERT_THRESHOLD,
};
