//! Threshold alerts on consumption values
//!
//! The rule is stateless: a value strictly above the threshold raises an
//! alert whose level depends on how far above it is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::temporal::Series;
use crate::time_series::ForecastResult;

/// Threshold used when nothing else is configured, in the series' own units
pub const DEFAULT_ALERT_THRESHOLD: f64 = 90.0;

/// Percentage over threshold above which an alert is a warning
pub const WARNING_PERCENT: f64 = 10.0;

/// Percentage over threshold above which an alert is a danger
pub const DANGER_PERCENT: f64 = 30.0;

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// At most 10% over threshold
    Info,
    /// More than 10% and at most 30% over threshold
    Warning,
    /// More than 30% over threshold
    Danger,
}

impl AlertLevel {
    /// Level for a given percentage over threshold
    pub fn from_percentage(percentage_over: f64) -> Self {
        if percentage_over > DANGER_PERCENT {
            AlertLevel::Danger
        } else if percentage_over > WARNING_PERCENT {
            AlertLevel::Warning
        } else {
            AlertLevel::Info
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Info => write!(f, "info"),
            AlertLevel::Warning => write!(f, "warning"),
            AlertLevel::Danger => write!(f, "danger"),
        }
    }
}

/// A raised consumption alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    /// Format as a log line
    pub fn format(&self) -> String {
        format!(
            "[{}] {} ({})",
            self.level,
            self.message,
            self.timestamp.to_rfc3339()
        )
    }
}

/// How far `value` exceeds `threshold`, in percent of the threshold
pub fn percentage_over(value: f64, threshold: f64) -> f64 {
    (value - threshold) / threshold * 100.0
}

/// Evaluate `value` against `threshold`, stamping any alert with the current time
pub fn evaluate(value: f64, threshold: f64) -> Option<Alert> {
    evaluate_at(value, threshold, Utc::now())
}

/// Evaluate `value` against `threshold`, stamping any alert with `timestamp`.
///
/// Returns `None` unless `value > threshold`. The percentage is relative to
/// the threshold, so a threshold that is not positive never raises an alert;
/// use [`AlertConfig::new`] to reject such thresholds up front.
pub fn evaluate_at(value: f64, threshold: f64, timestamp: DateTime<Utc>) -> Option<Alert> {
    if value.is_nan() || threshold.is_nan() || threshold <= 0.0 || value <= threshold {
        return None;
    }

    let pct = percentage_over(value, threshold);
    let level = AlertLevel::from_percentage(pct);
    let message = match level {
        AlertLevel::Danger => format!("Critical: Energy consumption is {:.1}% above threshold!", pct),
        AlertLevel::Warning => format!("Warning: Energy consumption is {:.1}% above threshold.", pct),
        AlertLevel::Info => format!(
            "Notice: Energy consumption has exceeded threshold by {:.1}%.",
            pct
        ),
    };

    Some(Alert {
        level,
        message,
        timestamp,
    })
}

/// Alert threshold configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    pub threshold: f64,
}

impl AlertConfig {
    /// Validated configuration; the threshold must be finite and positive
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "alert threshold must be a positive number, got {}",
                threshold
            )));
        }
        Ok(AlertConfig { threshold })
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        AlertConfig {
            threshold: DEFAULT_ALERT_THRESHOLD,
        }
    }
}

/// Receives alerts raised by an [`AlertEvaluator`]
pub trait AlertHandler: Send + Sync + fmt::Debug {
    fn on_alert(&self, alert: &Alert);
}

/// Handler writing alerts to the `log` facade
#[derive(Debug)]
pub struct LoggingAlertHandler {
    prefix: String,
}

impl LoggingAlertHandler {
    pub fn new(prefix: impl Into<String>) -> Self {
        LoggingAlertHandler {
            prefix: prefix.into(),
        }
    }
}

impl AlertHandler for LoggingAlertHandler {
    fn on_alert(&self, alert: &Alert) {
        log::warn!("{} ALERT: {}", self.prefix, alert.format());
    }
}

/// Applies a configured threshold to actual or forecast values and notifies
/// handlers of every alert raised
#[derive(Debug, Default)]
pub struct AlertEvaluator {
    config: AlertConfig,
    handlers: Vec<Box<dyn AlertHandler>>,
}

impl AlertEvaluator {
    pub fn new(config: AlertConfig) -> Self {
        AlertEvaluator {
            config,
            handlers: Vec::new(),
        }
    }

    pub fn with_handler(mut self, handler: Box<dyn AlertHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    fn notify(&self, alert: Option<Alert>) -> Option<Alert> {
        if let Some(alert) = &alert {
            for handler in &self.handlers {
                handler.on_alert(alert);
            }
        }
        alert
    }

    /// Evaluate a single value now
    pub fn evaluate(&self, value: f64) -> Option<Alert> {
        self.notify(evaluate(value, self.config.threshold))
    }

    /// Evaluate the most recent defined value of a series, stamped with its
    /// timestamp
    pub fn evaluate_latest(&self, series: &Series) -> Option<Alert> {
        let point = series.points().iter().rev().find(|p| p.value.is_some())?;
        let value = point.value?;
        self.notify(evaluate_at(value, self.config.threshold, point.timestamp))
    }

    /// Evaluate every forecast step, stamping alerts with the step's timestamp
    pub fn evaluate_forecast(&self, forecast: &ForecastResult) -> Vec<Alert> {
        forecast
            .iter()
            .filter_map(|(ts, value)| self.notify(evaluate_at(value, self.config.threshold, ts)))
            .collect()
    }
}
