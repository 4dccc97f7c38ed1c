//! Preprocessing shared by the forecasting strategies

pub mod preprocessing;

pub use preprocessing::MinMaxScaler;
