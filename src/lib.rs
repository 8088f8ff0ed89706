//! BMI service: computes Body Mass Index over HTTP.
//!
//! The evaluator in [`bmi`] is a pure function; [`extract`] and [`routes`]
//! adapt query strings and JSON bodies to it and wrap the result in a JSON
//! envelope.

pub mod bmi;
pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod middleware;
pub mod routes;

pub use bmi::{evaluate, BmiResult, Category, HeightUnit, Measurement};
pub use error::{AppError, ValidationError};
