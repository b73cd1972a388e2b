//! Progress indicators

pub mod spinner;

pub use spinner::ThinkingSpinner;
