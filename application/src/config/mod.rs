//! Application configuration
//!
//! - [`CompletionParams`]: model, temperature and output cap per request

mod completion_params;

pub use completion_params::{
    CompletionParams, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
