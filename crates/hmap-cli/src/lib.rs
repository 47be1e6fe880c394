//! CLI library components for the header mapper.

#![deny(unsafe_code)]

pub mod logging;
pub mod pipeline;
