//! HTTP handlers, one module per endpoint area.

pub mod model;
pub mod parameterise;
