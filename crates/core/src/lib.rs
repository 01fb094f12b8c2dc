//! Core domain logic for the electron insert parameterisation service.
//!
//! Everything HTTP-agnostic lives here: request fingerprinting, the
//! shared job record and store, the background fit worker, the insert
//! parameterisation algorithm, mesh interpolation for the modelling
//! endpoint, and the geometry projection used to render results.

pub mod error;
pub mod events;
pub mod fingerprint;
pub mod geometry;
pub mod mesh;
pub mod parameterise;
pub mod record;
pub mod store;
pub mod worker;
