//! Ask/tell optimization driver and strategy engines.
//!
//! See [`optimization`] for the driver, the CMA-ES engine, and the
//! benchmark objectives.

pub mod optimization;
