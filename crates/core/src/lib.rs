//! Core traits and types for ask/tell optimization.
//!
//! This crate defines the shared abstractions that drivers, strategy engines,
//! and observers build on:
//!
//! - [`Objective`]: a pure function mapping a candidate to a fitness value
//! - [`Strategy`]: a black-box optimizer exposing `ask`, `tell`, and `best`
//! - [`Observer`]: receives driver events and optionally returns control actions
//! - [`Candidate`], [`Population`], [`Point`]: the data exchanged between them

mod objective;
mod observer;
mod point;
mod strategy;

pub use objective::Objective;
pub use observer::Observer;
pub use point::{Candidate, Point, Population};
pub use strategy::Strategy;
