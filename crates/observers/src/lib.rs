//! Reusable observers for haru optimization runs.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with any driver whose events and actions implement them.
//!
//! # Modules
//!
//! - [`traits`]: capability traits for cross-driver observers
//!   ([`HasObjective`], [`HasGeneration`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`TraceObserver`] logs progress through `tracing`
//! - [`TargetObjective`] stops a run once a target objective is reached
//! - [`BestHistory`] records the best-so-far objective per generation
//!
//! [`Observer`]: haru_core::Observer
//! [`HasObjective`]: traits::HasObjective
//! [`HasGeneration`]: traits::HasGeneration
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod history;
mod target;
mod trace;

pub use history::BestHistory;
pub use target::TargetObjective;
pub use trace::TraceObserver;
