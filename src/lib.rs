//! Traffic Flow Library
//!
//! A discrete traffic simulation over a directed graph of intersections,
//! driven call by call through light changes and queue advances.

pub mod scenario;
pub mod simulation;
