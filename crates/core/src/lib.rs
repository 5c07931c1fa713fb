//! fieldtrace_core - Pure no_std geodesy kernel for fieldtrace
//!
//! This crate contains the side-effect-free numerical geometry used to turn
//! captured GPS fixes into distances, perimeters and areas. It can be tested
//! on host without any feature flags.
//!
//! # Design Principles
//!
//! - **Pure no_std**: No std library or allocator dependencies
//! - **Stateless**: Every function takes its inputs by value or slice and
//!   returns a plain `f64`; safe to call from any number of threads
//! - **Never fails**: Inputs are assumed to be validated fixes (no NaN)
//!
//! # Modules
//!
//! - [`point`]: `GeoPoint`, one ordered fix within a capture sequence
//! - [`geodesy`]: Great-circle distance, path length, perimeter, local-plane
//!   projection and shoelace area

#![no_std]

pub mod geodesy;
pub mod point;

pub use geodesy::{
    haversine_distance, initial_bearing, path_length, polygon_area, polygon_perimeter,
    LocalProjection, EARTH_RADIUS_M,
};
pub use point::GeoPoint;
