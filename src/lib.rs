//! Projectile motion without air resistance, sampled on a fixed time grid.
//!
//! `core` holds the physics and validation; `report`, `render` and `viewer`
//! only present a computed trajectory.

pub mod app;
pub mod core;
pub mod input;
pub mod render;
pub mod report;
pub mod viewer;
