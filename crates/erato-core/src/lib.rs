//! Erato Core Types and Definitions
//!
//! This crate provides the foundational types for the Erato sieve animation.
//! It includes:
//!
//! - **Grid**: The Matrix Builder and the engine-owned cell state ([`grid`] module)
//! - **Primality**: Trial-division classification ([`primality::classify`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Surface**: Rendering and display collaborators ([`surface`] module)

pub mod color;
pub mod geometry;
pub mod grid;
pub mod primality;
pub mod surface;
