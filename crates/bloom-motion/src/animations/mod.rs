//! Decorative animations drawn straight into a ratatui buffer.

pub mod leaves;
pub mod noise;
pub mod rings;
pub mod sphere;
