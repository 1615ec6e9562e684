//! parser/mod.rs
//! Public module export for the fixed-width district line parser.
//!
//! Notes:
//! - Input layout is a frozen external format; offsets live in `constants::fields`.
//! - Pure functions only; file handling is in `io.rs`.

pub mod fixed_width;

pub use fixed_width::*;
