pub mod polygon;
mod validate;

pub use validate::{assert_valid, is_simple};
