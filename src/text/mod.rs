pub mod caption;
pub mod style;
pub mod wrap;
