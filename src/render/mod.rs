pub mod cpu;
pub mod surface;
