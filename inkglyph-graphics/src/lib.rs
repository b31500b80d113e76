pub mod types;

pub mod bbox;
pub mod math;
pub mod picture;
pub mod transform;
