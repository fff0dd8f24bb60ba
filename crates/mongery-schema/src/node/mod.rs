mod entity;
mod field;

pub use entity::*;
pub use field::*;
