//! SeaORM entity definitions

pub mod category;
pub mod many;
pub mod one;
pub mod to_one;
