// crates/stillkit-core/src/helpers/mod.rs

pub mod size;
pub mod time;
