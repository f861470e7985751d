// crates/stillkit-ui/src/helpers/mod.rs

pub mod format;
pub mod save;
