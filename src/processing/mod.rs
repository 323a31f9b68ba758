pub mod histogram;
pub mod kde;
pub mod normalize;
pub mod statistics;
