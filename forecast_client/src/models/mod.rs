pub mod analysis;
pub mod catalog;
pub mod horizon;
pub mod prediction;
