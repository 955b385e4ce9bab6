pub mod classification;
pub mod recalculation;
