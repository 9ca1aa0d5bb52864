pub mod breakdown;
pub mod evaluate;
