pub mod cycle;
pub mod unicode;
