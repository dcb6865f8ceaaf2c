pub mod filter;
pub mod form;
pub mod idea_ops;
pub mod stats_ops;
