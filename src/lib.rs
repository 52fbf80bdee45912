pub mod chart;
pub mod model;
pub mod output;
pub mod parser;
pub mod stats;
