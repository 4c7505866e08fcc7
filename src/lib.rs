pub mod aggregators;
pub mod dashboard;
pub mod fetch;
pub mod loader;
pub mod model;
pub mod output;
pub mod render;
pub mod session;
pub mod stats;
