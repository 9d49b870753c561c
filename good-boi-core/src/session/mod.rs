pub mod capture;
pub mod classifier;
pub mod orchestrator;
