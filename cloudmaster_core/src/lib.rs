pub mod cli;
pub mod cloud;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod poller;
pub mod rest;
pub mod vm;

// Reexports
pub use cloud::Cloud;
pub use rest::RestClient;
pub use vm::Vm;
