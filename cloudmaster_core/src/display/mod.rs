pub mod cloud;
pub mod vm;

// Reexport
pub use vm::display_state;
