//! Domain traits - Abstractions for infrastructure implementations

pub mod messenger;

pub use messenger::Messenger;
