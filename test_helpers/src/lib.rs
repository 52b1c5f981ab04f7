//! Test helpers shared across crates in the message-source workspace.
//!
//! Provides temporary resource trees, a recorder for callback payloads, and
//! `figment::Jail` plumbing.

pub mod figment;
pub mod recorder;
pub mod resources;

pub use figment::with_jail;
pub use recorder::Recorder;
pub use resources::ResourceTree;
