//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: Purges expired in-process cache entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
