pub mod compute;
pub mod config;
pub mod effects;
pub mod entities;
pub mod events;
pub mod snapshot;
