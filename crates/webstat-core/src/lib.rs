pub mod aggregate;
pub mod config;
pub mod error;
pub mod event;
pub mod fetcher;
pub mod format;
pub mod gate;
pub mod identity;
pub mod inflight;
pub mod path;
pub mod repository;
pub mod session;
