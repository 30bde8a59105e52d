/// Re-export `Config` from `webstat-core` for use within this crate.
///
/// All environment-variable parsing lives in `webstat-core` so integration
/// tests can build a `Config` without depending on the server.
pub use webstat_core::config::Config;
