//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Log lines use the compact format with the module prefix hidden
//! (`with_target(false)`); verbosity comes from `RUST_LOG`.
//!
//! ```bash
//! # Service-level events: created, updated, deleted
//! RUST_LOG=info cargo run
//!
//! # Every store request and full payloads at service entry points
//! RUST_LOG=debug cargo run
//!
//! # Also report links skipped for missing fields
//! RUST_LOG=course_catalog::links=trace cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: startup, shutdown and final size, tagged with `entity_type`
//! - **Store Requests**: one `debug` event per request with the id or index key
//! - **Service Operations**: one span per call; rejections at `debug`, missing
//!   update targets at `warn`, unreachable store at `error`
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! DEBUG create_course{title=Rapid Spring Boot Application Development}: create_course called course=Course { id: None, .. }
//! DEBUG create_course{title=Rapid Spring Boot Application Development}: Save entity_type="Course" id=Some(1) size=1
//! INFO create_course{title=Rapid Spring Boot Application Development}: Course created id=Some(1)
//! ```

/// Installs the global subscriber; later calls are no-ops.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "create_course{..}")
        .try_init();
}
