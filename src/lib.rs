//! # Course Catalog
//!
//! > **A course catalog whose every response tells the client what it may do next.**
//!
//! Courses are created, read, updated and deleted through [`course_service`]. Every
//! course handed back to a client carries a set of hypermedia links (self,
//! by-category, create, update, delete, delete-all) computed from a declarative
//! route table rather than hardcoded per call site.
//!
//! ## 🏗️ Design
//!
//! ### Routes as data
//! A [`RouteTable`](links::RouteTable) lists one [`RouteDescriptor`](links::RouteDescriptor)
//! per relation: verb, path template and the resource fields the path needs. The
//! [`LinkDeriver`](links::LinkDeriver) is a pure function of a resource and that table.
//! A descriptor whose fields are missing on the resource is skipped, so a course
//! without a category never advertises a category search.
//!
//! ### One owner for the store
//! Records and the category index live inside a single [`ResourceActor`](framework::ResourceActor)
//! task. Request tasks hold a cloneable [`StoreClient`](framework::StoreClient), so a
//! mutation of the record and its index entry is one message and no reader sees
//! half of it.
//!
//! ### Type-safe errors
//! [`CourseError`](course_service::CourseError) separates validation failures, missing
//! update targets and an unreachable store. Reads report absence as `None` or an
//! empty `Vec`, never as an error.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`] - generic store actor, its client and a scripted mock
//! - [`model`] - the [`Course`](model::Course) record
//! - [`links`] - route table, link sets and the deriver
//! - [`course_service`] - validation and store orchestration
//! - [`response`] - payloads with links inside a [`Reply`](response::Reply) envelope
//! - [`lifecycle`] - startup, shutdown and tracing setup
//! - [`config`] - settings read once at startup
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod config;
pub mod course_service;
pub mod framework;
pub mod lifecycle;
pub mod links;
pub mod model;
pub mod response;
