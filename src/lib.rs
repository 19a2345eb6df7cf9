//! Submission watcher - accepted-submission detection via browser instrumentation.
//!
//! This library observes network traffic inside monitored browser tabs to
//! detect when a coding-problem submission is accepted by the judge, then
//! reports that event to a remote collector.
//!
//! # Architecture
//!
//! The core is a small event-driven state machine fed from the browser's
//! debugging protocol:
//!
//! - **Tab registry** gates attachment: one session per tab, idempotent
//! - **Session lifecycle** attaches a debugging session and enables
//!   network observation; any detach returns the tab to unmonitored
//! - **Request correlator** buffers responses matching the submission
//!   verdict URL until their `loadingFinished` event
//! - **Verdict interpreter** fetches the finished body and gates on the
//!   accepted verdict (`status_code == 10 && run_success == true`)
//! - **Reporter** derives the problem slug from the tab URL, attaches the
//!   stored bearer token, and POSTs one report per confirmed acceptance
//!
//! The browser itself is reached through narrow collaborator traits
//! ([`Instrumentation`], [`TabContext`], [`CredentialStore`]), and the
//! collector through [`Collector`]; production wiring uses the
//! `reqwest`-backed [`HttpCollector`].
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use submission_watcher::{HttpCollector, TabId, Watcher, WatcherConfig};
//! # use submission_watcher::{CredentialStore, Instrumentation, TabContext};
//! # fn collaborators() -> (Arc<dyn Instrumentation>, Arc<dyn TabContext>, Arc<dyn CredentialStore>) { unimplemented!() }
//!
//! # async fn example() {
//! let config = WatcherConfig::new();
//! let collector = Arc::new(HttpCollector::new(config.collector_endpoint.clone()));
//! let (instrumentation, tabs, credentials) = collaborators();
//!
//! let watcher = Watcher::new(config, instrumentation, tabs, credentials, collector);
//!
//! // Driven from the browser event loop:
//! let outcome = watcher
//!     .begin_monitoring(TabId::new(1), "https://leetcode.com/problems/two-sum/")
//!     .await;
//! println!("{outcome:?}");
//! # }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`watcher`] | Detection core: [`Watcher`] and its state machines |
//! | [`instrumentation`] | Browser collaborator traits and event types |
//! | [`collector`] | Report wire types and HTTP delivery |
//! | [`config`] | Site and collector configuration |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |

// ============================================================================
// Modules
// ============================================================================

/// Report wire types and collector delivery.
///
/// [`Collector`] is the transport seam; [`HttpCollector`] is the
/// production implementation.
pub mod collector;

/// Watcher configuration.
///
/// Defaults match the LeetCode deployment; see [`WatcherConfig`].
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for monitored entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Browser collaborator traits and inbound event types.
pub mod instrumentation;

/// Submission detection core.
pub mod watcher;

// ============================================================================
// Re-exports
// ============================================================================

// Core types
pub use watcher::{MonitorOutcome, PendingRequest, SubmissionVerdict, Watcher};

// Collaborator traits and event types
pub use instrumentation::{
    CredentialStore, DetachReason, Instrumentation, NetworkEvent, ResponseBody, TabContext,
};

// Collector types
pub use collector::{Collector, CollectorResponse, HttpCollector, SubmissionReport};

// Configuration
pub use config::WatcherConfig;

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{RequestId, TabId};
