//! # Faultline
//!
//! Structured, classifiable faults with a shared memoizing class registry.
//!
//! ## Design Philosophy
//!
//! 1. **Kinds are separate from occurrences**: a [`BasicFault`] describes an
//!    error kind once; a [`Fault`] is one failure built from it
//! 2. **Codes are opaque and stable**: callers match on [`ErrorCode`], never on text
//! 3. **Low-level errors are wrapped, not flattened**: the cause chain keeps
//!    every underlying error and its rendering
//! 4. **Call sites depend on the smallest capability they need**:
//!    [`Classified`] for routing, [`Diagnosable`] for logging,
//!    [`MessageAware`] for user-facing text
//!
//! ## Capability Layers
//!
//! | trait | provided by | adds |
//! |---|---|---|
//! | [`Classified`] | `BasicFault`, `Fault`, `MessageAwareFault` | code, component, response type |
//! | [`Diagnosable`] | `Fault`, `MessageAwareFault` | causes, data, origin, retryable flag |
//! | [`MessageAware`] | `MessageAwareFault` | localized message, `code:message` rendering |
//!
//! All three types implement `std::error::Error + Send + Sync` and compose
//! with `?`, `Box<dyn Error>` and any error-reporting crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use faultline::{BasicFault, Classified, Diagnosable, fault_data};
//!
//! let class = BasicFault::new("LYRAGO000005").with_component("lyra.go");
//!
//! let parse_err = "eighty".parse::<u64>().unwrap_err();
//! let fault = class
//!     .to_fault(
//!         Some(fault_data! { "var_name" => "PORT", "var_type" => "integer" }),
//!         Some(parse_err.into()),
//!     )
//!     .mark_retryable();
//!
//! // Plain rendering is the code alone.
//! assert_eq!(fault.to_string(), "LYRAGO000005");
//! assert_eq!(fault.component().as_str(), "lyra.go");
//! assert!(fault.is_retryable());
//!
//! // Opting in appends the cause chain.
//! let fault = fault.append_cause();
//! assert_eq!(fault.to_string(), "LYRAGO000005; invalid digit found in string; ");
//! ```
//!
//! ## Shared Registry
//!
//! ```rust
//! use faultline::{BasicFaultsCache, Classified, ErrorCode, definitions};
//!
//! let cache = BasicFaultsCache::default();
//! cache.register(&definitions::LyraFaults);
//!
//! let known = cache.get_basic_fault(&definitions::ERR_ENV_VAR_UNDEFINED);
//! assert_eq!(known.component().as_str(), "lyra.go");
//!
//! // Unknown codes degrade to a bare descriptor, memoized for later lookups.
//! let unknown = cache.get_basic_fault(&ErrorCode::from("UNKNOWN000001"));
//! assert!(unknown.component().is_unset());
//! assert!(cache.contains(&ErrorCode::from("UNKNOWN000001")));
//! ```
//!
//! ## Logging
//!
//! ```rust
//! use faultline::{definitions, log_fault};
//!
//! let fault = definitions::env_var_not_defined("PORT", None);
//! log_fault(&fault); // one ERROR event with code, component, data and causes
//! ```
//!
//! ## Features
//!
//! - `subscriber` (default): [`CeeFormat`], [`LoggerConfig`] and
//!   [`init_logging`] for tagged JSON log lines via `tracing-subscriber`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod basic;
pub mod cache;
pub mod codes;
pub mod convenience;
pub mod definitions;
pub mod env;
pub mod fault;
pub mod logging;
pub mod message;
#[cfg(feature = "subscriber")]
pub mod subscriber;

#[cfg(test)]
mod test_support;

pub use basic::*;
pub use cache::*;
pub use codes::*;
pub use fault::*;
pub use logging::*;
pub use message::*;
#[cfg(feature = "subscriber")]
pub use subscriber::*;

/// Type alias for Results using our fault type.
pub type Result<T> = std::result::Result<T, Fault>;
