//! Reference catalog: faults owned by the `lyra.go` bootstrap component.
//!
//! Shows the intended construction pattern. A component declares its codes
//! once, then exposes small constructors that pair a class with occurrence
//! data:
//!
//! ```rust
//! use faultline::{Classified, Diagnosable, definitions};
//!
//! let fault = definitions::env_var_not_defined("PORT", None);
//! assert_eq!(fault.to_string(), "LYRAGO000000");
//! assert_eq!(fault.component().as_str(), "lyra.go");
//! assert_eq!(fault.data()["var_name"], "PORT");
//! ```
//!
//! # Code Layout
//!
//! `LYRAGO` prefix + six-digit suffix, spaced by five so related kinds can be
//! slotted in later without renumbering.

use crate::{Cause, ErrComponent, Fault, define_fault_codes, fault_data};

/// Owning component of every code below.
pub const LYRA_GO: ErrComponent = ErrComponent::from_static("lyra.go");

define_fault_codes! {
    /// Catalog of `lyra.go` fault classes.
    ///
    /// Register it with [`BasicFaultsCache::register`](crate::BasicFaultsCache::register).
    pub LyraFaults: LYRA_GO => {
        /// A required environment variable is not set.
        ERR_ENV_VAR_UNDEFINED = "LYRAGO000000",
        /// An environment variable is set but is not a valid integer.
        ERR_INVALID_ENV_VAR_TYPE = "LYRAGO000005",
        /// The SMTP client could not be created.
        ERR_CREATING_SMTP_CLIENT = "LYRAGO000010",
    }
}

/// `var_name` is not set in the process environment.
pub fn env_var_not_defined(var_name: &str, cause: Option<Cause>) -> Fault {
    let data = fault_data! { "var_name" => var_name };
    LyraFaults::class(ERR_ENV_VAR_UNDEFINED).to_fault(Some(data), cause)
}

/// `var_name` is set but could not be read as an integer.
pub fn env_var_must_be_integer(var_name: &str, cause: Option<Cause>) -> Fault {
    let data = fault_data! {
        "var_name" => var_name,
        "var_type" => "integer",
    };
    LyraFaults::class(ERR_INVALID_ENV_VAR_TYPE).to_fault(Some(data), cause)
}

/// The SMTP client failed to build.
pub fn smtp_client_creation_error(cause: Option<Cause>) -> Fault {
    LyraFaults::class(ERR_CREATING_SMTP_CLIENT).to_fault(None, cause)
}
