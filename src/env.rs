//! Process-environment lookups that fail with faults.
//!
//! Thin consumers of the core: every failure is one of the `lyra.go`
//! faults from [`definitions`](crate::definitions), carrying the variable
//! name in its data and the underlying error as its cause.
//!
//! ```rust,no_run
//! use faultline::env;
//!
//! fn listen_port() -> faultline::Result<u64> {
//!     env::int_env_var("PORT")
//! }
//! ```

use crate::Result;
use crate::definitions::{env_var_must_be_integer, env_var_not_defined};
use std::env::{self, VarError};

/// Value of `var_name`.
///
/// A missing variable yields `LYRAGO000000` with no cause. A variable that
/// is set but not valid Unicode yields the same code with the `VarError`
/// as cause.
pub fn env_var(var_name: &str) -> Result<String> {
    match env::var(var_name) {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Err(env_var_not_defined(var_name, None)),
        Err(err @ VarError::NotUnicode(_)) => {
            Err(env_var_not_defined(var_name, Some(err.into())))
        }
    }
}

/// Value of `var_name` parsed as an unsigned 64-bit integer.
///
/// Missing variables fail as in [`env_var`]. Unparsable values yield
/// `LYRAGO000005` with the `ParseIntError` as cause.
pub fn int_env_var(var_name: &str) -> Result<u64> {
    let value = env_var(var_name)?;
    value
        .parse::<u64>()
        .map_err(|err| env_var_must_be_integer(var_name, Some(err.into())))
}

/// Value of `var_name`, or `default` when it is not set.
///
/// Non-Unicode values are still reported as faults.
pub fn env_var_or(var_name: &str, default: impl Into<String>) -> Result<String> {
    match env::var(var_name) {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Ok(default.into()),
        Err(err @ VarError::NotUnicode(_)) => {
            Err(env_var_not_defined(var_name, Some(err.into())))
        }
    }
}
