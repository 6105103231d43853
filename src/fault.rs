//! Fault occurrences and their cause chains.
//!
//! A [`Fault`] is one concrete failure: a snapshot of the [`BasicFault`] it
//! was created from, plus occurrence context:
//!
//! - `data`: diagnostic key/value map (never absent, possibly empty)
//! - `causes`: ordered underlying errors, first is the proximate cause
//! - `origin`: optional free-text source annotation
//! - `retryable`: one-way flag, `false` until marked
//! - `append_cause`: whether the textual rendering includes the cause chain
//!
//! # Rendering
//!
//! `Display` writes the code. With [`Fault::append_cause`] it writes the code,
//! `"; "`, and then every cause's own `Display` output followed by `"; "`.
//! A nested `Fault` cause renders its own chain only if its own flag is set.
//!
//! ```rust
//! use faultline::{BasicFault, fault_data};
//!
//! let parse_err = "abc".parse::<u64>().unwrap_err();
//! let fault = BasicFault::new("LYRAGO000005")
//!     .to_fault(
//!         Some(fault_data! { "var_name" => "PORT", "var_type" => "integer" }),
//!         Some(parse_err.clone().into()),
//!     )
//!     .append_cause();
//!
//! assert_eq!(fault.to_string(), format!("LYRAGO000005; {parse_err}; "));
//! ```

use crate::{BasicFault, Classified, ErrComponent, ErrorCode, ResponseErrType};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

/// Separator placed after the code and after each cause in chain rendering.
pub const CAUSE_SEPARATOR: &str = "; ";

/// One underlying error in a cause chain.
pub type Cause = Box<dyn Error + Send + Sync + 'static>;

/// A single diagnostic value. Any JSON value is accepted.
pub type DataValue = serde_json::Value;

/// Diagnostic payload of a fault, ordered by key for stable output.
pub type FaultData = BTreeMap<String, DataValue>;

/// Read access to the occurrence context of a fault.
///
/// Loggers and response mappers take `&dyn Diagnosable` (or a generic bound)
/// so they can consume any fault flavor without knowing the concrete type.
pub trait Diagnosable: Classified + Error + Send + Sync {
    /// Full ordered cause chain. Empty when the fault has no cause.
    fn causes(&self) -> &[Cause];

    /// Diagnostic payload. Empty when none was supplied.
    fn data(&self) -> &FaultData;

    /// Free-text source annotation, if one was set.
    fn origin(&self) -> Option<&str>;

    /// Whether the failed operation may be retried by the caller.
    fn is_retryable(&self) -> bool;

    /// Whether the textual rendering includes the cause chain.
    fn appends_cause(&self) -> bool;

    /// First entry of the cause chain.
    fn primary_cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.causes().first().map(|cause| &**cause)
    }
}

/// One failure occurrence.
#[derive(Debug)]
#[must_use = "faults should be returned, logged or otherwise handled"]
pub struct Fault {
    class: BasicFault,
    origin: Option<Cow<'static, str>>,
    data: FaultData,
    causes: SmallVec<[Cause; 2]>,
    retryable: bool,
    append_cause: bool,
}

impl Fault {
    pub(crate) fn from_class(class: BasicFault, data: FaultData, cause: Option<Cause>) -> Self {
        let mut causes = SmallVec::new();
        causes.extend(cause);
        Self {
            class,
            origin: None,
            data,
            causes,
            retryable: false,
            append_cause: false,
        }
    }

    /// Annotate where the failure was detected.
    #[inline]
    pub fn with_origin(mut self, origin: impl Into<Cow<'static, str>>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Mark the failure as transient. There is no way back.
    #[inline]
    pub fn mark_retryable(mut self) -> Self {
        self.retryable = true;
        self
    }

    /// Include the cause chain in the textual rendering.
    #[inline]
    pub fn append_cause(mut self) -> Self {
        self.append_cause = true;
        self
    }

    /// Push a further cause onto the end of the chain.
    #[inline]
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Insert one diagnostic entry, replacing any previous value for `key`.
    #[inline]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// The class snapshot this fault was created from.
    #[inline]
    pub fn class(&self) -> &BasicFault {
        &self.class
    }

    /// Primary (first) cause, if any.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.primary_cause()
    }
}

impl Classified for Fault {
    #[inline]
    fn code(&self) -> &ErrorCode {
        self.class.code()
    }

    #[inline]
    fn component(&self) -> &ErrComponent {
        self.class.component()
    }

    #[inline]
    fn response_type(&self) -> &ResponseErrType {
        self.class.response_type()
    }
}

impl Diagnosable for Fault {
    #[inline]
    fn causes(&self) -> &[Cause] {
        &self.causes
    }

    #[inline]
    fn data(&self) -> &FaultData {
        &self.data
    }

    #[inline]
    fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    #[inline]
    fn is_retryable(&self) -> bool {
        self.retryable
    }

    #[inline]
    fn appends_cause(&self) -> bool {
        self.append_cause
    }
}

/// Write every cause followed by [`CAUSE_SEPARATOR`].
pub(crate) fn write_cause_chain(f: &mut impl fmt::Write, causes: &[Cause]) -> fmt::Result {
    for cause in causes {
        write!(f, "{cause}{CAUSE_SEPARATOR}")?;
    }
    Ok(())
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class.code().as_str())?;
        if self.append_cause {
            f.write_str(CAUSE_SEPARATOR)?;
            write_cause_chain(f, &self.causes)?;
        }
        Ok(())
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.causes
            .first()
            .map(|cause| cause.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault_data;
    use std::io;

    fn class(code: &'static str) -> BasicFault {
        BasicFault::new(code).with_component("lyra.go")
    }

    #[test]
    fn fresh_fault_is_not_retryable() {
        let fault = class("C1").fault();
        assert!(!fault.is_retryable());
        assert!(fault.mark_retryable().is_retryable());
    }

    #[test]
    fn rendering_ignores_causes_by_default() {
        let fault = class("LYRAGO000000")
            .to_fault(None, Some("boom".into()))
            .with_cause(io::Error::other("second"));

        assert_eq!(fault.causes().len(), 2);
        assert_eq!(fault.to_string(), "LYRAGO000000");
    }

    #[test]
    fn appended_chain_lists_causes_in_order() {
        let fault = class("C2")
            .to_fault(None, Some("first".into()))
            .with_cause(io::Error::other("second"))
            .append_cause();

        assert_eq!(fault.to_string(), "C2; first; second; ");
    }

    #[test]
    fn appended_chain_without_causes_keeps_separator() {
        let fault = class("C3").fault().append_cause();
        assert_eq!(fault.to_string(), "C3; ");
    }

    #[test]
    fn nested_faults_render_opaquely_unless_opted_in() {
        let inner = class("INNER").to_fault(None, Some("root".into()));
        let outer = class("OUTER")
            .to_fault(None, Some(inner.into()))
            .append_cause();
        assert_eq!(outer.to_string(), "OUTER; INNER; ");

        let inner = class("INNER")
            .to_fault(None, Some("root".into()))
            .append_cause();
        let outer = class("OUTER")
            .to_fault(None, Some(inner.into()))
            .append_cause();
        assert_eq!(outer.to_string(), "OUTER; INNER; root; ; ");
    }

    #[test]
    fn error_source_is_primary_cause() {
        let gone = io::Error::new(io::ErrorKind::NotFound, "gone");
        let fault = class("C4")
            .to_fault(None, Some(gone.into()))
            .with_cause("later");

        let source = fault.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("gone"));
        let primary = fault.cause().and_then(|c| c.downcast_ref::<io::Error>());
        assert!(primary.is_some());
    }

    #[test]
    fn origin_and_data_are_recorded() {
        let fault = class("C5")
            .fault_with(fault_data! { "var_name" => "PORT" })
            .with_origin("config::load")
            .with_data("attempt", 3);

        assert_eq!(fault.origin(), Some("config::load"));
        assert_eq!(fault.data()["var_name"], "PORT");
        assert_eq!(fault.data()["attempt"], 3);
        assert_eq!(fault.code().as_str(), "C5");
    }

    #[test]
    fn faults_are_generic_errors() {
        fn boxed() -> Result<(), Box<dyn Error + Send + Sync>> {
            let result: Result<(), Fault> = Err(class("C6").fault());
            result?;
            Ok(())
        }
        assert_eq!(boxed().unwrap_err().to_string(), "C6");
    }
}
