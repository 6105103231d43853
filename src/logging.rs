//! Structured log views of faults.
//!
//! [`FaultLog`] borrows from a fault and exposes everything a logger or a
//! response serializer needs: classification, origin, retryability, data and
//! the rendered cause chain. It cannot outlive the fault it was built from.
//!
//! Two outputs are provided:
//!
//! - [`FaultLog::write_to`]: one human-readable line, each field truncated to
//!   a bounded length
//! - `serde::Serialize` / [`FaultLog::to_json`]: the full structure as JSON
//!
//! [`log_fault`] emits a fault as a single `tracing` event.
//!
//! ```rust
//! use faultline::{FaultLog, definitions};
//!
//! let fault = definitions::env_var_not_defined("PORT", None).with_origin("boot");
//! let log = FaultLog::new(&fault);
//!
//! let mut line = String::new();
//! log.write_to(&mut line).unwrap();
//! assert_eq!(
//!     line,
//!     "[LYRAGO000000] component='lyra.go' response='' origin='boot' var_name='PORT'"
//! );
//! ```

use crate::{Cause, Diagnosable, ErrComponent, ErrorCode, FaultData, ResponseErrType};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Maximum length for any individual field in formatted output
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Borrowed, structured view of one fault.
#[derive(Debug, Clone, Copy)]
pub struct FaultLog<'a> {
    code: &'a ErrorCode,
    component: &'a ErrComponent,
    response_type: &'a ResponseErrType,
    origin: Option<&'a str>,
    data: &'a FaultData,
    causes: &'a [Cause],
    retryable: bool,
}

impl<'a> FaultLog<'a> {
    /// View of `fault`.
    pub fn new<F: Diagnosable + ?Sized>(fault: &'a F) -> Self {
        Self {
            code: fault.code(),
            component: fault.component(),
            response_type: fault.response_type(),
            origin: fault.origin(),
            data: fault.data(),
            causes: fault.causes(),
            retryable: fault.is_retryable(),
        }
    }

    /// Fault code.
    #[inline]
    pub const fn code(&self) -> &'a ErrorCode {
        self.code
    }

    /// Owning component.
    #[inline]
    pub const fn component(&self) -> &'a ErrComponent {
        self.component
    }

    /// Response classification.
    #[inline]
    pub const fn response_type(&self) -> &'a ResponseErrType {
        self.response_type
    }

    /// Where the fault was raised, if recorded.
    #[inline]
    pub const fn origin(&self) -> Option<&'a str> {
        self.origin
    }

    /// Occurrence data.
    #[inline]
    pub const fn data(&self) -> &'a FaultData {
        self.data
    }

    /// Whether the operation may be retried.
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Rendered text of each cause, in chain order.
    pub fn cause_texts(&self) -> Vec<String> {
        self.causes.iter().map(ToString::to_string).collect()
    }

    /// Write one log line without building intermediate strings for
    /// untruncated fields.
    ///
    /// Format: `[CODE] component='..' response='..' [RETRYABLE] origin='..' key='value' cause='..'`
    /// with the bracketed flag, origin, data and causes present only when set.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{}] component='{}' response='{}'",
            truncate_with_indicator(self.code.as_str()),
            truncate_with_indicator(self.component.as_str()),
            truncate_with_indicator(self.response_type.as_str())
        )?;

        if self.retryable {
            f.write_str(" [RETRYABLE]")?;
        }

        if let Some(origin) = self.origin {
            write!(f, " origin='{}'", truncate_with_indicator(origin))?;
        }

        for (key, value) in self.data {
            write!(
                f,
                " {}='{}'",
                truncate_with_indicator(key),
                truncate_with_indicator(&value_text(value))
            )?;
        }

        for cause in self.causes {
            write!(f, " cause='{}'", truncate_with_indicator(&cause.to_string()))?;
        }

        Ok(())
    }

    /// Serialize the full view as a JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for FaultLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

impl Serialize for FaultLog<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FaultLog", 7)?;
        state.serialize_field("code", self.code.as_str())?;
        state.serialize_field("component", self.component.as_str())?;
        state.serialize_field("response_type", self.response_type.as_str())?;
        state.serialize_field("origin", &self.origin)?;
        state.serialize_field("retryable", &self.retryable)?;
        state.serialize_field("data", self.data)?;
        state.serialize_field("causes", &self.cause_texts())?;
        state.end()
    }
}

/// Emit `fault` as one `tracing` event.
///
/// Retryable faults are logged at WARN, everything else at ERROR. The event
/// message is the fault's own rendering.
pub fn log_fault<F: Diagnosable + ?Sized>(fault: &F) {
    let log = FaultLog::new(fault);
    let data = serde_json::to_string(log.data()).unwrap_or_default();
    let causes = log.cause_texts();

    macro_rules! emit {
        ($level:ident) => {
            tracing::$level!(
                code = %log.code(),
                component = %log.component(),
                response_type = %log.response_type(),
                origin = log.origin().unwrap_or_default(),
                retryable = log.is_retryable(),
                data = %data,
                causes = ?causes,
                "{fault}"
            )
        };
    }

    if log.is_retryable() {
        emit!(warn);
    } else {
        emit!(error);
    }
}

/// Strings print bare; every other value prints as JSON.
fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Truncate a string for display to bound log line size.
///
/// Returns a Cow<str> to avoid allocation when no truncation is needed.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
