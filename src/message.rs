//! Localized rendering on top of [`Fault`].
//!
//! [`MessageAwareFault`] pairs a fault with a [`MessageResolver`]. The crate
//! ships no message catalogs: the default [`CodeMessages`] resolver answers
//! every language with the code itself, and real catalogs plug in by
//! implementing the trait (closures work too).
//!
//! ```rust
//! use faultline::{BasicFault, ErrorCode, FaultData, MessageAware, MessageAwareFault};
//!
//! let fault = BasicFault::new("LYRAGO000000").fault();
//!
//! let plain = MessageAwareFault::new(fault);
//! assert_eq!(plain.message("en"), "LYRAGO000000");
//! assert_eq!(plain.error_string(), "LYRAGO000000:LYRAGO000000");
//!
//! let fault = BasicFault::new("LYRAGO000000").fault();
//! let localized = MessageAwareFault::with_resolver(
//!     fault,
//!     |_: &ErrorCode, lang: &str, _: &FaultData| -> Option<String> {
//!         (lang == "en").then(|| String::from("environment variable not defined"))
//!     },
//! );
//! assert_eq!(localized.error_string(), "LYRAGO000000:environment variable not defined");
//! assert_eq!(localized.message("fr"), "");
//! ```

use crate::fault::{CAUSE_SEPARATOR, write_cause_chain};
use crate::{
    Cause, Classified, Diagnosable, ErrComponent, ErrorCode, Fault, FaultData, ResponseErrType,
};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Language used by [`MessageAware::error_string`].
pub const DEFAULT_LANGUAGE: &str = "en";

/// Resolves the human-readable message for a code in a given language.
///
/// Returning `None` means "no message"; the fault then renders as its code.
pub trait MessageResolver: Send + Sync {
    /// Message for `code` in `lang`, optionally interpolating `data`.
    fn resolve(&self, code: &ErrorCode, lang: &str, data: &FaultData) -> Option<String>;
}

impl<F> MessageResolver for F
where
    F: Fn(&ErrorCode, &str, &FaultData) -> Option<String> + Send + Sync,
{
    fn resolve(&self, code: &ErrorCode, lang: &str, data: &FaultData) -> Option<String> {
        self(code, lang, data)
    }
}

/// Baseline resolver: every language gets the code string.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeMessages;

impl MessageResolver for CodeMessages {
    fn resolve(&self, code: &ErrorCode, _lang: &str, _data: &FaultData) -> Option<String> {
        Some(code.to_string())
    }
}

/// Faults that can render a localized message.
pub trait MessageAware: Diagnosable {
    /// Message in `lang`. Empty when the resolver has none.
    fn message(&self, lang: &str) -> Cow<'_, str>;

    /// `"<code>:<message>"` in [`DEFAULT_LANGUAGE`], or the bare code when
    /// the message is empty, followed by the cause chain when the fault
    /// appends causes.
    fn error_string(&self) -> String {
        let message = self.message(DEFAULT_LANGUAGE);
        let mut rendered = if message.is_empty() {
            self.code().to_string()
        } else {
            format!("{}:{}", self.code(), message)
        };
        if self.appends_cause() {
            rendered.push_str(CAUSE_SEPARATOR);
            // Writing into a String cannot fail.
            let _ = write_cause_chain(&mut rendered, self.causes());
        }
        rendered
    }
}

/// A [`Fault`] decorated with message resolution.
///
/// `Display` keeps the plain fault rendering; use
/// [`MessageAware::error_string`] for the localized form.
#[must_use = "faults should be returned, logged or otherwise handled"]
pub struct MessageAwareFault<R: MessageResolver = CodeMessages> {
    fault: Fault,
    resolver: R,
}

impl MessageAwareFault<CodeMessages> {
    /// Decorate `fault` with the baseline resolver.
    pub fn new(fault: Fault) -> Self {
        Self {
            fault,
            resolver: CodeMessages,
        }
    }
}

impl<R: MessageResolver> MessageAwareFault<R> {
    /// Decorate `fault` with a custom resolver.
    pub fn with_resolver(fault: Fault, resolver: R) -> Self {
        Self { fault, resolver }
    }

    /// Borrow the underlying fault.
    #[inline]
    pub fn fault(&self) -> &Fault {
        &self.fault
    }

    /// Drop the decoration.
    #[inline]
    pub fn into_inner(self) -> Fault {
        self.fault
    }

    /// Primary (first) cause, if any.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.fault.cause()
    }
}

impl<R: MessageResolver> Classified for MessageAwareFault<R> {
    #[inline]
    fn code(&self) -> &ErrorCode {
        self.fault.code()
    }

    #[inline]
    fn component(&self) -> &ErrComponent {
        self.fault.component()
    }

    #[inline]
    fn response_type(&self) -> &ResponseErrType {
        self.fault.response_type()
    }
}

impl<R: MessageResolver> Diagnosable for MessageAwareFault<R> {
    #[inline]
    fn causes(&self) -> &[Cause] {
        self.fault.causes()
    }

    #[inline]
    fn data(&self) -> &FaultData {
        self.fault.data()
    }

    #[inline]
    fn origin(&self) -> Option<&str> {
        self.fault.origin()
    }

    #[inline]
    fn is_retryable(&self) -> bool {
        self.fault.is_retryable()
    }

    #[inline]
    fn appends_cause(&self) -> bool {
        self.fault.appends_cause()
    }
}

impl<R: MessageResolver> MessageAware for MessageAwareFault<R> {
    fn message(&self, lang: &str) -> Cow<'_, str> {
        self.resolver
            .resolve(self.fault.code(), lang, self.fault.data())
            .map_or(Cow::Borrowed(""), Cow::Owned)
    }
}

impl<R: MessageResolver> fmt::Debug for MessageAwareFault<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageAwareFault")
            .field("fault", &self.fault)
            .finish_non_exhaustive()
    }
}

impl<R: MessageResolver> fmt::Display for MessageAwareFault<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fault, f)
    }
}

impl<R: MessageResolver> Error for MessageAwareFault<R> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.fault.source()
    }
}

impl From<Fault> for MessageAwareFault<CodeMessages> {
    fn from(fault: Fault) -> Self {
        Self::new(fault)
    }
}
