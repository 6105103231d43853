//! Identifier tags for fault classes.
//!
//! Three opaque string newtypes travel with every fault:
//!
//! - [`ErrorCode`]: stable identifier of one error *kind* (e.g. `LYRAGO000005`)
//! - [`ErrComponent`]: the component that owns the kind (e.g. `lyra.go`)
//! - [`ResponseErrType`]: how the error should be surfaced to callers
//!
//! None of them validate their contents. The code space is a convention kept
//! by the producing components (component prefix + zero-padded numeric
//! suffix is the recommended shape), not something this layer enforces.
//!
//! # Allocation
//!
//! Each tag stores a `Cow<'static, str>`, so tags declared as `const` from
//! string literals never allocate, and cloning them is a pointer copy.
//! Tags built from runtime `String`s own their buffer.
//!
//! # Example
//!
//! ```rust
//! use faultline::{ErrComponent, ErrorCode};
//!
//! const ERR_TIMEOUT: ErrorCode = ErrorCode::from_static("BILLING000020");
//! const BILLING: ErrComponent = ErrComponent::from_static("billing");
//!
//! assert_eq!(ERR_TIMEOUT.to_string(), "BILLING000020");
//! assert_eq!(BILLING.as_str(), "billing");
//! assert!(ErrComponent::default().is_unset());
//! ```

use std::borrow::{Borrow, Cow};
use std::fmt;

macro_rules! string_tag {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Build a tag from a string literal. Usable in `const` items.
            #[inline]
            pub const fn from_static(value: &'static str) -> Self {
                Self(Cow::Borrowed(value))
            }

            /// Build a tag from any owned or static string.
            #[inline]
            pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
                Self(value.into())
            }

            /// Canonical textual form.
            #[inline]
            pub fn as_str(&self) -> &str {
                self.0.as_ref()
            }

            /// `true` when the tag is the empty string, i.e. never configured.
            #[inline]
            pub fn is_unset(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl From<&'static str> for $name {
            #[inline]
            fn from(value: &'static str) -> Self {
                Self::from_static(value)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(Cow::Owned(value))
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

string_tag! {
    /// Stable, process-wide identifier of one error kind.
    ///
    /// Its `Display` output is the canonical rendering used as the base text
    /// of every fault created from it.
    ErrorCode
}

string_tag! {
    /// Tag naming the component that owns an error kind.
    ErrComponent
}

string_tag! {
    /// Classification steering how an error is surfaced in responses
    /// (e.g. `"bad_request"`, `"internal"`).
    ResponseErrType
}
