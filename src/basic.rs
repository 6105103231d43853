//! Fault class descriptors.
//!
//! A [`BasicFault`] describes a *kind* of failure: its code, the component
//! owning it, and how it should be surfaced. It is declared once, typically
//! next to a component's code constants or through a
//! [`BasicFaultsCache`](crate::BasicFaultsCache), and then stamps out
//! [`Fault`] occurrences with [`BasicFault::to_fault`].
//!
//! ```rust
//! use faultline::{BasicFault, Classified, ErrComponent, ErrorCode, fault_data};
//!
//! const ERR_ENV_VAR_UNDEFINED: ErrorCode = ErrorCode::from_static("LYRAGO000000");
//!
//! let class = BasicFault::new(ERR_ENV_VAR_UNDEFINED)
//!     .with_component(ErrComponent::from_static("lyra.go"));
//!
//! let fault = class.to_fault(Some(fault_data! { "var_name" => "PORT" }), None);
//! assert_eq!(fault.to_string(), "LYRAGO000000");
//! assert_eq!(fault.component().as_str(), "lyra.go");
//! ```

use crate::{Cause, ErrComponent, ErrorCode, Fault, FaultData, ResponseErrType};
use std::fmt;

/// Read access to the class fields shared by descriptors and occurrences.
///
/// Consumers that only need to route or count failures (by code, by owner,
/// by response type) should depend on this trait and nothing more.
pub trait Classified {
    /// Stable identifier of the error kind.
    fn code(&self) -> &ErrorCode;

    /// Owning component. Empty when never configured.
    fn component(&self) -> &ErrComponent;

    /// Response classification. Empty when never configured.
    fn response_type(&self) -> &ResponseErrType;
}

/// Descriptor of an error kind: `(code, component, response type)`.
///
/// Configuration is fluent and by value, so a descriptor is finished before
/// it is shared:
///
/// ```rust
/// # use faultline::{BasicFault, Classified, ErrComponent, ResponseErrType};
/// let class = BasicFault::new("BILLING000003")
///     .with_component(ErrComponent::from_static("billing"))
///     .with_response_type(ResponseErrType::from_static("conflict"));
/// assert_eq!(class.response_type().as_str(), "conflict");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct BasicFault {
    code: ErrorCode,
    component: ErrComponent,
    response_type: ResponseErrType,
}

impl BasicFault {
    /// Descriptor for `code` with component and response type unset.
    #[inline]
    pub fn new(code: impl Into<ErrorCode>) -> Self {
        Self {
            code: code.into(),
            component: ErrComponent::default(),
            response_type: ResponseErrType::default(),
        }
    }

    /// Set the owning component.
    #[inline]
    pub fn with_component(mut self, component: impl Into<ErrComponent>) -> Self {
        self.component = component.into();
        self
    }

    /// Set the response classification.
    #[inline]
    pub fn with_response_type(mut self, response_type: impl Into<ResponseErrType>) -> Self {
        self.response_type = response_type.into();
        self
    }

    /// Create an occurrence of this kind.
    ///
    /// - `data: None` becomes an empty map.
    /// - `cause: Some(e)` becomes the sole, primary entry of the cause chain;
    ///   `None` leaves the chain empty.
    ///
    /// The fault carries a snapshot of this descriptor. Reconfiguring the
    /// descriptor afterwards does not affect faults already created.
    pub fn to_fault(&self, data: Option<FaultData>, cause: Option<Cause>) -> Fault {
        Fault::from_class(self.clone(), data.unwrap_or_default(), cause)
    }

    /// Occurrence with no diagnostic data and no cause.
    #[inline]
    pub fn fault(&self) -> Fault {
        self.to_fault(None, None)
    }

    /// Occurrence carrying `data` and no cause.
    #[inline]
    pub fn fault_with(&self, data: FaultData) -> Fault {
        self.to_fault(Some(data), None)
    }
}

impl Classified for BasicFault {
    #[inline]
    fn code(&self) -> &ErrorCode {
        &self.code
    }

    #[inline]
    fn component(&self) -> &ErrComponent {
        &self.component
    }

    #[inline]
    fn response_type(&self) -> &ResponseErrType {
        &self.response_type
    }
}

impl fmt::Display for BasicFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.code, f)
    }
}

impl std::error::Error for BasicFault {}
