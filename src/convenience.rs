//! Declaration macros for fault catalogs and diagnostic payloads.
//!
//! # `define_fault_codes!`
//!
//! Declares a component's `ErrorCode` constants together with a unit type
//! implementing [`FaultCatalog`](crate::FaultCatalog), so the whole catalog can
//! be registered against a [`BasicFaultsCache`](crate::BasicFaultsCache) in one
//! call. An optional response type after the component applies to every class.
//!
//! ```rust
//! use faultline::{BasicFaultsCache, Classified, ErrComponent, define_fault_codes};
//!
//! const BILLING: ErrComponent = ErrComponent::from_static("billing");
//!
//! define_fault_codes! {
//!     /// Billing service faults.
//!     pub BillingFaults: BILLING, "internal" => {
//!         /// Ledger write failed.
//!         BILLING_LEDGER_WRITE = "BILLING000001",
//!         /// Invoice rendering failed.
//!         BILLING_INVOICE_RENDER = "BILLING000002",
//!     }
//! }
//!
//! let cache = BasicFaultsCache::default();
//! cache.register(&BillingFaults);
//!
//! let class = cache.get_basic_fault(&BILLING_LEDGER_WRITE);
//! assert_eq!(class.component().as_str(), "billing");
//! assert_eq!(class.response_type().as_str(), "internal");
//! ```
//!
//! # `fault_data!`
//!
//! Builds a [`FaultData`](crate::FaultData) map. Keys convert into `String`,
//! values into [`DataValue`](crate::DataValue).
//!
//! ```rust
//! use faultline::fault_data;
//!
//! let data = fault_data! { "var_name" => "PORT", "attempt" => 2 };
//! assert_eq!(data["var_name"], "PORT");
//! assert_eq!(data["attempt"], 2);
//! ```

/// Declare `ErrorCode` constants and a [`FaultCatalog`](crate::FaultCatalog)
/// type for one component. See the [module docs](crate::convenience).
#[macro_export]
macro_rules! define_fault_codes {
    (
        $(#[$catalog_meta:meta])*
        $vis:vis $catalog:ident: $component:expr $(, $response:expr)? => {
            $(
                $(#[$code_meta:meta])*
                $name:ident = $code:literal
            ),+ $(,)?
        }
    ) => {
        $(
            $(#[$code_meta])*
            $vis const $name: $crate::ErrorCode = $crate::ErrorCode::from_static($code);
        )+

        $(#[$catalog_meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $catalog;

        impl $catalog {
            /// Descriptor for `code`, configured with this catalog's component.
            #[allow(dead_code)]
            $vis fn class(code: $crate::ErrorCode) -> $crate::BasicFault {
                let class = $crate::BasicFault::new(code).with_component($component);
                $( let class = class.with_response_type($response); )?
                class
            }
        }

        impl $crate::FaultCatalog for $catalog {
            fn component(&self) -> $crate::ErrComponent {
                ::std::convert::From::from($component)
            }

            fn basic_faults(&self) -> ::std::vec::Vec<$crate::BasicFault> {
                ::std::vec![$(Self::class($name)),+]
            }
        }
    };
}

/// Build a [`FaultData`](crate::FaultData) map from `key => value` pairs.
#[macro_export]
macro_rules! fault_data {
    () => {
        $crate::FaultData::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut data = $crate::FaultData::new();
        $(
            data.insert(
                ::std::string::String::from($key),
                $crate::DataValue::from($value),
            );
        )+
        data
    }};
}

#[cfg(test)]
mod tests {
    use crate::{BasicFaultsCache, Classified, DataValue, ErrComponent, FaultCatalog};

    const PAYMENTS: ErrComponent = ErrComponent::from_static("payments");

    define_fault_codes! {
        Payments: PAYMENTS, "unavailable" => {
            PAY_GATEWAY_DOWN = "PAY000001",
            PAY_TIMEOUT = "PAY000002",
        }
    }

    define_fault_codes! {
        Plain: "plain" => {
            PLAIN_ONE = "PLAIN000001",
        }
    }

    #[test]
    fn catalog_declares_codes_and_classes() {
        assert_eq!(PAY_GATEWAY_DOWN.as_str(), "PAY000001");
        assert_eq!(Payments.component(), PAYMENTS);

        let classes = Payments.basic_faults();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[1].code(), &PAY_TIMEOUT);
        assert!(classes.iter().all(|c| c.component() == &PAYMENTS));
        for class in &classes {
            assert_eq!(class.response_type().as_str(), "unavailable");
        }
    }

    #[test]
    fn response_type_is_optional() {
        let class = Plain::class(PLAIN_ONE);
        assert_eq!(class.component().as_str(), "plain");
        assert!(class.response_type().is_unset());
    }

    #[test]
    fn register_fills_cache() {
        let cache = BasicFaultsCache::default();
        cache.register(&Payments);
        cache.register(&Plain);

        assert_eq!(cache.len(), 3);
        assert_eq!(
            cache.get_basic_fault(&PAY_TIMEOUT).response_type().as_str(),
            "unavailable"
        );
    }

    #[test]
    fn fault_data_builds_json_values() {
        let empty = fault_data! {};
        assert!(empty.is_empty());

        let owned_key = String::from("dynamic");
        let data = fault_data! {
            "var_name" => "PORT",
            owned_key => true,
            "ratio" => 0.5,
        };
        assert_eq!(data.len(), 3);
        assert_eq!(data["var_name"], DataValue::from("PORT"));
        assert_eq!(data["dynamic"], true);
        assert_eq!(data["ratio"], 0.5);
    }
}
