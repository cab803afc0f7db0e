//! Strongly-typed identifiers for schedule entities.
//!
//! Every entity kind gets its own identifier type so that a trip id can never
//! be passed where a route id is expected:
//!
//! ```rust
//! use timetrim_core::id::{RouteId, TripId};
//!
//! let trip = TripId::new("T1").unwrap();
//! let route = RouteId::new("R1").unwrap();
//!
//! // IDs are different types - this won't compile:
//! // let wrong: RouteId = trip;
//! # let _ = (trip, route);
//! ```
//!
//! Ids are opaque strings assigned by the schedule publisher. The only rule
//! enforced here is that they are not blank.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier after checking it is not blank.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidId`] if the id is empty or only whitespace.
            pub fn new(id: impl Into<String>) -> Result<Self> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(Error::InvalidId {
                        message: format!("{} id cannot be blank", $label),
                    });
                }
                Ok(Self(id))
            }

            /// Creates an identifier without validation.
            ///
            /// Intended for ids that were already validated, e.g. read back
            /// from a graph.
            #[must_use]
            pub fn new_unchecked(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a service period (a calendar validity window).
    ServiceId,
    "service"
);

string_id!(
    /// Identifier of a trip.
    TripId,
    "trip"
);

string_id!(
    /// Identifier of a route.
    RouteId,
    "route"
);

string_id!(
    /// Identifier of a stop.
    StopId,
    "stop"
);
