use std::fmt;

/// Represents errors that can occur when registering a new route.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum InsertError {
    /// A parameter name is empty, repeats within the route, or contains
    /// characters outside `[A-Za-z0-9_]`.
    InvalidParam {
        /// The offending parameter name.
        name: String,
    },
    /// Only one `:` or `*` is allowed per path segment.
    TooManyParams,
    /// Catch-all parameters are only allowed at the end of a route.
    InvalidCatchAll,
    /// Attempted to register a canonical path twice.
    Duplicate {
        /// The canonical path that is already registered.
        with: String,
    },
    /// Attempted to register a route that no request could tell apart from
    /// an existing wildcard route.
    Conflict {
        /// The existing route that the insertion is conflicting with.
        with: String,
    },
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParam { name } => {
                write!(f, "invalid parameter name '{}'", name)
            }
            Self::TooManyParams => {
                write!(f, "only one wildcard per path segment is allowed")
            }
            Self::InvalidCatchAll => write!(
                f,
                "catch-all parameters are only allowed at the end of a route"
            ),
            Self::Duplicate { with } => {
                write!(f, "a handle is already registered for path '{}'", with)
            }
            Self::Conflict { with } => write!(
                f,
                "wildcard route conflicts with previously registered route '{}'",
                with
            ),
        }
    }
}

impl std::error::Error for InsertError {}

/// A failed match attempt.
///
/// Not finding a route is an ordinary outcome; the caller decides how to
/// respond, typically with a 404.
///
/// ```
/// use http::Method;
/// use segroute::{MatchError, Router};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router = Router::new();
/// router.insert(Method::GET, "/home", "Welcome!")?;
///
/// // no routes match
/// if let Err(err) = router.at(&Method::GET, "/foobar") {
///     assert_eq!(err, MatchError::NotFound);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MatchError {
    /// No matching route was found.
    NotFound,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matching route not found")
    }
}

impl std::error::Error for MatchError {}
