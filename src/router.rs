use std::collections::HashMap;
use std::hash::Hash;

use http::Method;

use crate::error::{InsertError, MatchError};
use crate::params::Params;
use crate::table::Table;

/// A router which can be used to dispatch requests to different values via
/// configurable routes.
///
/// Values are grouped by key. The router uses HTTP methods as keys through
/// the [`get`](Router::get), [`post`](Router::post), etc. shortcuts, but any
/// `Eq + Hash` key works.
///
/// Registration is a startup concern: it takes `&mut self` and is expected
/// to finish before the router starts serving lookups. After that the
/// router is immutable and [`at`](Router::at) can be called concurrently
/// without synchronization.
pub struct Router<K: Eq + Hash, V> {
    tables: HashMap<K, Table<V>>,
}

impl<K: Eq + Hash, V> Router<K, V> {
    /// Constructs a new, empty router.
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Registers a value under the given key and route.
    ///
    /// The route may contain named (`:name`) and catch-all (`*name`)
    /// parameters; see the [crate documentation](crate) for the full
    /// grammar. Malformed routes, duplicates, and routes that would be
    /// ambiguous with an already registered route are rejected with a
    /// descriptive [`InsertError`], leaving the router unchanged.
    ///
    /// ```rust
    /// use http::Method;
    /// use segroute::{InsertError, Router};
    ///
    /// let mut router = Router::new();
    /// assert!(router.insert(Method::GET, "/teapot", "I am a teapot").is_ok());
    ///
    /// // `/user/:id` cannot be told apart from `/user/:name`
    /// router.insert(Method::GET, "/user/:name", "a user").unwrap();
    /// let err = router.insert(Method::GET, "/user/:id", "a user").unwrap_err();
    /// assert_eq!(err, InsertError::Conflict { with: "/user/:name".into() });
    /// ```
    pub fn insert(&mut self, key: K, route: &str, value: V) -> Result<(), InsertError> {
        self.tables.entry(key).or_default().insert(route, value)
    }

    /// Looks up the route matching the given key and request path.
    ///
    /// Returns the registered value along with the path parameters captured
    /// from the request. Leading and trailing slashes in the request path
    /// are ignored. Not finding a route is an ordinary outcome, reported as
    /// [`MatchError::NotFound`].
    ///
    /// ```rust
    /// use http::Method;
    /// use segroute::Router;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert(Method::GET, "/files/:dir/*filepath", "serve files")?;
    ///
    /// let matched = router.at(&Method::GET, "/files/js/inc/framework.js")?;
    /// assert_eq!(matched.params.get("dir"), Some("js"));
    /// assert_eq!(matched.params.get("filepath"), Some("/inc/framework.js"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn at<'r, 'p>(&'r self, key: &K, path: &'p str) -> Result<Match<'r, 'p, V>, MatchError> {
        self.tables
            .get(key)
            .and_then(|table| table.at(path))
            .map(|(value, params)| Match { value, params })
            .ok_or(MatchError::NotFound)
    }
}

impl<K: Eq + Hash, V> Default for Router<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A successful route lookup.
#[derive(Debug)]
pub struct Match<'r, 'p, V> {
    /// The value registered for the matched route.
    pub value: &'r V,
    /// The parameters captured from the request path, in route order.
    pub params: Params<'r, 'p>,
}

impl<V> Router<Method, V> {
    /// Registers a value for GET requests at the given route.
    pub fn get(&mut self, route: &str, value: V) -> Result<(), InsertError> {
        self.insert(Method::GET, route, value)
    }

    /// Registers a value for HEAD requests at the given route.
    pub fn head(&mut self, route: &str, value: V) -> Result<(), InsertError> {
        self.insert(Method::HEAD, route, value)
    }

    /// Registers a value for OPTIONS requests at the given route.
    pub fn options(&mut self, route: &str, value: V) -> Result<(), InsertError> {
        self.insert(Method::OPTIONS, route, value)
    }

    /// Registers a value for POST requests at the given route.
    pub fn post(&mut self, route: &str, value: V) -> Result<(), InsertError> {
        self.insert(Method::POST, route, value)
    }

    /// Registers a value for PUT requests at the given route.
    pub fn put(&mut self, route: &str, value: V) -> Result<(), InsertError> {
        self.insert(Method::PUT, route, value)
    }

    /// Registers a value for PATCH requests at the given route.
    pub fn patch(&mut self, route: &str, value: V) -> Result<(), InsertError> {
        self.insert(Method::PATCH, route, value)
    }

    /// Registers a value for DELETE requests at the given route.
    pub fn delete(&mut self, route: &str, value: V) -> Result<(), InsertError> {
        self.insert(Method::DELETE, route, value)
    }
}
