#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! A priority based URL router.
//!
//! Routes are grouped by key (usually the HTTP method) and bucketed by
//! segment count. Within a bucket, overlapping routes are ordered by a
//! priority that rewards longer static prefixes, and routes that would be
//! indistinguishable at lookup time are rejected when they are registered.
//! As a result a request can only ever match one route, and lookup is a
//! linear scan of a single small bucket instead of a backtracking tree walk.
//!
//! ```rust
//! use http::Method;
//! use segroute::Router;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.insert(Method::GET, "/home", "Welcome!")?;
//! router.insert(Method::GET, "/users/:id", "A User")?;
//!
//! let matched = router.at(&Method::GET, "/users/978")?;
//! assert_eq!(matched.params.get("id"), Some("978"));
//! assert_eq!(*matched.value, "A User");
//! # Ok(())
//! # }
//! ```
//!
//! # Parameters
//!
//! A registered route can contain two types of parameters:
//!
//! ```text
//! Syntax    Type
//! :name     named parameter
//! *name     catch-all parameter
//! ```
//!
//! ## Named parameters
//!
//! Named parameters are dynamic path segments. They match any non-empty
//! segment up to the next `/` or the end of the path (in a route that ends
//! in a catch-all, an empty segment is accepted too):
//!
//! ```text
//! Route: /blog/:category/:post
//!
//! /blog/rust/request-routers     match: category="rust", post="request-routers"
//! /blog/rust/request-routers/    match: trailing slashes are ignored
//! /blog/rust/                    no match
//! ```
//!
//! ## Catch-all parameters
//!
//! Catch-all parameters match the remainder of the path, including the `/`
//! that precedes them, and must always be the final segment of the route.
//! The name may be omitted and defaults to `filepath`:
//!
//! ```text
//! Route: /files/*filepath
//!
//! /files/                        match: filepath="/"
//! /files/LICENSE                 match: filepath="/LICENSE"
//! /files/templates/article.html  match: filepath="/templates/article.html"
//! /files                         no match
//! ```
//!
//! # Matching rules
//!
//! Registered paths are canonicalized first: duplicate slashes and `.`/`..`
//! elements are collapsed, and a trailing slash is dropped, so `/doc/` and
//! `/doc` name the same route. Request paths are not rewritten; they are
//! split on `/` with leading and trailing slashes ignored.
//!
//! When several routes with the same segment count could overlap, the more
//! specific one wins: a static segment outranks a named parameter, which
//! outranks a catch-all, and earlier segments count for more than later
//! ones. Two routes that no request could tell apart (for example
//! `/user/:name` and `/user/:id`) are rejected with an error at
//! registration time rather than being resolved by registration order.
//!
//! # Concurrency
//!
//! Registration is a startup concern and takes `&mut self`; it is not meant
//! to be called concurrently. Once registration is done the router is
//! immutable: [`Router::at`] takes `&self`, performs no locking, and may be
//! called from any number of threads at once (for example through an
//! `Arc<Router<_, _>>`).

mod error;
mod params;
mod path;
mod router;
mod table;

pub use error::{InsertError, MatchError};
pub use params::{Params, ParamsIter};
pub use router::{Match, Router};
