use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::InsertError;
use crate::params::Params;
use crate::path::clean;

/// One `/`-delimited component of a registered route.
#[derive(Debug, PartialEq, Eq)]
enum Segment {
    /// Literal text that must match the request segment exactly.
    Static(String),
    /// `:name`, matches any single non-empty segment.
    Named(String),
    /// `*name`, matches the remainder of the path. Always last.
    CatchAll(String),
}

impl Segment {
    fn weight(&self) -> u32 {
        match self {
            Segment::Static(_) => 3,
            Segment::Named(_) => 2,
            Segment::CatchAll(_) => 1,
        }
    }
}

/// A registered route. Immutable once inserted.
struct Route<T> {
    /// The canonical path, used for duplicate detection and diagnostics.
    path: String,
    segments: Vec<Segment>,
    priority: u32,
    /// Registration order. Only used to keep bucket ordering stable; never
    /// a precedence rule on its own.
    sequence: u64,
    value: T,
}

/// The routes registered for a single key, bucketed by segment count.
///
/// Routes whose final segment is a catch-all live in separate buckets from
/// the rest: an exact-length route only matches requests with exactly that
/// many segments, while a catch-all route accepts any longer request.
/// Within a bucket, routes are sorted by descending priority.
pub(crate) struct Table<T> {
    exact: HashMap<usize, Vec<Route<T>>>,
    catch_all: HashMap<usize, Vec<Route<T>>>,
    sequence: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            exact: HashMap::new(),
            catch_all: HashMap::new(),
            sequence: 0,
        }
    }
}

impl<T> Table<T> {
    /// Registers a route in the table.
    ///
    /// All validation happens before the route is stored, so a failed
    /// insert leaves previously registered routes untouched.
    pub(crate) fn insert(&mut self, route: &str, value: T) -> Result<(), InsertError> {
        let (path, segments) = parse(route)?;
        let priority = priority(&segments);

        let is_catch_all = matches!(segments.last(), Some(Segment::CatchAll(_)));
        let buckets = match is_catch_all {
            true => &mut self.catch_all,
            false => &mut self.exact,
        };
        let routes = buckets.entry(segments.len()).or_default();

        for existing in routes.iter() {
            if existing.path == path {
                return Err(InsertError::Duplicate {
                    with: existing.path.clone(),
                });
            }

            if existing.priority == priority && conflict(&segments, &existing.segments) {
                return Err(InsertError::Conflict {
                    with: existing.path.clone(),
                });
            }
        }

        routes.push(Route {
            path,
            segments,
            priority,
            sequence: self.sequence,
            value,
        });
        self.sequence += 1;

        routes.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.sequence.cmp(&b.sequence))
        });

        Ok(())
    }

    /// Looks up the route matching a request path, returning its value and
    /// the captured parameters.
    pub(crate) fn at<'t, 'p>(&'t self, path: &'p str) -> Option<(&'t T, Params<'t, 'p>)> {
        let parts: Vec<&str> = path.trim_matches('/').split('/').collect();

        let mut matched = self.exact.get(&parts.len()).and_then(|routes| {
            routes
                .iter()
                .find(|route| matches_exact(&route.segments, &parts))
        });

        if matched.is_none() {
            // A trailing slash counts as one extra (empty) segment here, so
            // `/files/` reaches a `/files/*filepath` route with an empty
            // remainder. Probing shrinks toward the root, which hands the
            // win to the catch-all with the longest matching prefix.
            let mut count = parts.len();
            if path.ends_with('/') {
                count += 1;
            }

            matched = loop {
                let found = self.catch_all.get(&count).and_then(|routes| {
                    routes
                        .iter()
                        .find(|route| matches_prefix(&route.segments, &parts))
                });

                if found.is_some() {
                    break found;
                }

                if count == 0 {
                    break None;
                }
                count -= 1;
            };
        }

        let route = matched?;

        let mut params = Params::new();
        for (i, segment) in route.segments.iter().enumerate() {
            match segment {
                Segment::Static(_) => {}
                Segment::Named(name) => params.push(name, Cow::Borrowed(parts[i])),
                Segment::CatchAll(name) => {
                    let rest = parts.get(i..).unwrap_or(&[]);
                    params.push(name, Cow::Owned(format!("/{}", rest.join("/"))));
                    break;
                }
            }
        }

        Some((&route.value, params))
    }
}

/// Parses a raw route into its canonical path and segment sequence.
fn parse(route: &str) -> Result<(String, Vec<Segment>), InsertError> {
    let cleaned = clean(route);
    let raw: Vec<&str> = cleaned.trim_matches('/').split('/').collect();

    let mut path = String::with_capacity(cleaned.len());
    let mut segments = Vec::with_capacity(raw.len());
    let mut names: Vec<&str> = Vec::new();

    let last = raw.len() - 1;
    for (i, part) in raw.iter().enumerate() {
        path.push('/');

        let (sigil, name) = match part.bytes().next() {
            Some(b':') => (b':', &part[1..]),
            Some(b'*') => (b'*', &part[1..]),
            _ => {
                if part.contains([':', '*']) {
                    return Err(InsertError::TooManyParams);
                }

                path.push_str(part);
                segments.push(Segment::Static((*part).to_owned()));
                continue;
            }
        };

        if name.contains([':', '*']) {
            return Err(InsertError::TooManyParams);
        }

        let name = match sigil {
            b'*' => {
                if i != last {
                    return Err(InsertError::InvalidCatchAll);
                }
                match name.is_empty() {
                    true => "filepath",
                    false => name,
                }
            }
            _ => name,
        };

        if !is_valid_name(name) || names.contains(&name) {
            return Err(InsertError::InvalidParam {
                name: name.to_owned(),
            });
        }
        names.push(name);

        path.push(sigil as char);
        path.push_str(name);

        segments.push(match sigil {
            b'*' => Segment::CatchAll(name.to_owned()),
            _ => Segment::Named(name.to_owned()),
        });
    }

    Ok((path, segments))
}

// Parameter names are made up of word characters ([A-Za-z0-9_]).
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|c| c.is_ascii_alphanumeric() || c == b'_')
}

/// Computes a route's priority. Earlier segments dominate later ones, and
/// static text outweighs named parameters, which outweigh catch-alls, so a
/// route that stays static for longer wins at any shared prefix length.
fn priority(segments: &[Segment]) -> u32 {
    let count = segments.len() as u32;
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| (count - i as u32) * segment.weight())
        .sum()
}

/// Returns `true` if no request could tell the two routes apart: both
/// contain a wildcard, and every position holds either the same wildcard
/// kind or identical static text.
fn conflict(a: &[Segment], b: &[Segment]) -> bool {
    if !has_wildcard(a) || !has_wildcard(b) {
        return false;
    }

    a.iter().zip(b).all(|(x, y)| match (x, y) {
        (Segment::Static(s), Segment::Static(t)) => s == t,
        (Segment::Named(_), Segment::Named(_)) => true,
        (Segment::CatchAll(_), Segment::CatchAll(_)) => true,
        _ => false,
    })
}

fn has_wildcard(segments: &[Segment]) -> bool {
    segments
        .iter()
        .any(|segment| !matches!(segment, Segment::Static(_)))
}

fn matches_exact(segments: &[Segment], parts: &[&str]) -> bool {
    segments.iter().zip(parts).all(|(segment, part)| {
        match segment {
            Segment::Static(text) => text == part,
            Segment::Named(_) => !part.is_empty(),
            // catch-alls never live in the exact-length buckets
            Segment::CatchAll(_) => false,
        }
    })
}

fn matches_prefix(segments: &[Segment], parts: &[&str]) -> bool {
    segments
        .iter()
        .enumerate()
        .all(|(i, segment)| match segment {
            Segment::Static(text) => parts.get(i).is_some_and(|part| text == part),
            // the non-empty requirement only applies to exact-length
            // matching; here a named segment takes whatever is present
            Segment::Named(_) => parts.get(i).is_some(),
            Segment::CatchAll(_) => true,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(route: &str) -> Vec<Segment> {
        parse(route).unwrap().1
    }

    #[test]
    fn canonical_paths() {
        assert_eq!(parse("/").unwrap().0, "/");
        assert_eq!(parse("").unwrap().0, "/");
        assert_eq!(parse("/doc/").unwrap().0, "/doc");
        assert_eq!(parse("//user//:id").unwrap().0, "/user/:id");
        assert_eq!(parse("/src/*").unwrap().0, "/src/*filepath");
        assert_eq!(parse("/files/:dir/*rest").unwrap().0, "/files/:dir/*rest");
    }

    #[test]
    fn segment_kinds() {
        assert_eq!(
            segments("/user/:id/posts"),
            vec![
                Segment::Static("user".to_owned()),
                Segment::Named("id".to_owned()),
                Segment::Static("posts".to_owned()),
            ]
        );
        assert_eq!(
            segments("/src/*"),
            vec![
                Segment::Static("src".to_owned()),
                Segment::CatchAll("filepath".to_owned()),
            ]
        );
        // the root is a single empty static segment
        assert_eq!(segments("/"), vec![Segment::Static(String::new())]);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse("/:foo:bar"), Err(InsertError::TooManyParams));
        assert_eq!(parse("/:foo*bar"), Err(InsertError::TooManyParams));
        assert_eq!(parse("/user:"), Err(InsertError::TooManyParams));
        assert_eq!(parse("/src/*rest/x"), Err(InsertError::InvalidCatchAll));
        assert_eq!(
            parse("/cmd/:/"),
            Err(InsertError::InvalidParam {
                name: String::new()
            })
        );
        assert_eq!(
            parse("/cmd/:na-me"),
            Err(InsertError::InvalidParam {
                name: "na-me".to_owned()
            })
        );
        // parameter names must be unique within a route
        assert_eq!(
            parse("/users/:id/posts/:id"),
            Err(InsertError::InvalidParam {
                name: "id".to_owned()
            })
        );
    }

    #[test]
    fn priority_weights() {
        // each segment contributes (remaining count) * weight
        assert_eq!(priority(&segments("/")), 3);
        assert_eq!(priority(&segments("/cmd/vet")), 2 * 3 + 3);
        assert_eq!(priority(&segments("/cmd/:tool")), 2 * 3 + 2);
        assert_eq!(priority(&segments("/src/*filepath")), 2 * 3 + 1);
        assert_eq!(priority(&segments("/files/:dir/*rest")), 3 * 3 + 2 * 2 + 1);

        // longer static prefixes dominate at any shared length
        assert!(priority(&segments("/a/b/:c")) > priority(&segments("/a/:b/c")));
        assert!(priority(&segments("/a/:b/c")) > priority(&segments("/:a/b/c")));
    }

    #[test]
    fn conflict_shapes() {
        assert!(conflict(
            &segments("/user/:name"),
            &segments("/user/:id")
        ));
        assert!(conflict(
            &segments("/src/*filepath"),
            &segments("/src/*filepathx")
        ));

        // differing static context distinguishes the routes
        assert!(!conflict(
            &segments("/cmd/:tool"),
            &segments("/search/:query")
        ));
        assert!(!conflict(
            &segments("/src/js/:name"),
            &segments("/src/:type/index")
        ));

        // static-only routes never conflict
        assert!(!conflict(&segments("/a/b"), &segments("/a/b")));
    }
}
