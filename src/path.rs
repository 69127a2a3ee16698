/// Returns the canonical form of a registered route path, eliminating `.`
/// and `..` elements.
///
/// The following rules are applied until no further processing can be done:
///
/// 1. Replace multiple slashes with a single slash.
/// 2. Eliminate each `.` path name element (the current directory).
/// 3. Eliminate each `..` path name element (the parent directory) along
///    with the non-`..` element that precedes it, never backtracking past
///    the root.
///
/// The result always starts with `/` and never ends with one, so `/doc/`
/// and `/doc` canonicalize to the same path. If the result of this process
/// is an empty string, `/` is returned.
pub(crate) fn clean(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();

    for element in path.split('/') {
        match element {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(element),
        }
    }

    if stack.is_empty() {
        return "/".to_owned();
    }

    let mut cleaned = String::with_capacity(path.len());
    for element in stack {
        cleaned.push('/');
        cleaned.push_str(element);
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    // path, result
    fn clean_tests() -> Vec<(&'static str, &'static str)> {
        vec![
            // Already clean
            ("/", "/"),
            ("/abc", "/abc"),
            ("/a/b/c", "/a/b/c"),
            // Trailing slash removed
            ("/abc/", "/abc"),
            ("/a/b/c/", "/a/b/c"),
            // Missing root
            ("", "/"),
            ("a/", "/a"),
            ("abc", "/abc"),
            ("abc/def", "/abc/def"),
            ("a/b/c", "/a/b/c"),
            // Remove doubled slash
            ("//", "/"),
            ("/abc//", "/abc"),
            ("/abc/def//", "/abc/def"),
            ("/abc//def//ghi", "/abc/def/ghi"),
            ("//abc", "/abc"),
            ("///abc", "/abc"),
            ("//abc//", "/abc"),
            // Remove . elements
            (".", "/"),
            ("./", "/"),
            ("/abc/./def", "/abc/def"),
            ("/./abc/def", "/abc/def"),
            ("/abc/.", "/abc"),
            // Remove .. elements
            ("..", "/"),
            ("../", "/"),
            ("../../", "/"),
            ("../../abc", "/abc"),
            ("/abc/def/ghi/../jkl", "/abc/def/jkl"),
            ("/abc/def/../ghi/../jkl", "/abc/jkl"),
            ("/abc/def/..", "/abc"),
            ("/abc/def/../..", "/"),
            ("/abc/def/../../..", "/"),
            ("/abc/def/../../../ghi/jkl/../../../mno", "/mno"),
            // Combinations
            ("abc/./../def", "/def"),
            ("abc//./../def", "/def"),
            ("abc/../../././../def", "/def"),
        ]
    }

    #[test]
    fn test_clean() {
        for (path, expected) in clean_tests() {
            assert_eq!(clean(path), expected, "clean({:?})", path);

            // cleaning is idempotent
            assert_eq!(clean(expected), expected, "clean({:?})", expected);
        }
    }
}
