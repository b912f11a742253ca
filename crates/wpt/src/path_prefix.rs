//! Path-prefix bookkeeping for test paths.
//!
//! Test paths are slash-separated and never start with a slash. A normalized
//! prefix has no leading slash and exactly one trailing slash.

/// Normalizes a prefix: no leading slash, one trailing slash.
pub fn normalize(prefix: Option<&str>) -> Option<String> {
    let prefix = prefix?;
    let mut out = prefix.trim_start_matches('/').to_string();
    if !out.ends_with('/') {
        out.push('/');
    }
    Some(out)
}

/// Joins a test name onto a prefix. A leading slash on `path` escapes the
/// prefix and makes the name absolute.
pub fn join(prefix: Option<&str>, path: &str) -> String {
    if let Some(absolute) = path.strip_prefix('/') {
        return absolute.to_string();
    }
    match normalize(prefix) {
        Some(prefix) => prefix + path,
        None => path.to_string(),
    }
}

pub fn is_under_prefix(prefix: Option<&str>, path: &str) -> bool {
    normalize(prefix).is_some_and(|prefix| path.starts_with(&prefix))
}

/// Longest common directory prefix of `paths`, as `/seg/seg/`.
///
/// The last segment of every path is treated as a file name and ignored.
/// Returns `None` when the paths share no directory.
pub fn longest_common_prefix<'a, I>(paths: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut common: Option<Vec<&str>> = None;
    for path in paths {
        let mut dirs: Vec<&str> = path.split('/').collect();
        dirs.pop();
        common = Some(match common {
            None => dirs,
            Some(mut prev) => {
                let shared = prev
                    .iter()
                    .zip(&dirs)
                    .take_while(|(a, b)| a == b)
                    .count();
                prev.truncate(shared);
                prev
            }
        });
    }
    let common = common?;
    if common.is_empty() {
        return None;
    }
    Some(format!("/{}/", common.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_trailing_and_strips_leading_slash() {
        assert_eq!(normalize(Some("/css/grid")).as_deref(), Some("css/grid/"));
        assert_eq!(normalize(Some("css/grid/")).as_deref(), Some("css/grid/"));
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn normalize_is_idempotent() {
        for p in ["", "/", "//", "a", "/a", "a/", "/a/b/", "//a//"] {
            let once = normalize(Some(p));
            assert_eq!(normalize(once.as_deref()), once, "input {p:?}");
        }
    }

    #[test]
    fn join_absolute_path_escapes_prefix() {
        assert_eq!(join(Some("css/"), "/dom/abs.html"), "dom/abs.html");
        assert_eq!(join(None, "/dom/abs.html"), "dom/abs.html");
    }

    #[test]
    fn join_relative_path() {
        assert_eq!(join(None, "rel/path.html"), "rel/path.html");
        assert_eq!(join(Some("/css/grid"), "a.html"), "css/grid/a.html");
        assert_eq!(join(Some("css/grid/"), "sub/a.html"), "css/grid/sub/a.html");
    }

    #[test]
    fn is_under_prefix_requires_a_prefix() {
        assert!(!is_under_prefix(None, "css/a.html"));
        assert!(is_under_prefix(Some("/css"), "css/a.html"));
        assert!(!is_under_prefix(Some("css"), "cssom/a.html"));
    }

    #[test]
    fn longest_common_prefix_of_siblings() {
        assert_eq!(
            longest_common_prefix(["a/b/c", "a/b/d"]).as_deref(),
            Some("/a/b/")
        );
        assert_eq!(longest_common_prefix(["a/b", "c/d"]), None);
        assert_eq!(longest_common_prefix(["a/b/x/1", "a/b/2"]).as_deref(), Some("/a/b/"));
        assert_eq!(longest_common_prefix(["top.html"]), None);
        assert_eq!(longest_common_prefix(std::iter::empty()), None);
    }

    #[test]
    fn longest_common_prefix_is_order_independent() {
        let paths = ["css/grid/a/1.html", "css/grid/2.html", "css/grid/a/b/3.html"];
        let forward = longest_common_prefix(paths);
        let backward = longest_common_prefix(paths.iter().rev().copied());
        assert_eq!(forward.as_deref(), Some("/css/grid/"));
        assert_eq!(forward, backward);
    }
}
