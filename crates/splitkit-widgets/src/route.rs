#![forbid(unsafe_code)]

//! Active-route resolution.
//!
//! The strip does not route; it only asks whether a tab's destination is the
//! active one. Hosts with their own router implement [`RouteMatcher`] or pass
//! a closure.

/// Decides whether a destination is the active route.
pub trait RouteMatcher {
    fn is_active(&self, destination: &str) -> bool;
}

impl<F> RouteMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn is_active(&self, destination: &str) -> bool {
        self(destination)
    }
}

/// Active when the current path equals the destination.
///
/// Trailing slashes are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactMatcher {
    current: String,
}

impl ExactMatcher {
    #[must_use]
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }
}

impl RouteMatcher for ExactMatcher {
    fn is_active(&self, destination: &str) -> bool {
        trim_path(&self.current) == trim_path(destination)
    }
}

/// Active when the destination is a whole-segment prefix of the current
/// path: `/runs` matches `/runs` and `/runs/42` but not `/runsheet`.
///
/// The root destination `/` matches only the root path, otherwise it would
/// be active everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    current: String,
}

impl PathPrefixMatcher {
    #[must_use]
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }

    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }
}

impl RouteMatcher for PathPrefixMatcher {
    fn is_active(&self, destination: &str) -> bool {
        let current = trim_path(&self.current);
        let destination = trim_path(destination);
        if destination.is_empty() {
            return current.is_empty();
        }
        match current.strip_prefix(destination) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Drop the query, fragment and trailing slashes. The root becomes "".
fn trim_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matches_whole_segments() {
        let matcher = PathPrefixMatcher::new("/runs/42/logs");
        assert!(matcher.is_active("/runs"));
        assert!(matcher.is_active("/runs/42"));
        assert!(matcher.is_active("/runs/42/logs/"));
        assert!(!matcher.is_active("/run"));
        assert!(!matcher.is_active("/runs/4"));
        assert!(!matcher.is_active("/settings"));
    }

    #[test]
    fn root_destination_matches_root_only() {
        assert!(PathPrefixMatcher::new("/").is_active("/"));
        assert!(PathPrefixMatcher::new("").is_active("/"));
        assert!(!PathPrefixMatcher::new("/runs").is_active("/"));
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        let matcher = PathPrefixMatcher::new("/runs/7?tab=logs#line-3");
        assert!(matcher.is_active("/runs"));
        assert!(ExactMatcher::new("/runs/7?tab=logs").is_active("/runs/7/"));
    }

    #[test]
    fn exact_rejects_descendants() {
        let matcher = ExactMatcher::new("/runs/42");
        assert!(matcher.is_active("/runs/42"));
        assert!(!matcher.is_active("/runs"));
    }

    #[test]
    fn closures_are_matchers() {
        let matcher = |destination: &str| destination == "/builds";
        assert!(matcher.is_active("/builds"));
        assert!(!matcher.is_active("/"));
    }
}
