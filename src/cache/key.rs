use std::fmt;

/// Identity of a cached resource: the GET url, or a tuple for requests
/// whose identity lives in the body (`["projects-by-type", "film", "2"]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Url(String),
    Tuple(Vec<String>),
}

impl ResourceKey {
    pub fn url(url: impl Into<String>) -> Self {
        ResourceKey::Url(url.into())
    }

    pub fn tuple<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ResourceKey::Tuple(parts.into_iter().map(Into::into).collect())
    }

    /// First tuple element, e.g. `projects-by-type`. `None` for urls.
    pub fn kind(&self) -> Option<&str> {
        match self {
            ResourceKey::Url(_) => None,
            ResourceKey::Tuple(parts) => parts.first().map(String::as_str),
        }
    }

    pub fn url_starts_with(&self, prefix: &str) -> bool {
        matches!(self, ResourceKey::Url(url) if url.starts_with(prefix))
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKey::Url(url) => f.write_str(url),
            ResourceKey::Tuple(parts) => write!(f, "[{}]", parts.join(", ")),
        }
    }
}

impl From<&str> for ResourceKey {
    fn from(url: &str) -> Self {
        ResourceKey::url(url)
    }
}

impl From<String> for ResourceKey {
    fn from(url: String) -> Self {
        ResourceKey::Url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_keys_expose_their_kind() {
        let key = ResourceKey::tuple(["projects-by-type", "film", "1"]);
        assert_eq!(key.kind(), Some("projects-by-type"));
        assert_eq!(key.to_string(), "[projects-by-type, film, 1]");
        assert_eq!(ResourceKey::url("http://x/users").kind(), None);
    }

    #[test]
    fn url_prefix_matching_ignores_tuples() {
        let url = ResourceKey::url("http://tasks/tasks/project/p1");
        assert!(url.url_starts_with("http://tasks/tasks/"));
        assert!(!ResourceKey::tuple(["http://tasks/tasks/"]).url_starts_with("http://tasks/"));
    }
}
