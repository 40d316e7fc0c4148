use std::collections::BTreeMap;
use std::fmt;

/// Cache lookup key: endpoint path plus normalized query parameters.
///
/// Parameters are held in an ordered map with empty values dropped, so two
/// requests that differ only in parameter order, or in present-but-empty
/// parameters, resolve to the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    path: String,
    params: BTreeMap<String, String>,
}

impl CacheKey {
    pub fn new<I>(path: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let params = params.into_iter().filter(|(_, v)| !v.is_empty()).collect();
        Self {
            path: path.into(),
            params,
        }
    }

    /// Key for a parameterless endpoint, e.g. a detail view.
    pub fn detail(path: impl Into<String>) -> Self {
        Self::new(path, std::iter::empty())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Request URI for this key, query string included.
    pub fn uri(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_are_omitted() {
        let a = CacheKey::new(
            "/api/jobs",
            vec![
                ("search".to_string(), String::new()),
                ("page".to_string(), "1".to_string()),
            ],
        );
        let b = CacheKey::new("/api/jobs", vec![("page".to_string(), "1".to_string())]);
        assert_eq!(a, b);
    }

    #[test]
    fn param_order_is_canonical() {
        let a = CacheKey::new(
            "/api/jobs",
            vec![
                ("pageSize".to_string(), "10".to_string()),
                ("page".to_string(), "2".to_string()),
            ],
        );
        let b = CacheKey::new(
            "/api/jobs",
            vec![
                ("page".to_string(), "2".to_string()),
                ("pageSize".to_string(), "10".to_string()),
            ],
        );
        assert_eq!(a, b);
        assert_eq!(a.uri(), "/api/jobs?page=2&pageSize=10");
    }

    #[test]
    fn different_values_are_different_keys() {
        let a = CacheKey::new("/api/jobs", vec![("page".to_string(), "1".to_string())]);
        let b = CacheKey::new("/api/jobs", vec![("page".to_string(), "2".to_string())]);
        assert_ne!(a, b);
    }

    #[test]
    fn detail_key_has_no_query() {
        let key = CacheKey::detail("/api/jobs/123");
        assert_eq!(key.uri(), "/api/jobs/123");
    }
}
