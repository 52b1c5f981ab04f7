//! Environment provider that reads selected keys as comma-separated lists.
//!
//! Wraps `figment::providers::Env`. Values of registered list keys are always
//! split on commas, so `MESSAGES_SOURCES=user` and `MESSAGES_SOURCES=user,order`
//! both deserialize as `Vec<String>`. Other values pass through unchanged.

use figment::providers::Env;
use figment::{
    Metadata, Profile, Provider,
    error::Error,
    util::nest,
    value::{Dict, Map, Value},
};
use uncased::UncasedStr;

/// Environment provider with list support for named keys.
#[derive(Clone)]
pub struct ListEnv {
    inner: Env,
    list_keys: Vec<String>,
}

impl ListEnv {
    /// Creates a provider reading variables that start with `prefix`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use message_source::settings::ListEnv;
    ///
    /// let env = ListEnv::prefixed("MESSAGES_").list_key("sources");
    /// let _ = env;
    /// ```
    #[must_use]
    pub fn prefixed(prefix: &str) -> Self {
        Self {
            inner: Env::prefixed(prefix),
            list_keys: Vec::new(),
        }
    }

    /// Registers `key` (without the prefix) as a list key.
    #[must_use]
    pub fn list_key(mut self, key: impl Into<String>) -> Self {
        self.list_keys.push(key.into());
        self
    }

    fn is_list_key(&self, key: &UncasedStr) -> bool {
        self.list_keys
            .iter()
            .any(|candidate| UncasedStr::new(candidate) == key)
    }

    fn parse_value(&self, key: &UncasedStr, raw: &str) -> Value {
        let trimmed = raw.trim();
        if self.is_list_key(key) {
            return trimmed
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::from(item.to_owned()))
                .collect::<Vec<_>>()
                .into();
        }
        Value::from(trimmed.to_owned())
    }
}

impl Provider for ListEnv {
    fn metadata(&self) -> Metadata {
        self.inner.metadata()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.inner.profile.clone())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        for (key, raw) in self.inner.iter() {
            let value = self.parse_value(&key, &raw);
            let Some(nested) = nest(key.as_str(), value).into_dict() else {
                return Err(Error::from(format!(
                    "environment key `{key}` produced a non-object value"
                )));
            };
            dict.extend(nested);
        }
        Ok(self.inner.profile.collect(dict))
    }
}

impl std::fmt::Debug for ListEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListEnv")
            .field("list_keys", &self.list_keys)
            .finish_non_exhaustive()
    }
}
