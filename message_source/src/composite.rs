//! Ordered chain of message sources queried as one.

use std::sync::Arc;

use crate::error::{MessageResult, MessageSourceError};
use crate::event::{ReloadOutcome, ResourceChangeEvent};
use crate::locale::{Locale, LocaleResolver};
use crate::pattern::MessageArg;
use crate::source::MessageSource;

/// Identifier reported by a composite unless renamed.
pub const COMPOSITE_SOURCE: &str = "composite";

/// Candidate codes tried, in order, when looking `code` up.
///
/// The exact code comes first. Namespace segments are then dropped from the
/// end one at a time while the leaf is kept (`a.b.c`, `a.c`, `c`). When
/// `common` is set, `<common>.<leaf>` is tried last. Duplicates are removed.
///
/// # Examples
///
/// ```rust
/// use message_source::composite::code_candidates;
///
/// assert_eq!(
///     code_candidates("user.profile.not-found", Some("common")),
///     ["user.profile.not-found", "user.not-found", "not-found", "common.not-found"]
/// );
/// assert_eq!(code_candidates("a", None), ["a"]);
/// ```
#[must_use]
pub fn code_candidates(code: &str, common: Option<&str>) -> Vec<String> {
    let (namespace, leaf) = code.rsplit_once('.').map_or((None, code), |(ns, leaf)| (Some(ns), leaf));
    let mut candidates = vec![code.to_owned()];
    if let Some(prefix) = namespace {
        let segments: Vec<&str> = prefix.split('.').collect();
        for kept in (0..segments.len()).rev() {
            let mut candidate: Vec<&str> = segments.iter().take(kept).copied().collect();
            candidate.push(leaf);
            push_unique(&mut candidates, candidate.join("."));
        }
    }
    if let Some(ns) = common.filter(|ns| !ns.is_empty()) {
        push_unique(&mut candidates, format!("{ns}.{leaf}"));
    }
    candidates
}

fn push_unique(candidates: &mut Vec<String>, candidate: String) {
    if !candidates.contains(&candidate) {
        candidates.push(candidate);
    }
}

/// Queries member sources in priority order.
///
/// The first member is authoritative for [`default_locale`] and
/// [`supported_locales`]; the locale used when a lookup names none comes
/// from the configured [`LocaleResolver`].
///
/// [`default_locale`]: MessageSource::default_locale
/// [`supported_locales`]: MessageSource::supported_locales
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use message_source::resource::{MemoryEnumerator, ResourceLoader};
/// use message_source::{CompositeMessageSource, MessageSource, ResourceMessageSource, langid};
///
/// let resources = Arc::new(
///     MemoryEnumerator::new()
///         .with("i18n/a/i18n_messages_en.properties", "a=test-a")
///         .with("i18n/b/i18n_messages_en.properties", "b=test-b"),
/// );
/// let member = |name: &str| {
///     let store = ResourceMessageSource::new(name, ResourceLoader::new(resources.clone()), langid!("en"));
///     store.init().expect("member should load");
///     Arc::new(store) as Arc<dyn MessageSource>
/// };
/// let composite = CompositeMessageSource::builder()
///     .member(member("a"))
///     .member(member("b"))
///     .build()
///     .expect("members configured");
/// assert_eq!(composite.message("a", &[]).as_deref(), Some("test-a"));
/// assert_eq!(composite.message("b", &[]).as_deref(), Some("test-b"));
/// ```
#[derive(Debug, Clone)]
pub struct CompositeMessageSource {
    name: String,
    primary: Arc<dyn MessageSource>,
    members: Vec<Arc<dyn MessageSource>>,
    resolver: Option<Arc<dyn LocaleResolver>>,
    common_namespace: Option<String>,
}

/// Builder for [`CompositeMessageSource`].
#[derive(Debug, Default)]
pub struct CompositeMessageSourceBuilder {
    name: Option<String>,
    members: Vec<Arc<dyn MessageSource>>,
    resolver: Option<Arc<dyn LocaleResolver>>,
    common_namespace: Option<String>,
}

impl CompositeMessageSourceBuilder {
    /// Appends `member` with lower priority than those already added.
    #[must_use]
    pub fn member(mut self, member: Arc<dyn MessageSource>) -> Self {
        self.members.push(member);
        self
    }

    /// Appends several members in priority order.
    #[must_use]
    pub fn members(mut self, members: impl IntoIterator<Item = Arc<dyn MessageSource>>) -> Self {
        self.members.extend(members);
        self
    }

    /// Sets the resolver consulted when a lookup names no locale.
    ///
    /// Without one, the first member's default locale is used.
    #[must_use]
    pub fn resolver(mut self, resolver: Arc<dyn LocaleResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Sets the namespace tried last for every code.
    #[must_use]
    pub fn common_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.common_namespace = Some(namespace.into());
        self
    }

    /// Renames the composite.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds the composite.
    ///
    /// # Errors
    ///
    /// Returns [`MessageSourceError::NoSources`] when no member was added.
    pub fn build(self) -> MessageResult<CompositeMessageSource> {
        let Some(primary) = self.members.first().map(Arc::clone) else {
            return Err(MessageSourceError::NoSources);
        };
        Ok(CompositeMessageSource {
            name: self.name.unwrap_or_else(|| COMPOSITE_SOURCE.to_owned()),
            primary,
            members: self.members,
            resolver: self.resolver,
            common_namespace: self.common_namespace.filter(|ns| !ns.is_empty()),
        })
    }
}

impl CompositeMessageSource {
    /// Starts building a composite.
    #[must_use]
    pub fn builder() -> CompositeMessageSourceBuilder {
        CompositeMessageSourceBuilder::default()
    }

    /// Members in priority order.
    #[must_use]
    pub fn members(&self) -> &[Arc<dyn MessageSource>] {
        &self.members
    }

    /// Namespace tried last for every code, if any.
    #[must_use]
    pub fn common_namespace(&self) -> Option<&str> {
        self.common_namespace.as_deref()
    }

    /// Forwards `event` to every member owning one of its resources.
    ///
    /// Members owning none of the changed identifiers are not touched. Every
    /// owning member is offered the event even when an earlier one fails.
    ///
    /// # Errors
    ///
    /// Returns the failing member's error, or
    /// [`MessageSourceError::Aggregate`] when several members failed.
    pub fn on_change(&self, event: &ResourceChangeEvent) -> MessageResult<ReloadOutcome> {
        let mut outcome = ReloadOutcome::unaffected();
        let mut errors = Vec::new();
        for member in self.owners(event) {
            match member.reload(event) {
                Ok(reloaded) => outcome.merge(reloaded),
                Err(err) => errors.push(err),
            }
        }
        MessageSourceError::try_aggregate(errors).map_or(Ok(outcome), Err)
    }

    fn owners<'a>(
        &'a self,
        event: &'a ResourceChangeEvent,
    ) -> impl Iterator<Item = &'a Arc<dyn MessageSource>> + 'a {
        self.members
            .iter()
            .filter(move |member| event.changed().any(|id| member.owns_resource(id)))
    }
}

impl MessageSource for CompositeMessageSource {
    fn lookup(&self, code: &str, locale: &Locale, args: &[MessageArg<'_>]) -> Option<String> {
        let candidates = code_candidates(code, self.common_namespace.as_deref());
        candidates.iter().find_map(|candidate| {
            let found = self
                .members
                .iter()
                .find_map(|member| member.lookup(candidate, locale, args))?;
            if candidate != code {
                tracing::debug!(code, candidate = %candidate, "resolved through namespace fallback");
            }
            Some(found)
        })
    }

    fn default_locale(&self) -> Locale {
        self.primary.default_locale()
    }

    fn supported_locales(&self) -> Vec<Locale> {
        self.primary.supported_locales()
    }

    fn source(&self) -> &str {
        &self.name
    }

    fn locale(&self) -> Locale {
        self.resolver
            .as_ref()
            .map_or_else(|| self.default_locale(), |resolver| resolver.locale())
    }

    /// Initializes every member, collecting their failures.
    fn init(&self) -> MessageResult<()> {
        let errors: Vec<_> = self
            .members
            .iter()
            .filter_map(|member| member.init().err())
            .collect();
        MessageSourceError::try_aggregate(errors).map_or(Ok(()), Err)
    }

    fn destroy(&self) {
        for member in &self.members {
            member.destroy();
        }
    }

    fn reload(&self, event: &ResourceChangeEvent) -> MessageResult<ReloadOutcome> {
        self.on_change(event)
    }

    fn owns_resource(&self, identifier: &str) -> bool {
        self.members
            .iter()
            .any(|member| member.owns_resource(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocaleContext;
    use crate::source::NoOpMessageSource;
    use rstest::rstest;
    use std::collections::HashMap;
    use unic_langid::langid;

    #[derive(Debug)]
    struct Stub {
        name: &'static str,
        default: Locale,
        messages: HashMap<&'static str, &'static str>,
    }

    impl MessageSource for Stub {
        fn lookup(&self, code: &str, _locale: &Locale, args: &[MessageArg<'_>]) -> Option<String> {
            self.messages
                .get(code)
                .map(|text| crate::pattern::format(text, args))
        }

        fn default_locale(&self) -> Locale {
            self.default.clone()
        }

        fn supported_locales(&self) -> Vec<Locale> {
            vec![self.default.clone(), langid!("ja")]
        }

        fn source(&self) -> &str {
            self.name
        }
    }

    fn stub(name: &'static str, default: Locale, pairs: &[(&'static str, &'static str)]) -> Arc<dyn MessageSource> {
        Arc::new(Stub {
            name,
            default,
            messages: pairs.iter().copied().collect(),
        })
    }

    #[rstest]
    #[case("a.b.c", None, &["a.b.c", "a.c", "c"])]
    #[case("a.b", Some("common"), &["a.b", "b", "common.b"])]
    #[case("common.b", Some("common"), &["common.b", "b"])]
    #[case("leaf", Some("common"), &["leaf", "common.leaf"])]
    #[case("leaf", Some(""), &["leaf"])]
    fn builds_candidates(#[case] code: &str, #[case] common: Option<&str>, #[case] expected: &[&str]) {
        assert_eq!(code_candidates(code, common), expected);
    }

    #[rstest]
    fn first_member_wins() {
        let composite = CompositeMessageSource::builder()
            .member(stub("a", langid!("en"), &[("a", "test-a"), ("shared", "from-a")]))
            .member(stub("b", langid!("en"), &[("b", "test-b"), ("shared", "from-b")]))
            .build()
            .expect("members configured");
        assert_eq!(composite.message("a", &[]).as_deref(), Some("test-a"));
        assert_eq!(composite.message("b", &[]).as_deref(), Some("test-b"));
        assert_eq!(composite.message("shared", &[]).as_deref(), Some("from-a"));
        assert_eq!(composite.message("none", &[]), None);
    }

    #[rstest]
    fn exact_code_beats_namespace_fallback_in_earlier_member() {
        let composite = CompositeMessageSource::builder()
            .member(stub("a", langid!("en"), &[("not-found", "generic")]))
            .member(stub("b", langid!("en"), &[("user.not-found", "specific")]))
            .build()
            .expect("members configured");
        assert_eq!(
            composite.message("user.not-found", &[]).as_deref(),
            Some("specific")
        );
    }

    #[rstest]
    fn falls_back_to_common_namespace() {
        let composite = CompositeMessageSource::builder()
            .member(stub("a", langid!("en"), &[("common.code-not-found", "Unknown code {}")]))
            .common_namespace("common")
            .build()
            .expect("members configured");
        assert_eq!(
            composite.message("order.code-not-found", &[&42]).as_deref(),
            Some("Unknown code 42")
        );
        assert_eq!(
            composite.localize("{order.missing}", None, &[]),
            "{order.missing}"
        );
    }

    #[rstest]
    fn first_member_supplies_locales() {
        let composite = CompositeMessageSource::builder()
            .member(stub("a", langid!("zh-CN"), &[]))
            .member(stub("b", langid!("en"), &[]))
            .build()
            .expect("members configured");
        assert_eq!(composite.default_locale(), langid!("zh-CN"));
        assert_eq!(composite.supported_locales(), vec![langid!("zh-CN"), langid!("ja")]);
        assert_eq!(composite.locale(), langid!("zh-CN"));
    }

    #[rstest]
    fn resolver_supplies_lookup_locale() {
        let context = LocaleContext::new(langid!("en")).with_request_locale(langid!("fr"));
        let composite = CompositeMessageSource::builder()
            .member(Arc::new(NoOpMessageSource::default()))
            .resolver(Arc::new(context))
            .build()
            .expect("members configured");
        assert_eq!(composite.locale(), langid!("fr"));
        assert_eq!(composite.default_locale(), langid!("en"));
    }

    #[rstest]
    fn requires_members() {
        assert!(matches!(
            CompositeMessageSource::builder().build(),
            Err(MessageSourceError::NoSources)
        ));
    }
}
