//! Layered, reloadable message catalogues backed by properties files.
//!
//! Messages are organised into named *sources*. Each
//! [`ResourceMessageSource`] owns the `locale → code → text` maps built from
//! its properties resources, found through an injected
//! [`ResourceEnumerator`](resource::ResourceEnumerator). A
//! [`CompositeMessageSource`] queries several sources in priority order and
//! forwards [`ResourceChangeEvent`]s only to the sources that own the changed
//! resources.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use message_source::resource::MemoryEnumerator;
//! use message_source::settings::MessageSourceSettings;
//! use message_source::{MessageContext, MessageSource, langid};
//!
//! let resources = MemoryEnumerator::new()
//!     .with("i18n/user/i18n_messages_en.properties", "user.not-found=No user {}")
//!     .with("i18n/user/i18n_messages_zh_CN.properties", "user.not-found=没有用户 {}");
//! let settings = MessageSourceSettings {
//!     sources: vec![String::from("user")],
//!     ..MessageSourceSettings::default()
//! };
//! let composite = settings.build(Arc::new(resources)).expect("settings should build");
//! let messages = MessageContext::new(Arc::new(composite));
//!
//! assert_eq!(messages.localize("{user.not-found}", &[&42]), "No user 42");
//! assert_eq!(
//!     messages.lookup("user.not-found", &langid!("zh-CN"), &[&42]).as_deref(),
//!     Some("没有用户 42")
//! );
//! ```

pub mod composite;
mod context;
pub mod error;
mod event;
pub mod locale;
pub mod pattern;
pub mod properties;
pub mod resource;
pub mod settings;
mod source;
mod store;

pub use composite::{CompositeMessageSource, CompositeMessageSourceBuilder, code_candidates};
pub use context::MessageContext;
pub use error::{AggregatedErrors, MessageResult, MessageSourceError};
pub use event::{MessagesReloaded, ReloadListener, ReloadOutcome, ResourceChangeEvent};
pub use locale::{FixedLocale, Locale, LocaleContext, LocaleResolver, parse_locale};
pub use pattern::MessageArg;
pub use source::{MessageSource, NoOpMessageSource};
pub use store::ResourceMessageSource;
pub use unic_langid::langid;
