//! Command execution for `msgctl`.

use std::fmt;
use std::sync::Arc;

use message_source::settings::MessageSourceSettings;
use message_source::{
    CompositeMessageSource, Locale, MessageArg, MessageSource, MessageSourceError, parse_locale,
};

use crate::cli::{Args, Command, GlobalArgs, LocalizeArgs, LookupArgs};
use crate::error::MsgctlError;

/// Lines to print and whether the command succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Output lines, without trailing newlines.
    pub lines: Vec<String>,
    /// `false` when the command should exit with a failure status.
    pub success: bool,
}

impl Report {
    fn success(lines: Vec<String>) -> Self {
        Self {
            lines,
            success: true,
        }
    }
}

/// Runs the parsed command.
///
/// # Errors
///
/// Returns [`MsgctlError::Messages`] when the settings are invalid or the
/// sources fail to load.
pub fn run(args: &Args) -> Result<Report, MsgctlError> {
    let settings = load_settings(&args.global)?;
    match &args.command {
        Command::Lookup(lookup) => run_lookup(&settings, lookup),
        Command::Localize(localize) => run_localize(&settings, localize),
        Command::Locales => run_locales(&settings),
        Command::Check => Ok(run_check(&settings)),
    }
}

/// Loads settings and applies command-line overrides.
///
/// # Errors
///
/// Returns [`MsgctlError::Messages`] when the settings cannot be extracted.
pub fn load_settings(global: &GlobalArgs) -> Result<MessageSourceSettings, MsgctlError> {
    let mut settings = MessageSourceSettings::load(global.config.as_deref())?;
    if !global.roots.is_empty() {
        settings.resource_roots.clone_from(&global.roots);
    }
    if !global.sources.is_empty() {
        settings.sources.clone_from(&global.sources);
    }
    tracing::debug!(
        sources = ?settings.sources,
        roots = ?settings.resource_roots,
        "resolved settings"
    );
    Ok(settings)
}

fn requested_locale(
    composite: &CompositeMessageSource,
    requested: Option<&str>,
) -> Result<Locale, MessageSourceError> {
    requested.map_or_else(|| Ok(composite.locale()), parse_locale)
}

fn as_args(values: &[String]) -> Vec<MessageArg<'_>> {
    values.iter().map(|value| value as &dyn fmt::Display).collect()
}

fn run_lookup(settings: &MessageSourceSettings, lookup: &LookupArgs) -> Result<Report, MsgctlError> {
    let composite = settings.build_from_roots()?;
    let locale = requested_locale(&composite, lookup.locale.as_deref())?;
    Ok(composite
        .lookup(&lookup.code, &locale, &as_args(&lookup.args))
        .map_or_else(
            || {
                tracing::warn!(code = %lookup.code, locale = %locale, "message not found");
                Report {
                    lines: Vec::new(),
                    success: false,
                }
            },
            |message| Report::success(vec![message]),
        ))
}

fn run_localize(
    settings: &MessageSourceSettings,
    localize: &LocalizeArgs,
) -> Result<Report, MsgctlError> {
    let composite = settings.build_from_roots()?;
    let locale = requested_locale(&composite, localize.locale.as_deref())?;
    let text = composite.localize(&localize.text, Some(&locale), &as_args(&localize.args));
    Ok(Report::success(vec![text]))
}

fn run_locales(settings: &MessageSourceSettings) -> Result<Report, MsgctlError> {
    let composite = settings.build_from_roots()?;
    let supported: Vec<String> = composite
        .supported_locales()
        .iter()
        .map(ToString::to_string)
        .collect();
    Ok(Report::success(vec![
        format!("default: {}", composite.default_locale()),
        format!("supported: {}", supported.join(", ")),
    ]))
}

/// Initializes each source independently so one broken source does not hide
/// the state of the others.
fn run_check(settings: &MessageSourceSettings) -> Report {
    let stores = match settings.stores(Arc::new(settings.enumerator())) {
        Ok(stores) => stores,
        Err(err) => {
            return Report {
                lines: vec![format!("error: {err}")],
                success: false,
            };
        }
    };
    let mut report = Report::success(Vec::with_capacity(stores.len()));
    for store in stores {
        match store.init() {
            Ok(()) => {
                let counts: Vec<String> = store
                    .message_counts()
                    .into_iter()
                    .map(|(locale, count)| format!("{locale}={count}"))
                    .collect();
                report
                    .lines
                    .push(format!("{}: ok ({})", store.source(), counts.join(", ")));
            }
            Err(err) => {
                report.success = false;
                report.lines.push(format!("{}: error: {err}", store.source()));
            }
        }
    }
    report
}
