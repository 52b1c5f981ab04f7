//! Settings layering through defaults, a TOML file and the environment.

use anyhow::{Result, ensure};
use camino::Utf8Path;
use message_source::resource::Encoding;
use message_source::settings::MessageSourceSettings;
use message_source::{MessageSource, langid};
use rstest::rstest;
use test_helpers::{ResourceTree, figment::figment_error, with_jail};

#[rstest]
fn defaults_apply_without_providers() -> Result<()> {
    let settings = with_jail(|_| {
        MessageSourceSettings::load(None).map_err(|err| figment_error(&err))
    })?;
    ensure!(settings == MessageSourceSettings::default());
    Ok(())
}

#[rstest]
fn file_values_are_overridden_by_environment() -> Result<()> {
    let settings = with_jail(|jail| {
        jail.create_file(
            "messages.toml",
            r#"
default_locale = "zh_CN"
sources = ["user"]
common_namespace = "common"
encoding = "iso-8859-1"
"#,
        )?;
        jail.set_env("MESSAGES_SOURCES", "order, user");
        jail.set_env("MESSAGES_SUPPORTED_LOCALES", "en");
        MessageSourceSettings::load(Some(Utf8Path::new("messages.toml")))
            .map_err(|err| figment_error(&err))
    })?;
    ensure!(settings.default_locale == "zh_CN");
    ensure!(settings.sources == ["order", "user"]);
    ensure!(settings.supported_locales == ["en"]);
    ensure!(settings.common_namespace.as_deref() == Some("common"));
    ensure!(settings.encoding == Encoding::Latin1);
    Ok(())
}

#[rstest]
fn invalid_values_surface_as_settings_errors() -> Result<()> {
    let outcome = with_jail(|jail| {
        jail.set_env("MESSAGES_ENCODING", "ebcdic");
        Ok(MessageSourceSettings::load(None))
    })?;
    ensure!(matches!(
        outcome,
        Err(message_source::MessageSourceError::Settings(_))
    ));
    Ok(())
}

#[rstest]
fn builds_from_configured_roots() -> Result<()> {
    let first = ResourceTree::new()?;
    let second = ResourceTree::new()?;
    first.write("i18n/user/i18n_messages_en.properties", "greeting=Hello\nfarewell=Bye")?;
    second.write("i18n/user/i18n_messages_en.properties", "greeting=Hi")?;
    let roots = format!("{},{}", first.root(), second.root());
    let composite = with_jail(|jail| {
        jail.set_env("MESSAGES_SOURCES", "user");
        jail.set_env("MESSAGES_RESOURCE_ROOTS", &roots);
        let settings = MessageSourceSettings::load(None).map_err(|err| figment_error(&err))?;
        settings.build_from_roots().map_err(|err| figment_error(&err))
    })?;
    ensure!(composite.message("greeting", &[]).as_deref() == Some("Hi"));
    ensure!(composite.message("farewell", &[]).as_deref() == Some("Bye"));
    ensure!(composite.default_locale() == langid!("en"));
    Ok(())
}
