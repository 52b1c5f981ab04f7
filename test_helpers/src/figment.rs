//! Shared helpers for working with `figment::Jail` in tests.
//!
//! Runs a closure inside a jail and hands its output back as an
//! `anyhow::Result`, so settings tests can use `?` without threading an
//! `Option` through the jail by hand.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail restores the environment and working directory once the closure
/// completes, even when it returns an error.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any displayable error into a [`figment::Error`].
///
/// Bridges `anyhow`-style failures into jail closures.
pub fn figment_error<E: std::fmt::Display>(err: &E) -> figment::Error {
    figment::Error::from(err.to_string())
}
