//! Command-line interface definitions for `msgctl`.

use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser, Subcommand};

/// Parsed CLI arguments for `msgctl`.
#[derive(Debug, Parser)]
#[command(name = "msgctl")]
#[command(about = "Query and validate properties-backed message catalogues")]
#[command(version)]
pub struct Args {
    /// Options shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Options that select and override the message source settings.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct GlobalArgs {
    /// TOML settings file layered under `MESSAGES_*` environment variables.
    #[arg(long, value_name = "path", global = true)]
    pub config: Option<Utf8PathBuf>,
    /// Resource root directory (repeat for several; replaces configured roots).
    #[arg(long = "root", value_name = "dir", global = true)]
    pub roots: Vec<Utf8PathBuf>,
    /// Source name in priority order (repeat for several; replaces configured sources).
    #[arg(long = "source", value_name = "name", global = true)]
    pub sources: Vec<String>,
}

/// Commands understood by `msgctl`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the message for a code; exits with status 1 when it is missing.
    Lookup(LookupArgs),
    /// Resolve text that may be a `{code}` reference.
    Localize(LocalizeArgs),
    /// Print the default and supported locales.
    Locales,
    /// Load every source and report its locales and message counts.
    Check,
}

/// Arguments of `msgctl lookup`.
#[derive(Debug, ClapArgs)]
pub struct LookupArgs {
    /// Message code, for example `user.not-found`.
    pub code: String,
    /// Values substituted into `{}` placeholders, in order.
    pub args: Vec<String>,
    /// Locale to resolve in (defaults to the configured default locale).
    #[arg(long, value_name = "locale")]
    pub locale: Option<String>,
}

/// Arguments of `msgctl localize`.
#[derive(Debug, ClapArgs)]
pub struct LocalizeArgs {
    /// Literal text or a `{code}` reference.
    pub text: String,
    /// Values substituted into `{}` placeholders, in order.
    pub args: Vec<String>,
    /// Locale to resolve in (defaults to the configured default locale).
    #[arg(long, value_name = "locale")]
    pub locale: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_repeated_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "msgctl", "lookup", "greeting", "Ada", "--root", "a", "--root", "b", "--source",
            "user", "--locale", "fr",
        ])
        .expect("arguments should parse");
        assert_eq!(args.global.roots, vec![Utf8PathBuf::from("a"), Utf8PathBuf::from("b")]);
        assert_eq!(args.global.sources, vec![String::from("user")]);
        let Command::Lookup(lookup) = args.command else {
            panic!("expected lookup command");
        };
        assert_eq!(lookup.code, "greeting");
        assert_eq!(lookup.args, vec![String::from("Ada")]);
        assert_eq!(lookup.locale.as_deref(), Some("fr"));
    }

    #[rstest]
    fn requires_a_command() {
        assert!(Args::try_parse_from(["msgctl"]).is_err());
    }
}
