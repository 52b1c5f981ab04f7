//! End-to-end behaviour of the `msgctl` commands.

use std::process::Command as Process;

use anyhow::{Result, ensure};
use clap::Parser;
use msgctl::cli::Args;
use msgctl::commands::{self, Report};
use rstest::{fixture, rstest};
use test_helpers::figment::figment_error;
use test_helpers::{ResourceTree, with_jail};

#[fixture]
fn tree() -> ResourceTree {
    let tree = ResourceTree::new().expect("create resource tree");
    tree.write(
        "i18n/user/i18n_messages_en.properties",
        "greeting=Hello, {}\ncommon.missing=Missing {}",
    )
    .expect("write en");
    tree.write("i18n/user/i18n_messages_fr.properties", "greeting=Bonjour, {}")
        .expect("write fr");
    tree.write(
        "i18n/order/i18n_messages_en.properties",
        "order.created=Order {} created",
    )
    .expect("write order");
    tree
}

fn run(tree: &ResourceTree, argv: &[&str]) -> Result<Report> {
    let root = tree.root().to_string();
    let mut full = vec![
        "msgctl", "--root", root.as_str(), "--source", "user", "--source", "order",
    ];
    full.extend_from_slice(argv);
    let args = Args::try_parse_from(full)?;
    with_jail(|_| commands::run(&args).map_err(|err| figment_error(&err)))
}

#[rstest]
#[case(&["lookup", "greeting", "Ada"], "Hello, Ada")]
#[case(&["lookup", "greeting", "Ada", "--locale", "fr"], "Bonjour, Ada")]
#[case(&["lookup", "order.created", "42"], "Order 42 created")]
#[case(&["localize", "{greeting}", "Ada"], "Hello, Ada")]
#[case(&["localize", "{nope}"], "{nope}")]
#[case(&["localize", "plain text"], "plain text")]
fn prints_resolved_messages(
    tree: ResourceTree,
    #[case] argv: &[&str],
    #[case] expected: &str,
) -> Result<()> {
    let report = run(&tree, argv)?;
    ensure!(report.success);
    ensure!(report.lines == [expected], "unexpected output {:?}", report.lines);
    Ok(())
}

#[rstest]
#[case(&["lookup", "nope"])]
#[case(&["lookup", "order.created", "42", "--locale", "fr"])]
fn missing_lookup_reports_failure(tree: ResourceTree, #[case] argv: &[&str]) -> Result<()> {
    let report = run(&tree, argv)?;
    ensure!(!report.success);
    ensure!(report.lines.is_empty());
    Ok(())
}

#[rstest]
fn lists_locales_of_first_source(tree: ResourceTree) -> Result<()> {
    let report = run(&tree, &["locales"])?;
    ensure!(report.lines == ["default: en", "supported: en, fr"]);
    Ok(())
}

#[rstest]
fn check_reports_each_source(tree: ResourceTree) -> Result<()> {
    tree.write("i18n/broken/i18n_messages_en.properties", "bad=\\uZZZZ")?;
    let root = tree.root().to_string();
    let args = Args::try_parse_from([
        "msgctl", "check", "--root", root.as_str(), "--source", "user", "--source", "broken",
    ])?;
    let report = with_jail(|_| commands::run(&args).map_err(|err| figment_error(&err)))?;
    ensure!(!report.success);
    let first = report.lines.first().map(String::as_str);
    ensure!(first == Some("user: ok (en=2, fr=2)"), "unexpected line {first:?}");
    ensure!(
        report
            .lines
            .get(1)
            .is_some_and(|line| line.starts_with("broken: error: failed to parse")),
        "unexpected output {:?}",
        report.lines
    );
    Ok(())
}

fn msgctl(tree: &ResourceTree, argv: &[&str]) -> Process {
    let mut process = Process::new(env!("CARGO_BIN_EXE_msgctl"));
    process
        .args(argv)
        .args(["--root", tree.root().as_str(), "--source", "user"])
        .env_remove("MESSAGES_DEFAULT_LOCALE")
        .env_remove("MESSAGES_SUPPORTED_LOCALES");
    process
}

#[rstest]
fn binary_exit_status_follows_lookup(tree: ResourceTree) -> Result<()> {
    let status = msgctl(&tree, &["lookup", "nope"]).status()?;
    ensure!(!status.success());

    let output = msgctl(&tree, &["lookup", "greeting", "Ada"]).output()?;
    ensure!(output.status.success());
    ensure!(String::from_utf8(output.stdout)? == "Hello, Ada\n");
    Ok(())
}
