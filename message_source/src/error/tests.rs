//! Tests for error aggregation and display.

use super::*;
use rstest::rstest;
use unic_langid::langid;

#[rstest]
fn try_aggregate_returns_none_for_empty_input() {
    assert!(MessageSourceError::try_aggregate(Vec::new()).is_none());
}

#[rstest]
fn try_aggregate_unwraps_single_error() {
    let err = MessageSourceError::try_aggregate(vec![MessageSourceError::NoSources])
        .expect("one error should be returned");
    assert!(matches!(err, MessageSourceError::NoSources));
}

#[rstest]
fn try_aggregate_numbers_each_error() {
    let err = MessageSourceError::try_aggregate(vec![
        MessageSourceError::NoSources,
        MessageSourceError::Destroyed {
            source_name: String::from("user"),
        },
    ])
    .expect("aggregate should be produced");
    let MessageSourceError::Aggregate(all) = &err else {
        panic!("expected aggregate, got {err:?}");
    };
    assert_eq!(all.len(), 2);
    let rendered = err.to_string();
    assert!(rendered.contains("1: no message sources configured"));
    assert!(rendered.contains("2: message source 'user' has been destroyed"));
}

#[rstest]
fn load_error_exposes_io_source() {
    let err = MessageSourceError::Load {
        source_name: String::from("user"),
        locale: langid!("en"),
        resource: String::from("mem!/i18n/user/i18n_messages_en.properties"),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, "not UTF-8"),
    };
    let source = std::error::Error::source(&err).expect("I/O source should be exposed");
    assert_eq!(source.to_string(), "not UTF-8");
}
