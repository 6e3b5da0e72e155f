//! Behavioural tests for assembling target configurations from shell
//! arguments through the public API.

use camino::Utf8PathBuf;
use rstest::rstest;
use ublksh::tokenize::ARG_DELIMITER;
use ublksh::{
    CacheConfig, ParseError, Raid1Config, Raid4Config, Raid10Config, Raid40Config,
    TargetConfiguration, TargetKind, TargetVariant, build_target_create, tokenize,
};

fn build(line: &str) -> Result<TargetConfiguration, ParseError> {
    build_target_create(&tokenize(line, ARG_DELIMITER))
}

fn paths(items: &[&str]) -> Vec<Utf8PathBuf> {
    items.iter().map(Utf8PathBuf::from).collect()
}

#[test]
fn raid10_legs_keep_their_order() {
    let config = build(
        "name=r10 capacity_sectors=2048 type=raid10 strip_len_sectors=16 \
         raid1s=\"paths=/a,/b;read_len_sectors_per_path=8\":\"paths=/c,/d\"",
    )
    .unwrap_or_else(|err| panic!("raid10 should build: {err}"));

    assert_eq!(config.name, "r10");
    assert_eq!(config.capacity_sectors, 2048);
    assert_eq!(config.cache, None);
    assert_eq!(
        config.target,
        TargetVariant::Raid10(Raid10Config {
            strip_len_sectors: 16,
            raid1s: vec![
                Raid1Config {
                    read_len_sectors_per_path: 8,
                    paths: paths(&["/a", "/b"]),
                },
                Raid1Config {
                    read_len_sectors_per_path: 0,
                    paths: paths(&["/c", "/d"]),
                },
            ],
        })
    );
}

#[test]
fn raid40_legs_carry_parity() {
    let config = build(
        "name=r40 capacity_sectors=64 type=raid40 strip_len_sectors=4 \
         raid4s='strip_len_sectors=4;data_paths=/a,/b;parity_path=/p'",
    )
    .unwrap_or_else(|err| panic!("raid40 should build: {err}"));

    assert_eq!(
        config.target,
        TargetVariant::Raid40(Raid40Config {
            strip_len_sectors: 4,
            raid4s: vec![Raid4Config {
                strip_len_sectors: 4,
                data_paths: paths(&["/a", "/b"]),
                parity_path: Utf8PathBuf::from("/p"),
            }],
        })
    );
}

#[test]
fn cache_is_attached_only_when_sized() {
    let cached = build("name=t capacity_sectors=8 type=null cache_len_sectors=4")
        .unwrap_or_else(|err| panic!("cached target should build: {err}"));
    assert_eq!(
        cached.cache,
        Some(CacheConfig {
            len_sectors: 4,
            write_through_enable: true,
        })
    );

    let uncached = build("name=t capacity_sectors=8 type=null cache_write_through_enable=0")
        .unwrap_or_else(|err| panic!("uncached target should build: {err}"));
    assert_eq!(uncached.cache, None);
}

#[rstest]
#[case::no_name("capacity_sectors=8 type=null", ParseError::MissingArgument(String::from("name")))]
#[case::no_type("name=t capacity_sectors=8", ParseError::MissingArgument(String::from("type")))]
#[case::upper_case_type(
    "name=t capacity_sectors=8 type=RAID0",
    ParseError::UnknownTargetType(String::from("RAID0"))
)]
#[case::name_checked_first(
    "capacity_sectors=x type=bogus",
    ParseError::MissingArgument(String::from("name"))
)]
#[case::empty_path_item(
    "name=t capacity_sectors=8 type=raid1 paths=/a,,/b",
    ParseError::MissingArgument(String::from("paths"))
)]
fn invalid_arguments_are_rejected(#[case] line: &str, #[case] expected: ParseError) {
    assert_eq!(build(line), Err(expected));
}

#[test]
fn nested_failure_reports_leg_and_root_cause() {
    let err = build(
        "name=r50 capacity_sectors=8 type=raid50 strip_len_sectors=4 \
         raid5s=\"strip_len_sectors=4;paths=/a,/b,/c\":\"strip_len_sectors=x;paths=/d\"",
    )
    .expect_err("second leg is invalid");

    let ParseError::NestedParseFailure {
        ref field,
        position,
        ..
    } = err
    else {
        panic!("expected a nested failure, got {err:?}");
    };
    assert_eq!((field.as_str(), position), ("raid5s", 1));
    assert_eq!(
        err.root_cause(),
        &ParseError::InvalidNumericValue {
            field: String::from("strip_len_sectors"),
            value: String::from("x"),
        }
    );
}

#[test]
fn every_kind_name_is_accepted() {
    for kind in TargetKind::ALL {
        assert_eq!(kind.as_str().parse::<TargetKind>(), Ok(kind));
    }
}
