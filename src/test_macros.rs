//! Declarative macros for command-line parsing and output tests.
//!
//! Each invocation expands to one `#[rstest]` function. Command-line macros take the
//! argument list that follows the binary name. The invoking module must import `Args`,
//! `clap::Parser` and `rstest::rstest`.

/// Parse a command line and compare fields of the resulting subcommand.
///
/// ```ignore
/// cli_parse_test! {
///     test_name: test_query_defaults,
///     args: ["query", "SELECT 1"],
///     variant: Query,
///     fields: { scalar: false },
/// }
/// ```
#[macro_export]
macro_rules! cli_parse_test {
    (
        test_name: $test_name:ident,
        args: [$($arg:literal),+ $(,)?],
        variant: $variant:ident,
        fields: { $($field:ident : $expected:expr),+ $(,)? } $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            let args = Args::try_parse_from(["rowbind", $($arg),+]).unwrap();
            match args.command {
                $crate::commands::Command::$variant(cmd) => {
                    $(
                        assert_eq!(cmd.$field, $expected, "field `{}`", stringify!($field));
                    )+
                }
                #[allow(unreachable_patterns)]
                other => panic!("parsed into a different subcommand: {:?}", other),
            }
        }
    };
}

/// Check that a command line is rejected, optionally naming what the error must mention.
///
/// ```ignore
/// cli_rejects_test! {
///     test_name: test_query_requires_sql,
///     args: ["query"],
///     mentions: "<SQL>",
/// }
/// ```
#[macro_export]
macro_rules! cli_rejects_test {
    (
        test_name: $test_name:ident,
        args: [$($arg:literal),+ $(,)?],
        mentions: $needle:literal $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            let message = Args::try_parse_from(["rowbind", $($arg),+]).unwrap_err().to_string();
            assert!(message.contains($needle), "{:?} not in {:?}", $needle, message);
        }
    };
    (
        test_name: $test_name:ident,
        args: [$($arg:literal),+ $(,)?] $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            assert!(Args::try_parse_from(["rowbind", $($arg),+]).is_err());
        }
    };
}

/// Render a fixture as a table and compare with the expected text.
#[macro_export]
macro_rules! output_table_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        expected: $expected:expr $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            assert_eq!($crate::output::Outputable::to_table(&$fixture), $expected);
        }
    };
}

/// Render a fixture as JSON and compare top-level fields.
///
/// ```ignore
/// output_json_test! {
///     test_name: test_format_json,
///     fixture: update_result,
///     fixture_type: UpdateResult,
///     assertions: { "affected": 2 },
/// }
/// ```
#[macro_export]
macro_rules! output_json_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        assertions: { $($key:literal : $expected:expr),* $(,)? } $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            let rendered =
                $crate::output::Outputable::format(&$fixture, $crate::output::OutputFormat::Json);
            let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
            $(
                assert_eq!(json[$key], $expected, "JSON key `{}`", $key);
            )*
        }
    };
}
