use std::borrow::Cow;

use flagrack_derive::flag_error;

#[flag_error]
pub enum DemoError {
    #[error("Parse failure{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown name{}: {message}", format_context(.context))]
    UnknownName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse_bit(raw: &str) -> Result<u32, DemoError> {
    Ok(raw.parse::<u32>()?)
}

#[test]
fn flag_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/flag_error_pass.rs");
}

#[test]
fn source_conversion_picks_the_source_variant() {
    let err = parse_bit("not a number").unwrap_err();
    assert!(matches!(err, DemoError::Parse { context: None, .. }));
}

#[test]
fn context_lands_in_the_display_output() {
    let result: Result<(), DemoError> = Err(DemoError::UnknownName {
        message: Cow::Borrowed("'ghost' was never registered"),
        context: None,
    });
    let err = result.context("while probing").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown name (while probing): 'ghost' was never registered"
    );
}

#[test]
fn context_wraps_source_results() {
    let parsed = "x".parse::<u32>();
    let err = parsed.context("reading the mask").unwrap_err();
    assert!(matches!(err, DemoError::Parse { context: Some(_), .. }));
}

#[test]
fn internal_fallback_converts_plain_strings() {
    let err: DemoError = "wires crossed".into();
    assert_eq!(err.to_string(), "Internal error: wires crossed");
    assert!(matches!(err, DemoError::Internal { context: None, .. }));

    let err: DemoError = format!("{} wires crossed", 2).into();
    assert_eq!(err.to_string(), "Internal error: 2 wires crossed");
}
