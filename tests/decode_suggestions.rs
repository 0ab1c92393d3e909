//! Decode-path integration tests: unknown-field suggestions and the
//! decode-then-validate composition.

use jsonvet::{CheckGroup, Decoder, Error, Failures, JsonFields, Validate};
use pretty_assertions::assert_eq;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, JsonFields)]
#[serde(default)]
struct Grant {
    expires_in: i64,
    balance: i64,
    #[serde(skip)]
    #[allow(dead_code)]
    cached_total: i64,
}

impl Validate for Grant {
    fn validate(&self) -> Result<(), Failures> {
        let mut checks = CheckGroup::new();
        checks.field("expires_in").check(|| {
            if self.expires_in < 0 {
                return Err("should have a non-negative expiry");
            }
            Ok(())
        });
        checks.validate()
    }
}

#[test]
fn derived_field_names_honour_serde_attributes() {
    #[derive(Deserialize, JsonFields)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct Mixed {
        account_id: String,
        #[serde(rename = "expires_in")]
        expires: u64,
        #[serde(rename = "balance", default)]
        funds: i64,
        #[serde(skip)]
        scratch: bool,
    }

    assert_eq!(Mixed::field_names(), &["accountId", "expires_in", "balance"]);
    assert_eq!(Grant::field_names(), &["expires_in", "balance"]);
}

#[test]
fn unknown_field_yields_a_suggestion() {
    let mut decoder =
        Decoder::new(r#"{ "expires": 50 }"#.as_bytes()).with_unknown_field_suggestion();
    let error = decoder.decode::<Grant>().unwrap_err();

    assert_eq!(
        error.to_json(),
        r#"{"errors":[{"fields":["expires"],"error":"unknown field. Did you mean \"expires_in\""}]}"#
    );
}

#[test]
fn suggestion_carries_structured_fields() {
    let mut decoder =
        Decoder::new(r#"{ "expires": 50 }"#.as_bytes()).with_unknown_field_suggestion();
    let error = decoder.decode::<Grant>().unwrap_err();

    let failures = error.failures().expect("suggestion failures");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].fields(), ["expires"]);
    assert!(failures[0].error().to_string().contains("expires_in"));
}

#[test]
fn deny_unknown_fields_schemas_also_get_suggestions() {
    #[derive(Debug, Default, Deserialize, JsonFields)]
    #[serde(default, deny_unknown_fields)]
    #[allow(dead_code)]
    struct Strict {
        expires_in: i64,
        balance: i64,
    }

    let mut decoder =
        Decoder::new(r#"{ "expires": 50 }"#.as_bytes()).with_unknown_field_suggestion();
    let error = decoder.decode::<Strict>().unwrap_err();

    let failures = error.failures().expect("suggestion failures");
    assert_eq!(failures[0].fields(), ["expires"]);
    assert!(failures[0].error().to_string().contains("expires_in"));
}

#[test]
fn ties_suggest_the_later_declared_field() {
    #[derive(Debug, Default, Deserialize, JsonFields)]
    #[serde(default)]
    #[allow(dead_code)]
    struct Pair {
        bat: i64,
        bar: i64,
    }

    let mut decoder = Decoder::new(r#"{ "baz": 1 }"#.as_bytes()).with_unknown_field_suggestion();
    let error = decoder.decode::<Pair>().unwrap_err();

    let failures = error.failures().expect("suggestion failures");
    assert!(failures[0].error().to_string().contains("\"bar\""));
}

#[test]
fn no_candidates_propagates_the_plain_rejection() {
    #[derive(Debug, Default, Deserialize, JsonFields)]
    #[serde(default)]
    struct Opaque {
        #[serde(skip)]
        #[allow(dead_code)]
        hidden: i64,
    }

    let mut decoder = Decoder::new(r#"{ "x": 1 }"#.as_bytes()).with_unknown_field_suggestion();
    let error = decoder.decode::<Opaque>().unwrap_err();

    assert!(error.failures().is_none());
    assert!(matches!(error, Error::Json(_)));
    assert!(error.to_string().contains("unknown field"));
}

#[test]
fn non_unknown_field_failures_pass_through_untouched() {
    let mut decoder =
        Decoder::new(r#"{ "balance": "a lot" }"#.as_bytes()).with_unknown_field_suggestion();
    let error = decoder.decode::<Grant>().unwrap_err();
    assert!(matches!(error, Error::Json(_)));

    let mut decoder = Decoder::new("{ not json".as_bytes()).with_unknown_field_suggestion();
    let error = decoder.decode::<Grant>().unwrap_err();
    assert!(matches!(error, Error::Json(_)));
}

#[test]
fn decode_then_validate_composition_passes_clean_input() {
    let grant: Grant = jsonvet::from_str(r#"{ "balance": 50 }"#).expect("valid");
    assert_eq!(grant.balance, 50);
    assert_eq!(grant.expires_in, 0);
}

#[test]
fn decode_then_validate_reports_rule_failures() {
    let error = jsonvet::from_str::<Grant>(r#"{ "expires_in": -1 }"#).unwrap_err();
    let failures = error.failures().expect("validation failures");
    assert_eq!(failures[0].fields(), ["expires_in"]);
    assert_eq!(
        failures[0].error().to_string(),
        "should have a non-negative expiry"
    );
}

#[test]
fn suggesting_decoder_still_runs_validation_after_decode() {
    let mut decoder =
        Decoder::new(r#"{ "expires_in": -1 }"#.as_bytes()).with_unknown_field_suggestion();
    let error = decoder.decode_validated::<Grant>().unwrap_err();

    let failures = error.failures().expect("validation failures");
    assert_eq!(failures[0].fields(), ["expires_in"]);
}

#[test]
fn plain_decoder_accepts_unknown_fields() {
    let mut decoder = Decoder::new(r#"{ "expires": 50, "balance": 7 }"#.as_bytes());
    let grant: Grant = decoder.decode().expect("unknown fields ignored");
    assert_eq!(grant.balance, 7);
}
