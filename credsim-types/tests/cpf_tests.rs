use credsim_types::{Cpf, Error};
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

const PUNCTUATED: &str = "678.819.549-81";
const BARE: &str = "67881954981";

fn to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

// ── Accepted forms ───────────────────────────────────────────────

#[test]
fn parses_punctuated_form() {
    let cpf = Cpf::parse(PUNCTUATED).unwrap();
    assert_eq!(cpf.digits(), BARE);
}

#[test]
fn parses_bare_digits() {
    let cpf = Cpf::parse("52998224725").unwrap();
    assert_eq!(cpf.to_string(), "529.982.247-25");
}

#[test]
fn both_forms_are_equal() {
    assert_eq!(Cpf::parse(PUNCTUATED).unwrap(), Cpf::parse(BARE).unwrap());
}

#[test]
fn from_str_matches_parse() {
    let cpf: Cpf = Cpf::from_str(BARE).unwrap();
    assert_eq!(cpf, Cpf::parse(BARE).unwrap());
}

#[test]
fn hash_uses_digits() {
    let mut set = HashSet::new();
    set.insert(Cpf::parse(PUNCTUATED).unwrap());
    set.insert(Cpf::parse(BARE).unwrap());
    assert_eq!(set.len(), 1);
}

// ── Rejected input ───────────────────────────────────────────────

#[test]
fn rejects_repeated_digits() {
    for d in '0'..='9' {
        let s: String = std::iter::repeat_n(d, 11).collect();
        assert!(!Cpf::is_valid(&s), "{s} should be rejected");
    }
}

#[test]
fn rejects_wrong_check_digits() {
    assert!(!Cpf::is_valid("678.819.549-80"));
    assert!(!Cpf::is_valid("67881954971"));
}

#[test]
fn rejects_bad_shapes() {
    let inputs = [
        "",
        "222",
        "6788195498",
        "678819549811",
        "678-819-549.81",
        "678.819.54981",
        "6788195498a",
    ];
    for s in inputs {
        assert!(!Cpf::is_valid(s), "{s:?} should be rejected");
    }
}

#[test]
fn error_carries_input() {
    let err = Cpf::parse("11111111111").unwrap_err();
    assert!(matches!(err, Error::InvalidCpf(ref s) if s == "11111111111"));
    assert!(err.to_string().contains("invalid CPF"));
}

// ── Serialization ────────────────────────────────────────────────

#[test]
fn serializes_punctuated() {
    let cpf = Cpf::parse(BARE).unwrap();
    assert_eq!(serde_json::to_string(&cpf).unwrap(), format!("\"{PUNCTUATED}\""));
}

#[test]
fn deserialize_rejects_invalid() {
    let result: Result<Cpf, _> = serde_json::from_str("\"11111111111\"");
    assert!(result.is_err());
}

// ── Check digit properties ───────────────────────────────────────

#[test]
fn complete_rejects_non_digits() {
    assert!(Cpf::complete([0, 1, 2, 3, 4, 5, 6, 7, 10]).is_none());
}

#[test]
fn complete_known_value() {
    let digits = Cpf::complete([6, 7, 8, 8, 1, 9, 5, 4, 9]).unwrap();
    assert_eq!(to_string(&digits), BARE);
}

proptest! {
    #[test]
    fn completed_digits_validate(base in proptest::array::uniform9(0u8..=9)) {
        prop_assume!(base.iter().any(|d| *d != base[0]));
        let digits = Cpf::complete(base).unwrap();
        prop_assert!(Cpf::is_valid(&to_string(&digits)));
    }

    #[test]
    fn altered_check_digit_fails(
        base in proptest::array::uniform9(0u8..=9),
        pos in 9usize..11,
        bump in 1u8..10,
    ) {
        prop_assume!(base.iter().any(|d| *d != base[0]));
        let mut digits = Cpf::complete(base).unwrap();
        digits[pos] = (digits[pos] + bump) % 10;
        prop_assert!(!Cpf::is_valid(&to_string(&digits)));
    }
}
