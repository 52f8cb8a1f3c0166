//! Property-based tests for typed equality and criteria matching.
//!
//! - Reflexivity: every value equals itself under every declared type
//! - Codelist identity: only the code matters
//! - Decimal scale: values that round to the same 5-digit decimal are equal
//! - `$ANY` matches every value, set or not
//! - Equal snapshots never produce a change event

use fieldwatch_core::{AttachmentRef, CodelistValue, Criterion, FieldType, HclValue, Value};
use fieldwatch_eval::{equality::round_half_up, is_value_change_event, matches, values_equal};
use proptest::prelude::*;
use rust_decimal::Decimal;
use time::{Date, Month, PrimitiveDateTime, Time};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn code_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z0-9]{1,6}").unwrap()
}

fn decimal_strategy() -> impl Strategy<Value = Decimal> {
    (any::<i64>(), 0u32..10).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn date_strategy() -> impl Strategy<Value = Date> {
    (1970i32..2100, 1u8..=12, 1u8..=28).prop_map(|(y, m, d)| {
        let month = Month::try_from(m).unwrap();
        Date::from_calendar_date(y, month, d).unwrap()
    })
}

fn datetime_strategy() -> impl Strategy<Value = PrimitiveDateTime> {
    (date_strategy(), 0u8..24, 0u8..60, 0u8..60, 0u32..1_000_000_000).prop_map(
        |(date, h, m, s, nanos)| {
            PrimitiveDateTime::new(date, Time::from_hms_nano(h, m, s, nanos).unwrap())
        },
    )
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        ".{0,20}".prop_map(Value::Text),
        any::<i64>().prop_map(Value::Number),
        decimal_strategy().prop_map(Value::Decimal),
        any::<bool>().prop_map(Value::Bool),
        date_strategy().prop_map(Value::Date),
        datetime_strategy().prop_map(Value::DateTime),
        (code_strategy(), proptest::option::of(".{0,10}"))
            .prop_map(|(code, name)| Value::Codelist(CodelistValue { code, name })),
        prop::collection::vec(code_strategy(), 0..5)
            .prop_map(|codes| Value::Codelists(codes.into_iter().map(CodelistValue::new).collect())),
        code_strategy().prop_map(|c| Value::Hcl(HclValue::new(c))),
        code_strategy().prop_map(|id| Value::Attachment(AttachmentRef::new(id))),
    ]
}

fn criterion_strategy() -> impl Strategy<Value = Criterion> {
    prop_oneof![
        Just(Criterion::Any),
        Just(Criterion::Empty),
        ".{0,10}".prop_map(Criterion::Literal),
    ]
}

// =============================================================================
// TYPED EQUALITY
// =============================================================================

proptest! {
    /// Every value is equal to itself under every declared type.
    #[test]
    fn values_equal_is_reflexive(v in value_strategy()) {
        for ft in FieldType::ALL {
            prop_assert!(values_equal(Some(&v), Some(&v), ft), "{:?} under {}", v, ft);
        }
    }

    /// Codelists compare by code; the display name never matters.
    #[test]
    fn codelist_equality_ignores_name(
        code in code_strategy(),
        n1 in proptest::option::of(".{0,10}"),
        n2 in proptest::option::of(".{0,10}"),
    ) {
        let a = Value::Codelist(CodelistValue { code: code.clone(), name: n1 });
        let b = Value::Codelist(CodelistValue { code, name: n2 });
        prop_assert!(values_equal(Some(&a), Some(&b), FieldType::Codelist));
        prop_assert!(values_equal(Some(&a), Some(&b), FieldType::Dropdown));
    }

    /// Decimal equality agrees with half-up rounding at five digits.
    #[test]
    fn decimal_equality_follows_rounding(a in decimal_strategy(), b in decimal_strategy()) {
        let expected = round_half_up(a, 5) == round_half_up(b, 5);
        prop_assert_eq!(
            values_equal(Some(&Value::Decimal(a)), Some(&Value::Decimal(b)), FieldType::Decimal),
            expected
        );
    }
}

// =============================================================================
// MATCHING AND EVENTS
// =============================================================================

proptest! {
    /// `$ANY` matches every value, including an unset one.
    #[test]
    fn any_matches_everything(v in proptest::option::of(value_strategy())) {
        prop_assert!(matches(v.as_ref(), &Criterion::Any));
    }

    /// Identical before/after values never produce an event.
    #[test]
    fn no_change_no_event(
        v in proptest::option::of(value_strategy()),
        from in criterion_strategy(),
        to in criterion_strategy(),
    ) {
        prop_assert!(!is_value_change_event(v.as_ref(), v.as_ref(), &from, &to));
    }

    /// With `$ANY` on both sides, an event fires exactly when the values differ.
    #[test]
    fn any_to_any_fires_on_every_difference(
        a in proptest::option::of(value_strategy()),
        b in proptest::option::of(value_strategy()),
    ) {
        prop_assert_eq!(
            is_value_change_event(a.as_ref(), b.as_ref(), &Criterion::Any, &Criterion::Any),
            a != b
        );
    }
}
