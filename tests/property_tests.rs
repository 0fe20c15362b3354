/// Property-based tests using proptest
/// Tests invariants of the field validators that should hold for all inputs
use proptest::prelude::*;
use lead_intake::validators::{is_numeric, is_valid_date, is_valid_ipv4};

// Property: validators never panic, whatever the input
proptest! {
    #[test]
    fn validators_never_panic(value in "\\PC*") {
        let _ = is_numeric(Some(&value));
        let _ = is_valid_date(Some(&value));
        let _ = is_valid_ipv4(Some(&value));
    }
}

// Property: numeric check agrees with rendered numbers
proptest! {
    #[test]
    fn finite_floats_are_numeric(n in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        prop_assert!(is_numeric(Some(&n.to_string())));
        let sci = format!("{:e}", n);
        prop_assert!(is_numeric(Some(&sci)));
    }

    #[test]
    fn integers_are_numeric(n in any::<i64>()) {
        prop_assert!(is_numeric(Some(&n.to_string())));
    }

    #[test]
    fn alphabetic_text_is_not_numeric(s in "[g-zG-Z]{1,12}") {
        // Excludes letters that could spell inf/nan/exponents
        prop_assume!(!s.to_ascii_lowercase().contains("inf") && !s.to_ascii_lowercase().contains("nan"));
        prop_assert!(!is_numeric(Some(&s)));
    }
}

// Property: dates chrono renders are accepted, reformatted ones are not
proptest! {
    #[test]
    fn real_dates_are_valid(days in 0i64..(400 * 366)) {
        let date = chrono::NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Duration::days(days);
        let iso = date.format("%Y-%m-%d").to_string();
        prop_assert!(is_valid_date(Some(&iso)));

        let us = date.format("%m/%d/%Y").to_string();
        prop_assert!(!is_valid_date(Some(&us)));
    }

    #[test]
    fn months_above_twelve_are_invalid(year in 1000u32..=9999, month in 13u32..=99, day in 1u32..=28) {
        let value = format!("{:04}-{:02}-{:02}", year, month, day);
        prop_assert!(!is_valid_date(Some(&value)));
    }
}

// Property: IPv4 accepts exactly octets in range
proptest! {
    #[test]
    fn in_range_octets_are_valid(a in 0u16..=255, b in 0u16..=255, c in 0u16..=255, d in 0u16..=255) {
        let ip = format!("{}.{}.{}.{}", a, b, c, d);
        prop_assert!(is_valid_ipv4(Some(&ip)));
    }

    #[test]
    fn out_of_range_octet_is_invalid(bad in 256u16..=999, pos in 0usize..4) {
        let mut octets = ["10".to_string(), "0".to_string(), "0".to_string(), "1".to_string()];
        octets[pos] = bad.to_string();
        prop_assert!(!is_valid_ipv4(Some(&octets.join("."))));
    }
}
