use super::*;

fn secs(text: &str) -> u32 {
    text.parse::<Duration>().unwrap().seconds()
}

#[test]
fn duration_plain_seconds() {
    assert_eq!(secs("0"), 0);
    assert_eq!(secs("45"), 45);
    assert_eq!(secs("600"), 600);
}

#[test]
fn duration_clock_forms() {
    assert_eq!(secs("0:30"), 30);
    assert_eq!(secs("10:00"), 600);
    assert_eq!(secs("90:00"), 5400);
    assert_eq!(secs("1:05:30"), 3930);
}

#[test]
fn duration_unit_forms() {
    assert_eq!(secs("30s"), 30);
    assert_eq!(secs("10m"), 600);
    assert_eq!(secs("1h"), 3600);
    assert_eq!(secs("2m30s"), 150);
    assert_eq!(secs("1h30m"), 5400);
}

#[test]
fn duration_rejects_malformed_literals() {
    assert_eq!("".parse::<Duration>(), Err(DurationError::Empty));
    assert!("10x".parse::<Duration>().is_err());
    assert!("m".parse::<Duration>().is_err());
    assert!("10".repeat(10).parse::<Duration>().is_err());
    assert!("30s10m".parse::<Duration>().is_err());
    assert!("10m10m".parse::<Duration>().is_err());
    assert!("10m5".parse::<Duration>().is_err());
    assert!("1:2:3:4".parse::<Duration>().is_err());
    assert!("10:".parse::<Duration>().is_err());
    assert_eq!(
        "10:75".parse::<Duration>(),
        Err(DurationError::OutOfRange("10:75".to_string()))
    );
    assert!("1:5".parse::<Duration>().is_err());
}

#[test]
fn duration_arithmetic() {
    let a = Duration::from_seconds(90);
    let b = Duration::from_seconds(30);
    assert_eq!(a + b, Duration::from_seconds(120));
    assert_eq!(a - b, Duration::from_seconds(60));
    assert_eq!(b * 3, Duration::from_seconds(90));
    assert_eq!(b.checked_sub(a), None);
    assert_eq!(a.checked_sub(b), Some(Duration::from_seconds(60)));
    assert_eq!([a, b, b].into_iter().sum::<Duration>(), Duration::from_seconds(150));
    assert!(b < a);
}

#[test]
#[should_panic(expected = "duration subtraction underflow")]
fn duration_subtraction_below_zero_panics() {
    let _ = Duration::from_seconds(10) - Duration::from_seconds(11);
}

#[test]
fn duration_checked_arithmetic_at_the_limit() {
    let max = Duration::from_seconds(u32::MAX);
    let one = Duration::from_seconds(1);
    assert_eq!(max.checked_add(one), None);
    assert_eq!(max.checked_add(Duration::ZERO), Some(max));
    assert_eq!(max.checked_mul(2), None);
    assert_eq!(one.checked_mul(3), Some(Duration::from_seconds(3)));
}

#[test]
#[should_panic(expected = "duration addition overflow")]
fn duration_addition_overflow_panics() {
    let _ = Duration::from_seconds(u32::MAX) + Duration::from_seconds(1);
}

#[test]
fn duration_display() {
    assert_eq!(Duration::from_seconds(5).to_string(), "0:05");
    assert_eq!(Duration::from_seconds(600).to_string(), "10:00");
    assert_eq!(Duration::from_seconds(3930).to_string(), "1:05:30");
}

#[test]
fn power_literals() {
    assert_eq!(parse_power("75%"), Ok(0.75));
    assert_eq!(parse_power("62.5%"), Ok(0.625));
    assert_eq!(parse_power("0.5"), Ok(0.5));
    assert_eq!(parse_power("120%"), Ok(1.2));
}

#[test]
fn power_rejects_ambiguous_and_malformed_literals() {
    assert_eq!(parse_power(""), Err(PowerError::Empty));
    assert_eq!(parse_power("75"), Err(PowerError::Invalid("75".to_string())));
    assert!(parse_power("%").is_err());
    assert!(parse_power("7.5.1%").is_err());
    assert!(parse_power("abc%").is_err());
    assert!(parse_power("-5%").is_err());
}

#[test]
fn intensity_endpoints() {
    assert_eq!(Intensity::Constant(0.8).start(), Some(0.8));
    assert_eq!(Intensity::Constant(0.8).end(), Some(0.8));
    assert_eq!(Intensity::Range(0.5, 0.75).start(), Some(0.5));
    assert_eq!(Intensity::Range(0.5, 0.75).end(), Some(0.75));
    assert_eq!(Intensity::RangeEnd(0.9).start(), None);
    assert_eq!(Intensity::RangeEnd(0.9).end(), Some(0.9));
    assert_eq!(Intensity::Free.start(), None);
    assert_eq!(Intensity::Free.end(), None);
    assert_eq!(Intensity::default(), Intensity::Free);
}

#[test]
fn flat_range_is_equivalent_but_not_equal_to_constant() {
    let flat = Intensity::Range(0.75, 0.75);
    let constant = Intensity::Constant(0.75);

    assert_ne!(flat, constant);
    assert!(flat.is_equivalent(&constant));
    assert!(constant.is_equivalent(&flat));
    assert!(!Intensity::Range(0.5, 0.75).is_equivalent(&constant));
    assert!(!Intensity::RangeEnd(0.75).is_equivalent(&constant));
    assert!(Intensity::Free.is_equivalent(&Intensity::Free));
}

#[test]
fn intensity_display() {
    assert_eq!(Intensity::Constant(0.75).to_string(), "75%");
    assert_eq!(Intensity::Constant(0.625).to_string(), "62.5%");
    assert_eq!(Intensity::Range(0.5, 0.7).to_string(), "50%..70%");
    assert_eq!(Intensity::RangeEnd(1.05).to_string(), "..105%");
    assert_eq!(Intensity::Free.to_string(), "free");
}
