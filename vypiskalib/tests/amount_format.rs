use rust_decimal::Decimal;
use vypiskalib::amount::{format_amount, parse_amount};

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

#[test]
fn rounds_half_away_from_zero() {
    assert_eq!(format_amount(dec("2.005")), "2.01");
    assert_eq!(format_amount(dec("-2.005")), "-2.01");
    assert_eq!(format_amount(dec("2.004")), "2.00");
    assert_eq!(format_amount(dec("2")), "2.00");
    assert_eq!(format_amount(dec("0")), "0.00");
}

#[test]
fn blank_is_exact_zero() {
    assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
    assert_eq!(parse_amount("   ").unwrap(), Decimal::ZERO);
    assert_eq!(parse_amount(" -48.50 ").unwrap(), dec("-48.50"));
    assert!(parse_amount("abc").is_err());
}

#[test]
fn decimal_sums_do_not_drift() {
    // классическая ловушка двоичной плавающей точки
    assert_eq!(dec("0.1") + dec("0.2"), dec("0.3"));

    let cents: Decimal = (0..1000).map(|_| dec("0.01")).sum();
    assert_eq!(cents, dec("10.00"));
    assert_eq!(format_amount(cents), "10.00");
}
