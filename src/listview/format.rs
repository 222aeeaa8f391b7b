//! Brazilian (pt-BR) display formatting for cells

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as Brazilian reais: `R$ 2.500,00`.
///
/// Rounds half away from zero to cents, groups thousands with `.` and uses
/// `,` as the decimal separator. Negative amounts are prefixed with `-`.
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {},{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `31/12/2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `20/03/2024 08:00`
pub fn format_datetime(at: NaiveDateTime) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

/// Percentage change with an explicit sign: `+4.75%`, `-1.39%`.
pub fn format_delta(percent: f64) -> String {
    format!("{percent:+.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    #[test]
    fn test_brl_grouping() {
        assert_eq!(format_brl(dec(250000, 2)), "R$ 2.500,00");
        assert_eq!(format_brl(dec(4523100, 2)), "R$ 45.231,00");
        assert_eq!(format_brl(dec(123456789, 2)), "R$ 1.234.567,89");
        assert_eq!(format_brl(dec(999, 0)), "R$ 999,00");
        assert_eq!(format_brl(dec(0, 0)), "R$ 0,00");
    }

    #[test]
    fn test_brl_rounding_and_sign() {
        assert_eq!(format_brl(dec(10005, 3)), "R$ 10,01");
        assert_eq!(format_brl(dec(-320000, 2)), "-R$ 3.200,00");
        assert_eq!(format_brl(dec(-1, 3)), "R$ 0,00");
        assert_eq!(format_brl(dec(5, 1)), "R$ 0,50");
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(format_date(date), "31/12/2025");
        let at = NaiveDate::from_ymd_opt(2024, 3, 20)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(format_datetime(at), "20/03/2024 08:00");
    }

    #[test]
    fn test_delta() {
        assert_eq!(format_delta(4.75), "+4.75%");
        assert_eq!(format_delta(-1.394), "-1.39%");
    }
}
