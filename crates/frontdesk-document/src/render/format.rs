// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Money and date formatting for printed documents.

use chrono::{Datelike, NaiveDate};

/// Format an amount as baht with thousands separators and two decimals,
/// e.g. `1500.0` → `"1,500.00"`.
pub fn format_baht(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac:02}")
}

/// Split a VAT-inclusive amount into (net, vat) at `rate_percent`.
///
/// Both parts are rounded to satang and always sum back to the rounded gross.
pub fn split_vat_inclusive(gross: f64, rate_percent: f64) -> (f64, f64) {
    let gross = round_satang(gross);
    if rate_percent <= 0.0 {
        return (gross, 0.0);
    }
    let net = round_satang(gross * 100.0 / (100.0 + rate_percent));
    (net, round_satang(gross - net))
}

fn round_satang(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Thai calendar date, Buddhist era, e.g. `5 มกราคม 2569`.
pub fn thai_date(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "มกราคม",
        "กุมภาพันธ์",
        "มีนาคม",
        "เมษายน",
        "พฤษภาคม",
        "มิถุนายน",
        "กรกฎาคม",
        "สิงหาคม",
        "กันยายน",
        "ตุลาคม",
        "พฤศจิกายน",
        "ธันวาคม",
    ];
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year() + 543
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baht_grouping() {
        assert_eq!(format_baht(0.0), "0.00");
        assert_eq!(format_baht(1500.0), "1,500.00");
        assert_eq!(format_baht(1234567.891), "1,234,567.89");
        assert_eq!(format_baht(-42.5), "-42.50");
        assert_eq!(format_baht(f64::NAN), "0.00");
    }

    #[test]
    fn vat_split_sums_to_gross() {
        let (net, vat) = split_vat_inclusive(1500.0, 7.0);
        assert_eq!(net, 1401.87);
        assert_eq!(vat, 98.13);
        assert_eq!(round_satang(net + vat), 1500.0);
    }

    #[test]
    fn zero_rate_has_no_vat() {
        assert_eq!(split_vat_inclusive(800.0, 0.0), (800.0, 0.0));
    }

    #[test]
    fn buddhist_era_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).expect("date");
        assert_eq!(thai_date(date), "5 มกราคม 2569");
    }
}
