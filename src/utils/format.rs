//! Locale-aware formatting

use chrono::{Datelike, NaiveDate};

use crate::locale::Language;

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const TH_MONTHS: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];

/// Offset between the Gregorian and Thai Buddhist-era calendars
const BUDDHIST_ERA_OFFSET: i32 = 543;

/// `15 Oct 2026` in English, `15 ต.ค. 2569` in Thai
pub fn format_date(date: NaiveDate, language: Language) -> String {
    let month = date.month0() as usize;
    match language {
        Language::En => format!("{} {} {}", date.day(), EN_MONTHS[month], date.year()),
        Language::Th => format!(
            "{} {} {}",
            date.day(),
            TH_MONTHS[month],
            date.year() + BUDDHIST_ERA_OFFSET
        ),
    }
}

/// Thousands separated with commas
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.0}%", value)
}

/// Short relative description of a day offset
pub fn format_relative_days(days: i64, language: Language) -> String {
    match (language, days) {
        (Language::En, 0) => "today".to_string(),
        (Language::En, 1) => "tomorrow".to_string(),
        (Language::En, -1) => "yesterday".to_string(),
        (Language::En, d) if d > 0 => format!("in {} days", d),
        (Language::En, d) => format!("{} days ago", -d),
        (Language::Th, 0) => "วันนี้".to_string(),
        (Language::Th, 1) => "พรุ่งนี้".to_string(),
        (Language::Th, -1) => "เมื่อวาน".to_string(),
        (Language::Th, d) if d > 0 => format!("อีก {} วัน", d),
        (Language::Th, d) => format!("{} วันที่แล้ว", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(format_date(date, Language::En), "15 Oct 2026");
        assert_eq!(format_date(date, Language::Th), "15 ต.ค. 2569");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(-45000), "-45,000");
    }

    #[test]
    fn test_relative_days() {
        assert_eq!(format_relative_days(3, Language::En), "in 3 days");
        assert_eq!(format_relative_days(-2, Language::En), "2 days ago");
        assert_eq!(format_relative_days(0, Language::Th), "วันนี้");
        assert_eq!(format_relative_days(5, Language::Th), "อีก 5 วัน");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(66.6), "67%");
    }
}
