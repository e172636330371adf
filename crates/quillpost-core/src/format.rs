use chrono::{DateTime, Utc};

use crate::i18n::Language;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Human-readable size: whole bytes, then whole KB, then MB with one decimal.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        return format!("{bytes} B");
    }

    if bytes < MIB {
        let kib = (bytes + KIB / 2) / KIB;
        return format!("{kib} KB");
    }

    let tenths = (u128::from(bytes) * 10 + u128::from(MIB / 2)) / u128::from(MIB);
    if tenths % 10 == 0 {
        format!("{} MB", tenths / 10)
    } else {
        format!("{}.{} MB", tenths / 10, tenths % 10)
    }
}

#[must_use]
pub fn format_publish_date(published_at: &DateTime<Utc>, language: Language) -> String {
    match language {
        Language::En => published_at.format("%B %-d, %Y").to_string(),
        Language::Zh => published_at.format("%Y年%-m月%-d日").to_string(),
    }
}

#[must_use]
pub fn format_checked_at(checked_at: &DateTime<Utc>, language: Language) -> String {
    format!(
        "{} {} UTC",
        format_publish_date(checked_at, language),
        checked_at.format("%H:%M")
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn sizes_below_a_kilobyte_are_bytes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
    }

    #[test]
    fn kilobytes_round_to_nearest_integer() {
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "2 KB");
        assert_eq!(format_file_size(1535), "1 KB");
        assert_eq!(format_file_size(1_048_575), "1024 KB");
    }

    #[test]
    fn megabytes_keep_one_decimal_place() {
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(2_097_152), "2 MB");
        assert_eq!(format_file_size(1_572_864), "1.5 MB");
        assert_eq!(format_file_size(13_002_342), "12.4 MB");
    }

    #[test]
    fn huge_sizes_do_not_overflow() {
        assert_eq!(format_file_size(u64::MAX), "17592186044416 MB");
    }

    #[test]
    fn publish_date_follows_language() {
        let date = Utc
            .with_ymd_and_hms(2026, 10, 8, 23, 5, 0)
            .single()
            .expect("valid timestamp");

        assert_eq!(format_publish_date(&date, Language::En), "October 8, 2026");
        assert_eq!(format_publish_date(&date, Language::Zh), "2026年10月8日");
        assert_eq!(
            format_checked_at(&date, Language::En),
            "October 8, 2026 23:05 UTC"
        );
    }
}
