// src/common/dates.rs

//! Datas de calendário chegam como texto (`YYYY-MM-DD`) e podem ser sentinelas
//! como "N/A". Tudo aqui é tolerante: entrada inválida vira `None`, nunca erro.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const ISO_DATE: &str = "%Y-%m-%d";

/// Só aceita o formato ISO com zeros à esquerda (10 caracteres).
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, ISO_DATE).ok()
}

/// `deserialize_with` para datas opcionais: `""`, sentinelas ou qualquer
/// valor que não seja uma data ISO viram `None`.
pub fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_iso_date))
}

/// "2026-10" -> 2026-10-01
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 7 {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{raw}-01"), ISO_DATE).ok()
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Todos os dias do mês de `first` (que deve ser o dia 1).
pub fn days_of_month(first: NaiveDate) -> Vec<NaiveDate> {
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .collect()
}

/// Data local do negócio para um instante.
pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

pub fn plus_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn iso_dates_are_strict_and_tolerant() {
        assert_eq!(
            parse_iso_date("2026-10-05"),
            NaiveDate::from_ymd_opt(2026, 10, 5)
        );
        assert_eq!(parse_iso_date("N/A"), None);
        assert_eq!(parse_iso_date(""), None);
        assert_eq!(parse_iso_date("2026-1-5"), None);
        assert_eq!(parse_iso_date("2026-02-30"), None);
    }

    #[test]
    fn month_helpers() {
        let first = parse_month("2026-02").unwrap();
        assert_eq!(days_of_month(first).len(), 28);
        assert_eq!(month_key(first), "2026-02");
        assert!(parse_month("2026-2").is_none());
        assert!(same_month(first, NaiveDate::from_ymd_opt(2026, 2, 27).unwrap()));
    }

    #[test]
    fn local_date_respects_business_offset() {
        let instant = Utc.with_ymd_and_hms(2026, 10, 16, 20, 30, 0).unwrap();
        let dhaka = FixedOffset::east_opt(6 * 3600).unwrap();
        assert_eq!(
            local_date(instant, dhaka),
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
        );
    }
}
