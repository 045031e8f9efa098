// ============================================================================
// Structure : DataPoint
// ============================================================================
// Une observation (timestamp, valeur) de la série de prix
//
// CONCEPTS RUST :
// 1. DateTime<Utc> : timestamp normalisé en UTC (chrono)
// 2. Deserialize : RawPricePoint correspond exactement au JSON source
// 3. Option : le parsing d'une date peut échouer
// ============================================================================

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Enregistrement brut tel que renvoyé par la source : `{ "date": "...", "price": 80.0 }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPricePoint {
    /// Date texte (ISO-8601 ou format courant)
    pub date: String,

    /// Prix du jour
    pub price: f64,
}

impl RawPricePoint {
    pub fn new(date: &str, price: f64) -> Self {
        Self {
            date: date.to_string(),
            price,
        }
    }
}

/// Un point de la série, déjà validé
///
/// Invariant : timestamp issu d'une date parsable, value finie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Timestamp du point (UTC)
    pub timestamp: DateTime<Utc>,

    /// Valeur (prix)
    pub value: f64,
}

impl DataPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Timestamp en millisecondes depuis l'epoch (UTC)
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

// ============================================================================
// Parsing des dates source
// ============================================================================
// CONCEPT : Liste ordonnée de formats
// - On essaie d'abord les formats avec heure, puis les dates seules
// - Une date seule est lue comme minuit UTC
// - Les dates avec "/" sont lues mois-en-premier (cohérent avec les labels)
// ============================================================================

/// Formats date + heure sans fuseau (lus en UTC)
/// Les variantes %.f couvrent l'export ISO de pandas ("2023-01-05T10:00:00.000")
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Formats date + heure avec décalage numérique, minutes sans secondes comprises
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Formats date seule (minuit UTC)
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%y", // export CSV Brent : "20-May-87" (avant %Y qui lirait l'an 87)
    "%d-%b-%Y",
    "%b %d, %Y",
    "%m/%d/%Y",
];

/// Parse une date texte en timestamp UTC
///
/// Retourne None si aucun format ne correspond. Le store transforme ce None
/// en `DashboardError::MalformedDate` avec l'index de l'enregistrement.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // HTTP-date de Flask jsonify : "Thu, 05 Jan 2023 00:00:00 GMT"
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // Suffixe "Z" = UTC : on le retire et on lit la partie naïve
    let naive_part = value.strip_suffix('Z').unwrap_or(value);
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_part, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            // CONCEPT RUST : Option chaining
            // - and_hms_opt(0, 0, 0) ne peut pas échouer, mais l'API retourne Option
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("2023-01-05").unwrap(), midnight(2023, 1, 5));
        assert_eq!(parse_date("  2023-01-05 ").unwrap(), midnight(2023, 1, 5));
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let dt = parse_date("2023-01-05T02:00:00+02:00").unwrap();
        assert_eq!(dt, midnight(2023, 1, 5));
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_date("2023-01-05 12:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 1, 5, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_fractional_seconds_without_offset() {
        let expected = Utc.with_ymd_and_hms(2023, 1, 5, 10, 0, 0).unwrap();
        assert_eq!(parse_date("2023-01-05T10:00:00.000"), Some(expected));
        assert_eq!(parse_date("2023-01-05 10:00:00.250").unwrap().timestamp(), expected.timestamp());
    }

    #[test]
    fn test_parse_minute_precision() {
        let expected = Utc.with_ymd_and_hms(2023, 1, 5, 10, 0, 0).unwrap();
        assert_eq!(parse_date("2023-01-05T10:00"), Some(expected));
        assert_eq!(parse_date("2023-01-05 10:00"), Some(expected));
    }

    #[test]
    fn test_parse_minute_precision_with_offset() {
        let expected = Utc.with_ymd_and_hms(2023, 1, 5, 10, 0, 0).unwrap();
        assert_eq!(parse_date("2023-01-05T10:00Z"), Some(expected));
        assert_eq!(parse_date("2023-01-05T12:00+02:00"), Some(expected));
        assert_eq!(parse_date("2023-01-05T00:00:00.000Z"), Some(midnight(2023, 1, 5)));
    }

    #[test]
    fn test_parse_http_date() {
        assert_eq!(parse_date("Thu, 05 Jan 2023 00:00:00 GMT"), Some(midnight(2023, 1, 5)));
    }

    #[test]
    fn test_parse_brent_export_format() {
        assert_eq!(parse_date("20-May-87").unwrap(), midnight(1987, 5, 20));
        assert_eq!(parse_date("20-May-2020").unwrap(), midnight(2020, 5, 20));
    }

    #[test]
    fn test_parse_slash_is_month_first() {
        assert_eq!(parse_date("01/05/2023").unwrap(), midnight(2023, 1, 5));
        assert_eq!(parse_date("2023/01/05").unwrap(), midnight(2023, 1, 5));
    }

    #[test]
    fn test_parse_english_long_date() {
        assert_eq!(parse_date("Jan 05, 2023").unwrap(), midnight(2023, 1, 5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2023-02-30"), None);
    }

    #[test]
    fn test_timestamp_millis() {
        let point = DataPoint::new(midnight(2023, 1, 1), 80.0);
        assert_eq!(point.timestamp_millis(), 1_672_531_200_000);
    }

    #[test]
    fn test_raw_point_deserialize() {
        let json = r#"[{"date":"2023-01-01","price":70},{"date":"2023-01-02","price":72.5}]"#;
        let raw: Vec<RawPricePoint> = serde_json::from_str(json).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0], RawPricePoint::new("2023-01-01", 70.0));
        assert_eq!(raw[1].price, 72.5);
    }
}
