use std::io::Write;

use async_trait::async_trait;

use crate::{
    error::StorageError,
    rate_point::RatePoint,
    storage::{
        encode_series,
        SeriesKey,
        SeriesStore,
    },
};



/// Dry-run storage that does not store anything, but outputs series to
/// STDOUT instead.
#[derive(Default)]
pub struct Stdout;



impl Stdout {
    pub fn new() -> Self {
        Self
    }
}



/// Write one series as a `== <currency>/<period> ==` header line followed by
/// the encoded JSON.
pub fn write_series(out: &mut impl Write, key: &SeriesKey, points: &[RatePoint])
    -> Result<(), StorageError>
{
    let encoded = encode_series(points)?;

    writeln!(out, "== {} ==", key)
        .and_then(|_| out.write_all(&encoded))
        .and_then(|_| writeln!(out))
        .map_err(|source| StorageError::Io { path: "<stdout>".into(), source })
}



#[async_trait]
impl SeriesStore for Stdout {
    async fn save(&self, key: &SeriesKey, points: &[RatePoint]) -> Result<(), StorageError> {
        write_series(&mut std::io::stdout().lock(), key, points)
    }
}



#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        currency::Currency,
        period::Period,
    };

    #[test]
    fn test_series_framing() {
        let points = [RatePoint::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 100)];
        let mut out = Vec::new();

        write_series(&mut out, &SeriesKey::new(Currency::Usd, Period::OneYear), &points)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("== usd/1_year ==\n[\n    {\n"));
        assert!(text.ends_with("]\n"));
    }


    #[tokio::test]
    async fn test_save_succeeds() {
        let points = [RatePoint::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 100)];

        Stdout::new()
            .save(&SeriesKey::new(Currency::Usd, Period::SevenDays), &points)
            .await
            .unwrap();
    }
}
