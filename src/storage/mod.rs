pub mod json_files;
pub mod stdout;

use std::fmt;

use async_trait::async_trait;

use serde::Serialize;
use serde_json::ser::{
    PrettyFormatter,
    Serializer,
};

use crate::{
    currency::Currency,
    error::StorageError,
    period::Period,
    rate_point::RatePoint,
};



/// Identifies one stored series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub currency: Currency,
    pub period: Period,
}



impl SeriesKey {
    pub fn new(currency: Currency, period: Period) -> Self {
        Self {
            currency, period,
        }
    }
}



impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.currency, self.period)
    }
}



/// Destination for extracted series.
///
/// `save` is only ever called with a complete, validated series and replaces
/// whatever was stored under the same key. Keys that are not saved to must
/// stay untouched.
#[async_trait]
pub trait SeriesStore: Send + Sync {
    async fn save(&self, key: &SeriesKey, points: &[RatePoint]) -> Result<(), StorageError>;
}



#[async_trait]
impl<S: SeriesStore + ?Sized> SeriesStore for Box<S> {
    async fn save(&self, key: &SeriesKey, points: &[RatePoint]) -> Result<(), StorageError> {
        (**self).save(key, points).await
    }
}



/// Encode a series as a pretty-printed JSON array with 4 space indentation.
pub fn encode_series(points: &[RatePoint]) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);

    points.serialize(&mut ser)?;

    Ok(buf)
}
