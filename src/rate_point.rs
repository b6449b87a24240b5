use chrono::NaiveDate;

use serde::{
    Deserialize,
    Serialize,
};



/// Date format used both on the wire and in stored series.
pub const DATE_FORMAT: &str = "%Y-%m-%d";



/// Single observation in a currency's historical series.
///
/// `date` - calendar day of the observation, serialized as `YYYY-MM-DD`.
/// `price` - value exactly as published by the charting endpoint. The
/// endpoint only publishes whole numbers, so no decimal scaling is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub price: i64,
}



impl RatePoint {
    pub fn new(date: NaiveDate, price: i64) -> Self {
        Self {
            date, price,
        }
    }
}



pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_parse_format_is_stable() {
        for literal in ["2024-01-01", "2024-02-29", "1999-12-31"] {
            let date = NaiveDate::parse_from_str(literal, DATE_FORMAT).unwrap();
            assert_eq!(format_date(date), literal);
        }
    }


    #[test]
    fn test_serialized_shape() {
        let point = RatePoint::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 105);
        let json = serde_json::to_string(&point).unwrap();

        assert_eq!(json, r#"{"date":"2024-01-02","price":105}"#);
    }
}
