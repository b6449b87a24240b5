//! Extraction of rate series embedded in the charting widget markup.
//!
//! The endpoint does not return data directly. It returns an HTML page that
//! initializes a chart from inline script, roughly:
//!
//! ```text
//! new Chart(ctx, {
//!     data: {
//!         labels: [new Date('2024-01-01'), new Date('2024-01-02')],
//!         datasets: [{
//!             label: 'USD',
//!             data: [100, 105],
//!         }]
//!     }
//! });
//! ```
//!
//! Everything in here is tied to that shape. If the widget changes its markup
//! this module is the only thing that has to follow.



use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::{
    Html,
    Selector,
};

use crate::{
    currency::Currency,
    error::ExtractError,
    rate_point::{
        RatePoint,
        DATE_FORMAT,
    },
};



/// Literal that identifies the chart configuration object inside a script.
const DATA_BLOCK_MARKER: &str = "data: {";

static SCRIPT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script").expect("script selector is valid")
});

static CURRENCY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"label:\s*'(\w+)'").expect("currency label pattern is valid")
});

static LABELS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)labels:\s*\[(.*?)\]").expect("labels pattern is valid")
});

static DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)data:\s*\[(.*?)\]").expect("data pattern is valid")
});

static DATE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"new Date\('(\d{4}-\d{2}-\d{2})'\)").expect("date pattern is valid")
});



/// Extract the rate series for `currency` from a chart page.
///
/// Script blocks are scanned in document order and the first block that
/// settles the outcome wins. A block settles it when it carries a currency
/// label for another currency, or when it has both `labels` and `data`
/// arrays. Blocks without the arrays are skipped.
pub fn extract_series(html: &str, currency: Currency)
    -> Result<Vec<RatePoint>, ExtractError>
{
    let document = Html::parse_document(html);

    document.select(&SCRIPT)
        .map(|script| script.text().collect::<String>())
        .filter(|text| text.contains(DATA_BLOCK_MARKER))
        .find_map(|text| extract_block(&text, currency))
        .unwrap_or(Err(ExtractError::NoDataBlock))
}



// Returns None when the block has no chart arrays and the scan should go on.
fn extract_block(script: &str, currency: Currency)
    -> Option<Result<Vec<RatePoint>, ExtractError>>
{
    if let Some(found) = CURRENCY_LABEL.captures(script) {
        let found = found[1].to_uppercase();
        let requested = currency.code().to_uppercase();

        if found != requested {
            return Some(Err(ExtractError::CurrencyMismatch { requested, found }))
        }
    }

    let labels = LABELS.captures(script)?.get(1)?.as_str();
    let data = DATA.captures(script)?.get(1)?.as_str();

    Some(pair_series(labels, data))
}



fn pair_series(labels: &str, data: &str) -> Result<Vec<RatePoint>, ExtractError> {
    let dates = parse_dates(labels)?;
    let prices = parse_prices(data)?;

    if dates.len() != prices.len() {
        return Err(ExtractError::LengthMismatch {
            dates: dates.len(),
            prices: prices.len(),
        })
    }

    if dates.is_empty() {
        return Err(ExtractError::EmptySeries)
    }

    Ok(dates.into_iter()
        .zip(prices)
        .map(|(date, price)| RatePoint::new(date, price))
        .collect())
}



fn parse_dates(labels: &str) -> Result<Vec<NaiveDate>, ExtractError> {
    DATE_CALL.captures_iter(labels)
        .map(|c| {
            let literal = &c[1];
            NaiveDate::parse_from_str(literal, DATE_FORMAT)
                .map_err(|_| ExtractError::InvalidDate(literal.to_string()))
        })
        .collect()
}



fn parse_prices(data: &str) -> Result<Vec<i64>, ExtractError> {
    if data.trim().is_empty() {
        return Ok(Vec::new())
    }

    data.split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<i64>()
                .map_err(|_| ExtractError::InvalidPrice(token.to_string()))
        })
        .collect()
}
