use std::{
    fmt,
    str::FromStr,
};

use chrono::{
    NaiveDate,
    NaiveDateTime,
    TimeDelta,
};

use crate::error::ConfigError;



/// Lookback window of a requested series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    SevenDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    FiveYears,
    TenYears,
}



impl Period {
    pub const ALL: &'static [Period] = &[
        Period::SevenDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::FiveYears,
        Period::TenYears,
    ];


    /// Name used as output file stem, i.e. `results/usd/1_month.json`.
    pub fn name(&self) -> &'static str {
        match self {
            Period::SevenDays => "7_days",
            Period::OneMonth => "1_month",
            Period::ThreeMonths => "3_months",
            Period::SixMonths => "6_months",
            Period::OneYear => "1_year",
            Period::FiveYears => "5_years",
            Period::TenYears => "10_years",
        }
    }


    /// Months and years are flat day counts, not calendar arithmetic.
    pub fn days(&self) -> i64 {
        match self {
            Period::SevenDays => 7,
            Period::OneMonth => 30,
            Period::ThreeMonths => 90,
            Period::SixMonths => 180,
            Period::OneYear => 365,
            Period::FiveYears => 1825,
            Period::TenYears => 3650,
        }
    }


    pub fn duration(&self) -> TimeDelta {
        TimeDelta::days(self.days())
    }
}



impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}



impl FromStr for Period {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        Period::ALL.iter()
            .find(|p| p.name() == name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownPeriod(name.to_string()))
    }
}



/// Requested date span of a series.
///
/// `start` - first day of the window, `end` - last day of the window. Both
/// are taken from the same adjusted instant, so `end - start` always equals
/// the period length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}



impl DateRange {
    /// Compute the range for `period`, ending at `now - offset`.
    ///
    /// Returns None when the range falls outside the representable calendar.
    pub fn ending_at(now: NaiveDateTime, offset: TimeDelta, period: Period)
        -> Option<Self>
    {
        let adjusted = now.checked_sub_signed(offset)?;
        let start = adjusted.checked_sub_signed(period.duration())?;

        Some(Self {
            start: start.date(),
            end: adjusted.date(),
        })
    }
}
