//! `fmt_date`, `fmt_time` and `fmt_datetime` with named style presets.
use crate::error::FormatError;
use crate::formatter::ValueFormatter;
use chrono::{Datelike, NaiveDate, NaiveTime};
use std::fmt;
use std::str::FromStr;
use tablekit_types::Value;

/// Named date presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateStyle {
    /// `2000-02-29`
    #[default]
    Iso,
    /// `Tuesday, February 29, 2000`
    WdayMonthDayYear,
    /// `Tue, Feb 29, 2000`
    WdMDayYear,
    /// `Tuesday 29 February 2000`
    WdayDayMonthYear,
    /// `February 29, 2000`
    MonthDayYear,
    /// `Feb 29, 2000`
    MDayYear,
    /// `29 Feb 2000`
    DayMYear,
    /// `29 February 2000`
    DayMonthYear,
    /// `29 February`
    DayMonth,
    /// `29 Feb`
    DayM,
    /// `2000`
    Year,
    /// `February`
    Month,
    /// `29`
    Day,
    /// `2000/02/29`
    YearMnDay,
    /// `00/02/29`
    YMnDay,
    /// `2000-W09`
    YearWeek,
    /// `2000-Q1`
    YearQuarter,
}

impl DateStyle {
    pub const ALL: [DateStyle; 17] = [
        DateStyle::Iso,
        DateStyle::WdayMonthDayYear,
        DateStyle::WdMDayYear,
        DateStyle::WdayDayMonthYear,
        DateStyle::MonthDayYear,
        DateStyle::MDayYear,
        DateStyle::DayMYear,
        DateStyle::DayMonthYear,
        DateStyle::DayMonth,
        DateStyle::DayM,
        DateStyle::Year,
        DateStyle::Month,
        DateStyle::Day,
        DateStyle::YearMnDay,
        DateStyle::YMnDay,
        DateStyle::YearWeek,
        DateStyle::YearQuarter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateStyle::Iso => "iso",
            DateStyle::WdayMonthDayYear => "wday_month_day_year",
            DateStyle::WdMDayYear => "wd_m_day_year",
            DateStyle::WdayDayMonthYear => "wday_day_month_year",
            DateStyle::MonthDayYear => "month_day_year",
            DateStyle::MDayYear => "m_day_year",
            DateStyle::DayMYear => "day_m_year",
            DateStyle::DayMonthYear => "day_month_year",
            DateStyle::DayMonth => "day_month",
            DateStyle::DayM => "day_m",
            DateStyle::Year => "year",
            DateStyle::Month => "month",
            DateStyle::Day => "day",
            DateStyle::YearMnDay => "year.mn.day",
            DateStyle::YMnDay => "y.mn.day",
            DateStyle::YearWeek => "year_week",
            DateStyle::YearQuarter => "year_quarter",
        }
    }

    pub fn format_date(&self, date: &NaiveDate) -> String {
        let pattern = match self {
            DateStyle::Iso => "%Y-%m-%d",
            DateStyle::WdayMonthDayYear => "%A, %B %-d, %Y",
            DateStyle::WdMDayYear => "%a, %b %-d, %Y",
            DateStyle::WdayDayMonthYear => "%A %-d %B %Y",
            DateStyle::MonthDayYear => "%B %-d, %Y",
            DateStyle::MDayYear => "%b %-d, %Y",
            DateStyle::DayMYear => "%-d %b %Y",
            DateStyle::DayMonthYear => "%-d %B %Y",
            DateStyle::DayMonth => "%-d %B",
            DateStyle::DayM => "%-d %b",
            DateStyle::Year => "%Y",
            DateStyle::Month => "%B",
            DateStyle::Day => "%-d",
            DateStyle::YearMnDay => "%Y/%m/%d",
            DateStyle::YMnDay => "%y/%m/%d",
            DateStyle::YearWeek => "%G-W%V",
            DateStyle::YearQuarter => {
                return format!("{}-Q{}", date.year(), date.month0() / 3 + 1);
            }
        };
        date.format(pattern).to_string()
    }
}

impl FromStr for DateStyle {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DateStyle::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == wanted)
            .ok_or_else(|| FormatError::UnknownStyle { kind: "date", name: s.to_string() })
    }
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named time presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeStyle {
    /// `14:35:00`
    #[default]
    Iso,
    /// `14:35`
    IsoShort,
    /// `2:35:00 PM`
    HMSP,
    /// `2:35 PM`
    HMP,
    /// `2 PM`
    HP,
}

impl TimeStyle {
    pub const ALL: [TimeStyle; 5] = [
        TimeStyle::Iso,
        TimeStyle::IsoShort,
        TimeStyle::HMSP,
        TimeStyle::HMP,
        TimeStyle::HP,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeStyle::Iso => "iso",
            TimeStyle::IsoShort => "iso-short",
            TimeStyle::HMSP => "h_m_s_p",
            TimeStyle::HMP => "h_m_p",
            TimeStyle::HP => "h_p",
        }
    }

    pub fn format_time(&self, time: &NaiveTime) -> String {
        let pattern = match self {
            TimeStyle::Iso => "%H:%M:%S",
            TimeStyle::IsoShort => "%H:%M",
            TimeStyle::HMSP => "%-I:%M:%S %p",
            TimeStyle::HMP => "%-I:%M %p",
            TimeStyle::HP => "%-I %p",
        };
        time.format(pattern).to_string()
    }
}

impl FromStr for TimeStyle {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TimeStyle::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == wanted)
            .ok_or_else(|| FormatError::UnknownStyle { kind: "time", name: s.to_string() })
    }
}

impl fmt::Display for TimeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn incompatible(formatter: &'static str, value: &Value) -> FormatError {
    FormatError::IncompatibleValue {
        formatter,
        value_type: value.type_name(),
        value: value.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateFormat {
    pub style: DateStyle,
}

impl DateFormat {
    pub fn new(style: DateStyle) -> Self {
        Self { style }
    }

    /// Fails with [`FormatError::UnknownStyle`] for names outside the preset list.
    pub fn named(style: &str) -> Result<Self, FormatError> {
        Ok(Self { style: style.parse()? })
    }
}

impl ValueFormatter for DateFormat {
    fn name(&self) -> &'static str {
        "date"
    }

    fn format(&self, value: &Value) -> Result<String, FormatError> {
        value
            .as_date()
            .map(|d| self.style.format_date(&d))
            .ok_or_else(|| incompatible(self.name(), value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeFormat {
    pub style: TimeStyle,
}

impl TimeFormat {
    pub fn new(style: TimeStyle) -> Self {
        Self { style }
    }

    pub fn named(style: &str) -> Result<Self, FormatError> {
        Ok(Self { style: style.parse()? })
    }
}

impl ValueFormatter for TimeFormat {
    fn name(&self) -> &'static str {
        "time"
    }

    fn format(&self, value: &Value) -> Result<String, FormatError> {
        value
            .as_time()
            .map(|t| self.style.format_time(&t))
            .ok_or_else(|| incompatible(self.name(), value))
    }
}

/// Date and time presets joined by a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormat {
    pub date_style: DateStyle,
    pub time_style: TimeStyle,
    pub sep: String,
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        Self {
            date_style: DateStyle::Iso,
            time_style: TimeStyle::Iso,
            sep: " ".to_string(),
        }
    }
}

impl DateTimeFormat {
    pub fn new(date_style: DateStyle, time_style: TimeStyle) -> Self {
        Self { date_style, time_style, ..Default::default() }
    }

    pub fn named(date_style: &str, time_style: &str) -> Result<Self, FormatError> {
        Ok(Self::new(date_style.parse()?, time_style.parse()?))
    }

    pub fn sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }
}

impl ValueFormatter for DateTimeFormat {
    fn name(&self) -> &'static str {
        "datetime"
    }

    fn format(&self, value: &Value) -> Result<String, FormatError> {
        let dt = value.as_datetime().ok_or_else(|| incompatible(self.name(), value))?;
        Ok(format!(
            "{}{}{}",
            self.date_style.format_date(&dt.date()),
            self.sep,
            self.time_style.format_time(&dt.time())
        ))
    }
}
