use crate::datamodel::CellValue;
use hifitime::{Epoch, Unit};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{eof, map, map_res},
    sequence::terminated,
};

/// ISO weekday of January 4th, Monday is 1 and Sunday is 7.
fn iso_weekday_of_january_4(year: i32) -> i64 {
    // Sakamoto's method, January and February count in the previous year
    let y = year as i64 - 1;
    let sunday_based = (y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400) + 4).rem_euclid(7);
    if sunday_based == 0 { 7 } else { sunday_based }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// 53 when January 1st is a Thursday, or a Wednesday of a leap year.
fn iso_weeks_in_year(year: i32) -> u32 {
    match iso_weekday_of_january_4(year) {
        7 => 53,
        6 if is_leap_year(year) => 53,
        _ => 52,
    }
}

fn epoch_from_iso8601_date(date: iso8601::Date) -> Option<Epoch> {
    let (year, month, day) = match date {
        iso8601::Date::YMD { year, month, day } => (year, month, day),
        iso8601::Date::Week { year, .. } | iso8601::Date::Ordinal { year, .. } => (year, 1, 1),
    };
    let mut epoch = Epoch::maybe_from_gregorian_utc(
        year,
        u8::try_from(month).ok()?,
        u8::try_from(day).ok()?,
        0,
        0,
        0,
        0,
    )
    .ok()?;

    // Week and ordinal dates are offsets from the first of January.
    match date {
        iso8601::Date::YMD { .. } => {}
        iso8601::Date::Week { ww, d, .. } => {
            if !(1..=iso_weeks_in_year(year)).contains(&ww) || !(1..=7).contains(&d) {
                return None;
            }
            // Week 1 starts on the Monday of the week holding January 4th
            let first_monday = 3 - (iso_weekday_of_january_4(year) - 1);
            epoch += Unit::Day * (first_monday + 7 * (ww as i64 - 1) + (d as i64 - 1));
        }
        iso8601::Date::Ordinal { ddd, .. } => {
            let days_in_year = if is_leap_year(year) { 366 } else { 365 };
            if !(1..=days_in_year).contains(&ddd) {
                return None;
            }
            epoch += Unit::Day * (ddd as i64 - 1);
        }
    };
    Some(epoch)
}

fn epoch_from_iso8601_datetime(dt: iso8601::DateTime) -> Option<Epoch> {
    let iso8601::DateTime { date, time } = dt;
    let iso8601::Time {
        hour,
        minute,
        second,
        millisecond,
        tz_offset_hours,
        tz_offset_minutes,
    } = time;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    let midnight = epoch_from_iso8601_date(date)?;
    let local = midnight
        + Unit::Hour * hour as i64
        + Unit::Minute * minute as i64
        + Unit::Second * second as i64
        + Unit::Millisecond * millisecond as i64;

    // Local time minus the offset gives UTC.
    Some(local - Unit::Hour * tz_offset_hours as i64 - Unit::Minute * tz_offset_minutes as i64)
}

pub fn parse_iso8601_datetime(data: &str) -> Option<Epoch> {
    match iso8601::parsers::parse_datetime(data.as_bytes()) {
        Ok((rest, dt)) if rest.is_empty() => epoch_from_iso8601_datetime(dt),
        _ => None,
    }
}

pub fn parse_iso8601_date(data: &str) -> Option<Epoch> {
    match iso8601::parsers::parse_date(data.as_bytes()) {
        Ok((rest, date)) if rest.is_empty() => epoch_from_iso8601_date(date),
        _ => None,
    }
}

fn year(data: &str) -> IResult<&str, i32> {
    map_res(take_while_m_n(4, 4, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<i32>()
    })
    .parse(data)
}

fn month_or_day(data: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 2, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<u8>()
    })
    .parse(data)
}

// 2024/01/31
fn year_first_slash_date(data: &str) -> IResult<&str, (i32, u8, u8)> {
    map(
        (year, char('/'), month_or_day, char('/'), month_or_day),
        |(year, _, month, _, day)| (year, month, day),
    )
    .parse(data)
}

// 01/31/2024, month first like most US spreadsheets
fn month_first_slash_date(data: &str) -> IResult<&str, (i32, u8, u8)> {
    map(
        (month_or_day, char('/'), month_or_day, char('/'), year),
        |(month, _, day, _, year)| (year, month, day),
    )
    .parse(data)
}

pub fn parse_slash_date(data: &str) -> Option<Epoch> {
    let result: IResult<&str, (i32, u8, u8)> =
        terminated(alt((year_first_slash_date, month_first_slash_date)), eof).parse(data);
    match result {
        Ok((_, (year, month, day))) => {
            Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0).ok()
        }
        Err(_) => None,
    }
}

/// Parses a calendar date or date-time, `None` when it is not a real day.
pub fn parse_calendar_date(data: &str) -> Option<Epoch> {
    let data = data.trim();
    if data.is_empty() {
        return None;
    }
    parse_iso8601_datetime(data)
        .or_else(|| {
            // "2024-01-01 10:00:00" is common in exports
            if data.contains(' ') {
                parse_iso8601_datetime(&data.replacen(' ', "T", 1))
            } else {
                None
            }
        })
        .or_else(|| parse_iso8601_date(data))
        .or_else(|| parse_slash_date(data))
}

/// Numbers are never dates, even when a date parser would accept them.
pub fn parse_date_cell(cell: &CellValue) -> Option<Epoch> {
    match cell {
        CellValue::Text(text) => parse_calendar_date(text),
        CellValue::Number(_) | CellValue::Missing => None,
    }
}

pub fn is_date(cell: &CellValue) -> bool {
    parse_date_cell(cell).is_some()
}
