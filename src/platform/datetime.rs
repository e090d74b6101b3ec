//! Calendar date and time
//!
//! Calendar arithmetic here is exact (Gregorian, leap years included). It is
//! only used to advance the software RTC; the seconds-since-epoch value handed
//! to the crypto library is computed separately in [`super::clock`].

use core::fmt;

use crate::Error;

const SECS_PER_DAY: u64 = 86_400;

/// Unix epoch as a day count origin for [`days_from_civil`]
const EPOCH_YEAR: u16 = 1970;
const MAX_YEAR: u16 = 9999;

/// Wall-clock reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    /// Validated date and time
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self, Error> {
        let dt = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        dt.validate()?;
        Ok(dt)
    }

    /// Parses `YYYY-MM-DD HH:MM:SS`; `T` is accepted in place of the space.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let b = s.as_bytes();
        if b.len() != 19
            || b[4] != b'-'
            || b[7] != b'-'
            || !matches!(b[10], b' ' | b'T')
            || b[13] != b':'
            || b[16] != b':'
        {
            return Err(Error::InvalidDateTime);
        }

        Self::new(
            digits(&b[0..4])?,
            digits(&b[5..7])? as u8,
            digits(&b[8..10])? as u8,
            digits(&b[11..13])? as u8,
            digits(&b[14..16])? as u8,
            digits(&b[17..19])? as u8,
        )
    }

    pub fn validate(&self) -> Result<(), Error> {
        let in_range = (EPOCH_YEAR..=MAX_YEAR).contains(&self.year)
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60;

        if in_range {
            Ok(())
        } else {
            Err(Error::InvalidDateTime)
        }
    }

    /// The same instant `secs` seconds later
    pub fn add_secs(&self, secs: u64) -> Result<Self, Error> {
        let days = days_from_civil(self.year, self.month, self.day);
        let time = u64::from(self.hour) * 3600 + u64::from(self.minute) * 60 + u64::from(self.second);

        let total = time.checked_add(secs).ok_or(Error::InvalidDateTime)?;
        let days = days
            .checked_add(total / SECS_PER_DAY)
            .ok_or(Error::InvalidDateTime)?;
        let rem = total % SECS_PER_DAY;

        let (year, month, day) = civil_from_days(days);
        if year > u64::from(MAX_YEAR) {
            return Err(Error::InvalidDateTime);
        }

        Ok(Self {
            year: year as u16,
            month,
            day,
            hour: (rem / 3600) as u8,
            minute: (rem % 3600 / 60) as u8,
            second: (rem % 60) as u8,
        })
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

fn digits(b: &[u8]) -> Result<u16, Error> {
    b.iter().try_fold(0u16, |acc, &c| {
        if c.is_ascii_digit() {
            Ok(acc * 10 + u16::from(c - b'0'))
        } else {
            Err(Error::InvalidDateTime)
        }
    })
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Days since 1970-01-01. Only called with validated dates, so the year is
/// never before the epoch.
fn days_from_civil(year: u16, month: u8, day: u8) -> u64 {
    // Shift the year to start in March so the leap day is last
    let y = u64::from(year) - u64::from(month <= 2);
    let era = y / 400;
    let yoe = y - era * 400;
    let mp = (u64::from(month) + 9) % 12;
    let doy = (153 * mp + 2) / 5 + u64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(days: u64) -> (u64, u8, u8) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}
