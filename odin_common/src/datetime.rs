/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::{fmt, time::Duration};
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeDelta, Utc};
use serde::{Serialize,Deserialize,Serializer};

/// the day format we use for display and for calendar day configs ("YYYY-MM-dd")
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

pub fn fmt_date (date: &NaiveDate)->String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date (s: &str)->Result<NaiveDate,chrono::ParseError> {
    NaiveDate::parse_from_str( s, DATE_FORMAT)
}

/// serde helper to serialize a NaiveDate as "YYYY-MM-dd" (use with `#[serde(serialize_with=..)]`)
pub fn ser_date<S: Serializer> (date: &NaiveDate, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_str( &fmt_date(date))
}

/// a half open [start,end) range of calendar days (UTC).
/// `end` is the first day that is not included, which is how imagery archives interpret date filters
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new (start: NaiveDate, end: NaiveDate)->Self {
        DateRange { start, end }
    }

    pub fn parse (start: &str, end: &str)->Result<Self,chrono::ParseError> {
        Ok( DateRange { start: parse_date(start)?, end: parse_date(end)? } )
    }

    pub fn start_datetime (&self)->DateTime<Utc> {
        self.start.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
    }

    pub fn end_datetime (&self)->DateTime<Utc> {
        self.end.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
    }

    pub fn is_empty (&self)->bool {
        self.end <= self.start
    }

    pub fn contains (&self, dt: &DateTime<Utc>)->bool {
        *dt >= self.start_datetime() && *dt < self.end_datetime()
    }

    /// closed RFC 3339 interval as used by STAC `datetime` search parameters.
    /// Since those intervals are inclusive we end one second before our (exclusive) end day
    pub fn to_rfc3339_interval (&self)->String {
        let last = self.end_datetime() - TimeDelta::seconds(1);
        format!("{}/{}", self.start_datetime().to_rfc3339_opts(SecondsFormat::Secs, true), last.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", fmt_date(&self.start), fmt_date(&self.end))
    }
}
