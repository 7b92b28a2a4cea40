// Copyright 2026 Tribal Policy Intelligence Team
// This file is part of the packet orchestration subsystem.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Federal fiscal year arithmetic. The fiscal year starts October 1 of the
//! prior calendar year; every computation here is derived from
//! `FISCAL_YEAR_START_MONTH` so no string-literal fiscal year ever appears
//! downstream.

use crate::config::FISCAL_YEAR_START_MONTH;
use chrono::{Datelike, NaiveDate};

/// Federal fiscal year containing `date`. FY(n) spans Oct 1 (n-1) .. Sep 30
/// (n), so any date in Oct-Dec belongs to the *next* calendar year's FY.
pub fn fiscal_year_of(date: NaiveDate) -> i32 {
	if date.month() >= FISCAL_YEAR_START_MONTH {
		date.year() + 1
	} else {
		date.year()
	}
}

/// Inclusive calendar-date bounds of fiscal year `fy`.
pub fn fiscal_year_bounds(fy: i32) -> (NaiveDate, NaiveDate) {
	let start = NaiveDate::from_ymd_opt(fy - 1, FISCAL_YEAR_START_MONTH, 1)
		.expect("fiscal year start is always a valid calendar date");
	let end = NaiveDate::from_ymd_opt(fy, FISCAL_YEAR_START_MONTH, 1)
		.expect("fiscal year end bound is always a valid calendar date")
		.pred_opt()
		.expect("October 1 is never the epoch");
	(start, end)
}

/// Midpoint used by the trend-label split: the fiscal year strictly before
/// the midpoint is the "first half", the rest is the "second half". When
/// the window has a single year, the midpoint equals that year (first half
/// is empty).
pub fn window_midpoint(start_fy: i32, end_fy: i32) -> i32 {
	start_fy + (end_fy - start_fy + 1) / 2
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn october_rolls_into_next_fiscal_year() {
		let d = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
		assert_eq!(fiscal_year_of(d), 2026);
	}

	#[test]
	fn september_stays_in_current_fiscal_year() {
		let d = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
		assert_eq!(fiscal_year_of(d), 2026);
	}

	#[test]
	fn bounds_round_trip() {
		let (start, end) = fiscal_year_bounds(2026);
		assert_eq!(fiscal_year_of(start), 2026);
		assert_eq!(fiscal_year_of(end), 2026);
		assert_eq!(start, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
		assert_eq!(end, NaiveDate::from_ymd_opt(2026, 9, 30).unwrap());
	}

	#[test]
	fn midpoint_splits_even_window() {
		assert_eq!(window_midpoint(2020, 2023), 2022);
	}
}
