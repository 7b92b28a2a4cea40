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

//! The recognized two-letter USPS codes: 50 states, DC, and the
//! territories that can host a federally recognized Tribe's award
//! history. Shared by registry validation and matcher state filtering so
//! "invalid code" and "unknown code" mean the same thing everywhere.

pub const VALID_STATE_CODES: [&str; 57] = [
	"AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME",
	"MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA",
	"RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY", "DC", "AS", "GU", "MP", "PR", "VI", "UM",
];

pub fn is_valid_state_code(code: &str) -> bool {
	let upper = code.to_uppercase();
	VALID_STATE_CODES.contains(&upper.as_str())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn recognizes_real_codes_case_insensitively() {
		assert!(is_valid_state_code("az"));
		assert!(is_valid_state_code("WA"));
	}

	#[test]
	fn rejects_fabricated_codes() {
		assert!(!is_valid_state_code("ZZ"));
		assert!(!is_valid_state_code("ARIZONA"));
	}
}
