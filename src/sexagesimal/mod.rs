// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Code for handling conversion to and from sexagesimal.

Angles are read in the forms astronomers usually type on the command line:
`12:34:56.7`, `-43:21`, or a plain decimal number. Written angles use the
colon form, e.g. `12:34:56.70` (hours) or `-43:21:00.0` (degrees).
 */

mod error;

use marlu::sexagesimal::sexagesimal_dms_to_degrees;

pub use error::SexagesimalError;

/// Combine sexagesimal fields into a single float. The sign is supplied
/// separately so that inputs like "-0:30:00" keep their sign.
fn signed_dms(negative: bool, [d, m, s]: [f64; 3]) -> f64 {
    let num = sexagesimal_dms_to_degrees(d, m, s);
    if negative {
        -num
    } else {
        num
    }
}

/// Convert a string in "degrees minutes seconds" to a float \[degrees\]. The
/// minutes and seconds fields are optional, so "-30:43:16", "47:23" and
/// "-2.30715" are all valid.
///
/// # Examples
///
/// ```
/// # use obsplan::sexagesimal::*;
/// # use approx::*;
/// # fn main() -> Result<(), SexagesimalError> {
/// let f = parse_degrees("-22:58:52.56")?;
/// assert_abs_diff_eq!(f, -22.981267, epsilon = 1e-6);
/// # Ok(())
/// # }
/// ```
pub fn parse_degrees(s: &str) -> Result<f64, SexagesimalError> {
    let (negative, fields) = parse_colon_fields(s)?;
    Ok(signed_dms(negative, fields))
}

/// Convert a string in "hours minutes seconds" to a float \[degrees\]. As
/// with [`parse_degrees`], trailing fields may be omitted.
///
/// # Examples
///
/// ```
/// # use obsplan::sexagesimal::*;
/// # use approx::*;
/// # fn main() -> Result<(), SexagesimalError> {
/// let f = parse_hours("11:34:23.7854")?;
/// assert_abs_diff_eq!(f, 173.599106, epsilon = 1e-6);
/// # Ok(())
/// # }
/// ```
pub fn parse_hours(s: &str) -> Result<f64, SexagesimalError> {
    let (negative, fields) = parse_colon_fields(s)?;
    Ok(15.0 * signed_dms(negative, fields))
}

fn parse_colon_fields(input: &str) -> Result<(bool, [f64; 3]), SexagesimalError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SexagesimalError::Empty);
    }
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let count = unsigned.split(':').count();
    if count > 3 {
        return Err(SexagesimalError::WrongFieldCount {
            input: input.to_string(),
            count,
        });
    }

    let mut fields = [0.0; 3];
    for (field, out) in unsigned.split(':').zip(fields.iter_mut()) {
        let bad_field = || SexagesimalError::BadField {
            input: input.to_string(),
            field: field.to_string(),
        };
        let value: f64 = field.trim().parse().map_err(|_| bad_field())?;
        // Signs are only allowed at the very start of the string.
        if !value.is_finite() || value.is_sign_negative() || field.trim().starts_with('+') {
            return Err(bad_field());
        }
        *out = value;
    }

    for (which, &value) in ["minutes", "seconds"].into_iter().zip(&fields[1..]) {
        if value >= 60.0 {
            return Err(SexagesimalError::OutOfRange {
                input: input.to_string(),
                which,
                value,
            });
        }
    }

    Ok((negative, fields))
}

/// Split a non-negative number into whole units, minutes and seconds, rounded
/// to `decimals` places of seconds. Rounding carries into the minutes and
/// whole units, so seconds are never printed as "60".
fn split_sexagesimal(value: f64, decimals: usize) -> (u64, u64, f64) {
    let scale = 10_u64.pow(decimals as u32);
    let total = (value * 3600.0 * scale as f64).round() as u64;
    let secs_scaled = total % (60 * scale);
    let minutes = (total / (60 * scale)) % 60;
    let whole = total / (3600 * scale);
    (whole, minutes, secs_scaled as f64 / scale as f64)
}

fn format_fields(negative: bool, value: f64, decimals: usize) -> String {
    let (whole, minutes, seconds) = split_sexagesimal(value, decimals);
    let width = if decimals == 0 { 2 } else { 3 + decimals };
    let negative = negative && (whole, minutes, seconds) != (0, 0, 0.0);
    format!(
        "{sign}{whole}:{minutes:02}:{seconds:0width$.decimals$}",
        sign = if negative { "-" } else { "" },
    )
}

/// Convert a number in degrees to a sexagesimal-formatted string in "hours
/// minutes seconds". The angle is wrapped into [0, 24) hours first.
///
/// # Examples
///
/// ```
/// # use obsplan::sexagesimal::*;
/// assert_eq!(degrees_to_hms(188.7333333), "12:34:56.00");
/// assert_eq!(degrees_to_hms(-15.0), "23:00:00.00");
/// ```
pub fn degrees_to_hms(deg: f64) -> String {
    let hours = deg.rem_euclid(360.0) / 15.0;
    // Rounding up to a whole day should read as 0h.
    let hours = if split_sexagesimal(hours, 2).0 >= 24 {
        0.0
    } else {
        hours
    };
    format_fields(false, hours, 2)
}

/// Convert a number in degrees to a sexagesimal-formatted string in "degrees
/// minutes seconds".
///
/// # Examples
///
/// ```
/// # use obsplan::sexagesimal::*;
/// assert_eq!(degrees_to_dms(-30.7211111), "-30:43:16.0");
/// ```
pub fn degrees_to_dms(deg: f64) -> String {
    format_fields(deg < 0.0, deg.abs(), 1)
}
