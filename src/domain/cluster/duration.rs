// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::Duration;

/// Parse a relative duration such as `90s`, `2h`, `1h30m` or `1.5h`.
///
/// A sequence of decimal numbers, each with an optional fraction and a unit
/// suffix (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`), with an optional leading
/// sign. `0` on its own is accepted.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let input = s.trim();
    if input.is_empty() {
        return Err("duration cannot be empty".to_string());
    }

    let (negative, mut remaining) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    if remaining == "0" {
        return Ok(Duration::zero());
    }
    if remaining.is_empty() {
        return Err(format!("invalid duration '{}'", s));
    }

    let mut total_nanos: i128 = 0;
    while !remaining.is_empty() {
        let num_end = remaining
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(remaining.len());
        if num_end == 0 {
            return Err(format!(
                "expected a number at position {} in '{}'",
                input.len() - remaining.len(),
                s
            ));
        }
        let number = &remaining[..num_end];
        remaining = &remaining[num_end..];

        let unit_end = remaining
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(remaining.len());
        let unit = &remaining[..unit_end];
        remaining = &remaining[unit_end..];

        let unit_nanos: i128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            "" => return Err(format!("missing unit in duration '{}'", s)),
            other => return Err(format!("unknown unit '{}' in duration '{}'", other, s)),
        };

        let component =
            scale(number, unit_nanos).ok_or_else(|| format!("invalid duration '{}'", s))?;
        total_nanos = total_nanos
            .checked_add(component)
            .filter(|n| *n <= i64::MAX as i128)
            .ok_or_else(|| format!("duration '{}' is out of range", s))?;
    }

    let nanos = total_nanos as i64;
    Ok(Duration::nanoseconds(if negative { -nanos } else { nanos }))
}

fn scale(number: &str, unit_nanos: i128) -> Option<i128> {
    let (whole, fraction) = match number.split_once('.') {
        Some((w, f)) => (w, f),
        None => (number, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.contains('.') {
        return None;
    }

    let whole: i128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let nanos = whole.checked_mul(unit_nanos)?;

    let mut divisor: i128 = 1;
    let mut frac_value: i128 = 0;
    for digit in fraction.chars().take(18) {
        frac_value = frac_value * 10 + digit.to_digit(10)? as i128;
        divisor *= 10;
    }
    nanos.checked_add(frac_value * unit_nanos / divisor)
}
