// vkscript
//
// Copyright (C) 2018 Intel Corporation
// Copyright 2023 Neil Roberts
//
// Permission is hereby granted, free of charge, to any person obtaining a
// copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice (including the next
// paragraph) shall be included in all copies or substantial portions of the
// Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.  IN NO EVENT SHALL
// THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Number parsing for script tokens. Integers are decimal unless they
//! start with `0x`, in which case they are hexadecimal. A leading zero
//! does not make a number octal. Floats are always decimal. Every
//! function skips leading spaces and tabs and returns the unparsed
//! tail so that the caller can decide whether trailing data is an
//! error.

use crate::format::ScalarType;
use crate::half_float;
use crate::value::Value;
use std::num::{IntErrorKind, ParseFloatError, ParseIntError};
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    // The negative sign was used in an unsigned number type
    #[error("Number can’t be negated")]
    NegativeError,
    // A number that would be valid in an unsigned type overflows the
    // signed type
    #[error("Number out of range for type")]
    SignedOverflow,
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
}

impl ParseError {
    /// Whether the text was a well-formed number that doesn’t fit in
    /// the requested type
    pub fn is_overflow(&self) -> bool {
        match self {
            ParseError::SignedOverflow => true,
            ParseError::Int(e) => matches!(
                e.kind(),
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
            ),
            _ => false,
        }
    }
}

struct NumAnalysis<'a> {
    negative: bool,
    radix: u32,
    num_part: &'a str,
    tail: &'a str,
}

// skip only ASCII spaces and tabs
fn skip_blanks(s: &str) -> &str {
    s.trim_start_matches([' ', '\t'])
}

/// Returns whether the token is written as a hexadecimal literal
pub fn is_hex(s: &str) -> bool {
    let s = skip_blanks(s);
    let s = s.strip_prefix(['-', '+']).unwrap_or(s);

    s.starts_with("0x") || s.starts_with("0X")
}

fn analyse_num(s: &str) -> NumAnalysis {
    let s = skip_blanks(s);

    // Optional sign
    let (prefix, negative) = match s.chars().next() {
        Some('-') => (&s[1..], true),
        Some('+') => (&s[1..], false),
        _ => (s, false),
    };

    let (radix, num_start) =
        match prefix.strip_prefix("0x").or_else(|| prefix.strip_prefix("0X")) {
            Some(tail) => (16, tail),
            None => (10, prefix),
        };

    let split_point = num_start
        .chars()
        .take_while(|c| c.is_digit(radix))
        .count();

    NumAnalysis {
        negative,
        radix,
        num_part: &num_start[0..split_point],
        tail: &num_start[split_point..],
    }
}

// Macro to create a function to parse an unsigned int type that also
// returns the tail of the string.
macro_rules! parse_unsigned {
    ($func:ident, $t:ident) => {
        pub fn $func(s: &str) -> Result<($t, &str), ParseError> {
            let analysis = analyse_num(s);

            let num = $t::from_str_radix(analysis.num_part, analysis.radix)?;

            if analysis.negative {
                Err(ParseError::NegativeError)
            } else {
                Ok((num, analysis.tail))
            }
        }
    }
}

// Macro to create a function to parse a signed int type. The number is
// parsed as the unsigned type of the same size first so that hex bit
// patterns and the MIN value can be handled.
macro_rules! parse_signed {
    ($func:ident, $st:ident, $ut:ident) => {
        pub fn $func(s: &str) -> Result<($st, &str), ParseError> {
            let analysis = analyse_num(s);

            let num = $ut::from_str_radix(analysis.num_part, analysis.radix)?;

            if analysis.negative {
                if num > $st::MAX as $ut + 1 {
                    Err(ParseError::SignedOverflow)
                } else {
                    // Negate with !x+1 so that MIN doesn’t overflow
                    Ok(((!num).wrapping_add(1) as $st, analysis.tail))
                }
            } else if num > $st::MAX as $ut {
                Err(ParseError::SignedOverflow)
            } else {
                Ok((num as $st, analysis.tail))
            }
        }
    }
}

parse_unsigned!(parse_u64, u64);
parse_unsigned!(parse_u32, u32);
parse_unsigned!(parse_u16, u16);
parse_unsigned!(parse_u8, u8);
parse_signed!(parse_i64, i64, u64);
parse_signed!(parse_i32, i32, u32);
parse_signed!(parse_i16, i16, u16);
parse_signed!(parse_i8, i8, u8);

// Returns how many ASCII digits are at the start of the string
fn count_digits(s: &str) -> usize {
    s.chars().take_while(char::is_ascii_digit).count()
}

// Length of a special word allowed in place of a float number
fn count_special_word(s: &str) -> Option<usize> {
    ["infinity", "inf", "nan"]
        .into_iter()
        .find(|word| {
            s.len() >= word.len()
                && s.as_bytes()[..word.len()].eq_ignore_ascii_case(word.as_bytes())
        })
        .map(str::len)
}

// Length of the digits and optional decimal point of a float
fn count_number(s: &str) -> Option<usize> {
    let before_digits = count_digits(s);
    let num_end = &s[before_digits..];

    let (n_points, after_digits) = match num_end.strip_prefix('.') {
        Some(digits) => (1, count_digits(digits)),
        None => (0, 0),
    };

    // Either the units or the decimal must be present
    if before_digits > 0 || after_digits > 0 {
        Some(before_digits + n_points + after_digits)
    } else {
        None
    }
}

// Length of an exponent part such as `e-3`
fn count_exp(s: &str) -> Option<usize> {
    let tail = s.strip_prefix(['e', 'E'])?;
    let sign = usize::from(tail.starts_with(['+', '-']));
    let digits = count_digits(&tail[sign..]);

    (digits > 0).then_some(1 + sign + digits)
}

// Splits the string into the float part and the tail
fn split_float(s: &str) -> (&str, &str) {
    let s = skip_blanks(s);
    let mut split_point = usize::from(s.starts_with(['+', '-']));

    if let Some(len) = count_special_word(&s[split_point..]) {
        split_point += len;
    } else if let Some(len) = count_number(&s[split_point..]) {
        split_point += len;

        if let Some(len) = count_exp(&s[split_point..]) {
            split_point += len;
        }
    }

    s.split_at(split_point)
}

pub fn parse_f32(s: &str) -> Result<(f32, &str), ParseError> {
    let (number, tail) = split_float(s);
    Ok((number.parse::<f32>()?, tail))
}

pub fn parse_f64(s: &str) -> Result<(f64, &str), ParseError> {
    let (number, tail) = split_float(s);
    Ok((number.parse::<f64>()?, tail))
}

/// Parses a whole token with one of the functions above. Returns
/// `None` on an error or if anything follows the number.
pub fn parse_token<T, F>(token: &str, func: F) -> Option<T>
where
    F: for<'a> Fn(&'a str) -> Result<(T, &'a str), ParseError>,
{
    match func(token) {
        Ok((value, "")) => Some(value),
        _ => None,
    }
}

/// Parses a whole token as a value of the given scalar type. Returns
/// `None` if the token isn’t a number, has trailing garbage or
/// doesn’t fit in the type. Integers can be written in hexadecimal.
/// Values for half floats are returned as 32-bit floats and are only
/// accepted if [half_float::truncate_f32] can represent them.
pub fn parse_value(scalar: ScalarType, token: &str) -> Option<Value> {
    match scalar {
        ScalarType::Int8 => parse_token(token, parse_i8).map(Value::Int8),
        ScalarType::Int16 => parse_token(token, parse_i16).map(Value::Int16),
        ScalarType::Int32 => parse_token(token, parse_i32).map(Value::Int32),
        ScalarType::Int64 => parse_token(token, parse_i64).map(Value::Int64),
        ScalarType::Uint8 => parse_token(token, parse_u8).map(Value::Uint8),
        ScalarType::Uint16 => {
            parse_token(token, parse_u16).map(Value::Uint16)
        },
        ScalarType::Uint32 => {
            parse_token(token, parse_u32).map(Value::Uint32)
        },
        ScalarType::Uint64 => {
            parse_token(token, parse_u64).map(Value::Uint64)
        },
        ScalarType::Float16 => parse_token(token, parse_f32)
            .filter(|&v| half_float::fits_truncated(v))
            .map(Value::Float32),
        ScalarType::Float32 => {
            parse_token(token, parse_f32).map(Value::Float32)
        },
        ScalarType::Float64 => {
            parse_token(token, parse_f64).map(Value::Float64)
        },
    }
}
