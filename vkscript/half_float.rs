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

use half::f16;

// Exponent bias difference between a 32-bit float and a half float
const EXPONENT_REBIAS: u32 = 127 - 15;

fn rebiased_exponent(val: f32) -> Option<u32> {
    let exponent = (val.to_bits() >> 23) & 0xff;

    // Zero and denormals have nothing to rebias
    if exponent == 0 {
        return Some(0);
    }

    exponent
        .checked_sub(EXPONENT_REBIAS)
        .filter(|e| e & !0x1f == 0)
}

/// Returns whether [truncate_f32] can represent the value without
/// overflowing the 5-bit exponent of a half float.
pub fn fits_truncated(val: f32) -> bool {
    rebiased_exponent(val).is_some()
}

/// Converts a 32-bit float to the bits of a half float by truncation.
/// The sign is copied, the exponent is rebiased and the mantissa
/// keeps its top 10 bits. No rounding is done. Zero and denormal
/// inputs become a signed zero.
///
/// Panics if the exponent does not fit in 5 bits. Callers that take
/// values from user input should check [fits_truncated] first.
pub fn truncate_f32(val: f32) -> u16 {
    let bits = val.to_bits();
    let sign = (bits >> 31) & 1;

    let exponent = match rebiased_exponent(val) {
        Some(e) => e,
        None => panic!("exponent of {} overflows a half float", val),
    };

    let mantissa = if (bits >> 23) & 0xff == 0 {
        0
    } else {
        (bits & 0x7fffff) >> 13
    };

    ((sign << 15) | (exponent << 10) | mantissa) as u16
}

#[inline]
pub fn to_f32(half: u16) -> f32 {
    f16::from_bits(half).to_f32()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_truncate_f32() {
        assert_eq!(truncate_f32(1.0), 0x3c00);
        assert_eq!(truncate_f32(-2.0), 0xc000);
        assert_eq!(truncate_f32(0.5), 0x3800);
        assert_eq!(truncate_f32(0.0), 0);
        assert_eq!(truncate_f32(-0.0), 0x8000);
        assert_eq!(truncate_f32(1.0 / 3.0), 0x3555);
        assert_eq!(truncate_f32(-1.0 / 3.0), 0xb555);
        // Rounding would give 0x3c01
        assert_eq!(truncate_f32(1.0008544921875), 0x3c00);
        assert_eq!(f16::from_f32(1.0008544921875).to_bits(), 0x3c01);
        assert_eq!(truncate_f32(65504.0), 0x7bff);
    }

    #[test]
    fn test_fits_truncated() {
        assert!(fits_truncated(1.0));
        assert!(fits_truncated(0.0));
        assert!(fits_truncated(65504.0));
        assert!(!fits_truncated(1.0e-10));
        assert!(!fits_truncated(1.0e10));
        assert!(!fits_truncated(f32::INFINITY));
    }

    #[test]
    #[should_panic]
    fn test_truncate_overflow() {
        truncate_f32(1.0e10);
    }

    #[test]
    fn test_to_f32() {
        assert_eq!(to_f32(0x7c00), f32::INFINITY);
        assert_eq!(to_f32(0xfc00), -f32::INFINITY);
        assert_eq!(to_f32(0x3c00), 1.0);
        assert_eq!(to_f32(truncate_f32(0.75)), 0.75);
    }
}
