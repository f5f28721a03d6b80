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

//! A typed block of memory. A [Buffer] owns a byte vector laid out as
//! a sequence of elements described by a [Format]. Values are encoded
//! into the bytes component by component in little-endian order and
//! two buffers can be compared either exactly or with a root mean
//! square error tolerance.

use crate::format::{Format, ScalarType};
use crate::half_float;
use crate::value::Value;
use byteorder::{ByteOrder, LittleEndian};
use half::f16;
use std::cmp;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferType {
    Color,
    Depth,
    Index,
    Vertex,
    Storage,
    Uniform,
}

#[derive(Debug, Error, PartialEq)]
pub enum BufferError {
    #[error("Buffers have a different format")]
    DifferentFormat,
    #[error("Buffers have a different size")]
    DifferentSize,
    #[error("Buffers have a different width")]
    DifferentWidth,
    #[error("Buffers have a different height")]
    DifferentHeight,
    #[error("Buffers have a different number of values")]
    DifferentValueCount,
    #[error(
        "Buffers have different values. {count} values differed, first \
         difference at byte {index} values {left} != {right}"
    )]
    ValuesDiffer {
        count: usize,
        index: usize,
        left: u8,
        right: u8,
    },
    #[error(
        "Root Mean Square Error of {rmse:.6} is greater than tolerance of \
         {tolerance:.6}"
    )]
    RmseExceeded { rmse: f64, tolerance: f32 },
    #[error("Mismatched number of items in buffer")]
    MismatchedItems,
}

#[derive(Debug, Clone)]
pub struct Buffer {
    buffer_type: BufferType,
    format: Format,
    // Set when the format was picked without the script naming one
    format_is_default: bool,
    bytes: Vec<u8>,
    element_count: usize,
    width: u32,
    height: u32,
    // Zero if no maximum has been recorded
    max_size_in_bytes: usize,
    // Vertex attribute location
    location: Option<u32>,
    // Descriptor set and binding
    binding: Option<(u32, u32)>,
}

/// Encodes the value as the given scalar type at the start of `dest`
/// and returns the number of bytes written. Half floats are truncated
/// from the 32-bit float value, see [half_float::truncate_f32].
pub fn write_value_from_component(
    value: &Value,
    scalar: ScalarType,
    dest: &mut [u8],
) -> usize {
    match scalar {
        ScalarType::Int8 => dest[0] = value.as_i8() as u8,
        ScalarType::Int16 => LittleEndian::write_i16(dest, value.as_i16()),
        ScalarType::Int32 => LittleEndian::write_i32(dest, value.as_i32()),
        ScalarType::Int64 => LittleEndian::write_i64(dest, value.as_i64()),
        ScalarType::Uint8 => dest[0] = value.as_u8(),
        ScalarType::Uint16 => LittleEndian::write_u16(dest, value.as_u16()),
        ScalarType::Uint32 => LittleEndian::write_u32(dest, value.as_u32()),
        ScalarType::Uint64 => LittleEndian::write_u64(dest, value.as_u64()),
        ScalarType::Float16 => LittleEndian::write_u16(
            dest,
            half_float::truncate_f32(value.as_f32()),
        ),
        ScalarType::Float32 => LittleEndian::write_f32(dest, value.as_f32()),
        ScalarType::Float64 => LittleEndian::write_f64(dest, value.as_f64()),
    }

    scalar.size()
}

/// Decodes a value of the given scalar type from the start of `src`
pub fn read_value_from_component(scalar: ScalarType, src: &[u8]) -> Value {
    match scalar {
        ScalarType::Int8 => Value::Int8(src[0] as i8),
        ScalarType::Int16 => Value::Int16(LittleEndian::read_i16(src)),
        ScalarType::Int32 => Value::Int32(LittleEndian::read_i32(src)),
        ScalarType::Int64 => Value::Int64(LittleEndian::read_i64(src)),
        ScalarType::Uint8 => Value::Uint8(src[0]),
        ScalarType::Uint16 => Value::Uint16(LittleEndian::read_u16(src)),
        ScalarType::Uint32 => Value::Uint32(LittleEndian::read_u32(src)),
        ScalarType::Uint64 => Value::Uint64(LittleEndian::read_u64(src)),
        ScalarType::Float16 => {
            Value::Float16(f16::from_bits(LittleEndian::read_u16(src)))
        },
        ScalarType::Float32 => Value::Float32(LittleEndian::read_f32(src)),
        ScalarType::Float64 => Value::Float64(LittleEndian::read_f64(src)),
    }
}

// Subtracts the component in `b` from the one in `a` using the
// arithmetic of the scalar type. Integers wrap before being widened.
fn component_difference(scalar: ScalarType, a: &[u8], b: &[u8]) -> f64 {
    match scalar {
        ScalarType::Int8 => (a[0] as i8).wrapping_sub(b[0] as i8) as f64,
        ScalarType::Int16 => {
            LittleEndian::read_i16(a).wrapping_sub(LittleEndian::read_i16(b))
                as f64
        },
        ScalarType::Int32 => {
            LittleEndian::read_i32(a).wrapping_sub(LittleEndian::read_i32(b))
                as f64
        },
        ScalarType::Int64 => {
            LittleEndian::read_i64(a).wrapping_sub(LittleEndian::read_i64(b))
                as f64
        },
        ScalarType::Uint8 => a[0].wrapping_sub(b[0]) as f64,
        ScalarType::Uint16 => {
            LittleEndian::read_u16(a).wrapping_sub(LittleEndian::read_u16(b))
                as f64
        },
        ScalarType::Uint32 => {
            LittleEndian::read_u32(a).wrapping_sub(LittleEndian::read_u32(b))
                as f64
        },
        ScalarType::Uint64 => {
            LittleEndian::read_u64(a).wrapping_sub(LittleEndian::read_u64(b))
                as f64
        },
        ScalarType::Float16 => {
            let a = half_float::to_f32(LittleEndian::read_u16(a));
            let b = half_float::to_f32(LittleEndian::read_u16(b));
            (a - b) as f64
        },
        ScalarType::Float32 => {
            (LittleEndian::read_f32(a) - LittleEndian::read_f32(b)) as f64
        },
        ScalarType::Float64 => {
            LittleEndian::read_f64(a) - LittleEndian::read_f64(b)
        },
    }
}

impl Buffer {
    pub fn new(buffer_type: BufferType, format: Format) -> Buffer {
        Buffer {
            buffer_type,
            format,
            format_is_default: false,
            bytes: Vec::new(),
            element_count: 0,
            width: 1,
            height: 1,
            max_size_in_bytes: 0,
            location: None,
            binding: None,
        }
    }

    #[inline]
    pub fn buffer_type(&self) -> BufferType {
        self.buffer_type
    }

    #[inline]
    pub fn format(&self) -> &Format {
        &self.format
    }

    /// Replaces the format. The existing bytes are kept and the
    /// element count is recalculated, rounding up to whole elements.
    pub fn set_format(&mut self, format: Format) {
        let size_in_bytes = self.bytes.len();

        self.format = format;
        self.element_count = 0;
        self.set_size_in_elements(
            size_in_bytes.div_ceil(self.format.size_in_bytes())
        );
    }

    /// Whether the format is a placeholder that a later command can
    /// replace
    #[inline]
    pub fn format_is_default(&self) -> bool {
        self.format_is_default
    }

    pub fn set_format_is_default(&mut self, format_is_default: bool) {
        self.format_is_default = format_is_default;
    }

    #[inline]
    pub fn location(&self) -> Option<u32> {
        self.location
    }

    pub fn set_location(&mut self, location: u32) {
        self.location = Some(location);
    }

    /// The descriptor set and binding of a storage or uniform buffer
    #[inline]
    pub fn binding(&self) -> Option<(u32, u32)> {
        self.binding
    }

    pub fn set_binding(&mut self, desc_set: u32, binding: u32) {
        self.binding = Some((desc_set, binding));
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Number of input values needed to fill every element
    pub fn value_count(&self) -> usize {
        self.element_count * self.format.input_needed_per_element()
    }

    /// Sets the element count from a number of input values. Values
    /// that don’t fill a whole element are dropped.
    pub fn set_value_count(&mut self, count: usize) {
        let input_needed = self.format.input_needed_per_element();
        self.set_size_in_elements(count / input_needed);
    }

    pub fn set_size_in_elements(&mut self, element_count: usize) {
        if element_count != self.element_count {
            log::trace!(
                "resizing {:?} buffer from {} to {} elements",
                self.buffer_type,
                self.element_count,
                element_count,
            );
        }

        self.element_count = element_count;
        self.bytes.resize(element_count * self.format.size_in_bytes(), 0);
    }

    /// Sets the size in bytes. The size must be a whole number of
    /// elements.
    pub fn set_size_in_bytes(&mut self, size_in_bytes: usize) {
        let element_size = self.format.size_in_bytes();

        assert!(
            size_in_bytes % element_size == 0,
            "{} bytes is not a multiple of the element size {}",
            size_in_bytes,
            element_size,
        );

        self.set_size_in_elements(size_in_bytes / element_size);
    }

    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.element_count * self.format.size_in_bytes()
    }

    /// The largest size recorded with [set_max_size_in_bytes] or
    /// [recalculate_max_size_in_bytes], or the current size if there
    /// is none.
    ///
    /// [set_max_size_in_bytes]: Buffer::set_max_size_in_bytes
    /// [recalculate_max_size_in_bytes]: Buffer::recalculate_max_size_in_bytes
    pub fn max_size_in_bytes(&self) -> usize {
        if self.max_size_in_bytes == 0 {
            self.size_in_bytes()
        } else {
            self.max_size_in_bytes
        }
    }

    pub fn set_max_size_in_bytes(&mut self, max_size_in_bytes: usize) {
        self.max_size_in_bytes = max_size_in_bytes;
    }

    // Byte offset just past the last component written when
    // `n_values` values are encoded starting at `offset`
    fn data_end(&self, n_values: usize, offset: usize) -> usize {
        let n_elements =
            n_values.div_ceil(self.format.input_needed_per_element());

        self.format
            .components(offset, n_elements)
            .take(n_values)
            .map(|(scalar, pos)| pos + scalar.size())
            .max()
            .unwrap_or(offset)
    }

    // Number of elements needed to hold the whole elements of `data`
    // written at `offset`. Trailing values that don’t fill an element
    // are not counted.
    fn elements_for_data(&self, data: &[Value], offset: usize) -> usize {
        let input_needed = self.format.input_needed_per_element();
        let n_values = (data.len() / input_needed) * input_needed;

        if n_values == 0 {
            return 0;
        }

        self.data_end(n_values, offset)
            .div_ceil(self.format.size_in_bytes())
    }

    /// Grows the recorded maximum size to cover `data` written at
    /// `offset` and returns the new maximum. The maximum is never
    /// reduced below [max_size_in_bytes](Buffer::max_size_in_bytes).
    pub fn recalculate_max_size_in_bytes(
        &mut self,
        data: &[Value],
        offset: usize,
    ) -> usize {
        let new_size =
            self.elements_for_data(data, offset) * self.format.size_in_bytes();

        if new_size > self.max_size_in_bytes() {
            self.max_size_in_bytes = new_size;
        }

        self.max_size_in_bytes()
    }

    #[inline]
    pub fn set_data(&mut self, data: &[Value]) -> Result<(), BufferError> {
        self.set_data_with_offset(data, 0)
    }

    /// Encodes `data` into the buffer starting at the byte `offset`.
    /// The offset doesn’t need to be at the start of an element. The
    /// buffer grows to hold the whole elements of the data but it is
    /// never shrunk. The bytes covered by the data are zeroed before
    /// writing and padding segments are skipped without consuming a
    /// value. Fails without modifying the buffer if a trailing
    /// partial element doesn’t fit.
    pub fn set_data_with_offset(
        &mut self,
        data: &[Value],
        offset: usize,
    ) -> Result<(), BufferError> {
        let element_size = self.format.size_in_bytes();
        let input_needed = self.format.input_needed_per_element();

        let element_count = cmp::max(
            self.element_count,
            self.elements_for_data(data, offset),
        );

        if self.data_end(data.len(), offset) > element_count * element_size {
            return Err(BufferError::MismatchedItems);
        }

        self.set_size_in_elements(element_count);

        let new_space = (data.len() / input_needed) * element_size;
        let fill_end = cmp::min(offset + new_space, self.bytes.len());

        if fill_end > offset {
            self.bytes[offset..fill_end].fill(0);
        }

        let n_elements = data.len().div_ceil(input_needed);

        for ((scalar, pos), value) in self
            .format
            .components(offset, n_elements)
            .zip(data.iter())
        {
            write_value_from_component(value, scalar, &mut self.bytes[pos..]);
        }

        Ok(())
    }

    /// Copies the raw bytes of `src` to `offset` in this buffer. The
    /// element count is recalculated from the new length. If the
    /// length isn’t a whole number of elements the last element is
    /// completed with zeros so that the byte length always matches
    /// the element count.
    pub fn set_data_from_buffer(&mut self, src: &Buffer, offset: usize) {
        let end = offset + src.bytes.len();

        if self.bytes.len() < end {
            self.bytes.resize(end, 0);
        }

        self.bytes[offset..end].copy_from_slice(&src.bytes);

        let element_size = self.format.size_in_bytes();
        self.set_size_in_elements(self.bytes.len().div_ceil(element_size));
    }

    /// Copies the contents into `dst` which must have the same format
    /// and dimensions.
    pub fn copy_to(&self, dst: &mut Buffer) -> Result<(), BufferError> {
        if !dst.format.equal(&self.format) {
            return Err(BufferError::DifferentFormat);
        }
        if dst.width != self.width {
            return Err(BufferError::DifferentWidth);
        }
        if dst.height != self.height {
            return Err(BufferError::DifferentHeight);
        }
        if dst.element_count != self.element_count {
            return Err(BufferError::DifferentSize);
        }

        dst.bytes.clone_from(&self.bytes);

        Ok(())
    }

    /// Decodes every component of every element
    pub fn values(&self) -> Vec<Value> {
        self.format
            .components(0, self.element_count)
            .map(|(scalar, pos)| {
                read_value_from_component(scalar, &self.bytes[pos..])
            })
            .collect()
    }

    fn check_shape(&self, other: &Buffer) -> Result<(), BufferError> {
        if !self.format.equal(&other.format) {
            return Err(BufferError::DifferentFormat);
        }
        if self.element_count != other.element_count {
            return Err(BufferError::DifferentSize);
        }
        if self.width != other.width {
            return Err(BufferError::DifferentWidth);
        }
        if self.height != other.height {
            return Err(BufferError::DifferentHeight);
        }

        Ok(())
    }

    /// Checks that the buffers have the same shape and exactly the
    /// same bytes. On a mismatch the error reports the number of
    /// differing bytes and the first one.
    pub fn is_equal(&self, other: &Buffer) -> Result<(), BufferError> {
        self.check_shape(other)?;

        if self.bytes.len() != other.bytes.len() {
            return Err(BufferError::DifferentValueCount);
        }

        let mut first_difference = None;
        let mut count = 0;

        for (index, (&left, &right)) in
            self.bytes.iter().zip(other.bytes.iter()).enumerate()
        {
            if left != right {
                first_difference.get_or_insert((index, left, right));
                count += 1;
            }
        }

        match first_difference {
            None => Ok(()),
            Some((index, left, right)) => {
                log::debug!("{} bytes differ between buffers", count);
                Err(BufferError::ValuesDiffer { count, index, left, right })
            },
        }
    }

    /// Returns the difference of each component of this buffer and
    /// `other` in order. Panics if the buffers don’t have the same
    /// format and size, which callers must check first.
    pub fn calculate_diffs(&self, other: &Buffer) -> Vec<f64> {
        assert!(
            self.format.equal(&other.format)
                && self.bytes.len() == other.bytes.len(),
            "diffing buffers with a different layout",
        );

        self.format
            .components(0, self.element_count)
            .map(|(scalar, pos)| {
                component_difference(
                    scalar,
                    &self.bytes[pos..],
                    &other.bytes[pos..],
                )
            })
            .collect()
    }

    /// Succeeds if the root mean square of the component differences
    /// is no greater than `tolerance`.
    pub fn compare_rmse(
        &self,
        other: &Buffer,
        tolerance: f32,
    ) -> Result<(), BufferError> {
        self.check_shape(other)?;

        if self.value_count() != other.value_count() {
            return Err(BufferError::DifferentValueCount);
        }

        let diffs = self.calculate_diffs(other);

        if diffs.is_empty() {
            return Ok(());
        }

        let sum = diffs.iter().map(|d| d * d).sum::<f64>();
        let rmse = (sum / diffs.len() as f64).sqrt();

        if rmse > tolerance as f64 {
            log::debug!("buffer RMSE {} exceeds {}", rmse, tolerance);
            Err(BufferError::RmseExceeded { rmse, tolerance })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::format::LayoutStd;

    fn make_buffer(format_name: &str, values: &[Value]) -> Buffer {
        let format = Format::lookup_by_name(format_name).unwrap();
        let mut buffer = Buffer::new(BufferType::Storage, format);
        buffer.set_data(values).unwrap();
        buffer
    }

    fn floats(values: &[f32]) -> Vec<Value> {
        values.iter().map(|&v| Value::Float32(v)).collect()
    }

    #[test]
    fn test_write_value_from_component() {
        let mut bytes = [0u8; 8];

        assert_eq!(
            write_value_from_component(
                &Value::Int32(-2),
                ScalarType::Int32,
                &mut bytes,
            ),
            4,
        );
        assert_eq!(&bytes[0..4], &(-2i32).to_le_bytes());

        assert_eq!(
            write_value_from_component(
                &Value::Uint64(0x0102030405060708),
                ScalarType::Uint64,
                &mut bytes,
            ),
            8,
        );
        assert_eq!(bytes, [8, 7, 6, 5, 4, 3, 2, 1]);

        assert_eq!(
            write_value_from_component(
                &Value::Float64(1.0),
                ScalarType::Float16,
                &mut bytes,
            ),
            2,
        );
        assert_eq!(&bytes[0..2], &[0x00, 0x3c]);

        // The value is converted to the scalar type
        assert_eq!(
            write_value_from_component(
                &Value::Uint32(300),
                ScalarType::Uint8,
                &mut bytes,
            ),
            1,
        );
        assert_eq!(bytes[0], 44);
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            (Value::Int8(-7), ScalarType::Int8),
            (Value::Int16(-300), ScalarType::Int16),
            (Value::Int32(i32::MIN), ScalarType::Int32),
            (Value::Int64(i64::MAX), ScalarType::Int64),
            (Value::Uint8(200), ScalarType::Uint8),
            (Value::Uint16(65535), ScalarType::Uint16),
            (Value::Uint32(0xdeadbeef), ScalarType::Uint32),
            (Value::Uint64(u64::MAX), ScalarType::Uint64),
            (Value::Float16(f16::from_f32(0.75)), ScalarType::Float16),
            (Value::Float32(-3.25), ScalarType::Float32),
            (Value::Float64(1.0e100), ScalarType::Float64),
        ];

        for (value, scalar) in cases {
            let mut bytes = [0u8; 8];
            let size = write_value_from_component(&value, scalar, &mut bytes);
            assert_eq!(size, scalar.size());
            assert_eq!(read_value_from_component(scalar, &bytes), value);
        }
    }

    #[test]
    fn test_half_float_truncation() {
        let mut bytes = [0u8; 2];
        let value = Value::Float32(1.0 / 3.0);
        write_value_from_component(&value, ScalarType::Float16, &mut bytes);

        let read = read_value_from_component(ScalarType::Float16, &bytes);
        let bits = (1.0f32 / 3.0).to_bits();

        match read {
            Value::Float16(h) => {
                let h = h.to_bits() as u32;
                // Sign and exponent survive, the mantissa keeps its top
                // 10 bits
                assert_eq!(h >> 15, bits >> 31);
                assert_eq!(((h >> 10) & 0x1f) + 112, (bits >> 23) & 0xff);
                assert_eq!(h & 0x3ff, (bits & 0x7fffff) >> 13);
            },
            _ => unreachable!("wrong value type {:?}", read),
        }
    }

    #[test]
    fn test_set_data() {
        let buffer = make_buffer("R32G32_SFLOAT", &floats(&[1.0, 2.0, 3.0, 4.0]));
        assert_eq!(buffer.element_count(), 2);
        assert_eq!(buffer.value_count(), 4);
        assert_eq!(buffer.size_in_bytes(), 16);
        assert_eq!(buffer.bytes().len(), 16);
        assert_eq!(&buffer.bytes()[12..16], &4.0f32.to_le_bytes());
        assert_eq!(buffer.values(), floats(&[1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn test_set_data_with_offset() {
        let mut buffer = make_buffer("R16_UINT", &[Value::Uint16(1)]);

        buffer.set_data_with_offset(&[Value::Uint16(3), Value::Uint16(4)], 4)
            .unwrap();
        assert_eq!(buffer.element_count(), 4);
        assert_eq!(
            buffer.values(),
            &[
                Value::Uint16(1),
                Value::Uint16(0),
                Value::Uint16(3),
                Value::Uint16(4),
            ]
        );

        // Overwriting in the middle doesn’t change the size
        buffer.set_data_with_offset(&[Value::Uint16(9)], 2).unwrap();
        assert_eq!(buffer.element_count(), 4);
        assert_eq!(buffer.values()[1], Value::Uint16(9));
    }

    #[test]
    fn test_never_shrinks() {
        let format = Format::lookup_by_name("R32_SINT").unwrap();
        let mut buffer = Buffer::new(BufferType::Storage, format);
        buffer.set_size_in_elements(10);
        buffer.set_data(&[Value::Int32(5), Value::Int32(6)]).unwrap();

        assert_eq!(buffer.element_count(), 10);
        assert_eq!(buffer.size_in_bytes(), 40);
        assert_eq!(buffer.values()[1], Value::Int32(6));
        assert_eq!(buffer.values()[9], Value::Int32(0));
    }

    #[test]
    fn test_zero_fill() {
        let format = Format::lookup_by_name("R8_UINT").unwrap();
        let mut buffer = Buffer::new(BufferType::Storage, format);
        buffer.set_data(&[Value::Uint8(0xff); 4]).unwrap();
        buffer.set_data_with_offset(&[Value::Uint8(1)], 1).unwrap();
        assert_eq!(buffer.bytes(), &[0xff, 1, 0xff, 0xff]);
    }

    #[test]
    fn test_padding() {
        let format = Format::from_glsl_type("vec3", LayoutStd::Std430).unwrap();
        let mut buffer = Buffer::new(BufferType::Storage, format);
        buffer.set_data(&floats(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).unwrap();

        assert_eq!(buffer.element_count(), 2);
        assert_eq!(buffer.size_in_bytes(), 32);
        assert_eq!(&buffer.bytes()[12..16], &[0, 0, 0, 0]);
        assert_eq!(&buffer.bytes()[16..20], &4.0f32.to_le_bytes());
        assert_eq!(buffer.values(), floats(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
    }

    #[test]
    fn test_mismatched_items() {
        let format = Format::lookup_by_name("R32G32B32_SFLOAT").unwrap();
        let mut buffer = Buffer::new(BufferType::Storage, format);

        let err = buffer.set_data(&floats(&[1.0, 2.0, 3.0, 4.0])).unwrap_err();
        assert_eq!(err, BufferError::MismatchedItems);
        assert_eq!(err.to_string(), "Mismatched number of items in buffer");
        // Nothing was changed
        assert_eq!(buffer.element_count(), 0);

        // A partial element after an offset doesn’t fit either
        assert_eq!(
            buffer.set_data_with_offset(&floats(&[1.0]), 4),
            Err(BufferError::MismatchedItems),
        );
        assert_eq!(buffer.element_count(), 0);
    }

    #[test]
    fn test_unaligned_offset() {
        let format = Format::lookup_by_name("R32G32B32_SFLOAT").unwrap();
        let mut buffer = Buffer::new(BufferType::Storage, format);

        // The element starting at byte 4 reaches into a second element
        buffer.set_data_with_offset(&floats(&[1.0, 2.0, 3.0]), 4).unwrap();
        assert_eq!(buffer.element_count(), 2);
        assert_eq!(buffer.values(), floats(&[0.0, 1.0, 2.0, 3.0, 0.0, 0.0]));

        // The padding after a std140 float doesn’t need to fit
        let format = Format::from_glsl_type("float", LayoutStd::Std140).unwrap();
        let mut buffer = Buffer::new(BufferType::Uniform, format);
        buffer.set_data_with_offset(&floats(&[42.0]), 4).unwrap();
        assert_eq!(buffer.element_count(), 1);
        assert_eq!(buffer.size_in_bytes(), 16);
        assert_eq!(&buffer.bytes()[4..8], &42.0f32.to_le_bytes());
        assert_eq!(
            buffer.recalculate_max_size_in_bytes(&floats(&[42.0]), 4),
            16,
        );
    }

    #[test]
    fn test_packed() {
        let buffer = make_buffer(
            "A8B8G8R8_UNORM_PACK32",
            &[Value::Uint32(0xff0000ff), Value::Uint32(0x12345678)],
        );
        assert_eq!(buffer.element_count(), 2);
        assert_eq!(buffer.value_count(), 2);
        assert_eq!(&buffer.bytes()[0..4], &[0xff, 0x00, 0x00, 0xff]);
        assert_eq!(&buffer.bytes()[4..8], &[0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_set_data_from_buffer() {
        let src = make_buffer("R8_UINT", &[Value::Uint8(1), Value::Uint8(2)]);
        let mut dst = make_buffer("R8_UINT", &[Value::Uint8(9)]);

        dst.set_data_from_buffer(&src, 2);
        assert_eq!(dst.element_count(), 4);
        assert_eq!(dst.bytes(), &[9, 0, 1, 2]);

        dst.set_data_from_buffer(&src, 0);
        assert_eq!(dst.element_count(), 4);
        assert_eq!(dst.bytes(), &[1, 2, 1, 2]);
    }

    #[test]
    fn test_set_data_from_buffer_partial_element() {
        let src = make_buffer("R8_UINT", &[Value::Uint8(1), Value::Uint8(2)]);
        let mut dst = make_buffer("R32_UINT", &[Value::Uint32(7)]);

        // Half an element is copied so the rest is zero-padded
        dst.set_data_from_buffer(&src, 4);
        assert_eq!(dst.element_count(), 2);
        assert_eq!(dst.bytes(), &[7, 0, 0, 0, 1, 2, 0, 0]);
        assert_eq!(dst.values(), &[Value::Uint32(7), Value::Uint32(0x0201)]);
    }

    #[test]
    fn test_copy_to() {
        let src = make_buffer("R8_UINT", &[Value::Uint8(1), Value::Uint8(2)]);
        let mut dst = make_buffer("R8_UINT", &[Value::Uint8(0); 2]);

        src.copy_to(&mut dst).unwrap();
        assert_eq!(dst.bytes(), &[1, 2]);

        dst.set_width(4);
        assert_eq!(src.copy_to(&mut dst), Err(BufferError::DifferentWidth));
        dst.set_width(1);
        dst.set_height(4);
        assert_eq!(src.copy_to(&mut dst), Err(BufferError::DifferentHeight));
        dst.set_height(1);
        dst.set_size_in_elements(3);
        assert_eq!(src.copy_to(&mut dst), Err(BufferError::DifferentSize));
    }

    #[test]
    fn test_copy_to_different_format() {
        let src = make_buffer("R8_UINT", &[Value::Uint8(1), Value::Uint8(2)]);
        let mut dst = make_buffer("R32_UINT", &[Value::Uint32(7); 2]);

        assert_eq!(src.copy_to(&mut dst), Err(BufferError::DifferentFormat));

        // The destination is left intact
        assert_eq!(dst.bytes().len(), 8);
        assert_eq!(dst.values(), &[Value::Uint32(7), Value::Uint32(7)]);
    }

    #[test]
    fn test_max_size() {
        let format = Format::lookup_by_name("R32_SFLOAT").unwrap();
        let mut buffer = Buffer::new(BufferType::Storage, format);
        buffer.set_size_in_bytes(8);
        assert_eq!(buffer.max_size_in_bytes(), 8);

        assert_eq!(
            buffer.recalculate_max_size_in_bytes(&floats(&[1.0, 2.0]), 16),
            24,
        );
        // Smaller data never reduces the maximum
        assert_eq!(
            buffer.recalculate_max_size_in_bytes(&floats(&[1.0]), 0),
            24,
        );
        assert_eq!(buffer.max_size_in_bytes(), 24);

        buffer.set_max_size_in_bytes(100);
        assert_eq!(buffer.max_size_in_bytes(), 100);
    }

    #[test]
    fn test_max_size_defaults_to_size() {
        let format = Format::lookup_by_name("R32_SFLOAT").unwrap();
        let mut buffer = Buffer::new(BufferType::Storage, format);
        buffer.set_size_in_bytes(64);

        // Without a recorded maximum the current size is the floor
        assert_eq!(
            buffer.recalculate_max_size_in_bytes(&floats(&[1.0]), 0),
            64,
        );
        assert_eq!(buffer.max_size_in_bytes(), 64);
        assert!(buffer.max_size_in_bytes() >= buffer.size_in_bytes());

        assert_eq!(
            buffer.recalculate_max_size_in_bytes(&floats(&[1.0]), 64),
            68,
        );
    }

    #[test]
    #[should_panic]
    fn test_bad_size_in_bytes() {
        let format = Format::lookup_by_name("R32_SFLOAT").unwrap();
        let mut buffer = Buffer::new(BufferType::Storage, format);
        buffer.set_size_in_bytes(6);
    }

    #[test]
    fn test_is_equal() {
        let a = make_buffer("R8G8_UINT", &[Value::Uint8(1), Value::Uint8(2)]);
        let mut b = a.clone();
        assert_eq!(a.is_equal(&b), Ok(()));

        b.set_data_with_offset(&[Value::Uint8(7), Value::Uint8(2)], 0)
            .unwrap();
        let err = a.is_equal(&b).unwrap_err();
        assert_eq!(
            err,
            BufferError::ValuesDiffer { count: 1, index: 0, left: 1, right: 7 },
        );
        assert_eq!(
            err.to_string(),
            "Buffers have different values. 1 values differed, first \
             difference at byte 0 values 1 != 7",
        );
    }

    #[test]
    fn test_is_equal_shape() {
        let a = make_buffer("R8_UINT", &[Value::Uint8(1)]);

        let b = make_buffer("R8_SINT", &[Value::Int8(1)]);
        assert_eq!(
            a.is_equal(&b).unwrap_err().to_string(),
            "Buffers have a different format",
        );

        let b = make_buffer("R8_UINT", &[Value::Uint8(1), Value::Uint8(2)]);
        assert_eq!(
            a.is_equal(&b).unwrap_err().to_string(),
            "Buffers have a different size",
        );

        let mut b = a.clone();
        b.set_width(2);
        assert_eq!(
            a.is_equal(&b).unwrap_err().to_string(),
            "Buffers have a different width",
        );

        let mut b = a.clone();
        b.set_height(2);
        assert_eq!(a.compare_rmse(&b, 0.0), Err(BufferError::DifferentHeight));
    }

    #[test]
    fn test_calculate_diffs() {
        let a = make_buffer("R8G8_UINT", &[Value::Uint8(3), Value::Uint8(5)]);
        let b = make_buffer("R8G8_UINT", &[Value::Uint8(5), Value::Uint8(3)]);
        // Unsigned differences wrap in 8 bits
        assert_eq!(a.calculate_diffs(&b), &[254.0, 2.0]);

        let a = make_buffer("R8_SINT", &[Value::Int8(-128)]);
        let b = make_buffer("R8_SINT", &[Value::Int8(1)]);
        assert_eq!(a.calculate_diffs(&b), &[127.0]);

        let a = make_buffer("R16_SFLOAT", &[Value::Float32(1.5)]);
        let b = make_buffer("R16_SFLOAT", &[Value::Float32(0.5)]);
        assert_eq!(a.calculate_diffs(&b), &[1.0]);

        let a = make_buffer("R64_SFLOAT", &[Value::Float64(0.25)]);
        let b = make_buffer("R64_SFLOAT", &[Value::Float64(1.0)]);
        assert_eq!(a.calculate_diffs(&b), &[-0.75]);

        // Padding produces no difference
        let format = Format::from_glsl_type("vec3", LayoutStd::Std430).unwrap();
        let mut a = Buffer::new(BufferType::Storage, format.clone());
        a.set_data(&floats(&[1.0, 2.0, 3.0])).unwrap();
        let mut b = Buffer::new(BufferType::Storage, format);
        b.set_data(&floats(&[1.0, 2.0, 2.5])).unwrap();
        assert_eq!(a.calculate_diffs(&b), &[0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_compare_rmse() {
        let a = make_buffer("R32_SFLOAT", &floats(&[1.0, 2.0, 3.0, 4.0]));
        let b = make_buffer("R32_SFLOAT", &floats(&[1.0, 2.0, 3.0, 6.0]));

        assert_eq!(a.compare_rmse(&a.clone(), 0.0), Ok(()));
        // Equal to the tolerance passes
        assert_eq!(a.compare_rmse(&b, 1.0), Ok(()));

        let err = a.compare_rmse(&b, 0.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Root Mean Square Error of 1.000000 is greater than tolerance \
             of 0.500000",
        );
        assert_eq!(a.compare_rmse(&b, 0.0).is_err(), true);
    }

    #[test]
    fn test_set_format() {
        let mut buffer = make_buffer("R8_UINT", &[Value::Uint8(1); 4]);
        buffer.set_format(Format::lookup_by_name("R32_UINT").unwrap());
        assert_eq!(buffer.element_count(), 1);
        assert_eq!(buffer.values(), &[Value::Uint32(0x01010101)]);

        // Partial elements are padded with zeroes
        buffer.set_format(Format::lookup_by_name("R64_UINT").unwrap());
        assert_eq!(buffer.element_count(), 1);
        assert_eq!(buffer.bytes().len(), 8);
        assert_eq!(buffer.values(), &[Value::Uint64(0x01010101)]);

        assert!(!buffer.format_is_default());
        buffer.set_format_is_default(true);
        assert!(buffer.format_is_default());
    }
}
