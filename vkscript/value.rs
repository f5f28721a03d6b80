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

//! A tagged scalar that is passed between the script parsers and the
//! buffer encoder.

use crate::format::ScalarType;
use half::f16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float16(f16),
    Float32(f32),
    Float64(f64),
}

// Generates an accessor that converts whatever is stored in the value
// to the requested type with the semantics of an `as` cast.
macro_rules! value_as {
    ($func:ident, $t:ty) => {
        pub fn $func(&self) -> $t {
            match *self {
                Value::Int8(v) => v as $t,
                Value::Int16(v) => v as $t,
                Value::Int32(v) => v as $t,
                Value::Int64(v) => v as $t,
                Value::Uint8(v) => v as $t,
                Value::Uint16(v) => v as $t,
                Value::Uint32(v) => v as $t,
                Value::Uint64(v) => v as $t,
                Value::Float16(v) => v.to_f32() as $t,
                Value::Float32(v) => v as $t,
                Value::Float64(v) => v as $t,
            }
        }
    };
}

impl Value {
    value_as!(as_i8, i8);
    value_as!(as_i16, i16);
    value_as!(as_i32, i32);
    value_as!(as_i64, i64);
    value_as!(as_u8, u8);
    value_as!(as_u16, u16);
    value_as!(as_u32, u32);
    value_as!(as_u64, u64);
    value_as!(as_f32, f32);
    value_as!(as_f64, f64);

    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Value::Int8(_) => ScalarType::Int8,
            Value::Int16(_) => ScalarType::Int16,
            Value::Int32(_) => ScalarType::Int32,
            Value::Int64(_) => ScalarType::Int64,
            Value::Uint8(_) => ScalarType::Uint8,
            Value::Uint16(_) => ScalarType::Uint16,
            Value::Uint32(_) => ScalarType::Uint32,
            Value::Uint64(_) => ScalarType::Uint64,
            Value::Float16(_) => ScalarType::Float16,
            Value::Float32(_) => ScalarType::Float32,
            Value::Float64(_) => ScalarType::Float64,
        }
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        !self.is_float()
    }

    #[inline]
    pub fn is_float(&self) -> bool {
        self.scalar_type().is_float()
    }
}
