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

//! Description of the binary layout of one element of a buffer. A
//! [Format] is an ordered list of [Segment]s where each segment is
//! either some padding or a component holding one scalar. Formats
//! are either looked up by their Vulkan name minus the `VK_FORMAT_`
//! prefix, by the details of a GL-style vertex attribute, or derived
//! from a GLSL type laid out with the std140 or std430 rules.

use crate::util;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Component {
    R,
    G,
    B,
    A,
    D,
    S,
    X,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Mode {
    UNORM,
    SNORM,
    USCALED,
    SSCALED,
    UINT,
    SINT,
    UFLOAT,
    SFLOAT,
    SRGB,
}

/// The machine representation of a component. Every piece of code
/// that needs to know how many bytes a component takes or how to
/// interpret them dispatches on this type.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ScalarType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float16,
    Float32,
    Float64,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Part {
    pub bits: usize,
    pub component: Component,
    pub mode: Mode,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Segment {
    /// A number of bytes that are skipped
    Padding(usize),
    Component { mode: Mode, scalar: ScalarType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStd {
    Std140,
    Std430,
}

#[derive(Debug)]
struct FormatInfo {
    name: &'static str,
    // Size in bits of the word that the parts are packed into
    packed_size: Option<usize>,
    parts: &'static [Part],
}

#[derive(Debug, Clone)]
pub struct Format {
    name: Option<&'static str>,
    packed_size: Option<usize>,
    parts: Vec<Part>,
    segments: Vec<Segment>,
}

macro_rules! format_info {
    ($name:literal, $packed_size:expr, $(($comp:ident, $bits:literal, $mode:ident)),+ $(,)?) => {
        FormatInfo {
            name: $name,
            packed_size: $packed_size,
            parts: &[$(
                Part {
                    bits: $bits,
                    component: Component::$comp,
                    mode: Mode::$mode,
                }
            ),+],
        }
    };
}

include!{"format_table.rs"}

impl ScalarType {
    /// Classifies a component with the given mode and bit size.
    /// Returns `None` for combinations that only occur inside packed
    /// words, such as 10-bit or 24-bit parts.
    pub fn from_mode(mode: Mode, bits: usize) -> Option<ScalarType> {
        match (mode, bits) {
            (Mode::SFLOAT, 16) => Some(ScalarType::Float16),
            (Mode::SFLOAT, 32) => Some(ScalarType::Float32),
            (Mode::SFLOAT, 64) => Some(ScalarType::Float64),
            (Mode::SNORM | Mode::SSCALED | Mode::SINT, 8) => {
                Some(ScalarType::Int8)
            },
            (Mode::SNORM | Mode::SSCALED | Mode::SINT, 16) => {
                Some(ScalarType::Int16)
            },
            (Mode::SNORM | Mode::SSCALED | Mode::SINT, 32) => {
                Some(ScalarType::Int32)
            },
            (Mode::SNORM | Mode::SSCALED | Mode::SINT, 64) => {
                Some(ScalarType::Int64)
            },
            (Mode::UNORM | Mode::USCALED | Mode::UINT | Mode::SRGB, 8) => {
                Some(ScalarType::Uint8)
            },
            (Mode::UNORM | Mode::USCALED | Mode::UINT | Mode::SRGB, 16) => {
                Some(ScalarType::Uint16)
            },
            (Mode::UNORM | Mode::USCALED | Mode::UINT | Mode::SRGB, 32) => {
                Some(ScalarType::Uint32)
            },
            (Mode::UNORM | Mode::USCALED | Mode::UINT | Mode::SRGB, 64) => {
                Some(ScalarType::Uint64)
            },
            _ => None,
        }
    }

    /// The mode that a plain GLSL variable of this type would have
    pub fn natural_mode(self) -> Mode {
        if self.is_float() {
            Mode::SFLOAT
        } else if self.is_signed() {
            Mode::SINT
        } else {
            Mode::UINT
        }
    }

    pub fn size(self) -> usize {
        match self {
            ScalarType::Int8 | ScalarType::Uint8 => 1,
            ScalarType::Int16 | ScalarType::Uint16 | ScalarType::Float16 => 2,
            ScalarType::Int32 | ScalarType::Uint32 | ScalarType::Float32 => 4,
            ScalarType::Int64 | ScalarType::Uint64 | ScalarType::Float64 => 8,
        }
    }

    #[inline]
    pub fn bits(self) -> usize {
        self.size() * 8
    }

    pub fn is_float(self) -> bool {
        matches!(
            self,
            ScalarType::Float16 | ScalarType::Float32 | ScalarType::Float64
        )
    }

    /// True for the signed integer and float types
    pub fn is_signed(self) -> bool {
        !matches!(
            self,
            ScalarType::Uint8
                | ScalarType::Uint16
                | ScalarType::Uint32
                | ScalarType::Uint64
        )
    }
}

impl Segment {
    pub fn size_in_bytes(&self) -> usize {
        match self {
            Segment::Padding(n_bytes) => *n_bytes,
            Segment::Component { scalar, .. } => scalar.size(),
        }
    }

    #[inline]
    pub fn is_padding(&self) -> bool {
        matches!(self, Segment::Padding(_))
    }

    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self {
            Segment::Padding(_) => None,
            Segment::Component { scalar, .. } => Some(*scalar),
        }
    }
}

/// Iterator over the components of a run of elements. Created by
/// [Format::components]. Each item is the scalar type of the
/// component and its byte offset. Padding segments are skipped but
/// still advance the offset.
#[derive(Debug, Clone)]
pub struct Components<'a> {
    segments: &'a [Segment],
    segment: usize,
    offset: usize,
    elements_left: usize,
}

impl<'a> Iterator for Components<'a> {
    type Item = (ScalarType, usize);

    fn next(&mut self) -> Option<(ScalarType, usize)> {
        loop {
            if self.elements_left == 0 || self.segments.is_empty() {
                return None;
            }

            let segment = &self.segments[self.segment];
            let offset = self.offset;

            self.offset += segment.size_in_bytes();
            self.segment += 1;

            if self.segment >= self.segments.len() {
                self.segment = 0;
                self.elements_left -= 1;
            }

            if let Segment::Component { scalar, .. } = segment {
                return Some((*scalar, offset));
            }
        }
    }
}

// Splits a GLSL type name into its scalar type and the number of
// columns and rows.
fn glsl_type_shape(name: &str) -> Option<(ScalarType, usize, usize)> {
    static SCALARS: [(&str, ScalarType); 11] = [
        ("double", ScalarType::Float64),
        ("float", ScalarType::Float32),
        ("float16_t", ScalarType::Float16),
        ("int", ScalarType::Int32),
        ("int16_t", ScalarType::Int16),
        ("int64_t", ScalarType::Int64),
        ("int8_t", ScalarType::Int8),
        ("uint", ScalarType::Uint32),
        ("uint16_t", ScalarType::Uint16),
        ("uint64_t", ScalarType::Uint64),
        ("uint8_t", ScalarType::Uint8),
    ];
    static VECTORS: [(&str, ScalarType); 11] = [
        ("dvec", ScalarType::Float64),
        ("f16vec", ScalarType::Float16),
        ("i16vec", ScalarType::Int16),
        ("i64vec", ScalarType::Int64),
        ("i8vec", ScalarType::Int8),
        ("ivec", ScalarType::Int32),
        ("u16vec", ScalarType::Uint16),
        ("u64vec", ScalarType::Uint64),
        ("u8vec", ScalarType::Uint8),
        ("uvec", ScalarType::Uint32),
        ("vec", ScalarType::Float32),
    ];
    static MATRICES: [(&str, ScalarType); 2] = [
        ("dmat", ScalarType::Float64),
        ("mat", ScalarType::Float32),
    ];

    fn dimension(s: &str) -> Option<usize> {
        match s {
            "2" => Some(2),
            "3" => Some(3),
            "4" => Some(4),
            _ => None,
        }
    }

    if let Some(&(_, scalar)) = SCALARS.iter().find(|&&(n, _)| n == name) {
        return Some((scalar, 1, 1));
    }

    for &(prefix, scalar) in VECTORS.iter() {
        if let Some(tail) = name.strip_prefix(prefix) {
            return dimension(tail).map(|rows| (scalar, 1, rows));
        }
    }

    for &(prefix, scalar) in MATRICES.iter() {
        if let Some(tail) = name.strip_prefix(prefix) {
            return match tail.split_once('x') {
                Some((columns, rows)) => {
                    Some((scalar, dimension(columns)?, dimension(rows)?))
                },
                None => dimension(tail).map(|n| (scalar, n, n)),
            };
        }
    }

    None
}

impl Format {
    fn from_info(info: &'static FormatInfo) -> Format {
        let segments = match info.packed_size {
            // A packed format is read as a single unsigned word
            Some(bits) => match ScalarType::from_mode(Mode::UINT, bits) {
                Some(scalar) => vec![Segment::Component {
                    mode: Mode::UINT,
                    scalar,
                }],
                None => unreachable!("bad packed size for {}", info.name),
            },
            None => info.parts.iter().map(|part| {
                match ScalarType::from_mode(part.mode, part.bits) {
                    Some(scalar) => Segment::Component {
                        mode: part.mode,
                        scalar,
                    },
                    None => unreachable!("bad part in {}", info.name),
                }
            }).collect(),
        };

        Format {
            name: Some(info.name),
            packed_size: info.packed_size,
            parts: info.parts.to_vec(),
            segments,
        }
    }

    pub fn lookup_by_name(name: &str) -> Option<Format> {
        match FORMATS.binary_search_by(|format| format.name.cmp(name)) {
            Ok(pos) => Some(Format::from_info(&FORMATS[pos])),
            Err(_) => None,
        }
    }

    /// Finds the unpacked format with `n_components` components in
    /// RGBA order that all have the given size and mode.
    pub fn lookup_by_details(
        bit_size: usize,
        mode: Mode,
        n_components: usize
    ) -> Option<Format> {
        static COMP_ORDER: [Component; 4] = [
            Component::R,
            Component::G,
            Component::B,
            Component::A,
        ];

        FORMATS.iter().find(|format| {
            format.packed_size.is_none()
                && format.parts.len() == n_components
                && format.parts.iter().zip(COMP_ORDER.iter()).all(
                    |(part, &component)| {
                        part.bits == bit_size
                            && part.component == component
                            && part.mode == mode
                    }
                )
        }).map(Format::from_info)
    }

    /// Builds the format of one array element of the named GLSL type
    /// when laid out with `std`. Matrices are column-major. Padding
    /// segments are added after each column so that the element
    /// size matches the array stride.
    pub fn from_glsl_type(name: &str, std: LayoutStd) -> Option<Format> {
        let (scalar, columns, rows) = glsl_type_shape(name)?;
        let component_size = scalar.size();

        let base_stride = if rows == 3 {
            component_size * 4
        } else {
            component_size * rows
        };

        let column_stride = match std {
            LayoutStd::Std140 => util::align(base_stride, 16),
            LayoutStd::Std430 => base_stride,
        };

        let padding = column_stride - component_size * rows;
        let mode = scalar.natural_mode();
        let mut segments = Vec::new();

        for _ in 0..columns {
            for _ in 0..rows {
                segments.push(Segment::Component { mode, scalar });
            }

            if padding > 0 {
                segments.push(Segment::Padding(padding));
            }
        }

        static ROW_COMPONENTS: [Component; 4] = [
            Component::R,
            Component::G,
            Component::B,
            Component::A,
        ];

        let parts = ROW_COMPONENTS[0..rows].iter().map(|&component| Part {
            bits: scalar.bits(),
            component,
            mode,
        }).collect();

        Some(Format {
            name: None,
            packed_size: None,
            parts,
            segments,
        })
    }

    /// The Vulkan name of the format, or `None` if it was derived
    /// from a GLSL type
    #[inline]
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    #[inline]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn packed_size(&self) -> Option<usize> {
        self.packed_size
    }

    #[inline]
    pub fn is_packed(&self) -> bool {
        self.packed_size.is_some()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.segments.iter().map(Segment::size_in_bytes).sum()
    }

    /// Number of values needed from the input to fill one element.
    /// A packed format takes a single value for the whole word.
    pub fn input_needed_per_element(&self) -> usize {
        self.segments.iter().filter(|s| !s.is_padding()).count()
    }

    /// Compares the layout of two formats. The segments must match
    /// in order, mode and width. Packed formats additionally have to
    /// pack the same parts.
    pub fn equal(&self, other: &Format) -> bool {
        self.segments == other.segments
            && self.packed_size == other.packed_size
            && (!self.is_packed() || self.parts == other.parts)
    }

    /// Iterates the components of `n_elements` consecutive elements
    /// starting at the byte offset `start`.
    pub fn components(&self, start: usize, n_elements: usize) -> Components {
        Components {
            segments: &self.segments,
            segment: 0,
            offset: start,
            elements_left: n_elements,
        }
    }
}

impl PartialEq for Format {
    #[inline]
    fn eq(&self, other: &Format) -> bool {
        self.equal(other)
    }
}
