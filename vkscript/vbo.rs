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

//! Parsing of the `[vertex data]` section. The data is written in a
//! columnar text format, for example:
//!
//! ```text
//!   0/r32g32b32_sfloat 1/r32_uint      3/int/int       4/int/int
//!   0.0 0.0 0.0        10              0               0       # comment
//!   0.0 1.0 0.0         5              1               1
//!   1.0 1.0 0.0         0              0               1
//! ```
//!
//! The format consists of a row of column headers followed by any
//! number of rows of data. Each column header has the form
//! `ATTRLOC/FORMAT` where `ATTRLOC` is the location of the vertex
//! attribute to be bound to this column and FORMAT is the name of a
//! VkFormat minus the `VK_FORMAT` prefix.
//!
//! Alternatively the column header can use something closer to the
//! Piglit format like `ATTRLOC/GL_TYPE/GLSL_TYPE`. `GL_TYPE` is the
//! GL type of data that follows (“`half`”, “`float`”, “`double`”,
//! “`byte`”, “`ubyte`”, “`short`”, “`ushort`”, “`int`” or “`uint`”),
//! `GLSL_TYPE` is the GLSL type of the data (“`int`”, “`uint`”,
//! “`float`”, “`double`”, “`ivec*`”, “`uvec*`”, “`vec*`”, “`dvec*`”).
//!
//! Each column becomes a vertex [Buffer] bound to its location. Each
//! data row appends one element to every column’s buffer.

use crate::buffer::{Buffer, BufferType};
use crate::format::{Format, Mode, ScalarType};
use crate::scanner::{error_at_line, trim_line_or_skip, ParserContext};
use crate::script::LoadError;
use crate::value::Value;
use crate::parse_num;

/// Parses the vertex data section line by line. The header line
/// creates one buffer per column and each following line appends a
/// row of values to them.
#[derive(Debug, Default)]
pub struct Parser {
    // None if we haven’t parsed the header line yet, otherwise the
    // index of the buffer for each column
    columns: Option<Vec<usize>>,
}

fn lookup_gl_type(
    ctx: &ParserContext,
    gl_type: &str,
) -> Result<(Mode, usize), LoadError> {
    struct GlType {
        name: &'static str,
        mode: Mode,
        bit_size: usize,
    }
    static GL_TYPES: [GlType; 9] = [
        GlType { name: "byte", mode: Mode::SINT, bit_size: 8 },
        GlType { name: "ubyte", mode: Mode::UINT, bit_size: 8 },
        GlType { name: "short", mode: Mode::SINT, bit_size: 16 },
        GlType { name: "ushort", mode: Mode::UINT, bit_size: 16 },
        GlType { name: "int", mode: Mode::SINT, bit_size: 32 },
        GlType { name: "uint", mode: Mode::UINT, bit_size: 32 },
        GlType { name: "half", mode: Mode::SFLOAT, bit_size: 16 },
        GlType { name: "float", mode: Mode::SFLOAT, bit_size: 32 },
        GlType { name: "double", mode: Mode::SFLOAT, bit_size: 64 },
    ];

    match GL_TYPES.iter().find(|t| t.name == gl_type) {
        Some(t) => Ok((t.mode, t.bit_size)),
        None => Err(error_at_line!(ctx, "Unknown GL type: {}", gl_type)),
    }
}

fn components_for_glsl_type(
    ctx: &ParserContext,
    glsl_type: &str,
) -> Result<usize, LoadError> {
    if ["int", "uint", "float", "double"].contains(&glsl_type) {
        return Ok(1);
    }

    let vec_part = match glsl_type.strip_prefix(['i', 'u', 'd']) {
        Some(tail) => tail,
        None => glsl_type,
    };

    let size = match vec_part.strip_prefix("vec") {
        Some(size) => size,
        None => {
            return Err(error_at_line!(
                ctx,
                "Unknown GLSL type: {}",
                glsl_type
            ));
        },
    };

    match size.parse::<usize>() {
        Ok(n) if (2..=4).contains(&n) => Ok(n),
        _ => Err(error_at_line!(ctx, "Invalid vec size: {}", glsl_type)),
    }
}

fn decode_type(
    ctx: &ParserContext,
    gl_type: &str,
    glsl_type: &str,
) -> Result<Format, LoadError> {
    let (mode, bit_size) = lookup_gl_type(ctx, gl_type)?;
    let n_components = components_for_glsl_type(ctx, glsl_type)?;

    Format::lookup_by_details(bit_size, mode, n_components).ok_or_else(|| {
        error_at_line!(ctx, "Invalid type combo: {}/{}", gl_type, glsl_type)
    })
}

// Parses a column header into the attribute location and format
fn parse_attrib(
    ctx: &ParserContext,
    s: &str,
) -> Result<(u32, Format), LoadError> {
    let mut parts = s.split('/');

    let location = match parts.next().map(str::parse::<u32>) {
        Some(Ok(n)) => n,
        _ => {
            return Err(error_at_line!(
                ctx,
                "Invalid attrib location in {}",
                s
            ));
        },
    };

    let format_name = match parts.next() {
        Some(n) => n,
        None => {
            return Err(error_at_line!(
                ctx,
                "Column headers must be in the form location/format. \
                 Got: {}",
                s
            ));
        },
    };

    let format = match parts.next() {
        None => match Format::lookup_by_name(format_name) {
            Some(f) => f,
            None => {
                return Err(error_at_line!(
                    ctx,
                    "Unknown format: {}",
                    format_name
                ));
            },
        },
        Some(glsl_type) => {
            if parts.next().is_some() {
                return Err(error_at_line!(
                    ctx,
                    "Extra data at end of column header: {}",
                    s
                ));
            }

            decode_type(ctx, format_name, glsl_type)?
        },
    };

    Ok((location, format))
}

// Parse a single number from one of the data rows for a component of
// the given scalar type. Hexadecimal is only accepted for packed
// formats where the value covers the whole packed word.
fn parse_datum(
    ctx: &ParserContext,
    scalar: ScalarType,
    packed: bool,
    token: &str,
) -> Result<Value, LoadError> {
    let value = if !packed && parse_num::is_hex(token) {
        None
    } else {
        parse_num::parse_value(scalar, token)
    };

    value.ok_or_else(|| {
        error_at_line!(ctx, "Invalid vertex data value: {}", token)
    })
}

impl Parser {
    pub fn new() -> Parser {
        Parser { columns: None }
    }

    fn parse_header_line(
        &mut self,
        ctx: &ParserContext,
        buffers: &mut Vec<Buffer>,
        line: &str,
    ) -> Result<(), LoadError> {
        let mut columns = Vec::new();

        for attrib in line.split_whitespace() {
            let (location, format) = parse_attrib(ctx, attrib)?;

            let mut buffer = Buffer::new(BufferType::Vertex, format);
            buffer.set_location(location);

            columns.push(buffers.len());
            buffers.push(buffer);
        }

        self.columns = Some(columns);

        Ok(())
    }

    fn parse_data_line(
        ctx: &ParserContext,
        columns: &[usize],
        buffers: &mut [Buffer],
        line: &str,
    ) -> Result<(), LoadError> {
        let mut tokens = line.split_whitespace();
        let mut row = Vec::with_capacity(columns.len());

        for &buffer_index in columns.iter() {
            let format = buffers[buffer_index].format();
            let mut values = Vec::with_capacity(
                format.input_needed_per_element()
            );

            for (scalar, _) in format.components(0, 1) {
                let token = match tokens.next() {
                    Some(token) => token,
                    None => {
                        return Err(error_at_line!(
                            ctx,
                            "Too few cells in given vertex data row"
                        ));
                    },
                };

                values.push(
                    parse_datum(ctx, scalar, format.is_packed(), token)?
                );
            }

            row.push(values);
        }

        if tokens.next().is_some() {
            return Err(error_at_line!(
                ctx,
                "Too many cells in given vertex data row"
            ));
        }

        for (&buffer_index, values) in columns.iter().zip(row.iter()) {
            let buffer = &mut buffers[buffer_index];
            let offset = buffer.size_in_bytes();

            buffer.set_data_with_offset(values, offset).map_err(|source| {
                LoadError::Buffer { line_num: ctx.error_line(), source }
            })?;
        }

        Ok(())
    }

    /// Add one line of the section. The first line that isn’t blank
    /// or a comment is the header.
    pub fn parse_line(
        &mut self,
        ctx: &ParserContext,
        buffers: &mut Vec<Buffer>,
        line: &str,
    ) -> Result<(), LoadError> {
        let line = match trim_line_or_skip(line) {
            Some(l) => l,
            None => return Ok(()),
        };

        match &self.columns {
            None => self.parse_header_line(ctx, buffers, line),
            Some(columns) => {
                Parser::parse_data_line(ctx, columns, buffers, line)
            },
        }
    }
}
