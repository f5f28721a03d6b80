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

//! Parsing of the lines in the `[test]` section. Each line is tried
//! against the known commands in turn until one of them matches.

use crate::buffer::{Buffer, BufferType};
use crate::format::{Format, LayoutStd, ScalarType};
use crate::scanner::{
    error_at_line, handle_match_result, next_word, strip_word_prefix,
    trim_line_or_skip, MatchResult, ParseResult, ParserContext,
};
use crate::script::LoadError;
use crate::util;
use crate::value::Value;
use crate::parse_num;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ClearColor {
        r: f32,
        g: f32,
        b: f32,
        a: f32,
    },
    ClearDepth {
        value: f32,
    },
    ClearStencil {
        value: u32,
    },
    Clear,
    SetBufferData {
        /// Index into [Script::buffers](crate::Script::buffers)
        buffer: usize,
        offset: usize,
        values: Vec<Value>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub line_num: usize,
    pub op: Operation,
}

// Parser for a single line of the test section
struct TestParser<'a> {
    ctx: &'a ParserContext,
    buffers: &'a mut Vec<Buffer>,
    commands: &'a mut Vec<Command>,
}

impl<'a> TestParser<'a> {
    fn add_command(&mut self, op: Operation) {
        self.commands.push(Command {
            line_num: self.ctx.line_num(),
            op,
        });
    }

    fn parse_clear_color(&self, args: &str) -> Result<Operation, LoadError> {
        let mut words = args.split_whitespace();
        let mut color = [0.0f32; 4];

        for component in color.iter_mut() {
            let word = match words.next() {
                Some(word) => word,
                None => {
                    return Err(error_at_line!(
                        self.ctx,
                        "Missing values for clear color command"
                    ));
                },
            };

            let value = parse_num::parse_token(word, parse_num::parse_f32);

            *component = match value {
                Some(v) => v,
                None => {
                    return Err(error_at_line!(
                        self.ctx,
                        "Invalid value for clear color command: {}",
                        word
                    ));
                },
            };
        }

        if let Some(extra) = words.next() {
            return Err(error_at_line!(
                self.ctx,
                "Extra parameter to clear color command: {}",
                extra
            ));
        }

        let [r, g, b, a] = color;

        Ok(Operation::ClearColor { r, g, b, a })
    }

    // Parses the single value of the clear depth or clear stencil
    // commands
    fn parse_clear_value<T>(
        &self,
        name: &str,
        args: &str,
        func: fn(&str) -> Result<(T, &str), parse_num::ParseError>,
    ) -> Result<T, LoadError> {
        let mut words = args.split_whitespace();

        let word = match words.next() {
            Some(word) => word,
            None => {
                return Err(error_at_line!(
                    self.ctx,
                    "Missing value for clear {} command",
                    name
                ));
            },
        };

        let value = match parse_num::parse_token(word, func) {
            Some(v) => v,
            None => {
                return Err(error_at_line!(
                    self.ctx,
                    "Invalid value for clear {} command: {}",
                    name,
                    word
                ));
            },
        };

        match words.next() {
            Some(extra) => Err(error_at_line!(
                self.ctx,
                "Extra parameter to clear {} command: {}",
                name,
                extra
            )),
            None => Ok(value),
        }
    }

    fn process_clear(&mut self, line: &str) -> ParseResult {
        let line = match strip_word_prefix(line, "clear") {
            Some(l) => l,
            None => return Ok(MatchResult::NotMatched),
        };

        let op = if let Some(args) = strip_word_prefix(line, "color") {
            self.parse_clear_color(args)?
        } else if let Some(args) = strip_word_prefix(line, "depth") {
            Operation::ClearDepth {
                value: self.parse_clear_value(
                    "depth",
                    args,
                    parse_num::parse_f32,
                )?,
            }
        } else if let Some(args) = strip_word_prefix(line, "stencil") {
            Operation::ClearStencil {
                value: self.parse_clear_value(
                    "stencil",
                    args,
                    parse_num::parse_u32,
                )?,
            }
        } else if let Some((extra, _)) = next_word(line) {
            return Err(error_at_line!(
                self.ctx,
                "Extra parameter to clear command: {}",
                extra
            ));
        } else {
            Operation::Clear
        };

        self.add_command(op);

        Ok(MatchResult::Matched)
    }

    fn parse_desc_set_and_binding<'b>(
        &self,
        line: &'b str,
    ) -> Result<(u32, u32, &'b str), LoadError> {
        let invalid = || error_at_line!(self.ctx, "Invalid buffer binding");

        let (part_a, tail) =
            parse_num::parse_u32(line).map_err(|_| invalid())?;

        let (desc_set, binding, tail) =
            if let Some(tail) = tail.strip_prefix(':') {
                let (part_b, tail) =
                    parse_num::parse_u32(tail).map_err(|_| invalid())?;
                (part_a, part_b, tail)
            } else {
                (0, part_a, tail)
            };

        match tail.chars().next() {
            Some(c) if !c.is_whitespace() => Err(invalid()),
            _ => Ok((desc_set, binding, tail)),
        }
    }

    // Finds the buffer at the binding point or creates it. If `format`
    // is None then the buffer only needs to exist and a new one is
    // created with a byte format that later data can replace.
    fn get_buffer(
        &mut self,
        desc_set: u32,
        binding: u32,
        buffer_type: BufferType,
        format: Option<&Format>,
    ) -> Result<usize, LoadError> {
        let position = self.buffers.iter().position(|b| {
            b.binding() == Some((desc_set, binding))
        });

        if let Some(pos) = position {
            let buffer = &mut self.buffers[pos];

            if buffer.buffer_type() != buffer_type {
                return Err(error_at_line!(
                    self.ctx,
                    "Buffer binding point {}:{} used with different type",
                    desc_set,
                    binding
                ));
            }

            if let Some(format) = format {
                if buffer.format_is_default() {
                    buffer.set_format(format.clone());
                    buffer.set_format_is_default(false);
                } else if !buffer.format().equal(format) {
                    return Err(error_at_line!(
                        self.ctx,
                        "Buffer binding point {}:{} used with different \
                         format",
                        desc_set,
                        binding
                    ));
                }
            }

            return Ok(pos);
        }

        let mut buffer = match format {
            Some(format) => Buffer::new(buffer_type, format.clone()),
            None => {
                let format = match Format::lookup_by_name("R8_UINT") {
                    Some(f) => f,
                    None => unreachable!("R8_UINT format missing"),
                };
                let mut buffer = Buffer::new(buffer_type, format);
                buffer.set_format_is_default(true);
                buffer
            },
        };

        buffer.set_binding(desc_set, binding);
        self.buffers.push(buffer);

        Ok(self.buffers.len() - 1)
    }

    // Parses the values for a buffer. The values are cycled through
    // the components of the format and must fill whole elements.
    fn parse_buffer_values(
        &self,
        format: &Format,
        line: &str,
    ) -> Result<Vec<Value>, LoadError> {
        let scalars = format
            .components(0, 1)
            .map(|(scalar, _)| scalar)
            .collect::<Vec<ScalarType>>();
        let mut values = Vec::new();

        for word in line.split_whitespace() {
            let scalar = scalars[values.len() % scalars.len()];

            match parse_num::parse_value(scalar, word) {
                Some(value) => values.push(value),
                None => {
                    return Err(error_at_line!(
                        self.ctx,
                        "Invalid buffer data value: {}",
                        word
                    ));
                },
            }
        }

        if values.is_empty() {
            Err(error_at_line!(self.ctx, "Missing buffer data"))
        } else if values.len() % scalars.len() != 0 {
            Err(error_at_line!(
                self.ctx,
                "Buffer data must contain a multiple of {} values",
                scalars.len()
            ))
        } else {
            Ok(values)
        }
    }

    fn process_set_buffer_subdata(
        &mut self,
        desc_set: u32,
        binding: u32,
        buffer_type: BufferType,
        std: LayoutStd,
        line: &str,
    ) -> Result<(), LoadError> {
        let (type_name, line) = match next_word(line) {
            Some(v) => v,
            None => {
                return Err(error_at_line!(
                    self.ctx,
                    "Expected GLSL type name"
                ));
            },
        };

        let format = match Format::from_glsl_type(type_name, std) {
            Some(f) => f,
            None => {
                return Err(error_at_line!(
                    self.ctx,
                    "Invalid GLSL type name: {}",
                    type_name
                ));
            },
        };

        let (offset, line) = match parse_num::parse_u32(line) {
            Ok((offset, line)) => (offset as usize, line),
            Err(_) => {
                return Err(error_at_line!(self.ctx, "Invalid buffer offset"));
            },
        };

        // Data may start inside an element but not inside a component
        let component_size = format
            .components(0, 1)
            .next()
            .map_or(1, |(scalar, _)| scalar.size());

        if offset % component_size != 0 {
            return Err(error_at_line!(
                self.ctx,
                "Offset {} is not a multiple of the component size {}",
                offset,
                component_size
            ));
        }

        let values = self.parse_buffer_values(&format, line)?;

        let index = self.get_buffer(
            desc_set,
            binding,
            buffer_type,
            Some(&format),
        )?;
        let buffer = &mut self.buffers[index];

        buffer.recalculate_max_size_in_bytes(&values, offset);
        buffer.set_data_with_offset(&values, offset).map_err(|source| {
            LoadError::Buffer { line_num: self.ctx.error_line(), source }
        })?;

        self.add_command(Operation::SetBufferData {
            buffer: index,
            offset,
            values,
        });

        Ok(())
    }

    // Makes sure the buffer is at least `size` bytes. The size is
    // rounded up to a whole number of elements and the buffer is never
    // made smaller.
    fn process_set_buffer_size(
        &mut self,
        desc_set: u32,
        binding: u32,
        buffer_type: BufferType,
        size: usize,
    ) -> Result<(), LoadError> {
        let index = self.get_buffer(desc_set, binding, buffer_type, None)?;
        let buffer = &mut self.buffers[index];

        let size = util::round_up(size, buffer.format().size_in_bytes());

        if size > buffer.size_in_bytes() {
            buffer.set_size_in_bytes(size);
        }

        Ok(())
    }

    fn process_buffer_command(&mut self, line: &str) -> ParseResult {
        let (line, buffer_type, std) =
            if let Some(tail) = strip_word_prefix(line, "ssbo") {
                (tail, BufferType::Storage, LayoutStd::Std430)
            } else if let Some(tail) = strip_word_prefix(line, "ubo") {
                (tail, BufferType::Uniform, LayoutStd::Std140)
            } else {
                return Ok(MatchResult::NotMatched);
            };

        let (desc_set, binding, line) = self.parse_desc_set_and_binding(line)?;

        if let Some(line) = strip_word_prefix(line, "subdata") {
            self.process_set_buffer_subdata(
                desc_set,
                binding,
                buffer_type,
                std,
                line,
            )?;
        } else {
            match parse_num::parse_u32(line) {
                Ok((size, tail)) if tail.trim().is_empty() => {
                    self.process_set_buffer_size(
                        desc_set,
                        binding,
                        buffer_type,
                        size as usize,
                    )?;
                },
                _ => {
                    return Err(error_at_line!(
                        self.ctx,
                        "Invalid buffer command"
                    ));
                },
            }
        }

        Ok(MatchResult::Matched)
    }

    fn process_line(&mut self, line: &str) -> Result<(), LoadError> {
        let line = match trim_line_or_skip(line) {
            Some(l) => l,
            None => return Ok(()),
        };

        // Try each of the possible commands in turn until one of them
        // matches or returns an error.
        handle_match_result!(self.process_clear(line));
        handle_match_result!(self.process_buffer_command(line));

        let command = match next_word(line) {
            Some((word, _)) => word,
            None => line,
        };

        Err(error_at_line!(self.ctx, "Unknown command: {}", command))
    }
}

/// Parses one line of the test section. Buffer commands create or
/// update entries in `buffers` and every command is appended to
/// `commands`.
pub fn process_test_line(
    ctx: &ParserContext,
    buffers: &mut Vec<Buffer>,
    commands: &mut Vec<Command>,
    line: &str,
) -> Result<(), LoadError> {
    TestParser { ctx, buffers, commands }.process_line(line)
}
