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

//! Loading of a VkScript source into a [Script]. The source is split
//! into sections by lines of the form `[name]` and each line is
//! handed to the parser for the current section.

use crate::buffer::{Buffer, BufferError, BufferType};
use crate::commands::{self, Command};
use crate::config::Config;
use crate::format::Format;
use crate::parse_num;
use crate::requirements::Requirements;
use crate::scanner::{
    error_at_line, strip_word_prefix, strip_words_prefix, trim_line_or_skip,
    MatchResult, ParseResult, ParserContext, Scanner, Section,
};
use crate::shader_stage::{Stage, ALL_STAGES, N_STAGES};
use crate::value::Value;
use crate::vbo;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Shader {
    Glsl(String),
    Spirv(String),
    Binary(Vec<u32>),
    Passthrough,
}

#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("{line_num}: {message}")]
    Invalid {
        line_num: usize,
        message: String,
    },
    #[error("{line_num}: {source}")]
    Buffer {
        line_num: usize,
        source: BufferError,
    },
    #[error("{line_num}: The token replacements cause an infinite loop")]
    TokenReplacementLoop {
        line_num: usize,
    },
}

impl LoadError {
    pub fn line_num(&self) -> usize {
        match self {
            LoadError::Invalid { line_num, .. } => *line_num,
            LoadError::Buffer { line_num, .. } => *line_num,
            LoadError::TokenReplacementLoop { line_num } => *line_num,
        }
    }
}

/// The result of loading a script. Buffer 0 is always the color
/// buffer of the framebuffer.
#[derive(Debug)]
pub struct Script {
    buffers: Vec<Buffer>,
    requirements: Requirements,
    commands: Vec<Command>,
    stages: [Vec<Shader>; N_STAGES],
    fence_timeout_ms: Option<u32>,
}

impl Shader {
    // SPIR-V shaders, whether as text or as words, can’t be linked
    // with anything else
    fn is_spirv(&self) -> bool {
        matches!(
            self,
            Shader::Spirv(_) | Shader::Binary(_) | Shader::Passthrough
        )
    }
}

struct Loader<'a> {
    ctx: ParserContext,
    scanner: Scanner<'a>,

    // Bitmask of the sections seen so far
    had_sections: u32,
    current_shader: Option<Shader>,
    current_stage: Stage,
    vbo_parser: vbo::Parser,
    had_vertex_data: bool,
    index_buffer: Option<usize>,

    buffers: Vec<Buffer>,
    requirements: Requirements,
    commands: Vec<Command>,
    stages: [Vec<Shader>; N_STAGES],
    fence_timeout_ms: Option<u32>,
}

impl<'a> Loader<'a> {
    fn new(source: &'a str, config: &'a Config) -> Loader<'a> {
        let mut color_buffer =
            Buffer::new(BufferType::Color, config.framebuffer_format());
        let (width, height) = config.framebuffer_size();
        color_buffer.set_width(width);
        color_buffer.set_height(height);

        Loader {
            ctx: ParserContext::new(),
            scanner: Scanner::new(source, config),
            had_sections: 0,
            current_shader: None,
            current_stage: Stage::Vertex,
            vbo_parser: vbo::Parser::new(),
            had_vertex_data: false,
            index_buffer: None,
            buffers: vec![color_buffer],
            requirements: Requirements::new(),
            commands: Vec::new(),
            stages: Default::default(),
            fence_timeout_ms: None,
        }
    }

    fn end_section(&mut self) {
        if let Some(shader) = self.current_shader.take() {
            log::trace!(
                "{} shader from line {}",
                self.current_stage.name(),
                self.ctx.section_start(),
            );
            self.stages[self.current_stage as usize].push(shader);
        }

        self.ctx.begin_section(Section::None);
    }

    fn set_current_section(&mut self, section: Section) {
        self.had_sections |= 1 << (section as u32);
        self.ctx.begin_section(section);
    }

    fn is_stage_name<'b>(line: &'b str) -> Option<(Stage, &'b str)> {
        for &stage in ALL_STAGES.iter() {
            if let Some(tail) = strip_words_prefix(line, stage.name()) {
                if let Some(tail) = strip_word_prefix(tail, "shader") {
                    return Some((stage, tail));
                }
            }
        }

        None
    }

    fn check_add_shader(
        &self,
        stage: Stage,
        shader: &Shader,
    ) -> Result<(), LoadError> {
        if let Some(other) = self.stages[stage as usize].last() {
            if other.is_spirv() || shader.is_spirv() {
                return Err(error_at_line!(
                    self.ctx,
                    "SPIR-V source can not be linked with other shaders in the \
                     same stage"
                ));
            }
        }

        Ok(())
    }

    fn process_stage_header(&mut self, section_name: &str) -> ParseResult {
        let (stage, tail) = match Loader::is_stage_name(section_name) {
            Some(v) => v,
            None => return Ok(MatchResult::NotMatched),
        };

        let (shader, tail) =
            if let Some(tail) = strip_word_prefix(tail, "spirv") {
                (Shader::Spirv(String::new()), tail)
            } else if let Some(tail) = strip_word_prefix(tail, "binary") {
                (Shader::Binary(Vec::new()), tail)
            } else if let Some(tail) = strip_word_prefix(tail, "passthrough")
                .filter(|_| stage == Stage::Vertex)
            {
                (Shader::Passthrough, tail)
            } else {
                (Shader::Glsl(String::new()), tail)
            };

        if !tail.trim_end().is_empty() {
            return Ok(MatchResult::NotMatched);
        }

        self.check_add_shader(stage, &shader)?;

        if shader == Shader::Passthrough {
            // The passthrough shader section doesn’t have any data
            self.stages[stage as usize].push(shader);
            self.set_current_section(Section::None);
        } else {
            self.current_shader = Some(shader);
            self.current_stage = stage;
            self.set_current_section(Section::Shader);
        }

        Ok(MatchResult::Matched)
    }

    fn process_section_name(
        &mut self,
        section_name: &str,
    ) -> Result<(), LoadError> {
        if self.process_stage_header(section_name)? == MatchResult::Matched {
            return Ok(());
        }

        let section_name = section_name.trim();

        let section = match section_name {
            "comment" => Section::Comment,
            "require" => {
                if self.had_sections & !(1 << (Section::Comment as u32)) != 0 {
                    return Err(error_at_line!(
                        self.ctx,
                        "[require] must be the first section"
                    ));
                }
                Section::Require
            },
            "test" => Section::Test,
            "indices" => Section::Indices,
            "vertex data" => {
                if self.had_vertex_data {
                    return Err(error_at_line!(
                        self.ctx,
                        "Duplicate vertex data section"
                    ));
                }
                self.had_vertex_data = true;
                self.vbo_parser = vbo::Parser::new();
                Section::VertexData
            },
            _ => {
                return Err(error_at_line!(
                    self.ctx,
                    "Unknown section “{}”",
                    section_name
                ));
            },
        };

        self.set_current_section(section);

        Ok(())
    }

    fn process_section_header(&mut self, line: &str) -> ParseResult {
        if !line.starts_with('[') {
            return Ok(MatchResult::NotMatched);
        }

        self.end_section();

        let section_name = match line.find(']') {
            None => return Err(error_at_line!(self.ctx, "Missing ‘]’")),
            Some(pos) => match line.trim_end().split_at(pos) {
                (before, "]") => &before[1..],
                _ => {
                    return Err(error_at_line!(
                        self.ctx,
                        "Trailing data after ‘]’"
                    ));
                },
            },
        };

        self.process_section_name(section_name)?;

        Ok(MatchResult::Matched)
    }

    fn process_none_line(&self, line: &str) -> Result<(), LoadError> {
        match trim_line_or_skip(line) {
            Some(_) => Err(error_at_line!(self.ctx, "expected empty line")),
            None => Ok(()),
        }
    }

    fn parse_format(&self, line: &str) -> Result<Format, LoadError> {
        let line = line.trim();

        if line.is_empty() {
            return Err(error_at_line!(self.ctx, "Missing format name"));
        }

        Format::lookup_by_name(line)
            .ok_or_else(|| error_at_line!(self.ctx, "Unknown format: {}", line))
    }

    fn parse_fbsize(&self, line: &str) -> Result<(u32, u32), LoadError> {
        let invalid = || error_at_line!(self.ctx, "Invalid fbsize");

        let (width, tail) = parse_num::parse_u32(line).map_err(|_| invalid())?;
        let (height, tail) =
            parse_num::parse_u32(tail).map_err(|_| invalid())?;

        if tail.trim().is_empty() {
            Ok((width, height))
        } else {
            Err(invalid())
        }
    }

    fn depth_buffer_index(&self) -> Option<usize> {
        self.buffers
            .iter()
            .position(|b| b.buffer_type() == BufferType::Depth)
    }

    fn set_depth_stencil_format(&mut self, format: Format) {
        if let Some(index) = self.depth_buffer_index() {
            self.buffers[index].set_format(format);
            return;
        }

        let mut depth_buffer = Buffer::new(BufferType::Depth, format);
        depth_buffer.set_width(self.buffers[0].width());
        depth_buffer.set_height(self.buffers[0].height());
        self.buffers.push(depth_buffer);
    }

    fn set_fbsize(&mut self, width: u32, height: u32) {
        for buffer in self.buffers.iter_mut() {
            if matches!(
                buffer.buffer_type(),
                BufferType::Color | BufferType::Depth
            ) {
                buffer.set_width(width);
                buffer.set_height(height);
            }
        }
    }

    fn process_require_line(&mut self, line: &str) -> Result<(), LoadError> {
        let line = match trim_line_or_skip(line) {
            Some(l) => l,
            None => return Ok(()),
        };

        if let Some(tail) = strip_word_prefix(line, "framebuffer") {
            let format = self.parse_format(tail)?;
            self.buffers[0].set_format(format);
            return Ok(());
        }

        if let Some(tail) = strip_word_prefix(line, "depthstencil") {
            let format = self.parse_format(tail)?;
            self.set_depth_stencil_format(format);
            return Ok(());
        }

        if let Some(tail) = strip_word_prefix(line, "fbsize") {
            let (width, height) = self.parse_fbsize(tail)?;
            self.set_fbsize(width, height);
            return Ok(());
        }

        if let Some(tail) = strip_word_prefix(line, "fence_timeout") {
            match parse_num::parse_u32(tail) {
                Ok((timeout, tail)) if tail.trim().is_empty() => {
                    self.fence_timeout_ms = Some(timeout);
                    return Ok(());
                },
                _ => {
                    return Err(error_at_line!(
                        self.ctx,
                        "Invalid fence_timeout"
                    ));
                },
            }
        }

        match self.requirements.add(line) {
            Ok(_) => Ok(()),
            Err(e) => Err(error_at_line!(self.ctx, "{}", e)),
        }
    }

    fn decode_binary(
        ctx: &ParserContext,
        data: &mut Vec<u32>,
        line: &str,
    ) -> Result<(), LoadError> {
        let line = match trim_line_or_skip(line) {
            Some(l) => l,
            None => return Ok(()),
        };

        for part in line.split_whitespace() {
            match u32::from_str_radix(part, 16) {
                Ok(v) => data.push(v),
                Err(_) => {
                    return Err(error_at_line!(
                        ctx,
                        "Invalid hex value: {}",
                        part
                    ));
                },
            }
        }

        Ok(())
    }

    fn process_shader_line(&mut self, line: &str) -> Result<(), LoadError> {
        match self.current_shader.as_mut() {
            Some(Shader::Glsl(s)) | Some(Shader::Spirv(s)) => s.push_str(line),
            Some(Shader::Binary(data)) => {
                Loader::decode_binary(&self.ctx, data, line)?
            },
            Some(Shader::Passthrough) | None => {
                unreachable!("shader section without a shader")
            },
        }

        Ok(())
    }

    fn process_indices_line(&mut self, line: &str) -> Result<(), LoadError> {
        let line = match trim_line_or_skip(line) {
            Some(l) => l,
            None => return Ok(()),
        };

        let mut values = Vec::new();

        for token in line.split_whitespace() {
            let invalid = || {
                error_at_line!(
                    self.ctx,
                    "Invalid value in indices block: {}",
                    token
                )
            };

            if parse_num::is_hex(token) || token.starts_with('-') {
                return Err(invalid());
            }

            match parse_num::parse_u16(token) {
                Ok((value, "")) => values.push(Value::Uint16(value)),
                Ok(_) => return Err(invalid()),
                Err(e) if e.is_overflow() => {
                    return Err(error_at_line!(
                        self.ctx,
                        "Value too large in indices block: {}",
                        token
                    ));
                },
                Err(_) => return Err(invalid()),
            }
        }

        let index = match self.index_buffer {
            Some(index) => index,
            None => {
                let format = match Format::lookup_by_name("R16_UINT") {
                    Some(f) => f,
                    None => unreachable!("R16_UINT format missing"),
                };
                self.buffers.push(Buffer::new(BufferType::Index, format));
                self.buffers.len() - 1
            },
        };
        self.index_buffer = Some(index);

        let buffer = &mut self.buffers[index];
        let offset = buffer.size_in_bytes();

        buffer.set_data_with_offset(&values, offset).map_err(|source| {
            LoadError::Buffer { line_num: self.ctx.error_line(), source }
        })
    }

    fn process_line(&mut self, line: &str) -> Result<(), LoadError> {
        if self.process_section_header(line)? == MatchResult::Matched {
            return Ok(());
        }

        match self.ctx.section() {
            Section::None => self.process_none_line(line),
            Section::Comment => Ok(()),
            Section::Require => self.process_require_line(line),
            Section::Shader => self.process_shader_line(line),
            Section::VertexData => {
                self.vbo_parser.parse_line(&self.ctx, &mut self.buffers, line)
            },
            Section::Indices => self.process_indices_line(line),
            Section::Test => commands::process_test_line(
                &self.ctx,
                &mut self.buffers,
                &mut self.commands,
                line,
            ),
        }
    }

    fn parse(mut self) -> Result<Script, LoadError> {
        let mut line = String::new();

        while self.scanner.read_line(&mut line)? {
            self.ctx.set_line_num(self.scanner.line_num());
            self.process_line(&line)?;
        }

        self.end_section();

        log::debug!(
            "loaded script with {} buffers and {} commands",
            self.buffers.len(),
            self.commands.len(),
        );

        Ok(Script {
            buffers: self.buffers,
            requirements: self.requirements,
            commands: self.commands,
            stages: self.stages,
            fence_timeout_ms: self.fence_timeout_ms,
        })
    }
}

impl Script {
    /// Loads a script using the default [Config]
    pub fn load(source: &str) -> Result<Script, LoadError> {
        Script::load_with_config(source, &Config::default())
    }

    pub fn load_with_config(
        source: &str,
        config: &Config,
    ) -> Result<Script, LoadError> {
        Loader::new(source, config).parse()
    }

    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    pub fn required_features(&self) -> &[String] {
        self.requirements.features()
    }

    pub fn required_device_extensions(&self) -> &[String] {
        self.requirements.device_extensions()
    }

    pub fn required_instance_extensions(&self) -> &[String] {
        self.requirements.instance_extensions()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn shaders(&self, stage: Stage) -> &[Shader] {
        &self.stages[stage as usize]
    }

    pub fn fence_timeout_ms(&self) -> Option<u32> {
        self.fence_timeout_ms
    }

    pub fn color_buffer(&self) -> &Buffer {
        &self.buffers[0]
    }

    pub fn depth_buffer(&self) -> Option<&Buffer> {
        self.buffers
            .iter()
            .find(|b| b.buffer_type() == BufferType::Depth)
    }

    pub fn index_buffer(&self) -> Option<&Buffer> {
        self.buffers
            .iter()
            .find(|b| b.buffer_type() == BufferType::Index)
    }
}
