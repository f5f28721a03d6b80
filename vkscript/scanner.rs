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

//! Line reading and the shared parser state. A [Scanner] reads
//! logical lines out of the script text, joining lines that end with
//! the continuation character (`\`) and applying the token
//! replacements from the [Config]. The [ParserContext] carries the
//! current line number and section through every section parser.

use crate::config::{Config, TokenReplacementLoop};
use crate::script::LoadError;
use std::str::SplitInclusive;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    None,
    Comment,
    Require,
    Shader,
    VertexData,
    Indices,
    Test,
}

impl Section {
    /// Whether this section holds a block of data. Errors in these
    /// sections are reported against the line before the one being
    /// parsed.
    pub fn is_data_block(self) -> bool {
        matches!(
            self,
            Section::Require | Section::VertexData | Section::Indices
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ParserContext {
    line_num: usize,
    section: Section,
    section_start: usize,
}

/// Reads lines from the script text
#[derive(Debug)]
pub struct Scanner<'a> {
    config: &'a Config,
    lines: SplitInclusive<'a, char>,

    line_num: usize,
    next_line_num: usize,
}

impl ParserContext {
    pub fn new() -> ParserContext {
        ParserContext {
            line_num: 0,
            section: Section::None,
            section_start: 0,
        }
    }

    /// The 1-based number of the physical line where the current
    /// line starts
    #[inline]
    pub fn line_num(&self) -> usize {
        self.line_num
    }

    pub fn set_line_num(&mut self, line_num: usize) {
        self.line_num = line_num;
    }

    #[inline]
    pub fn section(&self) -> Section {
        self.section
    }

    /// Line number of the header of the current section
    #[inline]
    pub fn section_start(&self) -> usize {
        self.section_start
    }

    pub fn begin_section(&mut self, section: Section) {
        log::trace!("line {}: entering {:?} section", self.line_num, section);

        self.section = section;
        self.section_start = self.line_num;
    }

    /// The line number that errors on the current line are reported
    /// with
    pub fn error_line(&self) -> usize {
        if self.section.is_data_block() {
            self.line_num.saturating_sub(1)
        } else {
            self.line_num
        }
    }
}

impl Default for ParserContext {
    fn default() -> ParserContext {
        ParserContext::new()
    }
}

macro_rules! error_at_line {
    ($ctx:expr, $($format_arg:expr),+) => {
        crate::script::LoadError::Invalid {
            line_num: $ctx.error_line(),
            message: format!($($format_arg),+),
        }
    };
}

pub(crate) use error_at_line;

#[derive(PartialEq, Eq, Debug)]
pub(crate) enum MatchResult {
    // The line was successfully parsed
    Matched,
    // The line does not match the command handled by this method so
    // the parser should try parsing it as something else.
    NotMatched,
}

// Result returned by a line parser method. It can either succeed,
// report that the line isn’t intended as this type of item, or report
// an error.
pub(crate) type ParseResult = Result<MatchResult, LoadError>;

// Macro to handle the match result. The calling function should be a
// Result<(), T> type and the function to call should return
// Result<MatchResult, T>. If the called function matched the line or
// returned an error then it will cause the calling function to
// return. Otherwise it can continue to try the next function.
macro_rules! handle_match_result {
    ($func:expr) => {
        match $func? {
            crate::scanner::MatchResult::NotMatched => (),
            crate::scanner::MatchResult::Matched => return Ok(()),
        }
    };
}

pub(crate) use handle_match_result;

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, config: &'a Config) -> Scanner<'a> {
        Scanner {
            config,
            lines: text.split_inclusive('\n'),
            line_num: 0,
            next_line_num: 1,
        }
    }

    /// Replaces the contents of `line` with the next logical line,
    /// including its line terminator if it has one. Returns false
    /// when there are no more lines.
    pub fn read_line(&mut self, line: &mut String) -> Result<bool, LoadError> {
        line.clear();

        self.line_num = self.next_line_num;

        let mut found = false;

        for part in self.lines.by_ref() {
            found = true;
            self.next_line_num += 1;

            if let Some(head) = part
                .strip_suffix("\\\n")
                .or_else(|| part.strip_suffix("\\\r\n"))
            {
                line.push_str(head);
                continue;
            }

            line.push_str(part);
            break;
        }

        if !found {
            return Ok(false);
        }

        self.config.replace_tokens(line).map_err(
            |TokenReplacementLoop| LoadError::TokenReplacementLoop {
                line_num: self.line_num,
            }
        )?;

        Ok(true)
    }

    /// Returns the line number of the start of the last line that was
    /// returned by [read_line](Scanner::read_line)
    #[inline]
    pub fn line_num(&self) -> usize {
        self.line_num
    }
}

// Utility like String::strip_prefix except that it additionally
// strips any leading whitespace and checks that the prefix is followed
// either by the end of the string or some whitespace. The returned
// tail will include the trailing whitespace if there is any.
pub(crate) fn strip_word_prefix<'a>(
    s: &'a str,
    prefix: &str,
) -> Option<&'a str> {
    let tail = s.trim_start().strip_prefix(prefix)?;

    match tail.chars().next() {
        None => Some(tail),
        Some(ch) if ch.is_whitespace() => Some(tail),
        Some(_) => None,
    }
}

// Calls strip_word_prefix for each word in the prefix so that any
// amount of whitespace can separate the words
pub(crate) fn strip_words_prefix<'a>(
    mut s: &'a str,
    prefix: &str,
) -> Option<&'a str> {
    for word in prefix.split_whitespace() {
        s = strip_word_prefix(s, word)?;
    }

    Some(s)
}

// Gets the next word from the string and returns it along with the
// string tail, or None if the string doesn’t have any non-whitespace
// characters
pub(crate) fn next_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();

    s.split_whitespace().next().map(|word| (word, &s[word.len()..]))
}

// Remove comments (ie, # upto the end of the line) and trim leading
// and trailing whitespace. If the line ends up empty, return None,
// otherwise return the trimmed string.
pub(crate) fn trim_line_or_skip(line: &str) -> Option<&str> {
    let line = match line.split_once('#') {
        Some((head, _comment)) => head,
        None => line,
    }.trim();

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}
