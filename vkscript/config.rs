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

use crate::format::Format;
use thiserror::Error;

/// A token replacement applied to every line of a script before it
/// is parsed. Any occurences of `token` are replaced with
/// `replacement`.
#[derive(Clone, Debug)]
pub struct TokenReplacement {
    pub token: String,
    pub replacement: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("The token replacements cause an infinite loop")]
pub struct TokenReplacementLoop;

// Number of replacements on a single line after which we give up
const MAX_REPLACEMENTS: usize = 1000;

/// Settings that affect how a script is loaded
#[derive(Clone, Debug)]
pub struct Config {
    token_replacements: Vec<TokenReplacement>,
    framebuffer_format: Option<Format>,
    framebuffer_width: u32,
    framebuffer_height: u32,
}

impl Config {
    pub fn new() -> Config {
        Config {
            token_replacements: Vec::new(),
            framebuffer_format: None,
            framebuffer_width: 250,
            framebuffer_height: 250,
        }
    }

    /// Adds a token replacement. The replacement can also contain
    /// tokens which will be replaced as well. Loading a script will
    /// fail if this causes an infinite loop.
    pub fn add_token_replacement(
        &mut self,
        token: String,
        replacement: String,
    ) {
        self.token_replacements.push(TokenReplacement { token, replacement });
    }

    pub fn token_replacements(&self) -> &[TokenReplacement] {
        &self.token_replacements
    }

    /// Sets the format of the color buffer that every script starts
    /// with. It can still be changed by the script with the
    /// `framebuffer` requirement. Defaults to `B8G8R8A8_UNORM`.
    pub fn set_framebuffer_format(&mut self, format: Format) {
        self.framebuffer_format = Some(format);
    }

    pub fn framebuffer_format(&self) -> Format {
        match &self.framebuffer_format {
            Some(format) => format.clone(),
            None => match Format::lookup_by_name("B8G8R8A8_UNORM") {
                Some(format) => format,
                None => unreachable!("default framebuffer format missing"),
            },
        }
    }

    /// Sets the default size of the framebuffer. Scripts can override
    /// it with the `fbsize` requirement.
    pub fn set_framebuffer_size(&mut self, width: u32, height: u32) {
        self.framebuffer_width = width;
        self.framebuffer_height = height;
    }

    pub fn framebuffer_size(&self) -> (u32, u32) {
        (self.framebuffer_width, self.framebuffer_height)
    }

    /// Applies the token replacements to the line in place
    pub(crate) fn replace_tokens(
        &self,
        line: &mut String,
    ) -> Result<(), TokenReplacementLoop> {
        if self.token_replacements.is_empty() {
            return Ok(());
        }

        let mut count = 0;
        let mut pos = 0;

        while pos < line.len() {
            'token_loop: loop {
                for token_replacement in self.token_replacements.iter() {
                    if line[pos..].starts_with(&token_replacement.token) {
                        count += 1;

                        if count >= MAX_REPLACEMENTS {
                            return Err(TokenReplacementLoop);
                        }

                        line.replace_range(
                            pos..pos + token_replacement.token.len(),
                            &token_replacement.replacement,
                        );

                        // Start again from the first token in case
                        // the replacement contains an earlier one
                        continue 'token_loop;
                    }
                }

                break 'token_loop;
            }

            match line[pos..].chars().next() {
                Some(ch) => pos += ch.len_utf8(),
                None => break,
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn replace(config: &Config, line: &str) -> Result<String, TokenReplacementLoop> {
        let mut line = line.to_owned();
        config.replace_tokens(&mut line)?;
        Ok(line)
    }

    #[test]
    fn test_token_replacements() {
        let mut config = Config::new();
        config.add_token_replacement("one".to_owned(), "1".to_owned());
        config.add_token_replacement("two".to_owned(), "2".to_owned());
        assert_eq!(replace(&config, "one two").unwrap(), "1 2");
        assert_eq!(config.token_replacements().len(), 2);

        // Chain of replacements
        let mut config = Config::new();
        config.add_token_replacement("this".to_owned(), "thatthing".to_owned());
        config.add_token_replacement("that".to_owned(), "t".to_owned());
        config.add_token_replacement("thing".to_owned(), "omatoes".to_owned());
        assert_eq!(replace(&config, "I like this").unwrap(), "I like tomatoes");

        let mut config = Config::new();
        config.add_token_replacement("recursion".to_owned(), "deeper".to_owned());
        config.add_token_replacement("deeper".to_owned(), "recursion".to_owned());
        let e = replace(&config, "Infinite recursion!").unwrap_err();
        assert_eq!(
            e.to_string(),
            "The token replacements cause an infinite loop"
        );

        // An empty token matches everywhere
        let mut config = Config::new();
        config.add_token_replacement("".to_owned(), "x".to_owned());
        assert_eq!(replace(&config, "a"), Err(TokenReplacementLoop));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.framebuffer_size(), (250, 250));
        assert_eq!(config.framebuffer_format().name(), Some("B8G8R8A8_UNORM"));

        let mut config = Config::new();
        config.set_framebuffer_size(32, 16);
        config.set_framebuffer_format(
            Format::lookup_by_name("R8G8B8A8_UNORM").unwrap()
        );
        assert_eq!(config.framebuffer_size(), (32, 16));
        assert_eq!(config.framebuffer_format().name(), Some("R8G8B8A8_UNORM"));
    }
}
