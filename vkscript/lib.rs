//! Loader for VkScript test scripts. A script is parsed into a
//! [Script] holding its buffers, requirements, shaders and test
//! commands. Each [Buffer] stores its contents as raw bytes in a
//! [Format] and can be compared against another buffer.

mod half_float;
mod util;
mod scanner;
mod vbo;
mod commands;

pub mod value;
pub mod format;
pub mod buffer;
pub mod parse_num;
pub mod requirements;
pub mod shader_stage;
pub mod config;
pub mod script;

pub use buffer::{Buffer, BufferError, BufferType};
pub use commands::{Command, Operation};
pub use config::Config;
pub use format::{Format, LayoutStd, Mode, ScalarType, Segment};
pub use requirements::Requirements;
pub use script::{LoadError, Script, Shader};
pub use shader_stage::Stage;
pub use value::Value;
