//! Breakpoint model for multi-system (retro) emulator debuggers.

#![warn(missing_docs)]

pub mod bkpt;
pub mod debug;
pub mod mem;
pub mod parse;
