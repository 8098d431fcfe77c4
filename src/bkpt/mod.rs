//! Facilities for representing debugger breakpoints and encoding them for a
//! native debugging engine.

mod breakpoint;
mod error;
mod flags;
mod list;
mod record;
mod script;

pub use breakpoint::{AddressType, Breakpoint, is_cpu_breakpoint};
pub use error::BreakpointError;
pub use flags::{AccessKind, BreakpointTypeFlags};
pub use list::BreakpointList;
pub use record::{
    CONDITION_CAPACITY, ExportRecord, MAX_CONDITION_LEN, RECORD_SIZE,
};

//===========================================================================//
