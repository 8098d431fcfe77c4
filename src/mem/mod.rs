//! Types for identifying emulated memory spaces and CPU cores.

mod cpu;
mod info;
mod memtype;

pub use cpu::CpuType;
pub use info::AddressInfo;
pub use memtype::MemoryType;

//===========================================================================//
