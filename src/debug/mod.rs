//! Debugger services that breakpoints consult for address translation and
//! symbolic labels.

mod label;
mod translate;

pub use label::{CodeLabel, LabelResolver, LabelTable};
pub use translate::{
    AddressTranslator, IdentityTranslator, MappedRegion, MemoryMap,
};

//===========================================================================//
