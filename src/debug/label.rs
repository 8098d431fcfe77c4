use crate::mem::{AddressInfo, MemoryType};
use std::collections::HashMap;

//===========================================================================//

/// A symbolic name attached to a location in memory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodeLabel {
    /// The offset of the labelled location within its memory type.
    pub address: u32,
    /// The memory type that the label is defined in.
    pub memory_type: MemoryType,
    /// The label's name.
    pub label: String,
    /// A free-form comment attached to the label (possibly empty).
    pub comment: String,
}

//===========================================================================//

/// A source of labels for memory locations.
pub trait LabelResolver {
    /// Returns the label with the given name, if there is one.
    fn label_by_name(&self, name: &str) -> Option<&CodeLabel>;

    /// Returns the label defined at the given location, if there is one.
    fn label_at(&self, address: AddressInfo) -> Option<&CodeLabel>;
}

//===========================================================================//

/// A set of labels, optionally layered over another label resolver.  Labels
/// in the table take priority; lookups that miss fall through to the inner
/// resolver.
#[derive(Default)]
pub struct LabelTable {
    inner: Option<Box<dyn LabelResolver>>,
    by_name: HashMap<String, CodeLabel>,
    by_address: HashMap<(MemoryType, u32), String>,
}

impl LabelTable {
    /// Returns an empty label table.
    pub fn new() -> LabelTable {
        LabelTable::default()
    }

    /// Returns an empty label table that delegates missed lookups to
    /// `inner`.
    pub fn layered(inner: Box<dyn LabelResolver>) -> LabelTable {
        LabelTable { inner: Some(inner), ..LabelTable::default() }
    }

    /// Defines a label, replacing any label with the same name or at the
    /// same location.
    pub fn insert(
        &mut self,
        address: u32,
        memory_type: MemoryType,
        label: &str,
        comment: &str,
    ) {
        self.remove(label);
        if let Some(old_name) =
            self.by_address.get(&(memory_type, address)).cloned()
        {
            self.by_name.remove(&old_name);
        }
        let code_label = CodeLabel {
            address,
            memory_type,
            label: label.to_string(),
            comment: comment.to_string(),
        };
        self.by_address.insert((memory_type, address), label.to_string());
        self.by_name.insert(label.to_string(), code_label);
    }

    /// Removes the label with the given name, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<CodeLabel> {
        let label = self.by_name.remove(name)?;
        self.by_address.remove(&(label.memory_type, label.address));
        Some(label)
    }

    /// Returns the number of labels defined directly in this table.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if no labels are defined directly in this table.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl LabelResolver for LabelTable {
    fn label_by_name(&self, name: &str) -> Option<&CodeLabel> {
        match self.by_name.get(name) {
            Some(label) => Some(label),
            None => self.inner.as_ref()?.label_by_name(name),
        }
    }

    fn label_at(&self, address: AddressInfo) -> Option<&CodeLabel> {
        let offset = address.mapped_address()?;
        match self.by_address.get(&(address.memory_type, offset)) {
            Some(name) => self.by_name.get(name),
            None => self.inner.as_ref()?.label_at(address),
        }
    }
}

//===========================================================================//


//===========================================================================//
