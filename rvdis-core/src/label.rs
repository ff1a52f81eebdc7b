/// Address to label resolution for control-flow targets. Named entries
/// (from `.symtab`) always win over synthesized ones.
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelRef {
    Named(String),
    Synth(usize),
}

impl LabelRef {
    /// The text rendered inside `<...>` / before `:` in the disassembly.
    pub fn display_name(&self) -> String {
        match self {
            LabelRef::Named(name) => name.clone(),
            LabelRef::Synth(index) => format!("L{index}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct LabelTable {
    labels: BTreeMap<u32, LabelRef>,
    next_synth: usize,
}

impl LabelTable {
    pub fn new() -> Self {
        LabelTable::default()
    }

    /// Inserts (or overwrites) a named label at `addr`. Symbol-table
    /// labels must all be inserted via this method before any
    /// `ensure_synth` call, so names are never shadowed.
    pub fn insert_named(&mut self, addr: u32, name: String) {
        self.labels.insert(addr, LabelRef::Named(name));
    }

    /// Creates a synthesized label at `addr` if none exists yet.
    /// No-op if `addr` already has an entry (named or synthesized).
    pub fn ensure_synth(&mut self, addr: u32) {
        self.labels.entry(addr).or_insert_with(|| {
            let index = self.next_synth;
            self.next_synth += 1;
            LabelRef::Synth(index)
        });
    }

    pub fn has(&self, addr: u32) -> bool {
        self.labels.contains_key(&addr)
    }

    pub fn get(&self, addr: u32) -> Option<&LabelRef> {
        self.labels.get(&addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn named_label_is_never_overwritten_by_synth() {
        let mut table = LabelTable::new();
        table.insert_named(0x100, "main".to_string());
        table.ensure_synth(0x100);
        assert_eq!(table.get(0x100), Some(&LabelRef::Named("main".to_string())));
    }

    #[test]
    fn synth_indices_are_contiguous_and_in_encounter_order() {
        let mut table = LabelTable::new();
        table.ensure_synth(0x200);
        table.ensure_synth(0x100);
        table.ensure_synth(0x200); // no-op, already present
        assert_eq!(table.get(0x200), Some(&LabelRef::Synth(0)));
        assert_eq!(table.get(0x100), Some(&LabelRef::Synth(1)));
    }

    #[test]
    fn ensure_synth_is_a_no_op_on_collision() {
        let mut table = LabelTable::new();
        table.ensure_synth(0x10);
        table.ensure_synth(0x10);
        assert_eq!(table.get(0x10), Some(&LabelRef::Synth(0)));
    }

    #[test]
    fn unknown_address_has_no_label() {
        let table = LabelTable::new();
        assert!(!table.has(0x999));
        assert_eq!(table.get(0x999), None);
    }
}
