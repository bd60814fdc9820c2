use crate::constants::{COMMAND_FINANCIAL_SPECIALIST, MAIN, MUSTER, QUARTERDECK_WATCHBILL};
use bitflags::bitflags;

bitflags! {
    /// The built-in registry of modules that carry scoped access levels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ModuleSet: u32 {
        const MAIN = 1 << 0;
        const MUSTER = 1 << 1;
        const QUARTERDECK_WATCHBILL = 1 << 2;
        const COMMAND_FINANCIAL_SPECIALIST = 1 << 3;

        const ALL = Self::MAIN.bits()
            | Self::MUSTER.bits()
            | Self::QUARTERDECK_WATCHBILL.bits()
            | Self::COMMAND_FINANCIAL_SPECIALIST.bits();
    }
}

const NAMES: [(ModuleSet, &str); 4] = [
    (ModuleSet::MAIN, MAIN),
    (ModuleSet::MUSTER, MUSTER),
    (ModuleSet::QUARTERDECK_WATCHBILL, QUARTERDECK_WATCHBILL),
    (ModuleSet::COMMAND_FINANCIAL_SPECIALIST, COMMAND_FINANCIAL_SPECIALIST),
];

impl ModuleSet {
    /// Returns `true` if `name` is one of the built-in modules.
    #[must_use]
    pub fn is_known(name: &str) -> bool {
        !Self::from(name).is_empty()
    }

    /// Module identifiers contained in this set, in registry order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        NAMES.into_iter().filter(move |(flag, _)| self.contains(*flag)).map(|(_, name)| name)
    }
}

impl From<&str> for ModuleSet {
    fn from(s: &str) -> Self {
        NAMES.iter().find(|(_, name)| *name == s).map_or_else(Self::empty, |(flag, _)| *flag)
    }
}
