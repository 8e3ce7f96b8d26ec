//! Identifier Space Registry
//!
//! Static partitioning of the three 8-bit identifier spaces (SVC call
//! numbers, event numbers, option numbers) into per-module subranges.
//!
//! # Layout (call space)
//! ```text
//! 0x00      0x60   0x6C   0x70      0x90    0xA0    0xB0    0xC0      0xFF
//! |  free   | core | rsvd |   GAP   | GATTC | GATTS | L2CAP |  free   |
//! ```
//!
//! Every number resolves to exactly one [`Assignment`]:
//! - inside a range and listed as defined: `Defined(module)`
//! - inside a range, not defined: `Reserved(module)` (recognized module,
//!   operation not implemented yet)
//! - outside every range: `Unassigned`
//!
//! # Invariants
//! - Ranges of the same space never overlap
//! - `base <= last` for every range
//! - Defined numbers are strictly ascending and lie within `[base, last]`
//!
//! These are checked by [`Registry::validate`], a `const fn`, so a broken
//! table is rejected while it is being compiled.

use core::fmt;

use bitflags::bitflags;

/// The three independent identifier spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SpaceKind {
    /// Supervisor call numbers
    Call = 0,
    /// Event identifiers delivered by the service provider
    Event = 1,
    /// Option identifiers for the option get/set calls
    Option = 2,
}

impl SpaceKind {
    /// All space kinds, in declaration order.
    pub const ALL: [SpaceKind; 3] = [SpaceKind::Call, SpaceKind::Event, SpaceKind::Option];

    /// The flag for this space in a [`Spaces`] set.
    #[inline]
    pub const fn flag(self) -> Spaces {
        match self {
            SpaceKind::Call => Spaces::CALL,
            SpaceKind::Event => Spaces::EVENT,
            SpaceKind::Option => Spaces::OPTION,
        }
    }

    #[inline]
    const fn same(self, other: SpaceKind) -> bool {
        self as u8 == other as u8
    }
}

impl fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpaceKind::Call => "call",
            SpaceKind::Event => "event",
            SpaceKind::Option => "option",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Set of identifier spaces a module holds allocations in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Spaces: u8 {
        const CALL = 1 << 0;
        const EVENT = 1 << 1;
        const OPTION = 1 << 2;
    }
}

/// Functional modules that own identifier subranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ModuleId {
    /// Common stack calls (enable, events, UUIDs, options)
    Core = 0,
    /// Call block held back for a future module
    Reserved = 1,
    /// Generic Access Profile
    ConnectionManagement = 2,
    /// GATT client
    AttributeClient = 3,
    /// GATT server
    AttributeServer = 4,
    /// L2CAP
    TransportChannel = 5,
}

impl ModuleId {
    /// Stable name of the module.
    pub const fn name(self) -> &'static str {
        match self {
            ModuleId::Core => "core",
            ModuleId::Reserved => "reserved",
            ModuleId::ConnectionManagement => "connection-management",
            ModuleId::AttributeClient => "attribute-client",
            ModuleId::AttributeServer => "attribute-server",
            ModuleId::TransportChannel => "transport-channel",
        }
    }

    #[inline]
    const fn same(self, other: ModuleId) -> bool {
        self as u8 == other as u8
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One module's allocation in one identifier space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRange {
    /// Space this range partitions
    pub space: SpaceKind,
    /// Owning module
    pub module: ModuleId,
    /// First number of the range (inclusive)
    pub base: u8,
    /// Last number of the range (inclusive); end of the reserved capacity,
    /// not of the defined numbers
    pub last: u8,
    /// Numbers with an assigned meaning, strictly ascending
    pub defined: &'static [u8],
}

impl ModuleRange {
    /// Describe a range. Nothing is checked here; see [`Registry::validate`].
    pub const fn new(
        space: SpaceKind,
        module: ModuleId,
        base: u8,
        last: u8,
        defined: &'static [u8],
    ) -> Self {
        Self {
            space,
            module,
            base,
            last,
            defined,
        }
    }

    /// Whether `number` falls inside `[base, last]`.
    #[inline]
    pub const fn contains(&self, number: u8) -> bool {
        self.base <= number && number <= self.last
    }

    /// Whether `number` has an assigned meaning in this range.
    pub const fn defines(&self, number: u8) -> bool {
        let mut i = 0;
        while i < self.defined.len() {
            if self.defined[i] == number {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Number of slots allocated to the module (`last - base + 1`), or 0
    /// for an inverted range.
    #[inline]
    pub const fn capacity(&self) -> usize {
        (self.last as usize + 1).saturating_sub(self.base as usize)
    }

    /// Slots allocated but not yet defined.
    #[inline]
    pub const fn reserved_slots(&self) -> usize {
        self.capacity().saturating_sub(self.defined.len())
    }

    const fn overlaps(&self, other: &ModuleRange) -> bool {
        self.space.same(other.space) && self.base <= other.last && other.base <= self.last
    }
}

/// Outcome of looking up a number in one space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// No module owns the number
    Unassigned,
    /// The number is in a module's range but has no meaning yet
    Reserved(ModuleId),
    /// The number is defined by the module
    Defined(ModuleId),
}

impl Assignment {
    /// Owning module, if any.
    #[inline]
    pub const fn module(self) -> Option<ModuleId> {
        match self {
            Assignment::Unassigned => None,
            Assignment::Reserved(module) | Assignment::Defined(module) => Some(module),
        }
    }

    /// Whether some module owns the number.
    #[inline]
    pub const fn is_assigned(self) -> bool {
        !matches!(self, Assignment::Unassigned)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Unassigned => f.write_str("unassigned"),
            Assignment::Reserved(module) => write!(f, "reserved for {}", module),
            Assignment::Defined(module) => write!(f, "defined in {}", module),
        }
    }
}

/// Structural defects in a range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// `base > last`
    InvertedRange { space: SpaceKind, module: ModuleId },
    /// A defined number lies outside `[base, last]`
    DefinedOutsideRange {
        space: SpaceKind,
        module: ModuleId,
        number: u8,
    },
    /// Defined numbers are not strictly ascending (or repeat)
    UnorderedDefined {
        space: SpaceKind,
        module: ModuleId,
        number: u8,
    },
    /// The same module has two ranges in one space
    DuplicateModule { space: SpaceKind, module: ModuleId },
    /// Two ranges of the same space share at least one number
    Overlap {
        space: SpaceKind,
        first: ModuleId,
        second: ModuleId,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RegistryError::InvertedRange { space, module } => {
                write!(f, "{} range of {} ends before it starts", space, module)
            }
            RegistryError::DefinedOutsideRange {
                space,
                module,
                number,
            } => write!(
                f,
                "{} number {:#04x} defined by {} lies outside its range",
                space, number, module
            ),
            RegistryError::UnorderedDefined {
                space,
                module,
                number,
            } => write!(
                f,
                "{} number {:#04x} of {} is out of order or repeated",
                space, number, module
            ),
            RegistryError::DuplicateModule { space, module } => {
                write!(f, "{} holds more than one {} range", module, space)
            }
            RegistryError::Overlap {
                space,
                first,
                second,
            } => write!(f, "{} ranges of {} and {} overlap", space, first, second),
        }
    }
}

/// A published, immutable table of module ranges.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    ranges: &'static [ModuleRange],
}

impl Registry {
    /// Wrap a range table. Call [`Registry::validate`] (or
    /// [`Registry::assert_valid`] in a `const` item) before publishing it.
    pub const fn new(ranges: &'static [ModuleRange]) -> Self {
        Self { ranges }
    }

    /// All ranges in table order.
    #[inline]
    pub const fn ranges(&self) -> &'static [ModuleRange] {
        self.ranges
    }

    /// Resolve `number` in `space`.
    ///
    /// # Arguments
    /// * `space` - Identifier space to search
    /// * `number` - Number to classify
    ///
    /// # Returns
    /// * `Defined(module)` - the owning range lists `number` as defined
    /// * `Reserved(module)` - inside the owning range, no meaning yet
    /// * `Unassigned` - outside every range of `space`
    ///
    /// Total over `u8`: every number yields exactly one outcome.
    pub const fn lookup(&self, space: SpaceKind, number: u8) -> Assignment {
        let mut i = 0;
        while i < self.ranges.len() {
            let range = &self.ranges[i];
            if range.space.same(space) && range.contains(number) {
                return if range.defines(number) {
                    Assignment::Defined(range.module)
                } else {
                    Assignment::Reserved(range.module)
                };
            }
            i += 1;
        }
        Assignment::Unassigned
    }

    /// The range `module` holds in `space`, if any.
    pub fn range(&self, space: SpaceKind, module: ModuleId) -> Option<&'static ModuleRange> {
        let ranges: &'static [ModuleRange] = self.ranges;
        ranges.iter().find(|r| r.space == space && r.module == module)
    }

    /// Every range owned by `module`, across all spaces.
    pub fn ranges_for(&self, module: ModuleId) -> impl Iterator<Item = &'static ModuleRange> {
        let ranges: &'static [ModuleRange] = self.ranges;
        ranges.iter().filter(move |r| r.module == module)
    }

    /// Spaces in which `module` holds an allocation.
    pub fn spaces_of(&self, module: ModuleId) -> Spaces {
        self.ranges_for(module)
            .fold(Spaces::empty(), |set, r| set | r.space.flag())
    }

    /// Check the structural invariants of the table.
    pub const fn validate(&self) -> Result<(), RegistryError> {
        let mut i = 0;
        while i < self.ranges.len() {
            let range = &self.ranges[i];
            let (space, module) = (range.space, range.module);

            if range.base > range.last {
                return Err(RegistryError::InvertedRange { space, module });
            }

            let mut d = 0;
            while d < range.defined.len() {
                let number = range.defined[d];
                if !range.contains(number) {
                    return Err(RegistryError::DefinedOutsideRange {
                        space,
                        module,
                        number,
                    });
                }
                if d > 0 && range.defined[d - 1] >= number {
                    return Err(RegistryError::UnorderedDefined {
                        space,
                        module,
                        number,
                    });
                }
                d += 1;
            }

            let mut j = i + 1;
            while j < self.ranges.len() {
                let other = &self.ranges[j];
                if other.space.same(space) && other.module.same(module) {
                    return Err(RegistryError::DuplicateModule { space, module });
                }
                if range.overlaps(other) {
                    return Err(RegistryError::Overlap {
                        space,
                        first: module,
                        second: other.module,
                    });
                }
                j += 1;
            }
            i += 1;
        }
        Ok(())
    }

    /// Panic if the table is invalid. Use from a `const` item so the panic
    /// becomes a build error.
    pub const fn assert_valid(&self) {
        match self.validate() {
            Ok(()) => {}
            Err(RegistryError::InvertedRange { .. }) => panic!("range ends before it starts"),
            Err(RegistryError::DefinedOutsideRange { .. }) => {
                panic!("defined number lies outside its range")
            }
            Err(RegistryError::UnorderedDefined { .. }) => {
                panic!("defined numbers must be strictly ascending")
            }
            Err(RegistryError::DuplicateModule { .. }) => {
                panic!("module holds more than one range in a space")
            }
            Err(RegistryError::Overlap { .. }) => panic!("ranges of the same space overlap"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALL: SpaceKind = SpaceKind::Call;

    static SAMPLE: [ModuleRange; 3] = [
        ModuleRange::new(CALL, ModuleId::Core, 0x10, 0x1F, &[0x10, 0x11]),
        ModuleRange::new(CALL, ModuleId::ConnectionManagement, 0x30, 0x3F, &[0x30]),
        ModuleRange::new(SpaceKind::Event, ModuleId::Core, 0x10, 0x1F, &[]),
    ];

    #[test]
    fn test_lookup_outcomes() {
        let registry = Registry::new(&SAMPLE);
        assert_eq!(registry.lookup(CALL, 0x10), Assignment::Defined(ModuleId::Core));
        assert_eq!(registry.lookup(CALL, 0x1F), Assignment::Reserved(ModuleId::Core));
        assert_eq!(registry.lookup(CALL, 0x20), Assignment::Unassigned);
        assert_eq!(
            registry.lookup(CALL, 0x30),
            Assignment::Defined(ModuleId::ConnectionManagement)
        );
        // Same number, different space
        assert_eq!(
            registry.lookup(SpaceKind::Event, 0x11),
            Assignment::Reserved(ModuleId::Core)
        );
        assert_eq!(registry.lookup(SpaceKind::Option, 0x11), Assignment::Unassigned);
    }

    #[test]
    fn test_sample_is_valid() {
        assert_eq!(Registry::new(&SAMPLE).validate(), Ok(()));
    }

    #[test]
    fn test_overlap_rejected() {
        static CLASH: [ModuleRange; 2] = [
            ModuleRange::new(CALL, ModuleId::Core, 0x60, 0x6B, &[0x65]),
            ModuleRange::new(CALL, ModuleId::Reserved, 0x65, 0x6F, &[0x65]),
        ];
        assert_eq!(
            Registry::new(&CLASH).validate(),
            Err(RegistryError::Overlap {
                space: CALL,
                first: ModuleId::Core,
                second: ModuleId::Reserved,
            })
        );
    }

    #[test]
    fn test_same_numbers_in_different_spaces_allowed() {
        static SPLIT: [ModuleRange; 2] = [
            ModuleRange::new(CALL, ModuleId::Core, 0x60, 0x6B, &[]),
            ModuleRange::new(SpaceKind::Option, ModuleId::AttributeServer, 0x60, 0x7F, &[]),
        ];
        assert!(Registry::new(&SPLIT).validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        static INVERTED: [ModuleRange; 1] =
            [ModuleRange::new(CALL, ModuleId::Core, 0x20, 0x1F, &[])];
        assert_eq!(
            Registry::new(&INVERTED).validate(),
            Err(RegistryError::InvertedRange {
                space: CALL,
                module: ModuleId::Core,
            })
        );
    }

    #[test]
    fn test_defined_outside_range_rejected() {
        static STRAY: [ModuleRange; 1] =
            [ModuleRange::new(CALL, ModuleId::Core, 0x60, 0x6B, &[0x60, 0x6C])];
        assert_eq!(
            Registry::new(&STRAY).validate(),
            Err(RegistryError::DefinedOutsideRange {
                space: CALL,
                module: ModuleId::Core,
                number: 0x6C,
            })
        );
    }

    #[test]
    fn test_repeated_defined_rejected() {
        static REPEAT: [ModuleRange; 1] =
            [ModuleRange::new(CALL, ModuleId::Core, 0x60, 0x6B, &[0x61, 0x61])];
        assert!(matches!(
            Registry::new(&REPEAT).validate(),
            Err(RegistryError::UnorderedDefined { number: 0x61, .. })
        ));
    }

    #[test]
    fn test_duplicate_module_rejected() {
        static TWICE: [ModuleRange; 2] = [
            ModuleRange::new(CALL, ModuleId::Core, 0x00, 0x0F, &[]),
            ModuleRange::new(CALL, ModuleId::Core, 0x10, 0x1F, &[]),
        ];
        assert_eq!(
            Registry::new(&TWICE).validate(),
            Err(RegistryError::DuplicateModule {
                space: CALL,
                module: ModuleId::Core,
            })
        );
    }

    #[test]
    fn test_range_accessors() {
        let range = ModuleRange::new(CALL, ModuleId::Core, 0x60, 0x6B, &[0x60, 0x61, 0x62]);
        assert_eq!(range.capacity(), 12);
        assert_eq!(range.reserved_slots(), 9);
        assert!(range.contains(0x6B));
        assert!(!range.contains(0x6C));
        assert!(range.defines(0x61));
        assert!(!range.defines(0x63));

        let single = ModuleRange::new(CALL, ModuleId::Core, 0xFF, 0xFF, &[]);
        assert_eq!(single.capacity(), 1);

        let whole = ModuleRange::new(CALL, ModuleId::Core, 0x00, 0xFF, &[]);
        assert_eq!(whole.capacity(), 256);
    }

    #[test]
    fn test_inverted_range_has_no_capacity() {
        let inverted = ModuleRange::new(CALL, ModuleId::Core, 0x20, 0x1F, &[0x20]);
        assert_eq!(inverted.capacity(), 0);
        assert_eq!(inverted.reserved_slots(), 0);

        let widest = ModuleRange::new(CALL, ModuleId::Core, 0xFF, 0x00, &[]);
        assert_eq!(widest.capacity(), 0);
    }

    #[test]
    fn test_spaces_of() {
        let registry = Registry::new(&SAMPLE);
        assert_eq!(registry.spaces_of(ModuleId::Core), Spaces::CALL | Spaces::EVENT);
        assert_eq!(
            registry.spaces_of(ModuleId::ConnectionManagement),
            Spaces::CALL
        );
        assert!(registry.spaces_of(ModuleId::TransportChannel).is_empty());
    }
}
