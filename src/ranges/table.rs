//! S110 BLE identifier allocation table
//!
//! Each API module receives its whole allocated SVC range whether the calls
//! in it are implemented or not; the SoftDevice returns
//! `NRF_ERROR_NOT_SUPPORTED` for numbers in a range that are not defined.
//!
//! Note that `*_LAST` marks the end of the allocated range, not the last
//! call actually defined.

use super::registry::{ModuleId, ModuleRange, Registry, SpaceKind};

/// Core SVC numbers
pub mod common {
    pub const BLE_SVC_BASE: u8 = 0x60;
    /// Enable and initialize the BLE stack
    pub const SD_BLE_ENABLE: u8 = 0x60;
    /// Get an event from the pending events queue
    pub const SD_BLE_EVT_GET: u8 = 0x61;
    /// Get the total number of available application transmission buffers
    pub const SD_BLE_TX_BUFFER_COUNT_GET: u8 = 0x62;
    /// Add a vendor specific UUID
    pub const SD_BLE_UUID_VS_ADD: u8 = 0x63;
    pub const SD_BLE_UUID_DECODE: u8 = 0x64;
    pub const SD_BLE_UUID_ENCODE: u8 = 0x65;
    /// Get the local version information
    pub const SD_BLE_VERSION_GET: u8 = 0x66;
    pub const SD_BLE_USER_MEM_REPLY: u8 = 0x67;
    pub const SD_BLE_OPT_SET: u8 = 0x68;
    pub const SD_BLE_OPT_GET: u8 = 0x69;
    /// Total: 12
    pub const BLE_SVC_LAST: u8 = 0x6B;

    pub const BLE_RESERVED_SVC_BASE: u8 = 0x6C;
    /// Total: 4
    pub const BLE_RESERVED_SVC_LAST: u8 = 0x6F;
}

/// GAP SVC numbers
pub mod gap {
    pub const BLE_GAP_SVC_BASE: u8 = 0x70;
    pub const SD_BLE_GAP_ADDRESS_SET: u8 = 0x70;
    pub const SD_BLE_GAP_ADDRESS_GET: u8 = 0x71;
    pub const SD_BLE_GAP_ADV_DATA_SET: u8 = 0x72;
    pub const SD_BLE_GAP_ADV_START: u8 = 0x73;
    pub const SD_BLE_GAP_ADV_STOP: u8 = 0x74;
    pub const SD_BLE_GAP_CONN_PARAM_UPDATE: u8 = 0x75;
    pub const SD_BLE_GAP_DISCONNECT: u8 = 0x76;
    pub const SD_BLE_GAP_TX_POWER_SET: u8 = 0x77;
    pub const SD_BLE_GAP_APPEARANCE_SET: u8 = 0x78;
    pub const SD_BLE_GAP_APPEARANCE_GET: u8 = 0x79;
    /// Peripheral preferred connection parameters
    pub const SD_BLE_GAP_PPCP_SET: u8 = 0x7A;
    pub const SD_BLE_GAP_PPCP_GET: u8 = 0x7B;
    pub const SD_BLE_GAP_DEVICE_NAME_SET: u8 = 0x7C;
    pub const SD_BLE_GAP_DEVICE_NAME_GET: u8 = 0x7D;
    /// Initiate pairing/bonding
    pub const SD_BLE_GAP_AUTHENTICATE: u8 = 0x7E;
    pub const SD_BLE_GAP_SEC_PARAMS_REPLY: u8 = 0x7F;
    pub const SD_BLE_GAP_AUTH_KEY_REPLY: u8 = 0x80;
    pub const SD_BLE_GAP_SEC_INFO_REPLY: u8 = 0x81;
    pub const SD_BLE_GAP_CONN_SEC_GET: u8 = 0x82;
    pub const SD_BLE_GAP_RSSI_START: u8 = 0x83;
    pub const SD_BLE_GAP_RSSI_STOP: u8 = 0x84;
    /// Total: 32
    pub const BLE_GAP_SVC_LAST: u8 = 0x8F;
}

/// GATT client SVC numbers (none defined yet)
pub mod gattc {
    pub const BLE_GATTC_SVC_BASE: u8 = 0x90;
    /// Total: 16
    pub const BLE_GATTC_SVC_LAST: u8 = 0x9F;
}

/// GATT server SVC numbers
pub mod gatts {
    pub const BLE_GATTS_SVC_BASE: u8 = 0xA0;
    pub const SD_BLE_GATTS_SERVICE_ADD: u8 = 0xA0;
    pub const SD_BLE_GATTS_INCLUDE_ADD: u8 = 0xA1;
    pub const SD_BLE_GATTS_CHARACTERISTIC_ADD: u8 = 0xA2;
    pub const SD_BLE_GATTS_DESCRIPTOR_ADD: u8 = 0xA3;
    pub const SD_BLE_GATTS_VALUE_SET: u8 = 0xA4;
    pub const SD_BLE_GATTS_VALUE_GET: u8 = 0xA5;
    /// Handle value notification or indication
    pub const SD_BLE_GATTS_HVX: u8 = 0xA6;
    pub const SD_BLE_GATTS_SERVICE_CHANGED: u8 = 0xA7;
    /// Reply to a read/write authorization request
    pub const SD_BLE_GATTS_RW_AUTHORIZE_REPLY: u8 = 0xA8;
    /// Set the persistent system attributes for a connection
    pub const SD_BLE_GATTS_SYS_ATTR_SET: u8 = 0xA9;
    pub const SD_BLE_GATTS_SYS_ATTR_GET: u8 = 0xAA;
    /// Total: 16
    pub const BLE_GATTS_SVC_LAST: u8 = 0xAF;
}

/// L2CAP SVC numbers
pub mod l2cap {
    pub const BLE_L2CAP_SVC_BASE: u8 = 0xB0;
    pub const SD_BLE_L2CAP_CID_REGISTER: u8 = BLE_L2CAP_SVC_BASE;
    pub const SD_BLE_L2CAP_CID_UNREGISTER: u8 = 0xB1;
    pub const SD_BLE_L2CAP_TX: u8 = 0xB2;
    /// Total: 16
    pub const BLE_L2CAP_SVC_LAST: u8 = 0xBF;
}

/// Event number ranges
pub mod evt {
    /// Never delivered; marks an empty event slot
    pub const BLE_EVT_INVALID: u8 = 0x00;

    pub const BLE_EVT_BASE: u8 = 0x01;
    /// Total: 15
    pub const BLE_EVT_LAST: u8 = 0x0F;

    pub const BLE_GAP_EVT_BASE: u8 = 0x10;
    pub const BLE_GAP_EVT_LAST: u8 = 0x2F;

    pub const BLE_GATTC_EVT_BASE: u8 = 0x30;
    pub const BLE_GATTC_EVT_LAST: u8 = 0x4F;

    pub const BLE_GATTS_EVT_BASE: u8 = 0x50;
    pub const BLE_GATTS_EVT_LAST: u8 = 0x6F;

    pub const BLE_L2CAP_EVT_BASE: u8 = 0x70;
    pub const BLE_L2CAP_EVT_LAST: u8 = 0x8F;
}

/// Option number ranges
pub mod opt {
    pub const BLE_OPT_INVALID: u8 = 0x00;

    pub const BLE_OPT_BASE: u8 = 0x01;
    /// Total: 31
    pub const BLE_OPT_LAST: u8 = 0x1F;

    pub const BLE_GAP_OPT_BASE: u8 = 0x20;
    pub const BLE_GAP_OPT_LAST: u8 = 0x3F;

    pub const BLE_GATTC_OPT_BASE: u8 = 0x40;
    pub const BLE_GATTC_OPT_LAST: u8 = 0x5F;

    pub const BLE_GATTS_OPT_BASE: u8 = 0x60;
    pub const BLE_GATTS_OPT_LAST: u8 = 0x7F;

    pub const BLE_L2CAP_OPT_BASE: u8 = 0x80;
    pub const BLE_L2CAP_OPT_LAST: u8 = 0x9F;
}

use self::{common as c, evt as e, gap as g, gattc as gc, gatts as gs, l2cap as l, opt as o};
use ModuleId::*;
use SpaceKind::{Call, Event, Option as Opt};

/// Every S110 allocation, call space first.
pub const BLE_RANGES: [ModuleRange; 16] = [
    ModuleRange::new(
        Call,
        Core,
        c::BLE_SVC_BASE,
        c::BLE_SVC_LAST,
        &[
            c::SD_BLE_ENABLE,
            c::SD_BLE_EVT_GET,
            c::SD_BLE_TX_BUFFER_COUNT_GET,
            c::SD_BLE_UUID_VS_ADD,
            c::SD_BLE_UUID_DECODE,
            c::SD_BLE_UUID_ENCODE,
            c::SD_BLE_VERSION_GET,
            c::SD_BLE_USER_MEM_REPLY,
            c::SD_BLE_OPT_SET,
            c::SD_BLE_OPT_GET,
        ],
    ),
    ModuleRange::new(
        Call,
        Reserved,
        c::BLE_RESERVED_SVC_BASE,
        c::BLE_RESERVED_SVC_LAST,
        &[],
    ),
    ModuleRange::new(
        Call,
        ConnectionManagement,
        g::BLE_GAP_SVC_BASE,
        g::BLE_GAP_SVC_LAST,
        &[
            g::SD_BLE_GAP_ADDRESS_SET,
            g::SD_BLE_GAP_ADDRESS_GET,
            g::SD_BLE_GAP_ADV_DATA_SET,
            g::SD_BLE_GAP_ADV_START,
            g::SD_BLE_GAP_ADV_STOP,
            g::SD_BLE_GAP_CONN_PARAM_UPDATE,
            g::SD_BLE_GAP_DISCONNECT,
            g::SD_BLE_GAP_TX_POWER_SET,
            g::SD_BLE_GAP_APPEARANCE_SET,
            g::SD_BLE_GAP_APPEARANCE_GET,
            g::SD_BLE_GAP_PPCP_SET,
            g::SD_BLE_GAP_PPCP_GET,
            g::SD_BLE_GAP_DEVICE_NAME_SET,
            g::SD_BLE_GAP_DEVICE_NAME_GET,
            g::SD_BLE_GAP_AUTHENTICATE,
            g::SD_BLE_GAP_SEC_PARAMS_REPLY,
            g::SD_BLE_GAP_AUTH_KEY_REPLY,
            g::SD_BLE_GAP_SEC_INFO_REPLY,
            g::SD_BLE_GAP_CONN_SEC_GET,
            g::SD_BLE_GAP_RSSI_START,
            g::SD_BLE_GAP_RSSI_STOP,
        ],
    ),
    ModuleRange::new(
        Call,
        AttributeClient,
        gc::BLE_GATTC_SVC_BASE,
        gc::BLE_GATTC_SVC_LAST,
        &[],
    ),
    ModuleRange::new(
        Call,
        AttributeServer,
        gs::BLE_GATTS_SVC_BASE,
        gs::BLE_GATTS_SVC_LAST,
        &[
            gs::SD_BLE_GATTS_SERVICE_ADD,
            gs::SD_BLE_GATTS_INCLUDE_ADD,
            gs::SD_BLE_GATTS_CHARACTERISTIC_ADD,
            gs::SD_BLE_GATTS_DESCRIPTOR_ADD,
            gs::SD_BLE_GATTS_VALUE_SET,
            gs::SD_BLE_GATTS_VALUE_GET,
            gs::SD_BLE_GATTS_HVX,
            gs::SD_BLE_GATTS_SERVICE_CHANGED,
            gs::SD_BLE_GATTS_RW_AUTHORIZE_REPLY,
            gs::SD_BLE_GATTS_SYS_ATTR_SET,
            gs::SD_BLE_GATTS_SYS_ATTR_GET,
        ],
    ),
    ModuleRange::new(
        Call,
        TransportChannel,
        l::BLE_L2CAP_SVC_BASE,
        l::BLE_L2CAP_SVC_LAST,
        &[
            l::SD_BLE_L2CAP_CID_REGISTER,
            l::SD_BLE_L2CAP_CID_UNREGISTER,
            l::SD_BLE_L2CAP_TX,
        ],
    ),
    // Event meanings belong to the modules; only the ranges are published.
    ModuleRange::new(Event, Core, e::BLE_EVT_BASE, e::BLE_EVT_LAST, &[]),
    ModuleRange::new(Event, ConnectionManagement, e::BLE_GAP_EVT_BASE, e::BLE_GAP_EVT_LAST, &[]),
    ModuleRange::new(Event, AttributeClient, e::BLE_GATTC_EVT_BASE, e::BLE_GATTC_EVT_LAST, &[]),
    ModuleRange::new(Event, AttributeServer, e::BLE_GATTS_EVT_BASE, e::BLE_GATTS_EVT_LAST, &[]),
    ModuleRange::new(Event, TransportChannel, e::BLE_L2CAP_EVT_BASE, e::BLE_L2CAP_EVT_LAST, &[]),
    ModuleRange::new(Opt, Core, o::BLE_OPT_BASE, o::BLE_OPT_LAST, &[]),
    ModuleRange::new(Opt, ConnectionManagement, o::BLE_GAP_OPT_BASE, o::BLE_GAP_OPT_LAST, &[]),
    ModuleRange::new(Opt, AttributeClient, o::BLE_GATTC_OPT_BASE, o::BLE_GATTC_OPT_LAST, &[]),
    ModuleRange::new(Opt, AttributeServer, o::BLE_GATTS_OPT_BASE, o::BLE_GATTS_OPT_LAST, &[]),
    ModuleRange::new(Opt, TransportChannel, o::BLE_L2CAP_OPT_BASE, o::BLE_L2CAP_OPT_LAST, &[]),
];

/// The published S110 registry.
pub const BLE: Registry = Registry::new(&BLE_RANGES);

const _: () = BLE.assert_valid();

/// Build-time check used by `svcall!`: the call number must belong to some
/// module's call range. Reserved numbers pass; the SoftDevice answers those
/// with `NRF_ERROR_NOT_SUPPORTED`.
#[doc(hidden)]
pub const fn assert_call_reachable(number: u8) {
    if !BLE.lookup(SpaceKind::Call, number).is_assigned() {
        panic!("SVC number lies outside every module's call range");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::{Assignment, Spaces};

    #[test]
    fn test_table_valid() {
        assert_eq!(BLE.validate(), Ok(()));
    }

    #[test]
    fn test_ranges_disjoint_per_space() {
        let ranges = BLE.ranges();
        for (i, a) in ranges.iter().enumerate() {
            assert!(a.base <= a.last);
            for n in a.defined {
                assert!(a.contains(*n), "{:#04x} outside {}", n, a.module);
            }
            for b in &ranges[i + 1..] {
                if a.space == b.space {
                    assert!(
                        a.last < b.base || b.last < a.base,
                        "{} and {} overlap in {}",
                        a.module,
                        b.module,
                        a.space
                    );
                }
            }
        }
    }

    #[test]
    fn test_lookup_total() {
        for space in SpaceKind::ALL {
            for number in 0..=u8::MAX {
                let owners: Vec<_> = BLE
                    .ranges()
                    .iter()
                    .filter(|r| r.space == space && r.contains(number))
                    .collect();
                let outcome = BLE.lookup(space, number);
                match owners.as_slice() {
                    [] => assert_eq!(outcome, Assignment::Unassigned),
                    [owner] if owner.defines(number) => {
                        assert_eq!(outcome, Assignment::Defined(owner.module))
                    }
                    [owner] => assert_eq!(outcome, Assignment::Reserved(owner.module)),
                    _ => panic!("{} {:#04x} claimed {} times", space, number, owners.len()),
                }
            }
        }
    }

    #[test]
    fn test_core_block() {
        let core_range = BLE.range(SpaceKind::Call, Core).unwrap();
        assert_eq!((core_range.base, core_range.last), (0x60, 0x6B));
        assert_eq!(core_range.defined.len(), 10);
        assert_eq!(core_range.capacity(), 12);

        for n in 0x60..=0x69 {
            assert_eq!(BLE.lookup(Call, n), Assignment::Defined(Core));
        }
        assert_eq!(BLE.lookup(Call, 0x6A), Assignment::Reserved(Core));
        assert_eq!(BLE.lookup(Call, 0x6B), Assignment::Reserved(Core));
        assert_eq!(BLE.lookup(Call, 0x6C), Assignment::Reserved(Reserved));
        assert_eq!(BLE.lookup(Call, 0x6F), Assignment::Reserved(Reserved));
        assert_eq!(BLE.lookup(Call, 0x70), Assignment::Defined(ConnectionManagement));
    }

    #[test]
    fn test_defined_counts_per_call_module() {
        let count = |module, defined: bool| {
            (0..=u8::MAX)
                .filter(|n| {
                    let outcome = BLE.lookup(Call, *n);
                    if defined {
                        outcome == Assignment::Defined(module)
                    } else {
                        outcome == Assignment::Reserved(module)
                    }
                })
                .count()
        };
        assert_eq!((count(Core, true), count(Core, false)), (10, 2));
        assert_eq!((count(Reserved, true), count(Reserved, false)), (0, 4));
        assert_eq!(
            (count(ConnectionManagement, true), count(ConnectionManagement, false)),
            (21, 11)
        );
        assert_eq!((count(AttributeClient, true), count(AttributeClient, false)), (0, 16));
        assert_eq!((count(AttributeServer, true), count(AttributeServer, false)), (11, 5));
        assert_eq!((count(TransportChannel, true), count(TransportChannel, false)), (3, 13));
    }

    #[test]
    fn test_module_boundaries() {
        assert_eq!(BLE.lookup(Call, 0x5F), Assignment::Unassigned);
        assert_eq!(BLE.lookup(Call, 0x8F), Assignment::Reserved(ConnectionManagement));
        assert_eq!(BLE.lookup(Call, 0x90), Assignment::Reserved(AttributeClient));
        assert_eq!(BLE.lookup(Call, 0xAA), Assignment::Defined(AttributeServer));
        assert_eq!(BLE.lookup(Call, 0xAB), Assignment::Reserved(AttributeServer));
        assert_eq!(BLE.lookup(Call, 0xB0), Assignment::Defined(TransportChannel));
        assert_eq!(BLE.lookup(Call, 0xBF), Assignment::Reserved(TransportChannel));
        for n in 0xC0..=0xFF {
            assert_eq!(BLE.lookup(Call, n), Assignment::Unassigned);
        }
    }

    #[test]
    fn test_invalid_event_and_option() {
        assert_eq!(BLE.lookup(Event, evt::BLE_EVT_INVALID), Assignment::Unassigned);
        assert_eq!(BLE.lookup(Opt, opt::BLE_OPT_INVALID), Assignment::Unassigned);
        assert_eq!(BLE.lookup(Event, 0x01), Assignment::Reserved(Core));
        assert_eq!(BLE.lookup(Event, 0x90), Assignment::Unassigned);
        assert_eq!(BLE.lookup(Opt, 0x9F), Assignment::Reserved(TransportChannel));
        assert_eq!(BLE.lookup(Opt, 0xA0), Assignment::Unassigned);
    }

    #[test]
    fn test_ranges_for_module() {
        let gap_ranges: Vec<_> = BLE.ranges_for(ConnectionManagement).collect();
        assert_eq!(gap_ranges.len(), 3);
        assert!(gap_ranges.iter().all(|r| r.module == ConnectionManagement));

        assert_eq!(BLE.spaces_of(ConnectionManagement), Spaces::all());
        assert_eq!(BLE.spaces_of(Reserved), Spaces::CALL);
        assert_eq!(BLE.ranges_for(Reserved).count(), 1);
    }

    #[test]
    fn test_reachability_check() {
        // Defined and reserved numbers both pass.
        assert_call_reachable(gap::SD_BLE_GAP_ADV_DATA_SET);
        assert_call_reachable(0x6A);
        assert_call_reachable(gattc::BLE_GATTC_SVC_BASE);
    }

    #[test]
    #[should_panic]
    fn test_reachability_check_rejects_unassigned() {
        assert_call_reachable(0xC0);
    }
}
