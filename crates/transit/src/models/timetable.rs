//! Per-stop timetable rows.

use serde::{Deserialize, Serialize};

use crate::identifiers::{LineRef, TripId};

/// GTFS pickup policy as it appears on timetable rows.
///
/// The wire carries the numeric GTFS code; unknown codes collapse to the
/// regularly-scheduled default instead of failing the whole row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum PickupType {
    RegularlyScheduled,
    NoPickup,
    PhoneAgency,
    CoordinateWithDriver,
}

impl From<u8> for PickupType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::NoPickup,
            2 => Self::PhoneAgency,
            3 => Self::CoordinateWithDriver,
            _ => Self::RegularlyScheduled,
        }
    }
}

impl From<PickupType> for u8 {
    fn from(value: PickupType) -> Self {
        match value {
            PickupType::RegularlyScheduled => 0,
            PickupType::NoPickup => 1,
            PickupType::PhoneAgency => 2,
            PickupType::CoordinateWithDriver => 3,
        }
    }
}

/// GTFS drop-off policy, decoded the same way as [`PickupType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum DropOffType {
    RegularlyScheduled,
    NoDropOff,
    PhoneAgency,
    CoordinateWithDriver,
}

impl From<u8> for DropOffType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::NoDropOff,
            2 => Self::PhoneAgency,
            3 => Self::CoordinateWithDriver,
            _ => Self::RegularlyScheduled,
        }
    }
}

impl From<DropOffType> for u8 {
    fn from(value: DropOffType) -> Self {
        match value {
            DropOffType::RegularlyScheduled => 0,
            DropOffType::NoDropOff => 1,
            DropOffType::PhoneAgency => 2,
            DropOffType::CoordinateWithDriver => 3,
        }
    }
}

/// One departure from a stop, as served by the timetable endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub trip_id: TripId,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_id: i64,
    pub stop_sequence: u32,
    pub stop_headsign: String,
    pub pickup_type: PickupType,
    pub drop_off_type: DropOffType,
    pub route_id: LineRef,
}
