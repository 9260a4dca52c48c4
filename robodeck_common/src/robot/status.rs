//! Status enumerations: health, stop reasons and the bumper bit set.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Robot health level (SBC1). 0 = green, 1 = yellow, 2 = red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum RobotHealth {
    #[default]
    Green = 0,
    Yellow = 1,
    Red = 2,
}

impl RobotHealth {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Green),
            1 => Some(Self::Yellow),
            2 => Some(Self::Red),
            _ => None,
        }
    }
}

/// Why the last forward run stopped (P10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ForwardStopReason {
    #[default]
    Bumper = 0,
    Cliff = 1,
    MaxDistance = 2,
}

impl ForwardStopReason {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Bumper),
            1 => Some(Self::Cliff),
            2 => Some(Self::MaxDistance),
            _ => None,
        }
    }
}

/// Why the last gap search stopped (P11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum SearchStopReason {
    #[default]
    EndSearchZone = 0,
    GapNoLongerSeen = 1,
    GapCenterReached = 2,
}

impl SearchStopReason {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::EndSearchZone),
            1 => Some(Self::GapNoLongerSeen),
            2 => Some(Self::GapCenterReached),
            _ => None,
        }
    }
}

bitflags! {
    /// Bumper contacts (P16). Bit index matches the board's bumper numbering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BumpersPressed: u8 {
        /// Bumper 0.
        const LEFT_BACK   = 0x01;
        /// Bumper 1.
        const LEFT_FRONT  = 0x02;
        /// Bumper 2.
        const RIGHT_FRONT = 0x04;
        /// Bumper 3.
        const RIGHT_BACK  = 0x08;
    }
}

impl BumpersPressed {
    /// Interpret a raw telemetry mask, ignoring bits with no bumper behind them.
    #[inline]
    pub const fn from_mask(mask: u8) -> Self {
        Self::from_bits_truncate(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(RobotHealth::from_u8(2), Some(RobotHealth::Red));
        assert_eq!(RobotHealth::from_u8(3), None);
        assert_eq!(ForwardStopReason::from_u8(1), Some(ForwardStopReason::Cliff));
        assert_eq!(ForwardStopReason::from_u8(3), None);
        assert_eq!(
            SearchStopReason::from_u8(2),
            Some(SearchStopReason::GapCenterReached)
        );
        assert_eq!(SearchStopReason::from_u8(9), None);
    }

    #[test]
    fn bumper_mask_truncates_unknown_bits() {
        let pressed = BumpersPressed::from_mask(0b0001_0101);
        assert!(pressed.contains(BumpersPressed::LEFT_BACK));
        assert!(pressed.contains(BumpersPressed::RIGHT_FRONT));
        assert!(!pressed.contains(BumpersPressed::LEFT_FRONT));
        assert_eq!(pressed.bits(), 0b0101);
        assert!(BumpersPressed::from_mask(16).is_empty());
    }
}
