//! Device configuration choices (presets C0, C1, C2, C3, C7).

use serde::{Deserialize, Serialize};

/// Deck board width preset (C0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum DeckBoardWidth {
    /// 14 cm boards.
    #[default]
    W14Cm = 0,
    /// 9 cm boards.
    W9Cm = 1,
    /// 7 cm boards.
    W7Cm = 2,
}

impl DeckBoardWidth {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::W14Cm),
            1 => Some(Self::W9Cm),
            2 => Some(Self::W7Cm),
            _ => None,
        }
    }
}

/// Gap width preset (C1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum GapWidth {
    #[default]
    Regular = 0,
    Narrow = 1,
    Wide = 2,
}

impl GapWidth {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Regular),
            1 => Some(Self::Narrow),
            2 => Some(Self::Wide),
            _ => None,
        }
    }
}

/// Which side the gap sensor sits on (C2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum GapPosition {
    #[default]
    Right = 0,
    Left = 1,
    Center = 2,
}

impl GapPosition {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Right),
            1 => Some(Self::Left),
            2 => Some(Self::Center),
            _ => None,
        }
    }
}

/// Cliff sensor mode (C3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum CliffMode {
    /// Each cliff sensor stops the robot on its own.
    #[default]
    Separate = 0,
    /// Both sensors must agree.
    Combined = 1,
    Disabled = 2,
}

impl CliffMode {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Separate),
            1 => Some(Self::Combined),
            2 => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// Scan type (C7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ScanType {
    #[default]
    Full = 0,
    Single = 1,
}

impl ScanType {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Full),
            1 => Some(Self::Single),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_codes_reject_non_members() {
        assert_eq!(DeckBoardWidth::from_u8(1), Some(DeckBoardWidth::W9Cm));
        assert_eq!(DeckBoardWidth::from_u8(3), None);
        assert_eq!(GapWidth::from_u8(2), Some(GapWidth::Wide));
        assert_eq!(GapWidth::from_u8(3), None);
        assert_eq!(GapPosition::from_u8(2), Some(GapPosition::Center));
        assert_eq!(GapPosition::from_u8(7), None);
        assert_eq!(CliffMode::from_u8(2), Some(CliffMode::Disabled));
        assert_eq!(CliffMode::from_u8(3), None);
        assert_eq!(ScanType::from_u8(1), Some(ScanType::Single));
        assert_eq!(ScanType::from_u8(2), None);
    }

    #[test]
    fn defaults_match_board_presets() {
        assert_eq!(DeckBoardWidth::default() as u8, 0);
        assert_eq!(GapWidth::default(), GapWidth::Regular);
        assert_eq!(GapPosition::default(), GapPosition::Right);
        assert_eq!(CliffMode::default(), CliffMode::Separate);
        assert_eq!(ScanType::default(), ScanType::Full);
    }
}
