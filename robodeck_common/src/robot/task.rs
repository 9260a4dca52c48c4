//! Task enumerations.
//!
//! `RobotTask` is the commanded intent written by the host. `SimpleRobotTask`
//! and `DetailedRobotTask` mirror what the board is executing right now and
//! are only ever written by the emulator's transition actions.

use serde::{Deserialize, Serialize};

// ─── Commanded Task ─────────────────────────────────────────────────

/// Commanded robot task (preset C17).
///
/// `Cleaning` is a meta-state that precedes the air → pumps → dual cleaning
/// chain. Code 5 is unassigned on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum RobotTask {
    /// Idle; re-enterable at any time.
    #[default]
    Pause = 0,
    /// Stain with the left nozzle.
    StainLeft = 1,
    /// Stain with the right nozzle.
    StainRight = 2,
    /// Scan the deck moving left.
    ExploreLeft = 3,
    /// Scan the deck moving right.
    ExploreRight = 4,
    /// Blow out the cartridges.
    CleanAir = 6,
    /// Flush the pumps.
    CleanPumps = 7,
    /// Air and pumps together.
    CleanDual = 8,
    /// Cleaning cycle entry point.
    Cleaning = 9,
}

impl RobotTask {
    /// All members in code order.
    pub const ALL: [Self; 9] = [
        Self::Pause,
        Self::StainLeft,
        Self::StainRight,
        Self::ExploreLeft,
        Self::ExploreRight,
        Self::CleanAir,
        Self::CleanPumps,
        Self::CleanDual,
        Self::Cleaning,
    ];

    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Pause),
            1 => Some(Self::StainLeft),
            2 => Some(Self::StainRight),
            3 => Some(Self::ExploreLeft),
            4 => Some(Self::ExploreRight),
            6 => Some(Self::CleanAir),
            7 => Some(Self::CleanPumps),
            8 => Some(Self::CleanDual),
            9 => Some(Self::Cleaning),
            _ => None,
        }
    }

    /// Board name of the task.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pause => "PAUSE",
            Self::StainLeft => "STAIN_LEFT",
            Self::StainRight => "STAIN_RIGHT",
            Self::ExploreLeft => "EXPLORE_LEFT",
            Self::ExploreRight => "EXPLORE_RIGHT",
            Self::CleanAir => "CLEAN_AIR",
            Self::CleanPumps => "CLEAN_PUMPS",
            Self::CleanDual => "CLEAN_DUAL",
            Self::Cleaning => "CLEANING",
        }
    }

    /// True for the two staining tasks.
    #[inline]
    pub const fn is_staining(self) -> bool {
        matches!(self, Self::StainLeft | Self::StainRight)
    }

    /// True for tasks where the robot drives along the deck.
    #[inline]
    pub const fn is_moving(self) -> bool {
        matches!(
            self,
            Self::StainLeft | Self::StainRight | Self::ExploreLeft | Self::ExploreRight
        )
    }
}

// ─── Executing Task ─────────────────────────────────────────────────

/// Coarse executing task (status P1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum SimpleRobotTask {
    #[default]
    Idle = 0,
    StainingLeft = 1,
    StainingRight = 2,
    ExploringLeft = 3,
    ExploringRight = 4,
    AirCleaning = 6,
    PumpCleaning = 7,
    DualCleaning = 8,
    EmergencyStop = 15,
}

impl SimpleRobotTask {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Idle),
            1 => Some(Self::StainingLeft),
            2 => Some(Self::StainingRight),
            3 => Some(Self::ExploringLeft),
            4 => Some(Self::ExploringRight),
            6 => Some(Self::AirCleaning),
            7 => Some(Self::PumpCleaning),
            8 => Some(Self::DualCleaning),
            15 => Some(Self::EmergencyStop),
            _ => None,
        }
    }
}

/// Fine-grained executing task (status P1, detailed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum DetailedRobotTask {
    #[default]
    RobotIdle = 0,
    RobotAutoStainingLeft = 1,
    RobotAutoStainingRight = 2,
    RobotAutoScanLeft = 3,
    RobotAutoScanRight = 4,
    RobotDryBeforeHalt = 5,
    RobotCleanCartridge1 = 6,
    RobotCleanCartridge2 = 7,
    RobotCleanCartridge3 = 8,
    RobotFollowCmdVel = 9,
    RobotFollowGap = 10,
    RobotFollowLeftCliff = 11,
    RobotFollowRightCliff = 12,
    RobotFollowWall = 13,
    RobotTest = 14,
    RobotEmergencyLowLevelStop = 15,
}

impl DetailedRobotTask {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::RobotIdle),
            1 => Some(Self::RobotAutoStainingLeft),
            2 => Some(Self::RobotAutoStainingRight),
            3 => Some(Self::RobotAutoScanLeft),
            4 => Some(Self::RobotAutoScanRight),
            5 => Some(Self::RobotDryBeforeHalt),
            6 => Some(Self::RobotCleanCartridge1),
            7 => Some(Self::RobotCleanCartridge2),
            8 => Some(Self::RobotCleanCartridge3),
            9 => Some(Self::RobotFollowCmdVel),
            10 => Some(Self::RobotFollowGap),
            11 => Some(Self::RobotFollowLeftCliff),
            12 => Some(Self::RobotFollowRightCliff),
            13 => Some(Self::RobotFollowWall),
            14 => Some(Self::RobotTest),
            15 => Some(Self::RobotEmergencyLowLevelStop),
            _ => None,
        }
    }
}
