//! Deferred actions and the LIFO stack that holds them.
//!
//! Actions are plain data. The state applies them, so the stack can be
//! inspected and tests can assert on exactly what is pending.

use robodeck_common::prelude::*;

/// A unit of work queued for the next drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredAction {
    StainLeft,
    StainRight,
    ExploreLeft,
    ExploreRight,
    CleanAir,
    CleanPumps,
    CleanDual,
    /// Final dry step; hands control back to `Cleaning`.
    Clean,
    /// Per-tick sensor perturbation.
    Jitter,
    /// Recompute battery percentages and health.
    UpdateBattery,
}

impl DeferredAction {
    /// Action the tick loop schedules for a commanded task. `None` for
    /// `Pause`.
    pub const fn transition_from(task: RobotTask) -> Option<Self> {
        match task {
            RobotTask::Pause => None,
            RobotTask::StainLeft => Some(Self::StainLeft),
            RobotTask::StainRight => Some(Self::StainRight),
            RobotTask::ExploreLeft => Some(Self::ExploreLeft),
            RobotTask::ExploreRight => Some(Self::ExploreRight),
            RobotTask::Cleaning => Some(Self::CleanAir),
            RobotTask::CleanAir => Some(Self::CleanPumps),
            RobotTask::CleanPumps => Some(Self::CleanDual),
            RobotTask::CleanDual => Some(Self::Clean),
        }
    }

    /// Action that establishes `task` when it is commanded from outside.
    /// `Cleaning` starts the chain at its first step.
    pub const fn entering(task: RobotTask) -> Option<Self> {
        match task {
            RobotTask::Pause => None,
            RobotTask::StainLeft => Some(Self::StainLeft),
            RobotTask::StainRight => Some(Self::StainRight),
            RobotTask::ExploreLeft => Some(Self::ExploreLeft),
            RobotTask::ExploreRight => Some(Self::ExploreRight),
            RobotTask::CleanAir => Some(Self::CleanAir),
            RobotTask::CleanPumps => Some(Self::CleanPumps),
            RobotTask::CleanDual => Some(Self::CleanDual),
            RobotTask::Cleaning => Some(Self::CleanAir),
        }
    }

    /// Executing-task pair and, for the cleaning chain, the next commanded
    /// task.
    pub const fn outcome(
        self,
    ) -> Option<(DetailedRobotTask, SimpleRobotTask, Option<RobotTask>)> {
        use DetailedRobotTask as D;
        use SimpleRobotTask as S;
        match self {
            Self::StainLeft => Some((D::RobotAutoStainingLeft, S::StainingLeft, None)),
            Self::StainRight => Some((D::RobotAutoStainingRight, S::StainingRight, None)),
            Self::ExploreLeft => Some((D::RobotAutoScanLeft, S::ExploringLeft, None)),
            Self::ExploreRight => Some((D::RobotAutoScanRight, S::ExploringRight, None)),
            Self::CleanAir => Some((
                D::RobotCleanCartridge1,
                S::AirCleaning,
                Some(RobotTask::CleanAir),
            )),
            Self::CleanPumps => Some((
                D::RobotCleanCartridge2,
                S::PumpCleaning,
                Some(RobotTask::CleanPumps),
            )),
            Self::CleanDual => Some((
                D::RobotCleanCartridge3,
                S::DualCleaning,
                Some(RobotTask::CleanDual),
            )),
            Self::Clean => Some((
                D::RobotDryBeforeHalt,
                S::DualCleaning,
                Some(RobotTask::Cleaning),
            )),
            Self::Jitter | Self::UpdateBattery => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::StainLeft => "do_stain_left",
            Self::StainRight => "do_stain_right",
            Self::ExploreLeft => "do_explore_left",
            Self::ExploreRight => "do_explore_right",
            Self::CleanAir => "clean_air",
            Self::CleanPumps => "clean_pumps",
            Self::CleanDual => "clean_dual",
            Self::Clean => "do_clean",
            Self::Jitter => "do_jitter",
            Self::UpdateBattery => "update_battery",
        }
    }
}

/// LIFO stack of pending actions.
#[derive(Debug, Clone, Default)]
pub struct ActionStack {
    items: Vec<DeferredAction>,
}

impl ActionStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, action: DeferredAction) {
        self.items.push(action);
    }

    /// Most recently pushed action, or `None` once drained.
    #[inline]
    pub fn pop(&mut self) -> Option<DeferredAction> {
        self.items.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pending actions, bottom of the stack first.
    pub fn snapshot(&self) -> Vec<DeferredAction> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_is_lifo() {
        let mut stack = ActionStack::new();
        stack.push(DeferredAction::CleanAir);
        stack.push(DeferredAction::Jitter);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Some(DeferredAction::Jitter));
        assert_eq!(stack.pop(), Some(DeferredAction::CleanAir));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn cleaning_chain_cycles() {
        let mut task = RobotTask::Cleaning;
        let mut seen = Vec::new();
        for _ in 0..4 {
            let action = DeferredAction::transition_from(task).unwrap();
            let (_, _, next) = action.outcome().unwrap();
            task = next.unwrap();
            seen.push(task);
        }
        assert_eq!(
            seen,
            [
                RobotTask::CleanAir,
                RobotTask::CleanPumps,
                RobotTask::CleanDual,
                RobotTask::Cleaning
            ]
        );
    }

    #[test]
    fn moving_tasks_hold_their_command() {
        for task in [
            RobotTask::StainLeft,
            RobotTask::StainRight,
            RobotTask::ExploreLeft,
            RobotTask::ExploreRight,
        ] {
            let action = DeferredAction::transition_from(task).unwrap();
            assert_eq!(DeferredAction::entering(task), Some(action));
            assert_eq!(action.outcome().unwrap().2, None);
        }
        assert_eq!(DeferredAction::transition_from(RobotTask::Pause), None);
        assert_eq!(DeferredAction::entering(RobotTask::Pause), None);
    }

    #[test]
    fn entering_establishes_the_task() {
        for task in RobotTask::ALL {
            if task == RobotTask::Cleaning {
                continue;
            }
            if let Some(action) = DeferredAction::entering(task) {
                let (_, _, next) = action.outcome().unwrap();
                assert!(next.is_none() || next == Some(task), "{}", action.name());
            }
        }
    }

    #[test]
    fn entering_cleaning_matches_the_transition() {
        assert_eq!(
            DeferredAction::entering(RobotTask::Cleaning),
            DeferredAction::transition_from(RobotTask::Cleaning)
        );
        let (detailed, simple, next) = DeferredAction::entering(RobotTask::Cleaning)
            .unwrap()
            .outcome()
            .unwrap();
        assert_eq!(detailed, DetailedRobotTask::RobotCleanCartridge1);
        assert_eq!(simple, SimpleRobotTask::AirCleaning);
        assert_eq!(next, Some(RobotTask::CleanAir));
    }
}
