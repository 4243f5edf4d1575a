use serde::{Deserialize, Serialize};

/// Player-visible state of a single plot of land.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotState {
    /// Untouched; can be dug or flagged.
    Undug,
    /// Marked by the player as a suspected mine.
    Flagged,
    /// Dug out. Safe during play; after a loss, disclosed mines show as
    /// holes too.
    Hole,
    /// The mined plot the player dug directly, ending the game.
    Exploded,
}

impl Default for PlotState {
    fn default() -> Self {
        Self::Undug
    }
}

/// Result of toggling a flag on a plot. The game owns the flag counter
/// and applies the matching delta itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagToggle {
    /// A flag was planted; one flag is now in use.
    Planted,
    /// A flag was removed; one flag is available again.
    Removed,
    /// The plot was not flaggable, or no flag was available.
    NoChange,
}

/// One square plot of land: its visible state plus whether a mine is
/// buried in it.
///
/// `Exploded` is only reachable through [`Plot::start_dig`] on a mined
/// plot, so an exploded plot is always mined.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plot {
    state: PlotState,
    mined: bool,
}

impl Plot {
    /// Back to undug and mine-free.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub const fn is_undug(&self) -> bool {
        matches!(self.state, PlotState::Undug)
    }

    pub const fn is_mined(&self) -> bool {
        self.mined
    }

    /// Visible state plus the mine flag. The mine flag only tells a
    /// renderer something once the plot is a `Hole` or `Exploded`;
    /// consulting it earlier gives away the layout.
    pub const fn state(&self) -> (PlotState, bool) {
        (self.state, self.mined)
    }

    /// Buries a mine. Returns `false` if one was already here, which is
    /// what lets a placement loop count distinct mined plots.
    pub fn plant_mine(&mut self) -> bool {
        if self.mined {
            return false;
        }
        self.mined = true;
        true
    }

    /// Plants or removes a flag. `flag_available` says whether the game
    /// still has a flag to hand out; planting is only possible on an
    /// undug plot while one is available.
    pub fn toggle_flag(&mut self, flag_available: bool) -> FlagToggle {
        match self.state {
            PlotState::Undug if flag_available => {
                self.state = PlotState::Flagged;
                FlagToggle::Planted
            }
            PlotState::Flagged => {
                self.state = PlotState::Undug;
                FlagToggle::Removed
            }
            _ => FlagToggle::NoChange,
        }
    }

    /// First spade in the ground on a directly-dug plot. Returns `true`
    /// when it is safe to keep digging, leaving the state untouched for
    /// [`Plot::continue_dig`] to complete; on a mined plot the plot
    /// explodes and this returns `false`.
    ///
    /// Calling this on anything but an undug plot is a caller bug.
    pub fn start_dig(&mut self) -> bool {
        debug_assert!(self.is_undug());

        if !self.mined {
            return true;
        }
        self.state = PlotState::Exploded;
        false
    }

    /// Completes a dig: flips an undug, mine-free plot into a hole and
    /// returns `true`. Anything else is left alone, which is what lets
    /// the flood fill revisit cells harmlessly.
    pub fn continue_dig(&mut self) -> bool {
        if !self.is_undug() || self.mined {
            return false;
        }
        self.state = PlotState::Hole;
        true
    }

    /// End-of-game disclosure: a buried mine becomes visible as a hole,
    /// leaving the detonation point exploded.
    pub fn reveal(&mut self) {
        if self.mined && self.state != PlotState::Exploded {
            self.state = PlotState::Hole;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_plot_is_undug_and_unmined() {
        let plot = Plot::default();

        assert!(plot.is_undug());
        assert!(!plot.is_mined());
        assert_eq!(plot.state(), (PlotState::Undug, false));
    }

    #[test]
    fn plant_mine_succeeds_exactly_once() {
        let mut plot = Plot::default();

        assert!(plot.plant_mine());
        assert!(plot.is_mined());
        assert_eq!(plot.state(), (PlotState::Undug, true));

        assert!(!plot.plant_mine());
        assert!(plot.is_mined());
    }

    #[test]
    fn flag_toggles_between_undug_and_flagged() {
        let mut plot = Plot::default();

        assert_eq!(plot.toggle_flag(true), FlagToggle::Planted);
        assert_eq!(plot.state(), (PlotState::Flagged, false));

        // removal never needs an available flag
        assert_eq!(plot.toggle_flag(false), FlagToggle::Removed);
        assert_eq!(plot.state(), (PlotState::Undug, false));
    }

    #[test]
    fn flag_requires_an_available_flag() {
        let mut plot = Plot::default();

        assert_eq!(plot.toggle_flag(false), FlagToggle::NoChange);
        assert_eq!(plot.state(), (PlotState::Undug, false));
    }

    #[test]
    fn dug_plot_cannot_be_flagged() {
        let mut plot = Plot::default();
        assert!(plot.continue_dig());

        assert_eq!(plot.toggle_flag(true), FlagToggle::NoChange);
        assert_eq!(plot.state(), (PlotState::Hole, false));
    }

    #[test]
    fn start_dig_on_safe_plot_leaves_it_undug() {
        let mut plot = Plot::default();

        assert!(plot.start_dig());
        assert!(plot.is_undug());
    }

    #[test]
    fn start_dig_on_mined_plot_explodes() {
        let mut plot = Plot::default();
        plot.plant_mine();

        assert!(!plot.start_dig());
        assert_eq!(plot.state(), (PlotState::Exploded, true));
    }

    #[test]
    fn continue_dig_only_opens_undug_safe_plots() {
        let mut plot = Plot::default();
        assert!(plot.continue_dig());
        assert_eq!(plot.state(), (PlotState::Hole, false));

        // a hole cannot be dug again
        assert!(!plot.continue_dig());

        let mut mined = Plot::default();
        mined.plant_mine();
        assert!(!mined.continue_dig());
        assert_eq!(mined.state(), (PlotState::Undug, true));

        let mut flagged = Plot::default();
        flagged.toggle_flag(true);
        assert!(!flagged.continue_dig());
        assert_eq!(flagged.state(), (PlotState::Flagged, false));
    }

    #[test]
    fn reveal_discloses_mines_without_marking_them_exploded() {
        let mut buried = Plot::default();
        buried.plant_mine();
        buried.reveal();
        assert_eq!(buried.state(), (PlotState::Hole, true));

        let mut exploded = Plot::default();
        exploded.plant_mine();
        exploded.start_dig();
        exploded.reveal();
        assert_eq!(exploded.state(), (PlotState::Exploded, true));

        let mut safe = Plot::default();
        safe.reveal();
        assert_eq!(safe.state(), (PlotState::Undug, false));
    }

    #[test]
    fn reset_clears_state_and_mine() {
        let mut plot = Plot::default();
        plot.plant_mine();
        plot.start_dig();

        plot.reset();

        assert_eq!(plot.state(), (PlotState::Undug, false));
    }
}
