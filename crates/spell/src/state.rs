//! Wet/dry day state shared by both simulation pathways.

/// Two-state daily precipitation occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DayState {
    /// No precipitation; every spatial unit receives zero depth.
    Dry = 0,
    /// Precipitation; a depth is sampled for every spatial unit.
    Wet = 1,
}

impl DayState {
    /// Both states in index order.
    pub const ALL: [DayState; 2] = [Self::Dry, Self::Wet];

    /// Returns the zero-based index of this state (matches the `#[repr(u8)]` discriminant).
    pub fn as_index(self) -> usize {
        self as usize
    }

    /// Returns the opposite state.
    pub fn flip(self) -> Self {
        match self {
            Self::Dry => Self::Wet,
            Self::Wet => Self::Dry,
        }
    }

    /// Returns `true` for [`DayState::Wet`].
    pub fn is_wet(self) -> bool {
        self == Self::Wet
    }
}
