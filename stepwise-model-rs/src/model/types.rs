use core::fmt::{self, Write};

/// Logical value bounds of a layer, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerRange {
    pub min: i32,
    pub max: i32,
}

impl LayerRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Order in which the playback engine advances through the active steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunMode {
    #[default]
    Forward,
    Backward,
    Pendulum,
    PingPong,
    Random,
    RandomWalk,
}

impl RunMode {
    pub const COUNT: usize = 6;

    pub const ALL: [RunMode; Self::COUNT] = [
        RunMode::Forward,
        RunMode::Backward,
        RunMode::Pendulum,
        RunMode::PingPong,
        RunMode::Random,
        RunMode::RandomWalk,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RunMode::Forward => "Forward",
            RunMode::Backward => "Backward",
            RunMode::Pendulum => "Pendulum",
            RunMode::PingPong => "Ping Pong",
            RunMode::Random => "Random",
            RunMode::RandomWalk => "Random Walk",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Index past the last variant clamps to the last variant.
    pub fn from_index_clamped(index: usize) -> Self {
        Self::ALL[index.min(Self::COUNT - 1)]
    }
}

/// How a sequence follows the master clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayMode {
    /// Step position is derived from the song position.
    #[default]
    Aligned,
    /// Steps advance independently once started.
    Free,
}

impl PlayMode {
    pub const COUNT: usize = 2;

    pub const ALL: [PlayMode; Self::COUNT] = [PlayMode::Aligned, PlayMode::Free];

    pub fn name(self) -> &'static str {
        match self {
            PlayMode::Aligned => "Aligned",
            PlayMode::Free => "Free",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index_clamped(index: usize) -> Self {
        Self::ALL[index.min(Self::COUNT - 1)]
    }
}

/// Kind of step data a track holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackMode {
    #[default]
    Note,
    Curve,
}

impl TrackMode {
    pub fn name(self) -> &'static str {
        match self {
            TrackMode::Note => "Note",
            TrackMode::Curve => "Curve",
        }
    }
}

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch-class name of a semitone value (octaves wrap, negatives included).
pub fn note_name(note: i32) -> &'static str {
    NOTE_NAMES[note.rem_euclid(12) as usize]
}

/// Write the pitch-class name of `note`.
pub fn print_note<W: Write>(out: &mut W, note: i32) -> fmt::Result {
    out.write_str(note_name(note))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_range_clamps_and_contains() {
        let range = LayerRange::new(-8, 7);
        assert_eq!(range.clamp(-9), -8);
        assert_eq!(range.clamp(8), 7);
        assert!(range.contains(0));
        assert!(!range.contains(8));
    }

    #[test]
    fn run_mode_index_round_trip() {
        for (i, mode) in RunMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
            assert_eq!(RunMode::from_index_clamped(i), *mode);
        }
        assert_eq!(RunMode::from_index_clamped(200), RunMode::RandomWalk);
    }

    #[test]
    fn play_mode_from_index_clamps() {
        assert_eq!(PlayMode::from_index_clamped(0), PlayMode::Aligned);
        assert_eq!(PlayMode::from_index_clamped(9), PlayMode::Free);
    }

    #[test]
    fn note_names_wrap_by_octave() {
        assert_eq!(note_name(0), "C");
        assert_eq!(note_name(11), "B");
        assert_eq!(note_name(13), "C#");
        assert_eq!(note_name(-1), "B");
    }
}
