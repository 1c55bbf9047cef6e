//! Scale table used to map step notes to semitones.

/// Number of entries in the scale table.
pub const SCALE_COUNT: usize = 14;

/// A named scale, given as semitone offsets of its degrees within one octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scale {
    name: &'static str,
    notes: &'static [u8],
}

static SCALES: [Scale; SCALE_COUNT] = [
    Scale::new("Semitones", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]),
    Scale::new("Major", &[0, 2, 4, 5, 7, 9, 11]),
    Scale::new("Minor", &[0, 2, 3, 5, 7, 8, 10]),
    Scale::new("Major Blues", &[0, 2, 3, 4, 7, 9]),
    Scale::new("Minor Blues", &[0, 3, 5, 6, 7, 10]),
    Scale::new("Major Pentatonic", &[0, 2, 4, 7, 9]),
    Scale::new("Minor Pentatonic", &[0, 3, 5, 7, 10]),
    Scale::new("Folk", &[0, 1, 3, 4, 5, 7, 8, 10]),
    Scale::new("Japanese", &[0, 1, 5, 7, 8]),
    Scale::new("Gamelan", &[0, 1, 3, 7, 8]),
    Scale::new("Gypsy", &[0, 2, 3, 6, 7, 8, 11]),
    Scale::new("Arabian", &[0, 1, 4, 5, 7, 8, 11]),
    Scale::new("Flamenco", &[0, 1, 4, 5, 7, 8, 10]),
    Scale::new("Whole Tone", &[0, 2, 4, 6, 8, 10]),
];

impl Scale {
    const fn new(name: &'static str, notes: &'static [u8]) -> Self {
        Self { name, notes }
    }

    /// Look up a scale by table index.
    ///
    /// Indices past the end of the table return the last scale.
    pub fn get(index: usize) -> &'static Scale {
        if index >= SCALE_COUNT {
            #[cfg(feature = "defmt")]
            defmt::warn!("Scale::get: index {} out of bounds", index);
            return &SCALES[SCALE_COUNT - 1];
        }
        &SCALES[index]
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn notes_per_octave(&self) -> usize {
        self.notes.len()
    }

    /// Semitone offset of scale degree `note`. Degrees outside the first
    /// octave continue into neighbouring octaves.
    pub fn semitones(&self, note: i32) -> i32 {
        let per_octave = self.notes.len() as i32;
        let octave = note.div_euclid(per_octave);
        let degree = note.rem_euclid(per_octave) as usize;
        octave * 12 + i32::from(self.notes[degree])
    }
}
