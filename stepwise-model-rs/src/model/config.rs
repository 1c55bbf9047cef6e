use super::scale::{Scale, SCALE_COUNT};

/// Project-wide fallbacks for sequences whose scale or root note is set to
/// "Default" (`-1`).
///
/// One instance is owned by the host (typically the project) and lent out
/// by shared reference to [`selected_scale()`] and [`selected_root_note()`].
/// Single-writer discipline is the host's responsibility.
///
/// [`selected_scale()`]: super::NoteSequence::selected_scale
/// [`selected_root_note()`]: super::NoteSequence::selected_root_note
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceDefaults {
    scale: u8,
    root_note: u8,
}

impl SequenceDefaults {
    /// Both values are clamped into their valid ranges.
    pub fn new(scale: i32, root_note: i32) -> Self {
        let mut defaults = Self::default();
        defaults.set_scale(scale);
        defaults.set_root_note(root_note);
        defaults
    }

    pub fn scale(&self) -> usize {
        usize::from(self.scale)
    }

    pub fn set_scale(&mut self, scale: i32) {
        self.scale = scale.clamp(0, SCALE_COUNT as i32 - 1) as u8;
    }

    pub fn root_note(&self) -> i32 {
        i32::from(self.root_note)
    }

    pub fn set_root_note(&mut self, root_note: i32) {
        self.root_note = root_note.clamp(0, 11) as u8;
    }

    pub fn selected_scale(&self) -> &'static Scale {
        Scale::get(self.scale())
    }
}
