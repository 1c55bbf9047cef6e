use core::fmt;

/// Errors reported by the write/read contexts during (de)serialization.
///
/// Model mutation itself never fails; out-of-range values are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The reader ran out of bytes before the record was complete.
    UnexpectedEnd,
    /// The writer has no room left for the record.
    BufferFull,
    /// The context cannot resolve a track mode for the requested track.
    InvalidTrackIndex,
    /// The sequence's step data does not match the track's mode.
    TrackModeMismatch,
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SerializeError::UnexpectedEnd => write!(f, "Unexpected end of data"),
            SerializeError::BufferFull => write!(f, "Write buffer full"),
            SerializeError::InvalidTrackIndex => write!(f, "Invalid track index"),
            SerializeError::TrackModeMismatch => {
                write!(f, "Sequence data does not match track mode")
            }
        }
    }
}
