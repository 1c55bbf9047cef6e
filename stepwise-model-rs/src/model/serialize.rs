//! Write/read contexts for persisting model records.
//!
//! Records do not know about the storage medium. They emit and consume a
//! fixed sequence of little-endian primitives through a [`WriteContext`] or
//! [`ReadContext`], which wrap a byte [`Writer`] / [`Reader`] together with
//! the project's [`TrackModes`]. Sequence records query the track mode to
//! decide which step format follows their header.
//!
//! Byte sinks and sources provided here:
//!
//! - [`SliceWriter`] / [`SliceReader`] over borrowed byte slices.
//! - [`heapless::Vec<u8, N>`] as a fixed-capacity [`Writer`].

use super::error::SerializeError;
use super::types::TrackMode;

/// Byte sink.
pub trait Writer {
    /// Append all of `bytes` or fail without a partial write.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerializeError>;
}

/// Byte source.
pub trait Reader {
    /// Fill all of `buf` or fail.
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), SerializeError>;
}

/// Per-track mode lookup supplied by the owning project.
pub trait TrackModes {
    /// Returns `None` if `track` is not a valid track index.
    fn resolve_track_mode(&self, track: usize) -> Option<TrackMode>;
}

impl TrackModes for [TrackMode] {
    fn resolve_track_mode(&self, track: usize) -> Option<TrackMode> {
        self.get(track).copied()
    }
}

impl<const N: usize> TrackModes for [TrackMode; N] {
    fn resolve_track_mode(&self, track: usize) -> Option<TrackMode> {
        self.get(track).copied()
    }
}

fn resolve(tracks: &dyn TrackModes, track: usize) -> Result<TrackMode, SerializeError> {
    match tracks.resolve_track_mode(track) {
        Some(mode) => Ok(mode),
        None => {
            #[cfg(feature = "defmt")]
            defmt::warn!("resolve_track_mode: track {} out of bounds", track);
            Err(SerializeError::InvalidTrackIndex)
        }
    }
}

// ── Contexts ─────────────────────────────────────────────────────────

/// Serialization state handed to each record's `write()`.
pub struct WriteContext<'a> {
    writer: &'a mut dyn Writer,
    tracks: &'a dyn TrackModes,
}

impl<'a> WriteContext<'a> {
    pub fn new(writer: &'a mut dyn Writer, tracks: &'a dyn TrackModes) -> Self {
        Self { writer, tracks }
    }

    /// Mode of `track` in the owning project.
    pub fn track_mode(&self, track: usize) -> Result<TrackMode, SerializeError> {
        resolve(self.tracks, track)
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), SerializeError> {
        self.writer.write_bytes(&[value])
    }

    pub fn write_i8(&mut self, value: i8) -> Result<(), SerializeError> {
        self.writer.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), SerializeError> {
        self.writer.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), SerializeError> {
        self.writer.write_bytes(&value.to_le_bytes())
    }
}

/// Deserialization state handed to each record's `read()`.
pub struct ReadContext<'a> {
    reader: &'a mut dyn Reader,
    tracks: &'a dyn TrackModes,
}

impl<'a> ReadContext<'a> {
    pub fn new(reader: &'a mut dyn Reader, tracks: &'a dyn TrackModes) -> Self {
        Self { reader, tracks }
    }

    /// Mode of `track` in the owning project.
    pub fn track_mode(&self, track: usize) -> Result<TrackMode, SerializeError> {
        resolve(self.tracks, track)
    }

    pub fn read_u8(&mut self) -> Result<u8, SerializeError> {
        let mut buf = [0u8; 1];
        self.reader.read_bytes(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, SerializeError> {
        let mut buf = [0u8; 1];
        self.reader.read_bytes(&mut buf)?;
        Ok(i8::from_le_bytes(buf))
    }

    pub fn read_u16(&mut self) -> Result<u16, SerializeError> {
        let mut buf = [0u8; 2];
        self.reader.read_bytes(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_u32(&mut self) -> Result<u32, SerializeError> {
        let mut buf = [0u8; 4];
        self.reader.read_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }
}

// ── Slice-backed sinks and sources ───────────────────────────────────

/// [`Writer`] filling a borrowed byte slice from the front.
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl Writer for SliceWriter<'_> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerializeError> {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            return Err(SerializeError::BufferFull);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

/// [`Reader`] consuming a borrowed byte slice from the front.
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl Reader for SliceReader<'_> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), SerializeError> {
        let end = self.pos + buf.len();
        if end > self.data.len() {
            return Err(SerializeError::UnexpectedEnd);
        }
        buf.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(())
    }
}

impl<const N: usize> Writer for heapless::Vec<u8, N> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerializeError> {
        if self.len() + bytes.len() > self.capacity() {
            return Err(SerializeError::BufferFull);
        }
        self.extend_from_slice(bytes)
            .map_err(|_| SerializeError::BufferFull)
    }
}
