//! The ordered wave collection and the active-wave cursor.

use crate::{Error, Result, Wave};

/// All waves loaded or created in this run, addressed by insertion index.
///
/// The cursor is the one piece of implicit state in the editor: every
/// wave-addressed command goes through [`Session::active_wave`] (or its
/// mutable sibling) and refuses to run when nothing is selected, so a
/// stale or absent index can never reach an edit.
#[derive(Debug, Default)]
pub struct Session {
    waves: Vec<Wave>,
    active: Option<usize>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a wave, returning its index. The wave is not selected.
    pub fn add(&mut self, wave: Wave) -> usize {
        self.waves.push(wave);
        self.waves.len() - 1
    }

    /// Append a wave and move the cursor to it (the `e` command).
    pub fn add_and_select(&mut self, wave: Wave) -> usize {
        let index = self.add(wave);
        self.active = Some(index);
        index
    }

    /// Point the cursor at `index`.
    ///
    /// An out-of-range index reports [`Error::WaveNotFound`] and leaves
    /// the current cursor exactly where it was.
    pub fn select(&mut self, index: i64) -> Result<()> {
        let idx = usize::try_from(index).map_err(|_| Error::WaveNotFound(index))?;
        if idx >= self.waves.len() {
            return Err(Error::WaveNotFound(index));
        }
        self.active = Some(idx);
        Ok(())
    }

    /// Index of the selected wave, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The wave every editing command operates on.
    pub fn active_wave(&self) -> Result<&Wave> {
        self.active
            .and_then(|i| self.waves.get(i))
            .ok_or(Error::NoSelection)
    }

    /// Mutable access to the selected wave.
    pub fn active_wave_mut(&mut self) -> Result<&mut Wave> {
        let index = self.active.ok_or(Error::NoSelection)?;
        self.waves.get_mut(index).ok_or(Error::NoSelection)
    }

    /// Number of waves in the session.
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    /// Whether the session holds no waves.
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Iterate waves in insertion order (the `l` command).
    pub fn iter(&self) -> impl Iterator<Item = &Wave> {
        self.waves.iter()
    }
}
