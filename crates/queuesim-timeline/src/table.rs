//! Dense rendering of a recorded timeline.

use std::fmt;

use indexmap::IndexMap;

use queuesim_core::{EntityName, SimTime};

/// One rendered row: the state symbol of every known entity at `time`.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineRow {
    /// Zero-based row number.
    pub index: usize,
    /// Checkpoint time.
    pub time: SimTime,
    /// One cell per column, in column order. `None` before the entity's
    /// first observation.
    pub cells: IndexMap<EntityName, Option<char>>,
}

impl TimelineRow {
    /// Symbol of `entity` in this row.
    pub fn get(&self, entity: &str) -> Option<char> {
        self.cells.get(entity).copied().flatten()
    }
}

/// A rendered timeline, produced by
/// [`TimelineRecorder::render`](crate::TimelineRecorder::render).
///
/// `Display` writes a tab-separated table: a header `ti`, `t` and one
/// column per entity, then one line per row with the time to three
/// decimals and `-` for cells without an observation yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    pub(crate) columns: Vec<EntityName>,
    pub(crate) rows: Vec<TimelineRow>,
}

impl Timeline {
    /// Entity names, sorted.
    pub fn columns(&self) -> &[EntityName] {
        &self.columns
    }

    /// Rows from the earliest to the latest.
    pub fn rows(&self) -> &[TimelineRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the timeline has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The last row at or before `time`.
    pub fn row_at(&self, time: SimTime) -> Option<&TimelineRow> {
        self.rows.iter().take_while(|r| r.time <= time).last()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineRow;
    type IntoIter = std::slice::Iter<'a, TimelineRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ti\tt")?;
        for name in &self.columns {
            write!(f, "\t{name}")?;
        }
        writeln!(f)?;
        for row in &self.rows {
            write!(f, "{}\t{:.3}", row.index, row.time)?;
            for cell in row.cells.values() {
                write!(f, "\t{}", cell.unwrap_or('-'))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
