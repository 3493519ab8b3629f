//! Sparse checkpoint storage.
//!
//! A [`Checkpoint`] holds only the entities observed at its time. Columns
//! are registered the first time an entity is observed and kept sorted by
//! name, so rendering is independent of observation order.

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

use queuesim_core::{EntityName, SimTime, TimelineError};

use crate::table::{Timeline, TimelineRow};

/// The entities observed at one point in time, with their state symbols.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint {
    time: SimTime,
    observations: SmallVec<[(EntityName, char); 4]>,
}

impl Checkpoint {
    fn new(time: SimTime) -> Self {
        Self {
            time,
            observations: SmallVec::new(),
        }
    }

    /// The checkpoint time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Symbol recorded for `entity` at this time, if it was observed.
    pub fn get(&self, entity: &str) -> Option<char> {
        self.observations
            .iter()
            .find(|(name, _)| name.as_str() == entity)
            .map(|&(_, symbol)| symbol)
    }

    /// Observations in recording order.
    pub fn observations(&self) -> impl Iterator<Item = (&EntityName, char)> {
        self.observations.iter().map(|(name, symbol)| (name, *symbol))
    }

    fn set(&mut self, entity: &EntityName, symbol: char) {
        match self.observations.iter_mut().find(|(name, _)| name == entity) {
            Some(slot) => slot.1 = symbol,
            None => self.observations.push((entity.clone(), symbol)),
        }
    }
}

/// Records entity states at points in time.
#[derive(Clone, Debug, Default)]
pub struct TimelineRecorder {
    /// Ascending by time, unique times.
    checkpoints: Vec<Checkpoint>,
    /// Known entities, sorted by name.
    columns: IndexSet<EntityName>,
    /// Latest recorded time per entity.
    latest: IndexMap<EntityName, SimTime>,
}

impl TimelineRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `entity` showed `symbol` at `time`.
    ///
    /// Creates the checkpoint at exactly `time` if none exists, otherwise
    /// updates it; recording the same entity twice at one time keeps the
    /// last symbol.
    ///
    /// # Errors
    ///
    /// - [`TimelineError::MissingEntity`] for an empty name.
    /// - [`TimelineError::InvalidTime`] for a NaN, infinite or negative time.
    /// - [`TimelineError::OrderingInversion`] if `time` precedes the latest
    ///   time already recorded for `entity`.
    pub fn record(
        &mut self,
        entity: &EntityName,
        time: SimTime,
        symbol: char,
    ) -> Result<(), TimelineError> {
        if entity.is_empty() {
            return Err(TimelineError::MissingEntity);
        }
        if !time.is_finite() || time < 0.0 {
            return Err(TimelineError::InvalidTime { time });
        }
        if let Some(&latest) = self.latest.get(entity) {
            if time < latest {
                return Err(TimelineError::OrderingInversion {
                    entity: entity.to_string(),
                    time,
                    latest,
                });
            }
        }

        // Linear scan from the earliest; recording is append-mostly.
        let idx = self
            .checkpoints
            .iter()
            .position(|cp| cp.time >= time)
            .unwrap_or(self.checkpoints.len());
        if self.checkpoints.get(idx).is_none_or(|cp| cp.time != time) {
            self.checkpoints.insert(idx, Checkpoint::new(time));
        }
        self.checkpoints[idx].set(entity, symbol);

        self.latest.insert(entity.clone(), time);
        if self.columns.insert(entity.clone()) {
            self.columns.sort();
        }
        Ok(())
    }

    /// Number of checkpoints.
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Checkpoints from the earliest to the latest.
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Known entities, sorted by name.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &EntityName> {
        self.columns.iter()
    }

    /// Latest time recorded for `entity`.
    pub fn latest(&self, entity: &str) -> Option<SimTime> {
        self.latest.get(entity).copied()
    }

    /// Expand the checkpoints into dense rows.
    ///
    /// Every row carries a cell for every known entity. A cell holds the
    /// entity's symbol at the row time, carried forward from its most
    /// recent observation, or `None` before its first observation. Calling
    /// this twice without recording in between yields equal timelines.
    pub fn render(&self) -> Timeline {
        let mut current: IndexMap<EntityName, Option<char>> =
            self.columns.iter().map(|name| (name.clone(), None)).collect();
        let rows = self
            .checkpoints
            .iter()
            .enumerate()
            .map(|(index, cp)| {
                for (name, symbol) in &cp.observations {
                    if let Some(cell) = current.get_mut(name) {
                        *cell = Some(*symbol);
                    }
                }
                TimelineRow {
                    index,
                    time: cp.time,
                    cells: current.clone(),
                }
            })
            .collect();
        Timeline {
            columns: self.columns.iter().cloned().collect(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> EntityName {
        EntityName::from(s)
    }

    #[test]
    fn record_creates_and_updates_checkpoints() {
        let mut rec = TimelineRecorder::new();
        rec.record(&name("elke"), 0.0, '.').unwrap();
        rec.record(&name("paul"), 0.0, '?').unwrap();
        rec.record(&name("elke"), 0.0, 'X').unwrap();
        rec.record(&name("elke"), 2.0, '.').unwrap();
        assert_eq!(rec.len(), 2);
        let first = &rec.checkpoints()[0];
        assert_eq!(first.get("elke"), Some('X'));
        assert_eq!(first.get("paul"), Some('?'));
        assert_eq!(first.observations().count(), 2);
        assert_eq!(rec.latest("elke"), Some(2.0));
    }

    #[test]
    fn out_of_order_times_insert_in_place() {
        let mut rec = TimelineRecorder::new();
        rec.record(&name("a"), 5.0, 'X').unwrap();
        rec.record(&name("b"), 1.0, '?').unwrap();
        rec.record(&name("c"), 3.0, '.').unwrap();
        let times: Vec<f64> = rec.checkpoints().iter().map(Checkpoint::time).collect();
        assert_eq!(times, [1.0, 3.0, 5.0]);
    }

    #[test]
    fn columns_sorted_by_name() {
        let mut rec = TimelineRecorder::new();
        rec.record(&name("peter"), 0.0, '?').unwrap();
        rec.record(&name("elke"), 0.0, '.').unwrap();
        rec.record(&name("harry"), 0.0, '?').unwrap();
        let cols: Vec<&str> = rec.columns().map(EntityName::as_str).collect();
        assert_eq!(cols, ["elke", "harry", "peter"]);
    }

    #[test]
    fn rejects_inversion_for_same_entity() {
        let mut rec = TimelineRecorder::new();
        rec.record(&name("elke"), 2.0, 'X').unwrap();
        let err = rec.record(&name("elke"), 1.0, '.').unwrap_err();
        match err {
            TimelineError::OrderingInversion {
                entity,
                time,
                latest,
            } => {
                assert_eq!(entity, "elke");
                assert_eq!(time, 1.0);
                assert_eq!(latest, 2.0);
            }
            other => panic!("expected OrderingInversion, got {other:?}"),
        }
        // Other entities may still be recorded earlier.
        rec.record(&name("paul"), 1.0, '?').unwrap();
    }

    #[test]
    fn rejects_missing_entity_and_bad_time() {
        let mut rec = TimelineRecorder::new();
        assert_eq!(
            rec.record(&name(""), 0.0, '.'),
            Err(TimelineError::MissingEntity)
        );
        assert!(matches!(
            rec.record(&name("x"), f64::NAN, '.'),
            Err(TimelineError::InvalidTime { .. })
        ));
        assert_eq!(
            rec.record(&name("x"), -1.0, '.'),
            Err(TimelineError::InvalidTime { time: -1.0 })
        );
        assert!(rec.is_empty());
    }

    #[test]
    fn render_forward_fills_never_backward() {
        let mut rec = TimelineRecorder::new();
        rec.record(&name("elke"), 0.0, '.').unwrap();
        rec.record(&name("elke"), 2.0, 'X').unwrap();
        rec.record(&name("paul"), 2.0, 'X').unwrap();
        rec.record(&name("elke"), 4.0, '.').unwrap();
        let tl = rec.render();
        assert_eq!(tl.len(), 3);
        assert_eq!(tl.rows()[0].get("paul"), None);
        assert_eq!(tl.rows()[0].get("elke"), Some('.'));
        assert_eq!(tl.rows()[1].get("paul"), Some('X'));
        assert_eq!(tl.rows()[2].get("paul"), Some('X'));
        assert_eq!(tl.rows()[2].get("elke"), Some('.'));
        assert_eq!(tl.rows()[2].index, 2);
        assert_eq!(tl.rows()[2].time, 4.0);
    }

    #[test]
    fn render_of_empty_recorder_is_empty() {
        let tl = TimelineRecorder::new().render();
        assert!(tl.is_empty());
        assert_eq!(tl.columns().len(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn observations() -> impl Strategy<Value = Vec<(u8, u8, char)>> {
            prop::collection::vec((0u8..4, 0u8..20, prop::sample::select(vec!['.', 'X', '?'])), 0..40)
        }

        proptest! {
            #[test]
            fn render_is_idempotent_and_dense(obs in observations()) {
                let mut rec = TimelineRecorder::new();
                for (entity, t, symbol) in obs {
                    // Inversions are rejected and leave the recorder unchanged.
                    let _ = rec.record(&EntityName::from(format!("e{entity}")), f64::from(t), symbol);
                }
                let first = rec.render();
                let second = rec.render();
                prop_assert_eq!(&first, &second);
                prop_assert_eq!(first.len(), rec.len());
                for row in first.rows() {
                    prop_assert_eq!(row.cells.len(), first.columns().len());
                }
                // Once an entity has a symbol it keeps one.
                for col in first.columns() {
                    let seen: Vec<bool> = first
                        .rows()
                        .iter()
                        .map(|r| r.get(col.as_str()).is_some())
                        .collect();
                    prop_assert!(seen.windows(2).all(|w| !w[0] || w[1]));
                }
            }
        }
    }
}
