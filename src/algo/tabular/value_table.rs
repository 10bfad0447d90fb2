use crate::{
    error::{Error, Result},
    util::argmax,
};

/// Dense `states x actions` table of action values, stored row-major
///
/// Every entry starts at `0.0`. All accessors are bounds checked and fail with
/// [`Error::IndexOutOfRange`] rather than panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    values: Vec<f64>,
    states: usize,
    actions: usize,
}

impl ValueTable {
    pub fn new(states: usize, actions: usize) -> Self {
        Self {
            values: vec![0.0; states * actions],
            states,
            actions,
        }
    }

    pub fn states(&self) -> usize {
        self.states
    }

    pub fn actions(&self) -> usize {
        self.actions
    }

    fn offset(&self, state: usize, action: usize) -> Result<usize> {
        if state >= self.states || action >= self.actions {
            return Err(Error::IndexOutOfRange {
                state,
                action,
                states: self.states,
                actions: self.actions,
            });
        }
        Ok(state * self.actions + action)
    }

    pub fn get(&self, state: usize, action: usize) -> Result<f64> {
        self.offset(state, action).map(|i| self.values[i])
    }

    pub fn set(&mut self, state: usize, action: usize, value: f64) -> Result<()> {
        let i = self.offset(state, action)?;
        self.values[i] = value;
        Ok(())
    }

    /// All action values for `state`
    pub fn row(&self, state: usize) -> Result<&[f64]> {
        // action 0 always exists for a non-degenerate table, so this doubles as the row check
        let start = self.offset(state, 0)?;
        Ok(&self.values[start..start + self.actions])
    }

    /// Action with the highest value in `state`, lowest index on ties
    pub fn best_action(&self, state: usize) -> Result<usize> {
        self.best_action_among(state, 0..self.actions)?
            .ok_or_else(|| Error::IndexOutOfRange {
                state,
                action: 0,
                states: self.states,
                actions: self.actions,
            })
    }

    /// Like [`ValueTable::best_action`] but only considering `candidates`
    ///
    /// **Returns** `None` if `candidates` is empty
    pub fn best_action_among(
        &self,
        state: usize,
        candidates: impl IntoIterator<Item = usize>,
    ) -> Result<Option<usize>> {
        let scores = candidates
            .into_iter()
            .map(|a| self.get(state, a).map(|v| (a, v)))
            .collect::<Result<Vec<_>>>()?;
        Ok(argmax(scores))
    }

    /// Highest action value in `state`, the bootstrap term of the update
    pub fn row_max(&self, state: usize) -> Result<f64> {
        Ok(self
            .row(state)?
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Like [`ValueTable::row_max`] but only over `candidates`
    ///
    /// **Returns** `None` if `candidates` is empty
    pub fn row_max_among(
        &self,
        state: usize,
        candidates: impl IntoIterator<Item = usize>,
    ) -> Result<Option<f64>> {
        candidates
            .into_iter()
            .try_fold(None, |best: Option<f64>, a| {
                let v = self.get(state, a)?;
                Ok(Some(best.map_or(v, |b| b.max(v))))
            })
    }

    pub fn row_sum(&self, state: usize) -> Result<f64> {
        Ok(self.row(state)?.iter().sum())
    }
}
