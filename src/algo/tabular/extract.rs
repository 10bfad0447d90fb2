use serde::{Deserialize, Serialize};

use crate::{error::Result, util::argmax};

use super::value_table::ValueTable;

/// Reduction of a state's row to the score compared across states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extraction {
    /// Best action value of the row
    RowMax,
    /// Sum of every action value in the row
    RowSum,
}

impl Extraction {
    pub fn score(&self, table: &ValueTable, state: usize) -> Result<f64> {
        match self {
            Extraction::RowMax => table.row_max(state),
            Extraction::RowSum => table.row_sum(state),
        }
    }
}

/// The state among `candidates` whose row scores highest, lowest index on ties
///
/// Pure in its inputs. **Returns** `None` if `candidates` is empty.
pub fn extract(
    table: &ValueTable,
    extraction: Extraction,
    candidates: impl IntoIterator<Item = usize>,
) -> Result<Option<usize>> {
    let scores = candidates
        .into_iter()
        .map(|s| extraction.score(table, s).map(|v| (s, v)))
        .collect::<Result<Vec<_>>>()?;
    Ok(argmax(scores))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ValueTable {
        // row 0: max 5, sum 1 / row 1: max 2, sum 4 / row 2: max 5, sum 4
        let mut table = ValueTable::new(3, 2);
        for (s, a, v) in [
            (0, 0, 5.0),
            (0, 1, -4.0),
            (1, 0, 2.0),
            (1, 1, 2.0),
            (2, 0, -1.0),
            (2, 1, 5.0),
        ] {
            table.set(s, a, v).unwrap();
        }
        table
    }

    #[test]
    fn row_max_extraction() {
        assert_eq!(extract(&table(), Extraction::RowMax, 0..3).unwrap(), Some(0));
        assert_eq!(extract(&table(), Extraction::RowMax, [1, 2]).unwrap(), Some(2));
    }

    #[test]
    fn row_sum_extraction() {
        assert_eq!(extract(&table(), Extraction::RowSum, 0..3).unwrap(), Some(1));
        assert_eq!(extract(&table(), Extraction::RowSum, [2, 0]).unwrap(), Some(2));
    }

    #[test]
    fn empty_or_invalid_candidates() {
        assert_eq!(extract(&table(), Extraction::RowSum, []).unwrap(), None);
        assert!(extract(&table(), Extraction::RowMax, [0, 3]).is_err());
    }
}
