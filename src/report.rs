use std::{
    collections::{btree_map::Entry, BTreeMap},
    ops::Index,
};

/// Named metrics accumulated over one episode
///
/// Keys are fixed at construction; [`Report::take`] hands the values out and resets them to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    data: BTreeMap<&'static str, f64>,
}

impl Report {
    pub fn new(keys: Vec<&'static str>) -> Self {
        Self {
            data: keys.into_iter().map(|k| (k, 0.0)).collect(),
        }
    }

    /// Metric names, in the same order as the values yielded by [`Report::take`]
    pub fn keys(&self) -> Vec<&'static str> {
        self.data.keys().copied().collect()
    }

    pub fn entry(&mut self, key: &'static str) -> Entry<'_, &'static str, f64> {
        self.data.entry(key)
    }

    /// Take the current values, leaving zeros behind
    pub fn take(&mut self) -> BTreeMap<&'static str, f64> {
        let reset = self.data.keys().map(|&k| (k, 0.0)).collect();
        std::mem::replace(&mut self.data, reset)
    }
}

impl Index<&str> for Report {
    type Output = f64;

    fn index(&self, key: &str) -> &Self::Output {
        &self.data[key]
    }
}
