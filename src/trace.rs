/// Represents a single transition taken during an episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// The route under consideration before taking the action
    pub state: usize,
    /// The action taken in the given state
    pub action: usize,
    /// The reward received after taking the action
    pub reward: f64,
    /// The route under consideration after the action
    pub next_state: usize,
}

/// Ordered transitions of one episode
///
/// Handed back to the caller of [`QTableTrainer::go`](crate::algo::QTableTrainer::go)
/// for printing; the trainer keeps no copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    /// Route the episode started on
    pub start: usize,
    transitions: Vec<Transition>,
}

impl Trace {
    pub fn new(start: usize, capacity: usize) -> Self {
        Self {
            start,
            transitions: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Sum of the rewards collected during the episode
    pub fn total_reward(&self) -> f64 {
        self.transitions.iter().map(|t| t.reward).sum()
    }

    /// State the episode ended in
    pub fn last_state(&self) -> usize {
        self.transitions
            .last()
            .map_or(self.start, |t| t.next_state)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Transition;
    type IntoIter = std::slice::Iter<'a, Transition>;

    fn into_iter(self) -> Self::IntoIter {
        self.transitions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_totals() {
        let mut trace = Trace::new(2, 2);
        assert_eq!(trace.last_state(), 2);

        trace.push(Transition {
            state: 2,
            action: 0,
            reward: -2.0,
            next_state: 0,
        });
        trace.push(Transition {
            state: 0,
            action: 3,
            reward: 15.5,
            next_state: 3,
        });

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.total_reward(), 13.5);
        assert_eq!(trace.last_state(), 3);
        assert_eq!(
            trace.into_iter().map(|t| t.action).collect::<Vec<_>>(),
            [0, 3]
        );
    }
}
