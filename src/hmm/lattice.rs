/// Viterbi lattice over `num_items` positions and `num_states` states.
///
/// All scores are natural logarithms of probabilities. Rows are laid out
/// contiguously: the cell for position `t` and state `j` is at
/// `num_states * t + j`.
#[derive(Debug)]
pub(crate) struct Lattice {
    num_items: usize,
    num_states: usize,
    /// state (emission) score of each cell; row 0 also carries the start score
    pub(crate) state: Vec<f64>,
    /// best path score ending in each cell
    score: Vec<f64>,
    /// previous state on the best path into each cell
    backward_edge: Vec<usize>,
}

impl Lattice {
    pub(crate) fn new(num_items: usize, num_states: usize) -> Self {
        let n = num_items * num_states;
        Self {
            num_items,
            num_states,
            state: vec![f64::NEG_INFINITY; n],
            score: vec![f64::NEG_INFINITY; n],
            backward_edge: vec![0; n],
        }
    }

    /// Runs the forward pass with the `num_states x num_states` transition
    /// scores `trans` (row = previous state) and writes the best state
    /// sequence into `labels`. Returns the score of that sequence.
    ///
    /// Ties go to the lowest state id.
    #[allow(non_snake_case)]
    pub(crate) fn viterbi(&mut self, trans: &[f64], labels: &mut [usize]) -> f64 {
        let T = self.num_items;
        let L = self.num_states;
        debug_assert_eq!(trans.len(), L * L);
        debug_assert_eq!(labels.len(), T);
        if T == 0 || L == 0 {
            return f64::NEG_INFINITY;
        }

        self.score[..L].copy_from_slice(&self.state[..L]);
        for t in 1..T {
            for j in 0..L {
                let (argmax, max_score) =
                    argmax((0..L).map(|i| self.score[L * (t - 1) + i] + trans[L * i + j]));
                self.backward_edge[L * t + j] = argmax;
                self.score[L * t + j] = max_score + self.state[L * t + j];
            }
        }

        let (last, max_score) = argmax(self.score[L * (T - 1)..L * T].iter().copied());
        labels[T - 1] = last;
        for t in (0..T - 1).rev() {
            labels[t] = self.backward_edge[L * (t + 1) + labels[t + 1]];
        }
        max_score
    }
}

/// First index holding the largest value; an all `-inf` row yields index 0.
fn argmax(scores: impl Iterator<Item = f64>) -> (usize, f64) {
    let mut best: Option<(usize, f64)> = None;
    for (i, s) in scores.enumerate() {
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((i, s)),
        }
    }
    best.unwrap_or((0, f64::NEG_INFINITY))
}
