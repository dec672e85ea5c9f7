use super::Candidate;

/// Ranked results of the latest match, best first.
#[derive(Debug, Default)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new() -> CandidateSet {
        CandidateSet { candidates: Vec::new() }
    }

    /// Drop the previous results and keep `results` in the order given.
    pub fn replace(&mut self, results: Vec<Candidate>) {
        self.candidates = results;
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
    }

    pub fn count(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn nth(&self, ix: usize) -> Option<&Candidate> {
        self.candidates.get(ix)
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }
}
