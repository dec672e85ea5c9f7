use glyph_canvas::Candidate;

/// Keeps the best `max` candidates, highest score first, one per character.
pub struct MatchCollector<'a> {
    max: usize,
    matches: &'a mut Vec<Candidate>,
}

impl<'a> MatchCollector<'a> {
    pub fn new(matches: &'a mut Vec<Candidate>, max: usize) -> MatchCollector<'a> {
        assert!(max > 0, "Expected a positive number for the maximum number of matches.");
        assert!(matches.is_empty(), "The pre-existing matches vector must be empty.");
        MatchCollector { max, matches }
    }

    // True if the character is already there with at least this score.
    // Otherwise removes the weaker entry so the new one can be filed.
    fn remove_existing_lower(&mut self, mc: &Candidate) -> bool {
        let Some(ix) = self.matches.iter().position(|x| x.character == mc.character) else {
            return false;
        };
        if mc.score <= self.matches[ix].score {
            return true;
        }
        self.matches.remove(ix);
        false
    }

    pub fn file_match(&mut self, mc: Candidate) {
        // Already full and new match is no better than the weakest one
        if let Some(last) = self.matches.last() {
            if self.matches.len() == self.max && mc.score <= last.score {
                return;
            }
        }
        if self.remove_existing_lower(&mc) {
            return;
        }
        // Keep sorted largest score to smallest
        match self.matches.iter().position(|x| x.score < mc.score) {
            Some(ix) => self.matches.insert(ix, mc),
            None => self.matches.push(mc),
        }
        if self.matches.len() > self.max {
            self.matches.pop();
        }
    }
}
