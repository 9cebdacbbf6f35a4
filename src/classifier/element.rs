use super::{keywords, Classifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementScore {
    pub educational: usize,
    pub non_educational: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementVerdict {
    Educational,
    NonEducational,
    Neutral,
    /// Not rendered or too little text; counted neither way.
    Skipped,
}

impl Classifier {
    pub fn score_element(&self, text: &str) -> ElementScore {
        let text = text.to_lowercase();
        ElementScore {
            educational: keywords::keyword_hits(&text, keywords::EDUCATIONAL_KEYWORDS),
            non_educational: keywords::keyword_hits(&text, keywords::NON_EDUCATIONAL_PATTERNS),
        }
    }

    pub fn classify_element(&self, text: &str, rendered: bool) -> ElementVerdict {
        if !rendered || text.trim().chars().count() < self.tuning.element_min_chars {
            return ElementVerdict::Skipped;
        }

        let score = self.score_element(text);
        if score.educational >= self.tuning.element_min_score
            && score.educational > score.non_educational
        {
            ElementVerdict::Educational
        } else if score.non_educational > 0 && score.educational == 0 {
            ElementVerdict::NonEducational
        } else {
            ElementVerdict::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn educational_needs_two_hits_and_majority() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify_element("A university lecture on graph theory", true),
            ElementVerdict::Educational
        );
        assert_eq!(
            classifier.classify_element("Our gaming research: gossip and memes galore", true),
            ElementVerdict::Neutral
        );
    }

    #[test]
    fn non_educational_requires_no_keyword() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify_element("Celebrity gossip you cannot miss today", true),
            ElementVerdict::NonEducational
        );
        assert_eq!(
            classifier.classify_element("Celebrity gossip about a famous school", true),
            ElementVerdict::Neutral
        );
    }

    #[test]
    fn short_or_hidden_elements_are_skipped() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify_element("gossip", true), ElementVerdict::Skipped);
        assert_eq!(
            classifier.classify_element("A university lecture on graph theory", false),
            ElementVerdict::Skipped
        );
    }
}
