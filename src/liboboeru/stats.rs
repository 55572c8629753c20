use crate::liboboeru::deck::Deck;
use std::fmt;

pub(crate) fn max_hardness(deck: &Deck) -> u32 {
    deck.iter().map(|c| c.hardness).max().unwrap_or(0)
}

/// Terms tied at the highest hardness, in deck order. Empty when nobody has
/// made a mistake yet.
pub(crate) fn hardest_cards(deck: &Deck) -> Vec<&str> {
    let max = max_hardness(deck);
    if max == 0 {
        return Vec::new();
    }
    deck.iter()
        .filter(|c| c.hardness == max)
        .map(|c| c.term.as_str())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HardestReport {
    NoErrors,
    One { term: String, errors: u32 },
    Many { terms: Vec<String>, errors: u32 },
}

impl HardestReport {
    pub fn of(deck: &Deck) -> HardestReport {
        let errors = max_hardness(deck);
        let mut terms: Vec<String> = hardest_cards(deck)
            .into_iter()
            .map(String::from)
            .collect();
        match terms.len() {
            0 => HardestReport::NoErrors,
            1 => HardestReport::One {
                term: terms.remove(0),
                errors,
            },
            _ => HardestReport::Many { terms, errors },
        }
    }
}

impl fmt::Display for HardestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardestReport::NoErrors => write!(f, "There are no cards with errors."),
            HardestReport::One { term, errors } => write!(
                f,
                "The hardest card is \"{}\". You have {} errors answering it.",
                term, errors
            ),
            HardestReport::Many { terms, errors } => {
                let quoted: Vec<String> = terms.iter().map(|t| format!("\"{}\"", t)).collect();
                write!(
                    f,
                    "The hardest cards are: {}. You have {} errors answering them.",
                    quoted.join(", "),
                    errors
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liboboeru::deck::Card;

    fn deck_of(cards: &[(&str, &str, u32)]) -> Deck {
        let mut deck = Deck::new();
        for (term, def, hardness) in cards {
            deck.add(Card::new(*term, *def).with_hardness(*hardness)).unwrap();
        }
        deck
    }

    #[test]
    fn empty_deck() {
        let deck = Deck::new();
        assert_eq!(max_hardness(&deck), 0);
        assert!(hardest_cards(&deck).is_empty());
        assert_eq!(HardestReport::of(&deck), HardestReport::NoErrors);
    }

    #[test]
    fn all_zero_means_no_errors() {
        let deck = deck_of(&[("cat", "animal", 0), ("dog", "pet", 0)]);
        assert_eq!(max_hardness(&deck), 0);
        assert!(hardest_cards(&deck).is_empty());
        assert_eq!(
            HardestReport::of(&deck).to_string(),
            "There are no cards with errors."
        );
    }

    #[test]
    fn single_hardest() {
        let deck = deck_of(&[("cat", "animal", 0), ("dog", "pet", 2)]);
        assert_eq!(max_hardness(&deck), 2);
        assert_eq!(hardest_cards(&deck), vec!["dog"]);
        assert_eq!(
            HardestReport::of(&deck).to_string(),
            "The hardest card is \"dog\". You have 2 errors answering it."
        );
    }

    #[test]
    fn tied_hardest() {
        let deck = deck_of(&[("a", "1", 3), ("b", "2", 1), ("c", "3", 3)]);
        assert_eq!(hardest_cards(&deck), vec!["a", "c"]);
        assert_eq!(
            HardestReport::of(&deck).to_string(),
            "The hardest cards are: \"a\", \"c\". You have 3 errors answering them."
        );
    }
}
