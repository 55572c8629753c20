use log::{debug, warn};
use std::slice::Iter;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub term: String,
    pub definition: String,
    pub hardness: u32,
}

impl Card {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Card {
        Card {
            term: term.into(),
            definition: definition.into(),
            hardness: 0,
        }
    }

    pub fn with_hardness(mut self, hardness: u32) -> Card {
        self.hardness = hardness;
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("The card \"{0}\" already exists.")]
    DuplicateTerm(String),
    #[error("The definition \"{0}\" already exists.")]
    DuplicateDefinition(String),
    #[error("Can't remove \"{0}\": there is no such card.")]
    NoSuchCard(String),
}

/// What [`Deck::upsert`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Added,
    Updated,
}

/// Insertion-ordered cards. Terms are unique, and so are definitions, except
/// where [`Deck::upsert`] has overwritten a definition.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Deck {
        Deck { cards: Vec::new() }
    }

    pub fn term_exists(&self, term: &str) -> bool {
        self.cards.iter().any(|c| c.term == term)
    }

    pub fn definition_exists(&self, definition: &str) -> bool {
        self.cards.iter().any(|c| c.definition == definition)
    }

    pub fn add(&mut self, card: Card) -> Result<(), DeckError> {
        if self.term_exists(&card.term) {
            return Err(DeckError::DuplicateTerm(card.term));
        }
        if self.definition_exists(&card.definition) {
            return Err(DeckError::DuplicateDefinition(card.definition));
        }
        debug!("[Deck] Added card {:?}", card);
        self.cards.push(card);
        Ok(())
    }

    pub fn remove(&mut self, term: &str) -> Result<Card, DeckError> {
        match self.cards.iter().position(|c| c.term == term) {
            Some(idx) => {
                let card = self.cards.remove(idx);
                debug!("[Deck] Removed card {:?}", card);
                Ok(card)
            }
            None => Err(DeckError::NoSuchCard(term.to_string())),
        }
    }

    pub fn find_by_term(&self, term: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.term == term)
    }

    pub fn find_by_definition(&self, definition: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.definition == definition)
    }

    /// Returns the new hardness, or `None` if no card has this term.
    pub fn increment_hardness(&mut self, term: &str) -> Option<u32> {
        let card = self.cards.iter_mut().find(|c| c.term == term)?;
        let before = card.hardness;
        card.hardness = before.saturating_add(1);
        debug!("[Deck] Hardness of {:?}: {} -> {}", term, before, card.hardness);
        Some(card.hardness)
    }

    pub fn reset_all_hardness(&mut self) {
        self.cards.iter_mut().for_each(|c| c.hardness = 0);
        debug!("[Deck] Reset hardness of {} cards", self.cards.len());
    }

    /// Appends a card with a new term, or overwrites the definition of the
    /// card that already has it. Hardness of an existing card is kept and
    /// definition uniqueness is not enforced here.
    pub fn upsert(&mut self, card: Card) -> Upserted {
        match self.cards.iter().position(|c| c.term == card.term) {
            Some(idx) => {
                let shared = self
                    .cards
                    .iter()
                    .enumerate()
                    .any(|(i, c)| i != idx && c.definition == card.definition);
                if shared {
                    warn!(
                        "[Deck] Definition {:?} of {:?} is now shared with another card",
                        card.definition, card.term
                    );
                }
                self.cards[idx].definition = card.definition;
                Upserted::Updated
            }
            None => {
                self.cards.push(card);
                Upserted::Added
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Card> {
        self.cards.iter()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
