use crate::liboboeru::deck::Deck;
use log::debug;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Question {
    pub number: usize,
    pub term: String,
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Print the definition of \"{}\":", self.term)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Verdict {
    Correct,
    Wrong { expected: String },
    WrongButMatches { expected: String, other_term: String },
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "Correct!"),
            Verdict::Wrong { expected } => {
                write!(f, "Wrong. The right answer is \"{}\".", expected)
            }
            Verdict::WrongButMatches {
                expected,
                other_term,
            } => write!(
                f,
                "Wrong. The right answer is \"{}\", but your definition is correct for \"{}\".",
                expected, other_term
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct QuizSummary {
    pub asked: usize,
    pub correct: usize,
}

/// A run of `times` questions that walks the deck in order and wraps around
/// when it runs out of cards.
#[derive(Debug)]
pub(crate) struct Quiz {
    times: usize,
    summary: QuizSummary,
}

impl Quiz {
    pub fn new(times: usize) -> Quiz {
        debug!("[Quiz] Asking {} questions.", times);
        Quiz {
            times,
            summary: QuizSummary::default(),
        }
    }

    /// The next question, or `None` once `times` questions were asked or
    /// the deck is empty.
    pub fn next_question(&self, deck: &Deck) -> Option<Question> {
        if self.summary.asked >= self.times || deck.is_empty() {
            return None;
        }
        let card = deck.get(self.summary.asked % deck.len())?;
        Some(Question {
            number: self.summary.asked + 1,
            term: card.term.clone(),
        })
    }

    /// Judges `answer` against the asked card. A wrong answer always costs
    /// the asked card, even when it names some other card's definition.
    pub fn answer(&mut self, deck: &mut Deck, question: &Question, answer: &str) -> Verdict {
        self.summary.asked += 1;
        let verdict = judge(deck, &question.term, answer);
        if verdict.is_correct() {
            self.summary.correct += 1;
        } else {
            deck.increment_hardness(&question.term);
        }
        debug!("[Quiz] {}/{}: {:?}", question.number, self.times, verdict);
        verdict
    }

    pub fn summary(&self) -> QuizSummary {
        self.summary
    }
}

fn judge(deck: &Deck, term: &str, answer: &str) -> Verdict {
    let expected = match deck.find_by_term(term) {
        Some(card) => card.definition.clone(),
        None => String::new(),
    };
    if answer == expected {
        return Verdict::Correct;
    }
    match deck.find_by_definition(answer) {
        Some(other) => Verdict::WrongButMatches {
            expected,
            other_term: other.term.clone(),
        },
        None => Verdict::Wrong { expected },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liboboeru::deck::Card;

    fn deck() -> Deck {
        let mut deck = Deck::new();
        deck.add(Card::new("cat", "animal")).unwrap();
        deck.add(Card::new("dog", "pet")).unwrap();
        deck
    }

    fn hardness(deck: &Deck, term: &str) -> u32 {
        deck.find_by_term(term).unwrap().hardness
    }

    #[test]
    fn zero_questions_or_empty_deck() {
        let deck = deck();
        assert_eq!(Quiz::new(0).next_question(&deck), None);

        let empty = Deck::new();
        assert_eq!(Quiz::new(3).next_question(&empty), None);
    }

    #[test]
    fn cycles_through_the_deck() {
        let mut deck = deck();
        let mut quiz = Quiz::new(5);
        let mut asked = Vec::new();
        while let Some(question) = quiz.next_question(&deck) {
            asked.push(question.term.clone());
            let def = deck.find_by_term(&question.term).unwrap().definition.clone();
            quiz.answer(&mut deck, &question, &def);
        }

        assert_eq!(asked, vec!["cat", "dog", "cat", "dog", "cat"]);
        assert_eq!(quiz.summary(), QuizSummary { asked: 5, correct: 5 });
        assert_eq!(hardness(&deck, "cat"), 0);
        assert_eq!(hardness(&deck, "dog"), 0);
    }

    #[test]
    fn correct_answer_is_exact_and_case_sensitive() {
        let mut deck = deck();
        let mut quiz = Quiz::new(2);

        let q = quiz.next_question(&deck).unwrap();
        assert_eq!(quiz.answer(&mut deck, &q, "animal"), Verdict::Correct);

        let q = quiz.next_question(&deck).unwrap();
        assert_eq!(
            quiz.answer(&mut deck, &q, "Pet"),
            Verdict::Wrong {
                expected: "pet".to_string()
            }
        );
        assert_eq!(hardness(&deck, "dog"), 1);
    }

    #[test]
    fn answer_of_another_card_blames_the_asked_card() {
        let mut deck = deck();
        let mut quiz = Quiz::new(1);
        let q = quiz.next_question(&deck).unwrap();
        let verdict = quiz.answer(&mut deck, &q, "pet");

        assert_eq!(
            verdict,
            Verdict::WrongButMatches {
                expected: "animal".to_string(),
                other_term: "dog".to_string(),
            }
        );
        assert_eq!(hardness(&deck, "cat"), 1);
        assert_eq!(hardness(&deck, "dog"), 0);
        assert_eq!(
            verdict.to_string(),
            "Wrong. The right answer is \"animal\", but your definition is correct for \"dog\"."
        );
        assert_eq!(quiz.next_question(&deck), None);
    }

    #[test]
    fn wrong_answer_on_imported_max_hardness() {
        let mut deck = Deck::new();
        crate::liboboeru::codec::import_from(&mut deck, std::io::Cursor::new("x:y:4294967295\n"))
            .unwrap();

        let mut quiz = Quiz::new(1);
        let q = quiz.next_question(&deck).unwrap();
        assert!(!quiz.answer(&mut deck, &q, "wrong").is_correct());
        assert_eq!(hardness(&deck, "x"), u32::MAX);
    }

    #[test]
    fn question_prompt() {
        let q = Question {
            number: 1,
            term: "cat".to_string(),
        };
        assert_eq!(q.to_string(), "Print the definition of \"cat\":");
    }
}
