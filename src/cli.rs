use crate::liboboeru::codec;
use crate::liboboeru::deck::{Card, Deck, DeckError};
use crate::liboboeru::kiroku::Transcript;
use crate::liboboeru::shitsumon::Quiz;
use crate::liboboeru::stats::HardestReport;
use crate::Error;
use colored::{Color, Colorize};
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub(crate) const MENU: &str =
    "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):";
const IMPORT_FLAG: &str = "--import_from=";
const EXPORT_FLAG: &str = "--export_to=";

/// Where the session gets its answers from, one line per call.
pub(crate) trait LineSource {
    fn read_line(&mut self) -> Result<String, Error>;
}

/// Line reader over stdin, or any other buffered reader.
pub(crate) struct Keyboard<R: BufRead> {
    reader: R,
}

impl<R: BufRead> Keyboard<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for Keyboard<R> {
    fn read_line(&mut self) -> Result<String, Error> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Err(Error::Input("end of input".to_string())),
            Ok(_) => {
                let trimmed = line.strip_suffix('\n').unwrap_or(&line);
                Ok(trimmed.strip_suffix('\r').unwrap_or(trimmed).to_string())
            }
            Err(err) => Err(Error::Input(err.to_string())),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Action {
    Add,
    Remove,
    Import,
    Export,
    Ask,
    Exit,
    Log,
    HardestCard,
    ResetStats,
    ImportFrom(PathBuf),
    ExportTo(PathBuf),
    Unknown,
}

impl Action {
    fn from_str(input: &str) -> Action {
        match input {
            "add" => Action::Add,
            "remove" => Action::Remove,
            "import" => Action::Import,
            "export" => Action::Export,
            "ask" => Action::Ask,
            "exit" => Action::Exit,
            "log" => Action::Log,
            "hardest card" => Action::HardestCard,
            "reset stats" => Action::ResetStats,
            input => {
                if let Some(path) = input.strip_prefix(IMPORT_FLAG) {
                    Action::ImportFrom(PathBuf::from(path))
                } else if let Some(path) = input.strip_prefix(EXPORT_FLAG) {
                    Action::ExportTo(PathBuf::from(path))
                } else {
                    Action::Unknown
                }
            }
        }
    }
}

enum Field {
    Term,
    Definition,
}

pub(crate) struct Session<I: LineSource, W: Write> {
    deck: Deck,
    transcript: Transcript,
    input: I,
    out: W,
    export_to: Option<PathBuf>,
    retry_limit: usize,
}

impl<I: LineSource, W: Write> Session<I, W> {
    pub fn new(input: I, out: W, retry_limit: usize) -> Self {
        Self {
            deck: Deck::new(),
            transcript: Transcript::new(),
            input,
            out,
            export_to: None,
            retry_limit,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Deck file written when the session ends with `exit`.
    pub fn set_export_target(&mut self, path: PathBuf) {
        debug!("[Session] Will export to {:?} on exit", path);
        self.export_to = Some(path);
    }

    /// Reads commands until `exit`. Only input or output failures end it early.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            self.say(MENU, Color::Cyan)?;
            let line = self.listen()?;
            let action = Action::from_str(&line);
            debug!("[Session] action: {:?}", action);
            match action {
                Action::Add => self.add_card()?,
                Action::Remove => self.remove_card()?,
                Action::Import => self.import_deck(None)?,
                Action::Export => self.export_deck(None)?,
                Action::Ask => self.ask()?,
                Action::Log => self.save_log()?,
                Action::HardestCard => {
                    let report = HardestReport::of(&self.deck);
                    self.say(&report.to_string(), Color::Magenta)?;
                }
                Action::ResetStats => {
                    self.deck.reset_all_hardness();
                    self.say("Card statistics have been reset.", Color::Green)?;
                }
                Action::ImportFrom(path) => self.import_deck(Some(path))?,
                Action::ExportTo(path) => self.set_export_target(path),
                Action::Exit => return self.exit(),
                Action::Unknown => {}
            }
        }
    }

    fn exit(&mut self) -> Result<(), Error> {
        match self.export_to.clone() {
            Some(path) => self.export_deck(Some(path))?,
            None => self.say("Bye bye!", Color::Cyan)?,
        }
        info!("[Session] Exiting with {} cards", self.deck.len());
        Ok(())
    }

    fn say(&mut self, text: &str, color: Color) -> Result<(), Error> {
        self.transcript.record(text);
        writeln!(self.out, "{}", text.color(color))?;
        self.out.flush()?;
        Ok(())
    }

    fn listen(&mut self) -> Result<String, Error> {
        let line = self.input.read_line()?;
        self.transcript.record(&line);
        Ok(line)
    }

    fn prompt(&mut self, text: &str) -> Result<String, Error> {
        self.say(text, Color::Cyan)?;
        self.listen()
    }

    /// Keeps asking until the value is not taken by another card, at most
    /// `retry_limit` times after the first try.
    fn read_unique(&mut self, prompt: &str, field: Field) -> Result<Option<String>, Error> {
        self.say(prompt, Color::Cyan)?;
        let mut attempt = 0;
        loop {
            let value = self.listen()?;
            let err = match field {
                Field::Term if self.deck.term_exists(&value) => DeckError::DuplicateTerm(value),
                Field::Definition if self.deck.definition_exists(&value) => {
                    DeckError::DuplicateDefinition(value)
                }
                _ => return Ok(Some(value)),
            };
            if attempt == self.retry_limit {
                warn!("[Session] Giving up after {} retries: {}", attempt, err);
                self.say("Too many attempts. The card has not been added.", Color::Red)?;
                return Ok(None);
            }
            attempt += 1;
            self.say(&format!("{} Try again:", err), Color::Yellow)?;
        }
    }

    fn add_card(&mut self) -> Result<(), Error> {
        let Some(term) = self.read_unique("The card:", Field::Term)? else {
            return Ok(());
        };
        let Some(definition) = self.read_unique("The definition of the card:", Field::Definition)?
        else {
            return Ok(());
        };
        let message = format!("The pair (\"{}\":\"{}\") has been added.", term, definition);
        match self.deck.add(Card::new(term, definition)) {
            Ok(_) => self.say(&message, Color::Green),
            Err(err) => self.say(&err.to_string(), Color::Red),
        }
    }

    fn remove_card(&mut self) -> Result<(), Error> {
        let term = self.prompt("Which card?")?;
        match self.deck.remove(&term) {
            Ok(_) => self.say("The card has been removed.", Color::Green),
            Err(err) => self.say(&err.to_string(), Color::Red),
        }
    }

    pub fn import_deck(&mut self, path: Option<PathBuf>) -> Result<(), Error> {
        let path = match path {
            Some(path) => path,
            None => PathBuf::from(self.prompt("File name:")?),
        };
        match codec::import_file(&mut self.deck, &path) {
            Ok(summary) => self.say(
                &format!("{} cards have been loaded.", summary.processed()),
                Color::Green,
            ),
            Err(err) if err.is_not_found() => {
                warn!("[Import] {:?} does not exist", path);
                self.say("File not found.", Color::Red)
            }
            Err(err) => {
                warn!("[Import] Rejected {:?}: {}", path, err);
                self.say(&err.to_string(), Color::Red)
            }
        }
    }

    /// A failed write is reported, but the deck size is still announced as saved.
    fn export_deck(&mut self, path: Option<PathBuf>) -> Result<(), Error> {
        let path = match path {
            Some(path) => path,
            None => PathBuf::from(self.prompt("File name:")?),
        };
        if let Err(err) = codec::export_file(&self.deck, &path) {
            warn!("[Export] Writing {:?} failed: {}", path, err);
            self.say(&err.to_string(), Color::Red)?;
        }
        let count = self.deck.len();
        self.say(&format!("{} cards have been saved.", count), Color::Green)
    }

    fn ask(&mut self) -> Result<(), Error> {
        let input = self.prompt("How many times to ask?")?;
        let times = match input.trim().parse::<i64>() {
            Ok(times) => usize::try_from(times).unwrap_or(0),
            Err(_) => return self.say(&format!("\"{}\" is not a number.", input), Color::Red),
        };

        let mut quiz = Quiz::new(times);
        while let Some(question) = quiz.next_question(&self.deck) {
            self.say(&question.to_string(), Color::White)?;
            let answer = self.listen()?;
            let verdict = quiz.answer(&mut self.deck, &question, &answer);
            let color = if verdict.is_correct() {
                Color::BrightGreen
            } else {
                Color::BrightRed
            };
            self.say(&verdict.to_string(), color)?;
        }
        debug!("[Quiz] Finished: {:?}", quiz.summary());
        Ok(())
    }

    fn save_log(&mut self) -> Result<(), Error> {
        let path = PathBuf::from(self.prompt("File name:")?);
        match self.transcript.save(&path) {
            Ok(_) => self.say("The log has been saved.", Color::Green),
            Err(err) => {
                warn!("[Log] Writing {:?} failed: {}", path, err);
                self.say(&err.to_string(), Color::Red)
            }
        }
    }
}
