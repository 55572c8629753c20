use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Everything shown to or typed by the user during a session, in order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Transcript {
        Transcript { lines: Vec::new() }
    }

    /// Multi-line entries are split so each stored entry is a single line.
    pub fn record(&mut self, entry: &str) {
        if entry.is_empty() {
            self.lines.push(String::new());
            return;
        }
        self.lines.extend(entry.lines().map(String::from));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<usize> {
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(self.lines.len())
    }

    pub fn save(&self, path: &Path) -> io::Result<usize> {
        let file = File::create(path)?;
        let count = self.write_to(BufWriter::new(file))?;
        info!("[Log] Saved {} lines to {:?}", count, path);
        Ok(count)
    }
}
