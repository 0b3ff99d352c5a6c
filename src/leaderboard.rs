use crate::LeaderboardError;
use itertools::Itertools;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Entries kept; anyone ranked below this is dropped for good.
pub const CAPACITY: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub seconds: u64,
}

/// Best time per player, fastest first, at most [`CAPACITY`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<Entry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `<name> <seconds>` lines. Lines without both tokens, or with a
    /// time that is not a non-negative number, are skipped.
    pub fn parse(text: &str) -> Self {
        let mut board = Self::new();
        for (line_no, line) in text.lines().enumerate() {
            match parse_line(line) {
                Some((name, seconds)) => board.merge(name, seconds),
                None if line.trim().is_empty() => {}
                None => log::debug!("Skipping malformed leaderboard line {}: {:?}", line_no + 1, line),
            }
        }
        board.normalize();
        board
    }

    /// Records a finishing time, keeping the player's best. Returns the
    /// player's 1-based rank if they are still on the board afterwards.
    pub fn record(&mut self, name: &str, seconds: u64) -> Result<Option<usize>, LeaderboardError> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(LeaderboardError::InvalidName(name.to_string()));
        }
        self.merge(name, seconds);
        self.normalize();
        Ok(self.rank_of(name))
    }

    fn merge(&mut self, name: &str, seconds: u64) {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.seconds = entry.seconds.min(seconds),
            None => self.entries.push(Entry {
                name: name.to_string(),
                seconds,
            }),
        }
    }

    /// Stable sort, so an existing entry keeps its place over a newcomer with
    /// the same time.
    fn normalize(&mut self) {
        self.entries.sort_by_key(|entry| entry.seconds);
        self.entries.truncate(CAPACITY);
    }

    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name == name)
            .map(|index| index + 1)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The persisted form: one `<name> <seconds>` line per entry.
    pub fn to_file_string(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{} {}\n", entry.name, entry.seconds))
            .collect()
    }

    /// Ranked lines for display, e.g. `1. Alice - 42s`.
    pub fn display_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| format!("{}. {} - {}s", index + 1, entry.name, entry.seconds))
    }

    pub fn render(&self) -> String {
        self.display_lines().join("\n")
    }
}

fn parse_line(line: &str) -> Option<(&str, u64)> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    let time = tokens.next()?;
    let seconds = match time.parse::<u64>() {
        Ok(seconds) => seconds,
        Err(_) => {
            let seconds: f64 = time.parse().ok()?;
            if !seconds.is_finite() || seconds < 0.0 {
                return None;
            }
            seconds.trunc() as u64
        }
    };
    Some((name, seconds))
}

/// A [`Leaderboard`] backed by a text file that is rewritten in full on
/// every change.
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
    board: Leaderboard,
}

impl LeaderboardStore {
    /// Loads the file at `path`. A missing or unreadable file gives an empty
    /// board; the file is created on the next successful write.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let board = match fs::read_to_string(&path) {
            Ok(text) => Leaderboard::parse(&text),
            Err(e) => {
                log::info!(
                    "No leaderboard loaded from {} ({}), starting empty",
                    path.display(),
                    e
                );
                Leaderboard::new()
            }
        };
        Self { path, board }
    }

    /// Records the time and rewrites the file. If the write fails the new
    /// result is still kept in memory for this session.
    pub fn record(&mut self, name: &str, seconds: u64) -> Result<Option<usize>, LeaderboardError> {
        let rank = self.board.record(name, seconds)?;
        self.persist()?;
        Ok(rank)
    }

    pub fn persist(&self) -> Result<(), LeaderboardError> {
        write_table(&self.path, &self.board.to_file_string()).map_err(|source| {
            log::warn!(
                "Unable to write leaderboard {}: {}",
                self.path.display(),
                source
            );
            LeaderboardError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }

    pub fn query(&self) -> &[Entry] {
        self.board.entries()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.board
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The writer is flushed explicitly so that errors surface here instead of
/// being swallowed on drop. The file handle is closed on every path.
fn write_table(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(board: &Leaderboard) -> Vec<(&str, u64)> {
        board
            .entries()
            .iter()
            .map(|e| (e.name.as_str(), e.seconds))
            .collect()
    }

    #[test]
    fn test_record_keeps_best_time() {
        let mut board = Leaderboard::new();
        board.record("Alice", 50).unwrap();
        board.record("Alice", 40).unwrap();
        board.record("Alice", 45).unwrap();

        assert_eq!(names(&board), vec![("Alice", 40)]);
    }

    #[test]
    fn test_record_truncates_to_capacity() {
        let mut board = Leaderboard::new();
        for (name, seconds) in [("A", 60), ("B", 20), ("C", 50), ("D", 10), ("E", 40), ("F", 30)] {
            board.record(name, seconds).unwrap();
        }

        assert_eq!(
            names(&board),
            vec![("D", 10), ("B", 20), ("F", 30), ("E", 40), ("C", 50)]
        );
        assert_eq!(board.rank_of("A"), None);
    }

    #[test]
    fn test_bumped_player_is_forgotten() {
        let mut board = Leaderboard::new();
        for (name, seconds) in [("A", 1), ("B", 2), ("C", 3), ("D", 4), ("E", 99)] {
            board.record(name, seconds).unwrap();
        }
        assert_eq!(board.record("F", 5).unwrap(), Some(5));
        assert_eq!(board.rank_of("E"), None);

        // E's old record is gone and a slower time does not bring it back
        assert_eq!(board.record("E", 100).unwrap(), None);
    }

    #[test]
    fn test_ties_keep_existing_rank() {
        let mut board = Leaderboard::new();
        board.record("First", 30).unwrap();
        assert_eq!(board.record("Second", 30).unwrap(), Some(2));
        assert_eq!(board.rank_of("First"), Some(1));
    }

    #[test]
    fn test_record_rejects_unstorable_names() {
        let mut board = Leaderboard::new();
        assert!(matches!(
            board.record("two words", 1),
            Err(LeaderboardError::InvalidName(_))
        ));
        assert!(board.record("", 1).is_err());
        assert!(board.is_empty());
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let text = "Bob 30\n\ngarbage\nCarol abc\nDan -4\nAmy 12.7\nBob 25\n";
        let board = Leaderboard::parse(text);

        assert_eq!(names(&board), vec![("Amy", 12), ("Bob", 25)]);
    }

    #[test]
    fn test_parse_sorts_and_truncates() {
        let text = "a 7\nb 6\nc 5\nd 4\ne 3\nf 2\ng 1\n";
        let board = Leaderboard::parse(text);
        assert_eq!(board.entries().len(), CAPACITY);
        assert_eq!(board.entries()[0].name, "g");
        assert_eq!(board.entries()[4].name, "c");
    }

    #[test]
    fn test_file_string_and_display() {
        let mut board = Leaderboard::new();
        board.record("Bob", 90).unwrap();
        board.record("Amy", 42).unwrap();

        assert_eq!(board.to_file_string(), "Amy 42\nBob 90\n");
        assert_eq!(board.render(), "1. Amy - 42s\n2. Bob - 90s");
    }
}
