use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use chrono::Local;

/// Logging sink recording the traversal of one crawl run.
///
/// The driver takes any implementation by reference; [`Silent`] is the valid
/// zero-cost configuration for runs that keep no journal.
pub trait Journal {
    fn info(&self, msg: &str);
    fn error(&self, msg: &str);
    fn debug(&self, msg: &str);
}

/// No-op sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Journal for Silent {
    fn info(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
    fn debug(&self, _msg: &str) {}
}

/// Appends leveled, timestamped entries to a `<start time>_journal.log` file
/// created when the run starts.
#[derive(Debug)]
pub struct FileJournal {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileJournal {
    pub fn create_in(dir: &Path) -> Result<Self> {
        let name = format!("{}_journal.log", Local::now().format("%Y-%m-%dT%H-%M-%S"));
        let path = dir.join(name);
        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, level: &str, msg: &str) {
        if let Ok(mut w) = self.writer.lock() {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f");
            writeln!(w, "[{ts}] {level} {msg}").and_then(|()| w.flush()).ok();
        }
    }
}

impl Journal for FileJournal {
    fn info(&self, msg: &str) {
        self.write("INFO", msg);
    }

    fn error(&self, msg: &str) {
        self.write("ERROR", msg);
    }

    fn debug(&self, msg: &str) {
        self.write("DEBUG", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::{FileJournal, Journal};

    #[test]
    fn writes_leveled_timestamped_entries() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FileJournal::create_in(dir.path()).unwrap();
        journal.info("tries page http://a.fr");
        journal.error("http://a.fr/b: connection refused");
        journal.debug("regurgited link mailto:a@a.fr");

        let logged = std::fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<&str> = logged.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].contains("INFO tries page http://a.fr"));
        assert!(lines[1].contains("ERROR http://a.fr/b: connection refused"));
        assert!(lines[2].contains("DEBUG regurgited link mailto:a@a.fr"));
    }

    #[test]
    fn file_name_carries_the_journal_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FileJournal::create_in(dir.path()).unwrap();
        let name = journal.path().file_name().unwrap().to_string_lossy();
        assert!(name.ends_with("_journal.log"));
    }
}
