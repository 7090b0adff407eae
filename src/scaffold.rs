//! Support for the `new-day` program, which lays out the files for a
//! new puzzle.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Error;
use crate::input::day_file;

const TEMPLATE: &str = include_str!("../templates/day.rs.tmpl");

pub const DAYS: std::ops::RangeInclusive<u32> = 1..=25;

/// Files touched by [`scaffold`].
#[derive(Debug, PartialEq, Eq)]
pub struct Scaffolded {
    pub source: PathBuf,
    pub input: PathBuf,
}

pub fn render_template(day: u32) -> String {
    TEMPLATE
        .replace("{{DAY2}}", &format!("{:02}", day))
        .replace("{{DAY}}", &day.to_string())
}

fn scaffold_error(path: &Path) -> impl Fn(io::Error) -> Error + '_ {
    move |source| Error::Scaffold {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `text` to the freshly created `path`, removing it again if the
/// write fails so that a retry isn't refused.
fn fill_new_file<W: Write>(path: &Path, mut f: W, text: &str) -> Result<(), Error> {
    if let Err(e) = f.write_all(text.as_bytes()).and_then(|()| f.flush()) {
        drop(f);
        if let Err(cleanup) = fs::remove_file(path) {
            warn!("failed to remove {}: {}", path.display(), cleanup);
        }
        return Err(scaffold_error(path)(e));
    }
    Ok(())
}

/// Write `bin_dir/dayNN.rs` from the template and make sure an (empty)
/// `input_dir/dayN.txt` exists.  An existing source file is never
/// overwritten; an existing input file is left as it is.
pub fn scaffold(day: u32, bin_dir: &Path, input_dir: &Path) -> Result<Scaffolded, Error> {
    if !DAYS.contains(&day) {
        return Err(Error::bad_input(format!(
            "day must be between {} and {}, not {}",
            DAYS.start(),
            DAYS.end(),
            day
        )));
    }
    fs::create_dir_all(bin_dir).map_err(scaffold_error(bin_dir))?;
    fs::create_dir_all(input_dir).map_err(scaffold_error(input_dir))?;

    let source = bin_dir.join(format!("day{:02}.rs", day));
    let f = match OpenOptions::new().write(true).create_new(true).open(&source) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(Error::AlreadyExists(source));
        }
        Err(e) => {
            return Err(scaffold_error(&source)(e));
        }
    };
    fill_new_file(&source, f, &render_template(day))?;
    info!("wrote {}", source.display());

    let input = input_dir.join(day_file(day));
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(&input)
        .map_err(scaffold_error(&input))?;
    info!("input goes in {}", input.display());

    Ok(Scaffolded { source, input })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template() {
        let text = render_template(7);
        assert!(text.contains("day_file(7)"));
        assert!(text.contains("Day 07:"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn test_scaffold_creates_files() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let bin_dir = dir.path().join("src/bin");
        let input_dir = dir.path().join("input");
        let made = scaffold(9, &bin_dir, &input_dir).expect("scaffold should succeed");
        assert_eq!(made.source, bin_dir.join("day09.rs"));
        assert_eq!(made.input, input_dir.join("day9.txt"));
        let source = fs::read_to_string(&made.source).expect("source written");
        assert_eq!(source, render_template(9));
        assert_eq!(fs::metadata(&made.input).expect("input created").len(), 0);
    }

    #[test]
    fn test_scaffold_keeps_existing_input() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let input_dir = dir.path().join("input");
        fs::create_dir_all(&input_dir).expect("mkdir");
        fs::write(input_dir.join("day3.txt"), "00100\n").expect("write input");
        scaffold(3, &dir.path().join("bin"), &input_dir).expect("scaffold should succeed");
        assert_eq!(
            fs::read_to_string(input_dir.join("day3.txt")).expect("readable"),
            "00100\n"
        );
    }

    #[test]
    fn test_scaffold_refuses_to_overwrite() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let bin_dir = dir.path().join("bin");
        let input_dir = dir.path().join("input");
        scaffold(4, &bin_dir, &input_dir).expect("first scaffold should succeed");
        assert!(matches!(
            scaffold(4, &bin_dir, &input_dir),
            Err(Error::AlreadyExists(_))
        ));
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_removes_source() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let source = dir.path().join("day05.rs");
        fs::write(&source, "").expect("create source");
        assert!(matches!(
            fill_new_file(&source, FullDisk, &render_template(5)),
            Err(Error::Scaffold { .. })
        ));
        assert!(!source.exists());
        let bin_dir = dir.path().to_path_buf();
        let input_dir = dir.path().join("input");
        scaffold(5, &bin_dir, &input_dir).expect("retry should succeed");
    }

    #[test]
    fn test_scaffold_rejects_bad_day() {
        let dir = tempfile::tempdir().expect("temporary directory");
        assert!(scaffold(0, dir.path(), dir.path()).is_err());
        assert!(scaffold(26, dir.path(), dir.path()).is_err());
    }
}
