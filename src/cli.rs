use std::io;
use std::path::PathBuf;

pub mod tag_files;

pub fn read_files_from_stdin() -> Vec<PathBuf> {
    let mut lines = vec![];
    for line in io::stdin().lines().map_while(Result::ok) {
        if !line.trim().is_empty() {
            lines.push(PathBuf::from(line));
        }
    }
    lines
}
