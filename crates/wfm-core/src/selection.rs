//! Ordering of listings and validation of the user's picks.

use thiserror::Error;

use crate::{Job, Task};

/// Lines of a multi-line note are joined with CRLF, as the web UI does.
pub const NOTE_SEPARATOR: &str = "\r\n";

/// A pick that does not name an item in the listing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{input:?} is not a number")]
    NotANumber { input: String },

    #[error("{index} is not between 1 and {len}")]
    OutOfRange { index: i64, len: usize },
}

/// Sorts jobs by client name, then job name (case-sensitive).
pub fn sort_jobs(jobs: &mut [Job]) {
    jobs.sort_by(|a, b| {
        (a.client_name.as_str(), a.name.as_str()).cmp(&(b.client_name.as_str(), b.name.as_str()))
    });
}

pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Converts a 1-based pick into a 0-based index into a list of `len` items.
pub fn pick_index(input: &str, len: usize) -> Result<usize, SelectionError> {
    let input = input.trim();
    let index: i64 = input.parse().map_err(|_| SelectionError::NotANumber {
        input: input.to_string(),
    })?;

    usize::try_from(index)
        .ok()
        .filter(|&index| (1..=len).contains(&index))
        .map(|index| index - 1)
        .ok_or(SelectionError::OutOfRange { index, len })
}

/// Like [`pick_index`], but a blank pick selects the last item (today).
pub fn pick_day(input: &str, len: usize) -> Result<usize, SelectionError> {
    if input.trim().is_empty() && len > 0 {
        return Ok(len - 1);
    }
    pick_index(input, len)
}

/// Joins description lines into a single note.
pub fn join_note<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(NOTE_SEPARATOR)
}

/// What the task picker has to work with for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskChoice {
    /// The job has no tasks; nothing can be logged against it.
    Empty,
    /// Exactly one task, chosen without asking.
    Single(Task),
    /// Several tasks, sorted by name, for the user to pick from.
    Many(Vec<Task>),
}

impl TaskChoice {
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        match tasks.len() {
            0 => Self::Empty,
            1 => Self::Single(tasks.remove(0)),
            _ => {
                sort_tasks(&mut tasks);
                Self::Many(tasks)
            }
        }
    }
}
