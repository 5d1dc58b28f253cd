//! The interactive flow: day, job, task, description, duration, submit.
//!
//! Strictly linear. Invalid answers re-prompt in place; there is no way to
//! go back a step.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use owo_colors::Style;

use wfm_api::{Client, Transport};
use wfm_core::dates::{DAY_BUFFER, is_weekday, to_short};
use wfm_core::selection::{join_note, pick_day, pick_index, sort_jobs};
use wfm_core::{
    DaySummary, Job, Task, TaskChoice, TimeEntry, TimesheetSubmission, format_duration,
    parse_duration, summarize_days,
};

use crate::prompt::Prompter;
use crate::theme::Theme;

/// Placeholder for entries logged without a description.
const NO_DESCRIPTION: &str = "[no description]";

/// Flow switches taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Offer the last two weeks instead of logging against today.
    pub pick_day: bool,
}

/// How a run ended without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Submitted(TimesheetSubmission),
    /// The caller is assigned to no current jobs.
    NoJobs,
    /// The chosen job has no tasks to log against.
    NoTasks,
}

impl Outcome {
    /// Process exit status: 0 once something was submitted, otherwise 1.
    pub const fn exit_status(&self) -> u8 {
        match self {
            Self::Submitted(_) => 0,
            Self::NoJobs | Self::NoTasks => 1,
        }
    }
}

/// Runs the whole flow against `client`, submitting at most one entry.
pub fn run<T, R, W>(
    client: &Client<T>,
    prompter: &mut Prompter<R, W>,
    today: NaiveDate,
    options: Options,
) -> Result<Outcome>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let date = if options.pick_day {
        choose_day(client, prompter, today)?
    } else {
        let entries = client
            .list_times_for_date(today)
            .context("failed to list today's times")?;
        show_entries(prompter, today, &entries)?;
        today
    };

    let Some(job) = choose_job(client, prompter)? else {
        writeln!(prompter.output(), "you're not assigned to any current jobs, sorry :<")?;
        return Ok(Outcome::NoJobs);
    };

    let Some(task) = choose_task(client, prompter, &job)? else {
        writeln!(prompter.output(), "there are no tasks on that job, sorry :<")?;
        return Ok(Outcome::NoTasks);
    };

    let note = read_description(prompter)?;
    let minutes = prompter.ask_valid("\nhow long did it take? (1:30 or 90): ", parse_duration)?;

    let submission = TimesheetSubmission {
        job_id: job.id,
        task_id: task.id,
        staff_id: client.my_id().clone(),
        date,
        minutes,
        note,
    };

    writeln!(prompter.output(), "submitting...")?;
    client
        .submit(&submission)
        .context("failed to submit timesheet entry")?;
    writeln!(prompter.output(), "okay, that's submitted")?;

    Ok(Outcome::Submitted(submission))
}

/// Shows the recent calendar and asks which day to log against.
fn choose_day<T, R, W>(
    client: &Client<T>,
    prompter: &mut Prompter<R, W>,
    today: NaiveDate,
) -> Result<NaiveDate>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let from = today - Duration::days(DAY_BUFFER);
    let to = today + Duration::days(1);
    let entries = client
        .list_times_between(from, to)
        .context("failed to list recent times")?;

    let calendar = summarize_days(&entries, today, DAY_BUFFER);
    let listing = render_calendar(prompter.theme(), &calendar);
    write!(prompter.output(), "\n{listing}")?;

    let message = format!("\npick a day (1-{}, today if blank): ", calendar.len());
    let index = prompter.ask_valid(&message, |answer| pick_day(answer, calendar.len()))?;
    let date = calendar[index].date;

    let entries: Vec<TimeEntry> = entries.into_iter().filter(|entry| entry.date == date).collect();
    show_entries(prompter, date, &entries)?;
    Ok(date)
}

fn show_entries<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    date: NaiveDate,
    entries: &[TimeEntry],
) -> Result<()> {
    let listing = render_entries(prompter.theme(), date, entries);
    write!(prompter.output(), "\n{listing}")?;
    Ok(())
}

/// Lists assigned jobs and asks for one; `None` if there are none.
fn choose_job<T, R, W>(client: &Client<T>, prompter: &mut Prompter<R, W>) -> Result<Option<Job>>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let mut jobs = client.list_my_jobs().context("failed to list jobs")?;
    if jobs.is_empty() {
        return Ok(None);
    }
    sort_jobs(&mut jobs);

    let listing = render_jobs(prompter.theme(), &jobs);
    write!(prompter.output(), "\n{listing}")?;

    let message = format!("\npick a job (1-{}): ", jobs.len());
    let index = prompter.ask_valid(&message, |answer| pick_index(answer, jobs.len()))?;
    Ok(Some(jobs.swap_remove(index)))
}

/// Picks a task for `job`, asking only when there is a real choice.
fn choose_task<T, R, W>(
    client: &Client<T>,
    prompter: &mut Prompter<R, W>,
    job: &Job,
) -> Result<Option<Task>>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let tasks = client
        .list_tasks(&job.id)
        .with_context(|| format!("failed to list tasks for job {}", job.id))?;

    match TaskChoice::from_tasks(tasks) {
        TaskChoice::Empty => Ok(None),
        TaskChoice::Single(task) => {
            tracing::debug!(task = %task.name, "only one task, selecting it");
            Ok(Some(task))
        }
        TaskChoice::Many(mut tasks) => {
            let listing = render_tasks(prompter.theme(), &tasks);
            write!(prompter.output(), "\n{listing}")?;

            let message = format!("\npick a task (1-{}): ", tasks.len());
            let index = prompter.ask_valid(&message, |answer| pick_index(answer, tasks.len()))?;
            Ok(Some(tasks.swap_remove(index)))
        }
    }
}

fn read_description<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<String> {
    writeln!(
        prompter.output(),
        "\nwhat were you up to? (end input by hitting return twice):\n"
    )?;
    let lines = prompter.read_until_blank()?;
    Ok(join_note(lines))
}

/// Entries already logged on `date`, with their total.
pub fn render_entries(theme: Theme, date: NaiveDate, entries: &[TimeEntry]) -> String {
    let day = theme.paint(to_short(date), Style::new().yellow());
    if entries.is_empty() {
        return format!("no times entered for {day} yet\n");
    }

    let mut out = format!("times already entered for {day}:\n");
    let mut total: i64 = 0;
    for entry in entries {
        total = total.saturating_add(entry.minutes);
        let note = match entry.note.as_deref() {
            Some(note) => theme.paint(note, Style::new().cyan()),
            None => theme.paint(NO_DESCRIPTION, Style::new().red()),
        };
        let _ = writeln!(out, " {} - {note}", theme.bold(format_duration(entry.minutes)));
    }
    let _ = writeln!(out, " {} total", theme.bold(format_duration(total)));
    out
}

/// One line per day: index, logged time, weekday marker, date.
///
/// Weekdays are bold and marked `-`; empty days are red.
pub fn render_calendar(theme: Theme, calendar: &[DaySummary]) -> String {
    let mut out = String::new();
    for (i, day) in calendar.iter().enumerate() {
        let weekday = is_weekday(day.date);
        let mut time_style = if day.minutes > 0 {
            Style::new().green()
        } else {
            Style::new().red()
        };
        let mut date_style = Style::new().yellow();
        if weekday {
            time_style = time_style.bold();
            date_style = date_style.bold();
        }
        let _ = writeln!(
            out,
            "{}: {} {} {}",
            theme.index(i + 1),
            theme.paint(format_duration(day.minutes), time_style),
            if weekday { '-' } else { ' ' },
            theme.paint(to_short(day.date), date_style),
        );
    }
    out
}

pub fn render_jobs(theme: Theme, jobs: &[Job]) -> String {
    let mut out = String::new();
    for (i, job) in jobs.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}: {} | {}",
            theme.index(i + 1),
            theme.paint(&job.name, Style::new().magenta()),
            theme.paint(&job.client_name, Style::new().blue()),
        );
    }
    out
}

pub fn render_tasks(theme: Theme, tasks: &[Task]) -> String {
    let mut out = String::new();
    for (i, task) in tasks.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}: {}",
            theme.index(i + 1),
            theme.paint(&task.name, Style::new().green()),
        );
    }
    out
}
