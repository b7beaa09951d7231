//! Task-list reader.
//!
//! The input is a policy selector (1-5) followed by whitespace-separated
//! task records of the form `id/arrive_at/duration/priority/quantum`:
//!
//! ```text
//! 3
//! 1/0/7/0/1
//! 2/2/4/0/1
//! ```
//!
//! Ids must be strictly increasing. Records are reordered by arrival time;
//! records arriving at the same instant keep their input order.

use std::io::Read;
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::policy::Policy;
use crate::task::TaskDef;
use crate::types::TaskId;

/// A parsed simulation request.
#[derive(Debug, Clone)]
pub struct Input {
    pub policy: Policy,
    pub catalog: Catalog,
}

/// Errors from reading a task list.
#[derive(Debug)]
pub enum ParseError {
    Io(std::io::Error),
    /// No selector at all.
    Empty,
    /// Selector is not an integer.
    InvalidSelector(String),
    /// Selector is an integer outside 1-5.
    UnsupportedPolicy(i64),
    MalformedRecord {
        line: usize,
        record: String,
        reason: String,
    },
    NonIncreasingId {
        line: usize,
        id: u32,
        previous: u32,
    },
    /// A quantum-sliced policy was given a task with a zero quantum.
    ZeroQuantum { id: TaskId, policy: Policy },
    /// The tasks together need more time than [`crate::Time`] can count.
    TimeOverflow,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Io(e) => write!(f, "failed to read input: {e}"),
            ParseError::Empty => write!(f, "input is empty: expected a policy selector"),
            ParseError::InvalidSelector(token) => {
                write!(f, "invalid policy selector {token:?}: expected an integer")
            }
            ParseError::UnsupportedPolicy(n) => {
                write!(f, "unsupported policy selector {n} (expected 1-5)")
            }
            ParseError::MalformedRecord {
                line,
                record,
                reason,
            } => write!(f, "line {line}: malformed record {record:?}: {reason}"),
            ParseError::NonIncreasingId { line, id, previous } => write!(
                f,
                "line {line}: task id {id} does not increase (previous id {previous})"
            ),
            ParseError::ZeroQuantum { id, policy } => {
                write!(f, "task {id} has a zero quantum, which {policy} cannot schedule")
            }
            ParseError::TimeOverflow => {
                write!(f, "total task work runs past the largest representable time")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e)
    }
}

impl Input {
    /// Replace the policy, re-checking the tasks against it.
    pub fn with_policy(mut self, policy: Policy) -> Result<Input, ParseError> {
        self.policy = policy;
        self.check_quanta()?;
        Ok(self)
    }

    fn check_quanta(&self) -> Result<(), ParseError> {
        if !self.policy.uses_quantum() {
            return Ok(());
        }
        match self.catalog.tasks().iter().find(|t| t.quantum == 0) {
            Some(def) => Err(ParseError::ZeroQuantum {
                id: def.id,
                policy: self.policy,
            }),
            None => Ok(()),
        }
    }
}

/// Read and parse a whole task list.
pub fn read_input<R: Read>(mut reader: R) -> Result<Input, ParseError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_input(&text)
}

/// Parse a task list.
pub fn parse_input(text: &str) -> Result<Input, ParseError> {
    let mut tokens = text
        .lines()
        .enumerate()
        .flat_map(|(idx, line)| line.split_whitespace().map(move |tok| (idx + 1, tok)));

    let (_, selector) = tokens.next().ok_or(ParseError::Empty)?;
    let selector: i64 = selector
        .parse()
        .map_err(|_| ParseError::InvalidSelector(selector.to_string()))?;
    let policy = Policy::from_selector(selector).ok_or(ParseError::UnsupportedPolicy(selector))?;

    let mut tasks: Vec<TaskDef> = Vec::new();
    for (line, record) in tokens {
        let def = parse_record(line, record)?;
        if let Some(prev) = tasks.last() {
            if def.id <= prev.id {
                return Err(ParseError::NonIncreasingId {
                    line,
                    id: def.id.0,
                    previous: prev.id.0,
                });
            }
        }
        tasks.push(def);
    }

    // Stable: equal arrivals keep input order.
    tasks.sort_by_key(|def| def.arrive_at);

    let catalog = Catalog::new(tasks);
    if catalog.horizon().is_none() {
        return Err(ParseError::TimeOverflow);
    }

    let input = Input { policy, catalog };
    input.check_quanta()?;
    Ok(input)
}

fn parse_record(line: usize, record: &str) -> Result<TaskDef, ParseError> {
    let malformed = |reason: String| ParseError::MalformedRecord {
        line,
        record: record.to_string(),
        reason,
    };

    let fields: Vec<&str> = record.split('/').collect();
    let [id, arrive_at, duration, priority, quantum] = fields[..] else {
        return Err(malformed(format!(
            "expected 5 '/'-separated fields, found {}",
            fields.len()
        )));
    };

    let def = TaskDef {
        id: TaskId(parse_field("id", id).map_err(&malformed)?),
        arrive_at: parse_field("arrive_at", arrive_at).map_err(&malformed)?,
        duration: parse_field("duration", duration).map_err(&malformed)?,
        priority: parse_field("priority", priority).map_err(&malformed)?,
        quantum: parse_field("quantum", quantum).map_err(&malformed)?,
    };
    if def.arrive_at.checked_add(def.duration).is_none() {
        return Err(malformed(
            "arrive_at + duration exceeds the largest representable time".to_string(),
        ));
    }
    Ok(def)
}

fn parse_field<T>(name: &str, raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| format!("{name}: {e} (got {raw:?})"))
}
