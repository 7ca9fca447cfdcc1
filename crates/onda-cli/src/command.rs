//! Line parsing: one input line maps to one closed [`Command`] variant.
//!
//! Parsing is a separate step from execution so "which command is this"
//! never leaks into the handlers. Classification goes by the leading
//! token; numeric arguments follow the lenient convention of the
//! selection and gain inputs, where unparsable text counts as zero
//! rather than an error.

use onda_core::{Bound, BoundOp, BoundUnit};

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `l` — list all waves with index and name.
    List,
    /// `n <name>` — create a wave; an empty name triggers the
    /// interactive name prompt.
    New(String),
    /// `s <index>` — select a wave by index.
    Select(i64),
    /// `i` — describe the active wave.
    Info,
    /// `e <path>` — load a file into a new wave and select it.
    Edit(String),
    /// `w <path>` — write the active wave; empty path means the wave's
    /// own name.
    Write(String),
    /// `p` — play the active wave.
    Play,
    /// `L`/`R` selection bound adjustment.
    Bound {
        /// Which bound the command addresses.
        bound: Bound,
        /// `=`, `+` or `-`.
        op: BoundOp,
        /// Signed amount in frames or seconds.
        amount: i64,
        /// Frames unless the amount carried a trailing `s`.
        unit: BoundUnit,
    },
    /// `:dump` — print every sample with its index.
    Dump,
    /// `:rev` — reverse the active selection range.
    Reverse,
    /// `:vol/<factor>` — scale the active selection range.
    Volume(f32),
    /// `q` — terminate the interpreter.
    Quit,
    /// `#...` — ignored.
    Comment,
    /// Anything unrecognized, echoed back as `?`.
    Unknown,
}

impl Command {
    /// Classify one input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\n', '\r']);
        let mut chars = line.chars();
        match chars.next() {
            Some('#') => Command::Comment,
            Some('l') => Command::List,
            Some('i') => Command::Info,
            Some('p') => Command::Play,
            Some('q') => Command::Quit,
            Some('n') => Command::New(chars.as_str().trim().to_string()),
            Some('e') => Command::Edit(chars.as_str().trim().to_string()),
            Some('w') => Command::Write(chars.as_str().trim().to_string()),
            Some('s') => Command::Select(parse_int(chars.as_str().trim())),
            Some('L') => parse_bound(Bound::Left, chars.as_str()),
            Some('R') => parse_bound(Bound::Right, chars.as_str()),
            Some(':') => parse_colon(chars.as_str()),
            _ => Command::Unknown,
        }
    }
}

fn parse_bound(bound: Bound, rest: &str) -> Command {
    let mut chars = rest.chars();
    let op = match chars.next() {
        Some('=') => BoundOp::Set,
        Some('+') => BoundOp::Add,
        Some('-') => BoundOp::Sub,
        _ => return Command::Unknown,
    };
    let arg = chars.as_str().trim();
    let (digits, unit) = match arg.strip_suffix('s') {
        Some(head) => (head, BoundUnit::Seconds),
        None => (arg, BoundUnit::Frames),
    };
    Command::Bound {
        bound,
        op,
        amount: parse_int(digits),
        unit,
    }
}

fn parse_colon(rest: &str) -> Command {
    let rest = rest.trim();
    if let Some(factor) = rest.strip_prefix("vol/") {
        return Command::Volume(parse_float(factor));
    }
    match rest {
        "dump" => Command::Dump,
        "rev" => Command::Reverse,
        _ => Command::Unknown,
    }
}

/// Lenient integer parse: anything unparsable is zero.
fn parse_int(s: &str) -> i64 {
    s.trim().parse().unwrap_or(0)
}

/// Lenient float parse: anything unparsable is zero.
fn parse_float(s: &str) -> f32 {
    s.trim().parse().unwrap_or(0.0)
}
