use crate::error::{PmseError, PmseResult};
use crate::types::{Candidate, Posterior, Variable};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Header lines that partition a record in the inference output.
///
/// A record opens with `abi`, then lists money candidates until `tipping`,
/// norm candidates until `gasp`, and gasp candidates until `undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    Abi,
    Tipping,
    Gasp,
    Undefined,
}

impl Sentinel {
    const ALL: [Sentinel; 4] = [
        Sentinel::Abi,
        Sentinel::Tipping,
        Sentinel::Gasp,
        Sentinel::Undefined,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Sentinel::Abi => "abi",
            Sentinel::Tipping => "tipping",
            Sentinel::Gasp => "gasp",
            Sentinel::Undefined => "undefined",
        }
    }

    fn classify(line: &str) -> Option<Sentinel> {
        Self::ALL.into_iter().find(|s| line.starts_with(s.token()))
    }

    /// The header that terminates the candidate block of `variable`.
    fn closing(variable: Variable) -> Sentinel {
        match variable {
            Variable::Money => Sentinel::Tipping,
            Variable::Norm => Sentinel::Gasp,
            Variable::Gasp => Sentinel::Undefined,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Blank,
    Header(Sentinel),
    Data(&'a str),
}

impl<'a> Token<'a> {
    fn lex(line: &'a str) -> Self {
        if line.trim().is_empty() {
            Token::Blank
        } else if let Some(s) = Sentinel::classify(line) {
            Token::Header(s)
        } else {
            Token::Data(line)
        }
    }
}

#[derive(Debug)]
enum State {
    Seeking,
    Block(Variable, Posterior),
}

/// Parses a money candidate line, e.g. `([2.5, 0.1, 0.3], 0.42)`.
///
/// The value runs from after the opening brackets to the first comma; the
/// probability from the last comma to the next `)`.
pub fn parse_money_line(line: &str) -> Result<Candidate, String> {
    let body = line.trim_start().trim_start_matches(['(', '[']);
    let first_comma = body
        .find(',')
        .ok_or_else(|| format!("no ',' in money line {:?}", line))?;
    let raw_value = body[..first_comma].trim();
    let value = raw_value
        .parse::<f64>()
        .map_err(|e| format!("money value {:?}: {}", raw_value, e))?;

    let last_comma = line.rfind(',').unwrap_or(0);
    let tail = &line[last_comma + 1..];
    let close = tail
        .find(')')
        .ok_or_else(|| format!("no ')' after last ',' in {:?}", line))?;
    let raw_prob = tail[..close].trim();
    let probability = raw_prob
        .parse::<f64>()
        .map_err(|e| format!("money probability {:?}: {}", raw_prob, e))?;

    Ok(Candidate { value, probability })
}

/// Parses a `(label,prob)` line as used by the norm and gasp blocks.
pub fn parse_label_line(line: &str) -> Result<Candidate, String> {
    let inner = line
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| format!("expected '(label,prob)', got {:?}", line))?;

    let mut parts = inner.split(',');
    let (Some(raw_label), Some(raw_prob)) = (parts.next(), parts.next()) else {
        return Err(format!("expected two fields in {:?}", line));
    };

    let label = raw_label
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("label {:?}: {}", raw_label.trim(), e))?;
    let probability = raw_prob
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("probability {:?}: {}", raw_prob.trim(), e))?;

    Ok(Candidate {
        value: label as f64,
        probability,
    })
}

fn parse_candidate(variable: Variable, line: &str) -> Result<Candidate, String> {
    match variable {
        Variable::Money => parse_money_line(line),
        Variable::Norm | Variable::Gasp => parse_label_line(line),
    }
}

fn next_variable(variable: Variable) -> Option<Variable> {
    match variable {
        Variable::Money => Some(Variable::Norm),
        Variable::Norm => Some(Variable::Gasp),
        Variable::Gasp => None,
    }
}

/// Splits the inference output into one [`Posterior`] per simulation.
///
/// The first `header_lines` lines are skipped. Blank lines are skipped
/// anywhere, and text between records or after the last `undefined` is
/// ignored rather than rejected. A sentinel out of order, an empty block, a
/// malformed candidate or a record left open at end of input is an error.
pub fn parse_posteriors(text: &str, header_lines: usize) -> PmseResult<Vec<Posterior>> {
    let mut records = Vec::new();
    let mut state = State::Seeking;
    let mut last_line = header_lines;

    for (idx, line) in text.lines().enumerate().skip(header_lines) {
        let line_no = idx + 1;
        last_line = line_no;

        state = match (state, Token::lex(line)) {
            (state, Token::Blank) => state,

            (State::Seeking, Token::Header(Sentinel::Abi)) => {
                trace!("record {} opens at line {}", records.len(), line_no);
                State::Block(Variable::Money, Posterior::default())
            }
            (State::Seeking, _) => State::Seeking,

            (State::Block(variable, mut post), Token::Data(data)) => {
                let candidate = parse_candidate(variable, data)
                    .map_err(|reason| PmseError::posterior(line_no, reason))?;
                post.candidates_mut(variable).push(candidate);
                State::Block(variable, post)
            }

            (State::Block(variable, post), Token::Header(found)) => {
                let expected = Sentinel::closing(variable);
                if found != expected {
                    return Err(PmseError::posterior(
                        line_no,
                        format!(
                            "found '{}' while reading {} candidates, expected '{}'",
                            found.token(),
                            variable,
                            expected.token()
                        ),
                    ));
                }
                if post.candidates(variable).is_empty() {
                    return Err(PmseError::posterior(
                        line_no,
                        format!("record {} has no {} candidates", records.len(), variable),
                    ));
                }

                match next_variable(variable) {
                    Some(next) => State::Block(next, post),
                    None => {
                        records.push(post);
                        State::Seeking
                    }
                }
            }
        };
    }

    if let State::Block(variable, _) = state {
        return Err(PmseError::posterior(
            last_line,
            format!(
                "input ended inside record {} while reading {} candidates (missing '{}')",
                records.len(),
                variable,
                Sentinel::closing(variable).token()
            ),
        ));
    }

    Ok(records)
}

pub fn load_posteriors<P: AsRef<Path>>(path: P, header_lines: usize) -> PmseResult<Vec<Posterior>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| PmseError::io(path, e))?;
    let records = parse_posteriors(&text, header_lines)?;
    debug!(
        "Parsed {} posterior records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}
