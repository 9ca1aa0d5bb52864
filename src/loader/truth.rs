use crate::config::EvalConfig;
use crate::error::{PmseError, PmseResult};
use crate::types::GroundTruth;
use std::fs;
use std::path::Path;
use tracing::debug;

const COEFF_LINE: usize = 0;
const LABEL_LINE: usize = 3;
const NORM_FIELD: usize = 0;
const GASP_FIELD: usize = 2;

/// Parses a simulation file.
///
/// Line 1 carries the goal coefficients as a bracketed list; the money
/// coefficient is its first element. Line 4 is a `;`-separated record whose
/// first field is the tipping norm and third field the gasp score.
pub fn parse_ground_truth(text: &str, origin: &Path) -> PmseResult<GroundTruth> {
    let fail = |reason: String| PmseError::GroundTruth {
        path: origin.to_path_buf(),
        reason,
    };

    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= LABEL_LINE {
        return Err(fail(format!(
            "expected at least {} lines, found {}",
            LABEL_LINE + 1,
            lines.len()
        )));
    }

    let money_coefficient = parse_money_coefficient(lines[COEFF_LINE]).map_err(fail)?;

    let fields: Vec<&str> = lines[LABEL_LINE].split(';').collect();
    let tipping_norm = parse_int_field(&fields, NORM_FIELD).map_err(fail)?;
    let gasp_score = parse_int_field(&fields, GASP_FIELD).map_err(fail)?;

    Ok(GroundTruth {
        money_coefficient,
        tipping_norm,
        gasp_score,
    })
}

fn parse_money_coefficient(line: &str) -> Result<f64, String> {
    let open = line
        .find('[')
        .ok_or_else(|| format!("line 1 has no '[': {:?}", line))?;
    let comma = line
        .find(',')
        .ok_or_else(|| format!("line 1 has no ',': {:?}", line))?;
    if comma <= open {
        return Err(format!("line 1 has ',' before '[': {:?}", line));
    }

    let raw = line[open + 1..comma].trim();
    raw.parse::<f64>()
        .map_err(|e| format!("money coefficient {:?} is not a number: {}", raw, e))
}

fn parse_int_field(fields: &[&str], idx: usize) -> Result<i64, String> {
    let raw = fields
        .get(idx)
        .ok_or_else(|| format!("line 4 has {} fields, needed field {}", fields.len(), idx + 1))?
        .trim();
    raw.parse::<i64>()
        .map_err(|e| format!("line 4 field {} {:?} is not an integer: {}", idx + 1, raw, e))
}

pub fn load_ground_truth<P: AsRef<Path>>(path: P) -> PmseResult<GroundTruth> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| PmseError::io(path, e))?;
    parse_ground_truth(&text, path)
}

pub fn load_all_ground_truth(config: &EvalConfig) -> PmseResult<Vec<GroundTruth>> {
    let truths = config
        .simulation_paths()
        .iter()
        .map(load_ground_truth)
        .collect::<PmseResult<Vec<_>>>()?;

    debug!(
        "Loaded {} ground-truth records from {}",
        truths.len(),
        config.data_dir.display()
    );
    Ok(truths)
}
