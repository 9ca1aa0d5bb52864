#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Renders a simulation file in the generator's layout: goal coefficients on
/// line 1, the norm/gasp record on line 4.
pub fn sim_file_text(money: f64, norm: i64, gasp: i64) -> String {
    format!(
        "goal coefficients: [{}, 0.35, -0.2]\n\
         agents: 15\n\
         rounds: 15\n\
         {};0.5;{};0.25\n\
         trailing data\n",
        money, norm, gasp
    )
}

/// One inference record: `abi` header, money lines, `tipping`, norm lines,
/// `gasp`, gasp lines, `undefined`.
pub fn record_text(money: &[(f64, f64)], norm: &[(i64, f64)], gasp: &[(i64, f64)]) -> String {
    let mut out = String::from("abi 0\n");
    for (v, p) in money {
        out.push_str(&format!("([{}, 0.1, 0.2], {})\n", v, p));
    }
    out.push_str("tipping norm\n");
    for (v, p) in norm {
        out.push_str(&format!("({},{})\n", v, p));
    }
    out.push_str("gasp score\n");
    for (v, p) in gasp {
        out.push_str(&format!("({},{})\n", v, p));
    }
    out.push_str("undefined\n");
    out
}

pub const RESULTS_PREAMBLE: &str = "model: tipping\nsamples: 1000\nseed: 15\n";

/// A two-simulation dataset on disk with hand-computed metrics.
///
/// sim 0: truth (2.5, 3, 1), every top prediction hits.
/// sim 1: truth (1.0, 2, 4), only the norm top prediction hits.
pub struct Dataset {
    pub dir: TempDir,
    pub data_dir: PathBuf,
    pub results: PathBuf,
}

impl Dataset {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = dir.path().join("data");
        fs::create_dir_all(&data_dir).unwrap();

        fs::write(data_dir.join("simulation0.txt"), sim_file_text(2.5, 3, 1)).unwrap();
        fs::write(data_dir.join("simulation1.txt"), sim_file_text(1.0, 2, 4)).unwrap();

        let mut results = String::from(RESULTS_PREAMBLE);
        results.push_str(&record_text(
            &[(2.5, 0.5), (3.5, 0.5)],
            &[(3, 0.6), (2, 0.4)],
            &[(1, 1.0)],
        ));
        results.push_str(&record_text(
            &[(0.0, 0.7), (1.0, 0.3)],
            &[(2, 1.0)],
            &[(2, 0.5), (4, 0.5)],
        ));
        let results_path = dir.path().join("results.txt");
        fs::write(&results_path, results).unwrap();

        Self {
            dir,
            data_dir,
            results: results_path,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
