pub mod posterior;
pub mod truth;

pub use self::posterior::{load_posteriors, parse_posteriors};
pub use self::truth::{load_all_ground_truth, load_ground_truth, parse_ground_truth};
