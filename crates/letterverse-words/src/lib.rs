//! Letter tiles that spell a known word turn into its reward.
#![forbid(unsafe_code)]

pub mod scanner;
pub mod table;

pub use scanner::{LetterRun, WordMatch, WordScanner, on_letter_placed, scan_run};
pub use table::{RewardTable, WordsConfig};
