// src/config/consts.rs

// Net config
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124 Safari/537.36";
pub const TIMEOUT_SECS: u64 = 15;

// Requests
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 50;

// Extraction
pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 90;
pub const MAIN_COUNT: usize = 6;
/// Characters past a date anchor an archive window may span when no later
/// anchor bounds it.
pub const WINDOW_BUDGET: usize = 600;
/// Context kept per trace entry.
pub const TRACE_CONTEXT: usize = 240;

// Default mirrors, highest priority first.
pub const SUPERENALOTTO_NET: &str = "https://www.superenalotto.net/en/results";
pub const SUPERENALOTTO_COM: &str = "https://www.superenalotto.com/en/results";
pub const LOTTERY_GURU: &str = "https://lotteryguru.com/italy-lottery-results/it-superenalotto/it-superenalotto-results-history";
pub const LOTTO_NET: &str = "https://www.lottery.net/italy-superenalotto/numbers";
