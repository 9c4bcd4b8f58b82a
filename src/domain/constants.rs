/// Number of days kept in each ward's rolling window.
pub const WINDOW_LEN: usize = 5;

/// Window written for a ward that has no persisted history yet.
pub const DEFAULT_SEED: [f64; WINDOW_LEN] = [150.0, 155.0, 160.0, 165.0, 170.0];

/// Column header of the history file, oldest day first.
pub const HISTORY_HEADER: [&str; WINDOW_LEN + 1] =
    ["ward_no", "day1", "day2", "day3", "day4", "day5"];

pub const DEFAULT_ENDPOINT: &str = "https://api.waqi.info/feed/delhi/";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_WARDS_FILE: &str = "wards.csv";
pub const DEFAULT_HISTORY_FILE: &str = "aqi_history.csv";
pub const DEFAULT_REFRESH_SECS: u64 = 15;
pub const DEFAULT_TOP: usize = 10;

pub const TOKEN_ENV: &str = "WARD_AQI_TOKEN";
pub const LOG_ENV: &str = "WARD_AQI_LOG";
