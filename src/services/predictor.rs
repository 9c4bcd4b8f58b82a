use crate::domain::constants::WINDOW_LEN;
use crate::domain::models::HistoryRecord;

/// Days averaged by the forecast, counted back from the newest slot.
const RECENT_DAYS: usize = 3;

/// Next-day forecast: truncated mean of the three most recent days.
pub fn predict(record: &HistoryRecord) -> i64 {
    let recent = &record.slots[WINDOW_LEN - RECENT_DAYS..];
    let mean = recent.iter().sum::<f64>() / RECENT_DAYS as f64;
    mean.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::predict;
    use crate::domain::constants::DEFAULT_SEED;
    use crate::domain::models::HistoryRecord;

    #[test]
    fn averages_days_three_to_five() {
        let rec = HistoryRecord::new(1, [155.0, 160.0, 165.0, 170.0, 200.0]);
        assert_eq!(predict(&rec), 178);
    }

    #[test]
    fn ignores_the_two_oldest_days() {
        let a = HistoryRecord::new(1, [0.0, 0.0, 90.0, 90.0, 90.0]);
        let b = HistoryRecord::new(1, [500.0, 500.0, 90.0, 90.0, 90.0]);
        assert_eq!(predict(&a), 90);
        assert_eq!(predict(&b), 90);
    }

    #[test]
    fn seed_window_predicts_165() {
        assert_eq!(predict(&HistoryRecord::new(7, DEFAULT_SEED)), 165);
    }

    #[test]
    fn truncates_instead_of_rounding() {
        let rec = HistoryRecord::new(1, [0.0, 0.0, 100.0, 100.0, 101.0]);
        assert_eq!(predict(&rec), 100);
        let rec = HistoryRecord::new(1, [0.0, 0.0, 100.0, 101.0, 101.0]);
        assert_eq!(predict(&rec), 100);
    }
}
