// Holds the current/previous rate snapshots used to derive changes
use rand::Rng;
use shared::catalog::BASE_CURRENCY;
use shared::models::RateSnapshot;

/// Baseline quotes against USD that each mock snapshot fluctuates around.
pub const BASELINE_RATES: [(&str, f64); 23] = [
    ("EUR", 0.85),
    ("GBP", 0.73),
    ("JPY", 149.50),
    ("CAD", 1.36),
    ("AUD", 1.52),
    ("CHF", 0.91),
    ("CNY", 7.24),
    ("INR", 83.15),
    ("KRW", 1340.25),
    ("SGD", 1.35),
    ("HKD", 7.83),
    ("NOK", 10.85),
    ("SEK", 10.45),
    ("DKK", 6.85),
    ("PLN", 4.15),
    ("CZK", 23.25),
    ("HUF", 365.50),
    ("RUB", 95.75),
    ("BRL", 5.15),
    ("MXN", 17.85),
    ("ZAR", 18.65),
    ("TRY", 28.45),
    ("NZD", 1.65),
];

pub fn baseline_snapshot() -> RateSnapshot {
    BASELINE_RATES
        .iter()
        .map(|(code, rate)| (code.to_string(), *rate))
        .collect()
}

/// Perturbs every baseline rate independently by a factor in
/// `[1 - fluctuation, 1 + fluctuation]`.
pub fn generate_mock_rates<R: Rng + ?Sized>(
    baseline: &RateSnapshot,
    fluctuation: f64,
    rng: &mut R,
) -> RateSnapshot {
    baseline
        .iter()
        .map(|(code, rate)| {
            let variation = rng.gen_range(-fluctuation..=fluctuation);
            (code.clone(), rate * (1.0 + variation))
        })
        .collect()
}

/// Rate of `code` in `snapshot`; the implicit base currency is always 1.0.
pub fn quote(snapshot: &RateSnapshot, code: &str) -> Option<f64> {
    if code == BASE_CURRENCY {
        return Some(1.0);
    }
    snapshot.get(code).copied()
}

/// Single-writer cache of the last two snapshots.
#[derive(Debug, Clone, Default)]
pub struct RateBook {
    previous: RateSnapshot,
    current: RateSnapshot,
}

impl RateBook {
    pub fn new(initial: RateSnapshot) -> Self {
        RateBook {
            previous: RateSnapshot::new(),
            current: initial,
        }
    }

    pub fn current(&self) -> &RateSnapshot {
        &self.current
    }

    pub fn previous(&self) -> &RateSnapshot {
        &self.previous
    }

    /// Replaces both snapshots in one step: the old current becomes previous.
    pub fn advance(&mut self, next: RateSnapshot) {
        self.previous = std::mem::replace(&mut self.current, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_mock_rates_within_fluctuation() {
        let baseline = baseline_snapshot();
        let mut rng = StdRng::seed_from_u64(1);
        let rates = generate_mock_rates(&baseline, 0.01, &mut rng);

        assert_eq!(rates.len(), BASELINE_RATES.len());
        for (code, base) in BASELINE_RATES {
            let rate = rates[code];
            assert!((rate - base).abs() <= base * 0.01 + 1e-12, "{} moved too far: {}", code, rate);
        }
    }

    #[test]
    fn test_generate_mock_rates_zero_fluctuation() {
        let baseline = baseline_snapshot();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_mock_rates(&baseline, 0.0, &mut rng), baseline);
    }

    #[test]
    fn test_quote_base_is_unity() {
        let snapshot = baseline_snapshot();
        assert_eq!(quote(&snapshot, "USD"), Some(1.0));
        assert_eq!(quote(&snapshot, "JPY"), Some(149.50));
        assert_eq!(quote(&snapshot, "XXX"), None);
    }

    #[test]
    fn test_advance_shifts_snapshots() {
        let first = baseline_snapshot();
        let mut second = first.clone();
        second.insert("EUR".to_string(), 0.86);

        let mut book = RateBook::new(first.clone());
        assert!(book.previous().is_empty());

        book.advance(second.clone());
        assert_eq!(book.previous(), &first);
        assert_eq!(book.current(), &second);
    }
}
