//! Demo ticket scenarios

use rand::Rng;

pub const DEMO_SOURCE: &str = "demo";
pub const DEFAULT_DEMO_COUNT: usize = 5;

pub const DEMO_SCENARIOS: &[&str] = &[
    "URGENT! My payment was taken but order didn't go through!",
    "The app keeps freezing when I try to upload photos",
    "Can you help me reset my password? I'm locked out",
    "I love the new feature but found a small bug",
    "Very disappointed with the service quality lately",
    "Need immediate help - my business is stuck!",
    "Feature request: can you add more customization options?",
    "Billing question about my subscription renewal",
    "The website is very slow today",
    "Can I get a refund for my last purchase?",
];

/// Pick one scenario uniformly at random
pub fn pick_scenario<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    DEMO_SCENARIOS[rng.random_range(0..DEMO_SCENARIOS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_pick_scenario_covers_all() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<&str> = (0..500).map(|_| pick_scenario(&mut rng)).collect();
        assert_eq!(seen.len(), DEMO_SCENARIOS.len());
    }
}
