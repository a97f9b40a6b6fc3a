/// `i`-th element (1-based) of the Luby sequence 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, ...
pub fn luby(mut i: u64) -> u64 {
    assert!(i >= 1);
    loop {
        // smallest k with i <= 2^k - 1
        let mut k = 1;
        while (1u64 << k) - 1 < i {
            k += 1;
        }
        if i == (1u64 << k) - 1 {
            return 1u64 << (k - 1);
        }
        i -= (1u64 << (k - 1)) - 1;
    }
}

/// Counts conflicts and requests a restart once the current Luby interval is used up.
pub struct Restarter {
    luby_multiplier: f64,
    luby_position: u64,
    threshold: f64,
    conflicts_since_restart: u64,
}

impl Restarter {
    pub fn new(luby_multiplier: f64) -> Self {
        assert!(luby_multiplier > 0.0);
        Restarter { luby_multiplier, luby_position: 1, threshold: luby_multiplier, conflicts_since_restart: 0 }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Records a conflict. Returns `true` when the search should restart now.
    pub fn on_conflict(&mut self) -> bool {
        self.conflicts_since_restart += 1;
        self.conflicts_since_restart as f64 >= self.threshold
    }

    /// Starts the next interval. Called for every restart, scheduled or not.
    pub fn restarted(&mut self) {
        self.conflicts_since_restart = 0;
        self.threshold = self.luby_multiplier * luby(self.luby_position) as f64;
        self.luby_position += 1;
    }
}
