use crate::probe::ProbePolicy;

/// Number of slots a table starts with unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 1 << 4;

/// Factor the slot count is multiplied by on every growth.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

cfg_if::cfg_if! {
    if #[cfg(feature = "load-factor-fifty")] {
        const DEFAULT_LOAD_FACTOR_PER_MILLE: u32 = 500;
    } else if #[cfg(feature = "load-factor-seventy-five")] {
        const DEFAULT_LOAD_FACTOR_PER_MILLE: u32 = 750;
    } else {
        // Also selected by `load-factor-eighty-five`.
        const DEFAULT_LOAD_FACTOR_PER_MILLE: u32 = 850;
    }
}

/// Tuning knobs for a table.
///
/// None of these change what the table stores, only how it is laid out:
///
/// - `initial_capacity`: slot count of a fresh table, rounded up to a power of
///   two.
/// - `growth_factor`: slot count multiplier applied when the table grows. Must
///   be a power of two so the slot count stays one.
/// - `load_factor`: occupied fraction of the slots at which the next insert
///   grows the table first.
/// - `probe_policy`: see [`ProbePolicy`].
///
/// # Examples
///
/// ```rust
/// use rh_table::Config;
/// use rh_table::ProbePolicy;
///
/// let config = Config::default()
///     .initial_capacity(100)
///     .growth_factor(4)
///     .load_factor(0.5)
///     .probe_policy(ProbePolicy::Triangular);
///
/// assert_eq!(config.get_initial_capacity(), 128);
/// assert_eq!(config.get_growth_factor(), 4);
/// assert_eq!(config.get_load_factor(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    initial_capacity: usize,
    growth_factor: usize,
    load_factor_per_mille: u32,
    probe_policy: ProbePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_capacity: DEFAULT_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            load_factor_per_mille: DEFAULT_LOAD_FACTOR_PER_MILLE,
            probe_policy: ProbePolicy::default(),
        }
    }
}

impl Config {
    /// Sets the starting slot count. Rounded up to the next power of two, with
    /// a minimum of one slot.
    ///
    /// # Panics
    ///
    /// Panics if the rounded value overflows `usize`.
    pub fn initial_capacity(mut self, slots: usize) -> Self {
        self.initial_capacity = slots
            .max(1)
            .checked_next_power_of_two()
            .expect("capacity overflow");
        self
    }

    /// Sets the growth multiplier.
    ///
    /// # Panics
    ///
    /// Panics unless `factor` is a power of two of at least 2.
    pub fn growth_factor(mut self, factor: usize) -> Self {
        assert!(
            factor >= 2 && factor.is_power_of_two(),
            "growth factor must be a power of two >= 2, got {factor}"
        );
        self.growth_factor = factor;
        self
    }

    /// Sets the load factor. Stored with per-mille precision.
    ///
    /// # Panics
    ///
    /// Panics unless `load_factor` lies strictly between 0 and 1 after
    /// rounding to per-mille.
    pub fn load_factor(mut self, load_factor: f32) -> Self {
        let per_mille = load_factor * 1000.0 + 0.5;
        assert!(
            per_mille >= 1.0 && per_mille < 1000.0,
            "load factor must be in (0, 1), got {load_factor}"
        );
        self.load_factor_per_mille = per_mille as u32;
        self
    }

    /// Sets the probe policy.
    pub fn probe_policy(mut self, policy: ProbePolicy) -> Self {
        self.probe_policy = policy;
        self
    }

    /// Returns the starting slot count.
    pub fn get_initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the growth multiplier.
    pub fn get_growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Returns the load factor.
    pub fn get_load_factor(&self) -> f32 {
        self.load_factor_per_mille as f32 / 1000.0
    }

    /// Returns the probe policy.
    pub fn get_probe_policy(&self) -> ProbePolicy {
        self.probe_policy
    }

    /// Largest population a table of `slots` slots may hold so that
    /// `population < slots * load_factor`.
    #[inline]
    pub(crate) fn max_load(&self, slots: usize) -> usize {
        let scaled = slots as u128 * self.load_factor_per_mille as u128;
        ((scaled.saturating_sub(1)) / 1000) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.get_initial_capacity(), 16);
        assert_eq!(config.get_growth_factor(), 2);
        assert_eq!(config.get_probe_policy(), ProbePolicy::RobinHood);
        assert!(config.get_load_factor() > 0.0 && config.get_load_factor() < 1.0);
    }

    #[test]
    fn initial_capacity_rounds_up() {
        assert_eq!(Config::default().initial_capacity(0).get_initial_capacity(), 1);
        assert_eq!(Config::default().initial_capacity(1).get_initial_capacity(), 1);
        assert_eq!(Config::default().initial_capacity(17).get_initial_capacity(), 32);
        assert_eq!(Config::default().initial_capacity(64).get_initial_capacity(), 64);
    }

    #[test]
    fn max_load_stays_below_load_factor() {
        for per_mille in [500u128, 750, 850] {
            let config = Config::default().load_factor(per_mille as f32 / 1000.0);
            for shift in 0..20 {
                let slots = 1usize << shift;
                let max_load = config.max_load(slots);
                assert!(max_load < slots);
                assert!((max_load as u128) * 1000 < slots as u128 * per_mille);
                assert!((max_load as u128 + 1) * 1000 >= slots as u128 * per_mille);
            }
        }
    }

    #[test]
    fn max_load_examples() {
        let config = Config::default().load_factor(0.85);
        // 16 * 0.85 = 13.6
        assert_eq!(config.max_load(16), 13);
        // 20 * 0.85 = 17, which must stay strictly below.
        assert_eq!(config.max_load(20), 16);
        assert_eq!(config.max_load(1), 0);

        let half = Config::default().load_factor(0.5);
        assert_eq!(half.max_load(2), 0);
        assert_eq!(half.max_load(4), 1);
    }

    #[test]
    #[should_panic(expected = "growth factor")]
    fn rejects_odd_growth_factor() {
        let _ = Config::default().growth_factor(3);
    }

    #[test]
    #[should_panic(expected = "load factor")]
    fn rejects_full_load_factor() {
        let _ = Config::default().load_factor(1.0);
    }
}
