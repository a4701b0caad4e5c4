use alloc::vec::Vec;

/// Number of entries at each displacement.
///
/// `bins()[d]` is the number of entries sitting `d` probe steps away from
/// their ideal slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    bins: Vec<usize>,
}

impl ProbeHistogram {
    pub(crate) fn new(bins: Vec<usize>) -> Self {
        ProbeHistogram { bins }
    }

    /// Returns the per-displacement counts.
    pub fn bins(&self) -> &[usize] {
        &self.bins
    }

    /// Returns the number of entries counted.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Returns the largest displacement with at least one entry, or `None` for
    /// an empty table.
    pub fn max_displacement(&self) -> Option<usize> {
        self.bins.iter().rposition(|&count| count != 0)
    }

    /// Pretty-prints the histogram as a horizontal bar chart on stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.bins.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.total());

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let full = units / 8;
            let rem = units % 8;
            let mut bar = "█".repeat(full);
            if rem > 0 {
                let ch = match rem {
                    1 => '▏',
                    2 => '▎',
                    3 => '▍',
                    4 => '▌',
                    5 => '▋',
                    6 => '▊',
                    7 => '▉',
                    _ => unreachable!(),
                };
                bar.push(ch);
            }
            bar
        };

        for (displacement, &count) in self.bins.iter().enumerate() {
            println!("{:>3} | {} ({})", displacement, make_bar(count), count);
        }
    }
}

/// Occupancy, displacement and memory statistics of a table.
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries currently in the table
    pub populated: usize,
    /// Number of slots
    pub capacity: usize,
    /// Population at which the next insert grows the table
    pub max_load: usize,
    /// Occupied fraction of the slots (populated / capacity)
    pub load_factor: f64,
    /// Largest distance of any entry from its ideal slot
    pub max_displacement: u32,
    /// Average distance of an entry from its ideal slot
    pub mean_displacement: f64,
    /// Total memory in bytes used by the slot array
    pub total_bytes: usize,
    /// Bytes held by empty slots
    pub wasted_bytes: usize,
}

impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} slots ({:.2}% load factor, grows at {})",
            self.populated,
            self.capacity,
            self.load_factor * 100.0,
            self.max_load
        );
        println!(
            "Displacement: max {}, mean {:.3}",
            self.max_displacement, self.mean_displacement
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
        println!(
            "Memory: {} bytes wasted ({:.02}%)",
            self.wasted_bytes,
            if self.total_bytes == 0 {
                0.0
            } else {
                (self.wasted_bytes as f64 / self.total_bytes as f64) * 100.0
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn histogram_summaries() {
        let histogram = ProbeHistogram::new(vec![5, 3, 0, 1, 0]);
        assert_eq!(histogram.total(), 9);
        assert_eq!(histogram.max_displacement(), Some(3));
        assert_eq!(histogram.bins(), &[5, 3, 0, 1, 0]);

        let empty = ProbeHistogram::new(vec![0]);
        assert_eq!(empty.total(), 0);
        assert_eq!(empty.max_displacement(), None);
    }
}
