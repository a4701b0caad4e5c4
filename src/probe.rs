/// How a key's probe sequence walks the slot array after its ideal slot is
/// taken.
///
/// The policy only changes the order slots are visited in and whether
/// residents may be displaced; the slot layout and the load-factor rules are
/// the same for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProbePolicy {
    /// Step to the next slot on every retry. Residents never move once placed.
    Linear,
    /// Step by triangular numbers: the `x`-th retry looks at
    /// `ideal + (x² + x) / 2`. Residents never move once placed.
    Triangular,
    /// Linear stepping where an incoming entry takes the slot of any resident
    /// that sits closer to its own ideal slot, and continues with the evicted
    /// resident instead.
    #[default]
    RobinHood,
}

impl ProbePolicy {
    /// Whether insertion swaps with residents that are closer to their ideal
    /// slot than the entry being placed.
    #[inline(always)]
    pub(crate) fn displaces(self) -> bool {
        matches!(self, ProbePolicy::RobinHood)
    }
}

/// Probe sequence over a power-of-two slot array.
///
/// `distance` counts the retries taken so far and doubles as the displacement
/// recorded for an entry placed at `pos`.
///
/// Triangular stepping visits every slot exactly once before wrapping since
/// the table size is a power of two:
/// <https://fgiesen.wordpress.com/2015/02/22/triangular-numbers-mod-2n/>
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProbeSeq {
    pub(crate) pos: usize,
    pub(crate) distance: u32,
    stride: usize,
}

impl ProbeSeq {
    #[inline(always)]
    pub(crate) fn new(hash: u64, mask: usize) -> Self {
        ProbeSeq {
            pos: hash as usize & mask,
            distance: 0,
            stride: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn move_next(&mut self, policy: ProbePolicy, mask: usize) {
        // An empty slot is always reachable, so we can never walk the whole
        // table.
        debug_assert!(
            (self.distance as usize) <= mask,
            "went past end of probe sequence"
        );

        self.stride = match policy {
            ProbePolicy::Linear | ProbePolicy::RobinHood => 1,
            ProbePolicy::Triangular => self.stride + 1,
        };
        self.pos = (self.pos + self.stride) & mask;
        self.distance += 1;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn visit(policy: ProbePolicy, start: u64, mask: usize) -> Vec<usize> {
        let mut seq = ProbeSeq::new(start, mask);
        let mut visited = vec![seq.pos];
        for _ in 0..mask {
            seq.move_next(policy, mask);
            visited.push(seq.pos);
        }
        visited
    }

    #[test]
    fn linear_wraps_around() {
        assert_eq!(
            visit(ProbePolicy::Linear, 6, 7),
            vec![6, 7, 0, 1, 2, 3, 4, 5]
        );
        assert_eq!(
            visit(ProbePolicy::RobinHood, 6, 7),
            visit(ProbePolicy::Linear, 6, 7)
        );
    }

    #[test]
    fn triangular_offsets() {
        let visited = visit(ProbePolicy::Triangular, 3, 15);
        for (x, &pos) in visited.iter().enumerate() {
            assert_eq!(pos, (3 + (x * x + x) / 2) & 15);
        }
    }

    #[test]
    fn every_policy_covers_every_slot() {
        for policy in [
            ProbePolicy::Linear,
            ProbePolicy::Triangular,
            ProbePolicy::RobinHood,
        ] {
            for mask in [0usize, 1, 3, 15, 63, 1023] {
                let mut visited = visit(policy, 0x9E37_79B9_7F4A_7C15, mask);
                visited.sort_unstable();
                visited.dedup();
                assert_eq!(visited.len(), mask + 1, "{policy:?} mask {mask}");
            }
        }
    }

    #[test]
    fn distance_counts_retries() {
        let mut seq = ProbeSeq::new(0, 31);
        for expected in 1..=10u32 {
            seq.move_next(ProbePolicy::Triangular, 31);
            assert_eq!(seq.distance, expected);
        }
    }
}
