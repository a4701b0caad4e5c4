use alloc::alloc::handle_alloc_error;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::alloc::Layout;
use core::fmt::Debug;
use core::mem::MaybeUninit;

use crate::config::Config;
use crate::error::Error;
use crate::probe::ProbePolicy;
use crate::probe::ProbeSeq;

/// Stored hash marking an empty slot.
///
/// Live entries store the caller's digest plus one, so a digest of `0` still
/// produces a live hash. The single digest that would wrap to `0`
/// (`u64::MAX`) is folded onto `1`.
const EMPTY: u64 = 0;

#[inline(always)]
pub(crate) fn stored_hash(digest: u64) -> u64 {
    match digest.wrapping_add(1) {
        EMPTY => 1,
        hash => hash,
    }
}

/// One entry of the slot array.
///
/// `value` is initialized if and only if `hash != EMPTY`.
struct Slot<T> {
    hash: u64,
    displacement: u32,
    value: MaybeUninit<T>,
}

impl<T> Slot<T> {
    const VACANT: Self = Slot {
        hash: EMPTY,
        displacement: 0,
        value: MaybeUninit::uninit(),
    };

    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.hash == EMPTY
    }
}

fn alloc_slots<T>(count: usize) -> Result<Box<[Slot<T>]>, Error> {
    let layout = Layout::array::<Slot<T>>(count).map_err(|_| Error::CapacityOverflow)?;

    let mut slots = Vec::new();
    slots
        .try_reserve_exact(count)
        .map_err(|_| Error::AllocFailed { layout })?;
    slots.resize_with(count, || Slot::VACANT);

    Ok(slots.into_boxed_slice())
}

/// Growth on the insert path has no way to report failure to the caller.
#[inline]
fn infallible<R>(result: Result<R, Error>) -> R {
    match result {
        Ok(value) => value,
        Err(Error::AllocFailed { layout }) => handle_alloc_error(layout),
        Err(err) => panic!("{err}"),
    }
}

/// An open-addressing table over a single power-of-two slot array.
///
/// `RawTable<T>` does not hash anything itself. Every operation takes the
/// caller's 64-bit digest of the entry plus an equality predicate, the same
/// way the [`HashTable`](crate::HashTable) wrapper drives it. Digests are
/// cached per slot so growth never calls back into the hasher.
///
/// Lookups stop at the first empty slot of the probe sequence, so the table
/// always keeps at least one slot free: the population stays strictly below
/// `capacity * load_factor`.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hasher;
/// #
/// # use rh_table::raw_table::RawEntry;
/// # use rh_table::raw_table::RawTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     hasher.write_u64(id);
/// #     hasher.finish()
/// # }
/// #
/// let mut table: RawTable<(u64, &str)> = RawTable::with_capacity(8);
///
/// match table.entry(hash_id(7), |&(id, _)| id == 7) {
///     RawEntry::Vacant(entry) => {
///         entry.insert((7, "seven"));
///     }
///     RawEntry::Occupied(_) => unreachable!(),
/// }
///
/// assert_eq!(table.find(hash_id(7), |&(id, _)| id == 7), Some(&(7, "seven")));
/// assert_eq!(table.find(hash_id(8), |&(id, _)| id == 8), None);
/// ```
pub struct RawTable<T> {
    slots: Box<[Slot<T>]>,
    populated: usize,
    max_load: usize,
    config: Config,
}

impl<T> Debug for RawTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;
        use alloc::string::ToString;

        if self.is_empty() {
            return f
                .debug_struct("RawTable")
                .field("slots", &"empty")
                .field("populated", &self.populated)
                .field("capacity", &self.capacity())
                .field("policy", &self.policy())
                .finish();
        }

        f.debug_struct("RawTable")
            .field(
                "slots",
                &self
                    .slots
                    .chunks(16)
                    .map(|chunk| {
                        chunk
                            .iter()
                            .map(|slot| {
                                if slot.is_empty() {
                                    "..".to_string()
                                } else {
                                    format!("{:02}", slot.displacement)
                                }
                            })
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .collect::<Vec<String>>(),
            )
            .field("populated", &self.populated)
            .field("capacity", &self.capacity())
            .field("policy", &self.policy())
            .finish()
    }
}

impl<T> Clone for RawTable<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut new_table = Self {
            slots: infallible(alloc_slots(self.slots.len())),
            populated: 0,
            max_load: self.max_load,
            config: self.config,
        };

        for (src, dst) in self.slots.iter().zip(new_table.slots.iter_mut()) {
            if src.is_empty() {
                continue;
            }

            // SAFETY: A non-empty hash marks an initialized value.
            let value = unsafe { src.value.assume_init_ref() }.clone();
            // The hash goes in last so a panicking `clone` above leaves only
            // fully written slots behind for `Drop`.
            dst.value.write(value);
            dst.displacement = src.displacement;
            dst.hash = src.hash;
            new_table.populated += 1;
        }

        debug_assert_eq!(new_table.populated, self.populated);
        new_table
    }
}

impl<T> Drop for RawTable<T> {
    fn drop(&mut self) {
        if core::mem::needs_drop::<T>() && self.populated > 0 {
            for slot in self.slots.iter_mut() {
                if !slot.is_empty() {
                    // SAFETY: A non-empty hash marks an initialized value, and
                    // it is dropped exactly once here.
                    unsafe { slot.value.assume_init_drop() };
                }
            }
        }
    }
}

impl<T> Default for RawTable<T> {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl<T> RawTable<T> {
    /// Creates an empty table laid out according to `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rh_table::Config;
    /// # use rh_table::ProbePolicy;
    /// # use rh_table::raw_table::RawTable;
    /// #
    /// let config = Config::default()
    ///     .initial_capacity(64)
    ///     .probe_policy(ProbePolicy::Linear);
    /// let table: RawTable<u32> = RawTable::with_config(config);
    /// assert_eq!(table.capacity(), 64);
    /// assert_eq!(table.policy(), ProbePolicy::Linear);
    /// ```
    pub fn with_config(config: Config) -> Self {
        let slots = config.get_initial_capacity();
        Self {
            slots: infallible(alloc_slots(slots)),
            populated: 0,
            max_load: config.max_load(slots),
            config,
        }
    }

    /// Creates an empty table with the default configuration that can hold at
    /// least `capacity` entries without growing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rh_table::raw_table::RawTable;
    /// #
    /// let table: RawTable<String> = RawTable::with_capacity(100);
    /// assert!(table.max_load() >= 100);
    /// assert!(table.capacity().is_power_of_two());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_config(capacity, Config::default())
    }

    /// Creates an empty table laid out according to `config`, grown up front
    /// until it can hold at least `capacity` entries.
    pub fn with_capacity_and_config(capacity: usize, config: Config) -> Self {
        let mut table = Self::with_config(config);
        table.reserve(capacity);
        table
    }

    #[inline(always)]
    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of slots. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns how many entries fit before the next insert grows the table.
    pub fn max_load(&self) -> usize {
        self.max_load
    }

    /// Returns the probe policy this table was configured with.
    pub fn policy(&self) -> ProbePolicy {
        self.config.get_probe_policy()
    }

    /// Returns the configuration this table was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Locates the slot holding an entry with this digest that satisfies
    /// `eq`.
    ///
    /// Stops at the first empty slot. Under [`ProbePolicy::RobinHood`] it also
    /// stops at the first resident that sits closer to its ideal slot than the
    /// probe has travelled: insertion would have displaced that resident, so
    /// the entry cannot be further along.
    #[inline]
    pub(crate) fn find_index(&self, digest: u64, eq: impl Fn(&T) -> bool) -> Option<usize> {
        if self.populated == 0 {
            return None;
        }

        let hash = stored_hash(digest);
        let mask = self.mask();
        let policy = self.policy();
        let mut probe = ProbeSeq::new(hash, mask);

        loop {
            let slot = &self.slots[probe.pos];
            if slot.is_empty() {
                return None;
            }

            // SAFETY: A non-empty hash marks an initialized value.
            if slot.hash == hash && eq(unsafe { slot.value.assume_init_ref() }) {
                return Some(probe.pos);
            }

            if policy.displaces() && slot.displacement < probe.distance {
                return None;
            }

            probe.move_next(policy, mask);
        }
    }

    /// Finds an entry by digest and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rh_table::raw_table::RawTable;
    /// #
    /// let mut table: RawTable<u64> = RawTable::with_capacity(4);
    /// table.entry(42, |&n| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(42, |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(99, |&n| n == 99), None);
    /// ```
    #[inline]
    pub fn find(&self, digest: u64, eq: impl Fn(&T) -> bool) -> Option<&T> {
        let index = self.find_index(digest, eq)?;
        // SAFETY: `find_index` only returns occupied slots.
        Some(unsafe { self.slots[index].value.assume_init_ref() })
    }

    /// Finds an entry by digest and equality predicate, returning a mutable
    /// reference.
    ///
    /// The part of `T` that the digest was computed from must not be changed
    /// through the returned reference.
    #[inline]
    pub fn find_mut(&mut self, digest: u64, eq: impl Fn(&T) -> bool) -> Option<&mut T> {
        let index = self.find_index(digest, eq)?;
        // SAFETY: `find_index` only returns occupied slots.
        Some(unsafe { self.slots[index].value.assume_init_mut() })
    }

    /// Gets the entry for a digest and equality predicate, growing the table
    /// first if one more entry would cross the load factor.
    ///
    /// Growth happens even when the entry turns out to be occupied, so any
    /// call may move every entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rh_table::raw_table::RawEntry;
    /// # use rh_table::raw_table::RawTable;
    /// #
    /// let mut table: RawTable<(u64, u32)> = RawTable::with_capacity(4);
    ///
    /// for _ in 0..3 {
    ///     match table.entry(1, |&(k, _)| k == 1) {
    ///         RawEntry::Vacant(entry) => {
    ///             entry.insert((1, 1));
    ///         }
    ///         RawEntry::Occupied(mut entry) => {
    ///             entry.get_mut().1 += 1;
    ///         }
    ///     }
    /// }
    ///
    /// assert_eq!(table.find(1, |&(k, _)| k == 1), Some(&(1, 3)));
    /// ```
    #[inline]
    pub fn entry(&mut self, digest: u64, eq: impl Fn(&T) -> bool) -> RawEntry<'_, T> {
        self.maybe_grow();

        match self.find_index(digest, eq) {
            Some(index) => RawEntry::Occupied(RawOccupiedEntry { table: self, index }),
            None => RawEntry::Vacant(RawVacantEntry {
                table: self,
                hash: stored_hash(digest),
            }),
        }
    }

    /// Moves `value` into the table along its probe sequence.
    ///
    /// The caller guarantees that no equal entry is present and that there is
    /// room for one more entry. Returns the index `value` ended up at; under
    /// [`ProbePolicy::RobinHood`] residents it displaced have moved further
    /// along.
    fn place(&mut self, hash: u64, value: T) -> usize {
        debug_assert!(self.populated < self.slots.len());

        let mask = self.mask();
        let policy = self.policy();
        let mut probe = ProbeSeq::new(hash, mask);

        let mut hash = hash;
        let mut displacement = 0u32;
        let mut value = value;
        let mut landed = None;

        loop {
            let slot = &mut self.slots[probe.pos];

            if slot.is_empty() {
                slot.value.write(value);
                slot.displacement = displacement;
                slot.hash = hash;
                self.populated += 1;
                return landed.unwrap_or(probe.pos);
            }

            if policy.displaces() && slot.displacement < displacement {
                // SAFETY: A non-empty hash marks an initialized value. The
                // resident moves into the carried record as a whole, so the
                // slot is never half swapped.
                core::mem::swap(unsafe { slot.value.assume_init_mut() }, &mut value);
                core::mem::swap(&mut slot.hash, &mut hash);
                core::mem::swap(&mut slot.displacement, &mut displacement);
                landed.get_or_insert(probe.pos);
            }

            probe.move_next(policy, mask);
            displacement += 1;
        }
    }

    #[inline]
    fn maybe_grow(&mut self) {
        if self.populated >= self.max_load {
            self.reserve(1);
        }
    }

    /// Reserves room for at least `additional` more entries.
    ///
    /// # Panics
    ///
    /// Panics if the new slot count overflows `usize`. Aborts through
    /// [`handle_alloc_error`] if the allocation fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rh_table::raw_table::RawTable;
    /// #
    /// let mut table: RawTable<u64> = RawTable::with_capacity(0);
    /// table.reserve(1000);
    /// assert!(table.max_load() >= 1000);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        infallible(self.try_reserve(additional))
    }

    /// Tries to reserve room for at least `additional` more entries.
    ///
    /// On error the table is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rh_table::Error;
    /// # use rh_table::raw_table::RawTable;
    /// #
    /// let mut table: RawTable<u64> = RawTable::with_capacity(0);
    /// assert!(table.try_reserve(64).is_ok());
    /// assert_eq!(table.try_reserve(usize::MAX), Err(Error::CapacityOverflow));
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        let required = self
            .populated
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;
        if required <= self.max_load {
            return Ok(());
        }

        let growth_factor = self.config.get_growth_factor();
        let mut slots = self.slots.len();
        while self.config.max_load(slots) < required {
            slots = slots
                .checked_mul(growth_factor)
                .ok_or(Error::CapacityOverflow)?;
        }

        self.resize_rehash(slots)
    }

    #[cold]
    #[inline(never)]
    fn resize_rehash(&mut self, slot_count: usize) -> Result<(), Error> {
        debug_assert!(slot_count.is_power_of_two() && slot_count > self.slots.len());

        let new_slots = alloc_slots(slot_count)?;
        let old_slots = core::mem::replace(&mut self.slots, new_slots);
        let populated = core::mem::replace(&mut self.populated, 0);
        self.max_load = self.config.max_load(slot_count);

        crate::event!(
            debug,
            old_capacity = old_slots.len(),
            new_capacity = slot_count,
            populated,
            "growing table"
        );

        // Values move out of the old slots by `assume_init`; the old
        // allocation is released afterwards without dropping anything since
        // `MaybeUninit` never runs destructors.
        for slot in old_slots.into_vec() {
            if slot.is_empty() {
                continue;
            }

            // SAFETY: A non-empty hash marks an initialized value, and this is
            // the only read of it.
            let value = unsafe { slot.value.assume_init() };
            self.place(slot.hash, value);
        }

        debug_assert_eq!(self.populated, populated);
        Ok(())
    }

    /// Returns an iterator over all entries, in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator over mutable references to all entries, in slot
    /// order.
    ///
    /// The part of `T` that its digest was computed from must not be changed.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            remaining: self.populated,
            slots: self.slots.iter_mut(),
        }
    }

    /// Iterates over `(stored hash, displacement)` of every occupied slot.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn slot_meta(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.slots
            .iter()
            .filter(|slot| !slot.is_empty())
            .map(|slot| (slot.hash, slot.displacement))
    }

    /// Returns the `(stored hash, displacement)` of the slot holding a
    /// matching entry.
    #[cfg(test)]
    pub(crate) fn find_meta(&self, digest: u64, eq: impl Fn(&T) -> bool) -> Option<(u64, u32)> {
        let slot = &self.slots[self.find_index(digest, eq)?];
        Some((slot.hash, slot.displacement))
    }

    /// Returns the largest displacement of any entry.
    #[cfg(any(test, feature = "stats"))]
    pub fn max_displacement(&self) -> u32 {
        self.slot_meta()
            .map(|(_, displacement)| displacement)
            .max()
            .unwrap_or(0)
    }

    /// Counts entries by displacement: bin `d` holds the number of entries
    /// sitting `d` probe steps from their ideal slot.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> crate::stats::ProbeHistogram {
        let mut bins = alloc::vec![0usize; self.max_displacement() as usize + 1];
        for (_, displacement) in self.slot_meta() {
            bins[displacement as usize] += 1;
        }

        crate::stats::ProbeHistogram::new(bins)
    }

    /// Returns occupancy, displacement and memory statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        let total_displacement: u64 = self
            .slot_meta()
            .map(|(_, displacement)| displacement as u64)
            .sum();
        let slot_size = core::mem::size_of::<Slot<T>>();

        crate::stats::DebugStats {
            populated: self.populated,
            capacity: self.slots.len(),
            max_load: self.max_load,
            load_factor: if self.slots.is_empty() {
                0.0
            } else {
                self.populated as f64 / self.slots.len() as f64
            },
            max_displacement: self.max_displacement(),
            mean_displacement: if self.populated == 0 {
                0.0
            } else {
                total_displacement as f64 / self.populated as f64
            },
            total_bytes: self.slots.len() * slot_size,
            wasted_bytes: (self.slots.len() - self.populated) * slot_size,
        }
    }
}

impl<T> IntoIterator for RawTable<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let slots = core::mem::replace(&mut self.slots, Vec::new().into_boxed_slice());
        let remaining = core::mem::replace(&mut self.populated, 0);

        IntoIter {
            slots: slots.into_vec().into_iter(),
            remaining,
        }
    }
}

impl<'a, T> IntoIterator for &'a RawTable<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view into a single entry of a [`RawTable`], which may be vacant or
/// occupied.
///
/// Constructed by [`RawTable::entry`].
pub enum RawEntry<'a, T> {
    /// No matching entry exists.
    Vacant(RawVacantEntry<'a, T>),
    /// A matching entry exists.
    Occupied(RawOccupiedEntry<'a, T>),
}

impl<'a, T> RawEntry<'a, T> {
    /// Inserts `default` if the entry is vacant, then returns a mutable
    /// reference to the entry's value.
    pub fn or_insert(self, default: T) -> &'a mut T {
        self.or_insert_with(|| default)
    }

    /// Inserts the result of `default` if the entry is vacant, then returns a
    /// mutable reference to the entry's value.
    pub fn or_insert_with(self, default: impl FnOnce() -> T) -> &'a mut T {
        match self {
            RawEntry::Occupied(entry) => entry.into_mut(),
            RawEntry::Vacant(entry) => entry.insert(default()),
        }
    }
}

/// A vacant entry of a [`RawTable`]. The table already has room for it.
pub struct RawVacantEntry<'a, T> {
    table: &'a mut RawTable<T>,
    hash: u64,
}

impl<'a, T> RawVacantEntry<'a, T> {
    /// Places `value` and returns a mutable reference to it.
    ///
    /// Under [`ProbePolicy::RobinHood`] this may shift residents further along
    /// their probe sequences.
    pub fn insert(self, value: T) -> &'a mut T {
        let index = self.table.place(self.hash, value);
        // SAFETY: `place` returns the slot it just wrote `value` to.
        unsafe { self.table.slots[index].value.assume_init_mut() }
    }
}

/// An occupied entry of a [`RawTable`].
pub struct RawOccupiedEntry<'a, T> {
    table: &'a mut RawTable<T>,
    index: usize,
}

impl<'a, T> RawOccupiedEntry<'a, T> {
    /// Returns a reference to the entry's value.
    pub fn get(&self) -> &T {
        // SAFETY: Occupied entries are only built for occupied slots.
        unsafe { self.table.slots[self.index].value.assume_init_ref() }
    }

    /// Returns a mutable reference to the entry's value.
    pub fn get_mut(&mut self) -> &mut T {
        // SAFETY: Occupied entries are only built for occupied slots.
        unsafe { self.table.slots[self.index].value.assume_init_mut() }
    }

    /// Converts the entry into a mutable reference tied to the table's
    /// borrow.
    pub fn into_mut(self) -> &'a mut T {
        // SAFETY: Occupied entries are only built for occupied slots.
        unsafe { self.table.slots[self.index].value.assume_init_mut() }
    }

    /// Returns how many probe steps the entry sits from its ideal slot.
    pub fn displacement(&self) -> u32 {
        self.table.slots[self.index].displacement
    }
}

/// Iterator over the entries of a [`RawTable`].
pub struct Iter<'a, T> {
    slots: core::slice::Iter<'a, Slot<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let slot = self.slots.find(|slot| !slot.is_empty())?;
        self.remaining -= 1;
        // SAFETY: A non-empty hash marks an initialized value.
        Some(unsafe { slot.value.assume_init_ref() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Mutable iterator over the entries of a [`RawTable`].
pub struct IterMut<'a, T> {
    slots: core::slice::IterMut<'a, Slot<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let slot = self.slots.find(|slot| !slot.is_empty())?;
        self.remaining -= 1;
        // SAFETY: A non-empty hash marks an initialized value.
        Some(unsafe { slot.value.assume_init_mut() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owning iterator over the entries of a [`RawTable`].
pub struct IntoIter<T> {
    slots: alloc::vec::IntoIter<Slot<T>>,
    remaining: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let slot = self.slots.find(|slot| !slot.is_empty())?;
        self.remaining -= 1;
        // SAFETY: A non-empty hash marks an initialized value. The slot was
        // moved out of the buffer, so this is its only read.
        Some(unsafe { slot.value.assume_init() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}
