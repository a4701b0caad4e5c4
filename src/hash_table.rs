use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::config::Config;
use crate::error::Error;
use crate::probe::ProbePolicy;
use crate::raw_table::RawEntry;
use crate::raw_table::RawOccupiedEntry;
use crate::raw_table::RawTable;
use crate::raw_table::RawVacantEntry;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Hasher builder used when none is supplied.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// Hasher builder used when none is supplied.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// Placeholder for builds without a default hasher. It cannot be
        /// constructed; supply a hasher through
        /// [`HashTable::with_hasher`] instead.
        #[derive(Clone, Copy, Debug)]
        pub enum DefaultHashBuilder {}
    }
}

/// A hash table mapping keys to values, stored by open addressing in one
/// contiguous slot array.
///
/// Keys are hashed once, through `S`, when they are inserted; the digest is
/// cached next to the entry and reused whenever the table grows. Collisions
/// are resolved with the table's [`ProbePolicy`], Robin-Hood linear probing by
/// default.
///
/// Entries cannot be removed: [`remove`](HashTable::remove) always returns
/// [`Error::Unsupported`].
///
/// # Examples
///
/// ```rust
/// # #[cfg(any(feature = "std", feature = "foldhash"))]
/// # {
/// use rh_table::HashTable;
///
/// let mut table: HashTable<String, u32> = HashTable::new();
/// table.set("heeheee".to_string(), 123);
/// table.set("foofoo".to_string(), 789);
///
/// assert_eq!(table.find(&"heeheee".to_string()), Some(&123));
/// assert_eq!(table.find(&"zzz".to_string()), None);
///
/// *table.get_or_default("aaabbb".to_string()) += 456;
/// assert_eq!(table.find(&"aaabbb".to_string()), Some(&456));
/// assert_eq!(table.len(), 3);
/// # }
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    table: RawTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashTable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S> PartialEq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.find(k).is_some_and(|other_v| v == other_v))
    }
}

impl<K, V, S> Eq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> HashTable<K, V, S> {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns how many entries fit before the next insert grows the table.
    pub fn max_load(&self) -> usize {
        self.table.max_load()
    }

    /// Returns the probe policy.
    pub fn policy(&self) -> ProbePolicy {
        self.table.policy()
    }

    /// Returns the configuration the table was created with.
    pub fn config(&self) -> &Config {
        self.table.config()
    }

    /// Returns a reference to the table's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns an iterator over the entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the keys in slot order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in slot order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values in slot
    /// order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns the largest distance of any entry from its ideal slot.
    #[cfg(any(test, feature = "stats"))]
    pub fn max_displacement(&self) -> u32 {
        self.table.max_displacement()
    }

    /// Counts entries by distance from their ideal slot.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> crate::stats::ProbeHistogram {
        self.table.probe_histogram()
    }

    /// Returns occupancy, displacement and memory statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        self.table.debug_stats()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty table with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use rh_table::HashTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let table: HashTable<i32, String, _> = HashTable::with_hasher(SimpleHasher);
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 16);
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_config_and_hasher(Config::default(), hash_builder)
    }

    /// Creates an empty table that holds at least `capacity` entries before
    /// growing.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: RawTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Creates an empty table laid out according to `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use rh_table::Config;
    /// # use rh_table::HashTable;
    /// # use rh_table::ProbePolicy;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let config = Config::default()
    ///     .initial_capacity(4)
    ///     .load_factor(0.5)
    ///     .probe_policy(ProbePolicy::Triangular);
    /// let mut table = HashTable::with_config_and_hasher(config, SimpleHasher);
    ///
    /// table.set(1, "one");
    /// table.set(2, "two");
    /// assert_eq!(table.capacity(), 8);
    /// assert_eq!(table.policy(), ProbePolicy::Triangular);
    /// ```
    pub fn with_config_and_hasher(config: Config, hash_builder: S) -> Self {
        Self {
            table: RawTable::with_config(config),
            hash_builder,
        }
    }

    /// Reserves room for at least `additional` more entries.
    ///
    /// # Panics
    ///
    /// Panics if the new slot count overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Tries to reserve room for at least `additional` more entries, leaving
    /// the table untouched on failure.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.table.try_reserve(additional)
    }

    /// Inserts or updates the value for `key`.
    ///
    /// The table grows first whenever one more entry would reach the load
    /// factor, even if `key` is already present. Updating an existing key does
    /// not change [`len`](HashTable::len) and returns the previous value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_table::HashTable;
    ///
    /// let mut table: HashTable<i32, &str> = HashTable::new();
    /// assert_eq!(table.set(37, "a"), None);
    /// assert_eq!(table.set(37, "b"), Some("a"));
    /// assert_eq!(table.find(&37), Some(&"b"));
    /// assert_eq!(table.len(), 1);
    /// # }
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Returns a reference to the value stored for `key`, or `None` if the key
    /// is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_table::HashTable;
    ///
    /// let mut table: HashTable<i32, &str> = HashTable::new();
    /// table.set(1, "a");
    /// assert_eq!(table.find(&1), Some(&"a"));
    /// assert_eq!(table.find(&2), None);
    /// # }
    /// ```
    pub fn find(&self, key: &K) -> Option<&V> {
        self.find_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn find_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, |(k, _)| k == key)
            .map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find_mut(hash, |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the table holds `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Always fails with [`Error::Unsupported`] and leaves the table as it
    /// was.
    ///
    /// Removing an entry from a tombstone-free Robin-Hood table requires
    /// shifting the rest of its run back, which this table does not do.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_table::Error;
    /// use rh_table::HashTable;
    ///
    /// let mut table: HashTable<i32, &str> = HashTable::new();
    /// table.set(1, "a");
    /// assert_eq!(
    ///     table.remove(&1),
    ///     Err(Error::Unsupported {
    ///         operation: "remove"
    ///     })
    /// );
    /// assert_eq!(table.find(&1), Some(&"a"));
    /// # }
    /// ```
    pub fn remove(&mut self, _key: &K) -> Result<V, Error> {
        crate::event!(
            warn,
            len = self.len(),
            "remove is not supported; table left unchanged"
        );
        Err(Error::Unsupported {
            operation: "remove",
        })
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_table::HashTable;
    ///
    /// let mut counts: HashTable<&str, usize> = HashTable::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_default(word) += 1;
    /// }
    /// assert_eq!(counts.find(&"a"), Some(&2));
    /// assert_eq!(counts.find(&"b"), Some(&1));
    /// # }
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Gets the entry for `key` for in-place insertion or update.
    ///
    /// Like [`set`](HashTable::set), this grows the table first if one more
    /// entry would reach the load factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_table::HashTable;
    /// use rh_table::hash_table::Entry;
    ///
    /// let mut table: HashTable<&str, u32> = HashTable::new();
    /// match table.entry("key") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert(1);
    ///     }
    ///     Entry::Occupied(mut entry) => {
    ///         *entry.get_mut() += 1;
    ///     }
    /// }
    /// table.entry("key").and_modify(|v| *v += 10).or_insert(0);
    /// assert_eq!(table.find(&"key"), Some(&11));
    /// # }
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            RawEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            RawEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }

    /// Returns the cached hash and displacement of the slot holding `key`.
    #[cfg(test)]
    fn slot_meta(&self, key: &K) -> Option<(u64, u32)> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find_meta(hash, |(k, _)| k == key)
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty table with the default configuration and hasher.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_table::HashTable;
    ///
    /// let table: HashTable<i32, String> = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 16);
    /// # }
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty table that holds at least `capacity` entries before
    /// growing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use rh_table::HashTable;
    ///
    /// let table: HashTable<i32, String> = HashTable::with_capacity(100);
    /// assert!(table.max_load() >= 100);
    /// # }
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    /// Creates an empty table laid out according to `config`, with the
    /// default hasher.
    pub fn with_config(config: Config) -> Self {
        Self::with_config_and_hasher(config, S::default())
    }
}

impl<K, V, S> Default for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view into a single entry in the table, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the table.
pub struct VacantEntry<'a, K, V> {
    entry: RawVacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the table and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in the table.
pub struct OccupiedEntry<'a, K, V> {
    entry: RawOccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Replaces the value in the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(&mut self.entry.get_mut().1, value)
    }

    /// Returns how many probe steps the entry sits from its ideal slot.
    pub fn displacement(&self) -> u32 {
        self.entry.displacement()
    }
}

/// An iterator over the key-value pairs of a `HashTable`.
pub struct Iter<'a, K, V> {
    inner: crate::raw_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// An iterator over the keys of a `HashTable`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a `HashTable`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A mutable iterator over the values of a `HashTable`.
pub struct ValuesMut<'a, K, V> {
    inner: crate::raw_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// An owning iterator over the key-value pairs of a `HashTable`.
pub struct IntoIter<K, V> {
    inner: crate::raw_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;
    use core::hash::Hasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    /// Hashes strings to their byte length.
    #[derive(Clone, Default)]
    struct StringLength;

    struct LengthHasher(u64);

    impl Hasher for LengthHasher {
        fn write(&mut self, bytes: &[u8]) {
            self.0 += bytes.len() as u64;
        }

        // `str` appends a 0xff terminator through this.
        fn write_u8(&mut self, _: u8) {}

        fn finish(&self) -> u64 {
            self.0
        }
    }

    impl BuildHasher for StringLength {
        type Hasher = LengthHasher;

        fn build_hasher(&self) -> Self::Hasher {
            LengthHasher(0)
        }
    }

    /// Hashes everything to the same digest.
    #[derive(Clone, Default)]
    struct Constant;

    struct ConstantHasher;

    impl Hasher for ConstantHasher {
        fn write(&mut self, _: &[u8]) {}

        fn finish(&self) -> u64 {
            0xDEAD_BEEF
        }
    }

    impl BuildHasher for Constant {
        type Hasher = ConstantHasher;

        fn build_hasher(&self) -> Self::Hasher {
            ConstantHasher
        }
    }

    const POLICIES: [ProbePolicy; 3] = [
        ProbePolicy::Linear,
        ProbePolicy::Triangular,
        ProbePolicy::RobinHood,
    ];

    fn s(value: &str) -> String {
        value.to_string()
    }

    #[test]
    fn test_new_and_with_hasher() {
        let table: HashTable<i32, String, SipHashBuilder> = HashTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.policy(), ProbePolicy::RobinHood);

        let table2 = HashTable::<i32, String, _>::with_hasher(SipHashBuilder::default());
        assert!(table2.is_empty());
        assert_eq!(table2.len(), 0);
    }

    #[test]
    fn test_with_capacity() {
        let table: HashTable<i32, String, SipHashBuilder> = HashTable::with_capacity(100);
        assert!(table.max_load() >= 100);
        assert!(table.capacity().is_power_of_two());
        assert!(table.is_empty());

        let table2 =
            HashTable::<i32, String, _>::with_capacity_and_hasher(200, SipHashBuilder::default());
        assert!(table2.max_load() >= 200);
        assert!(table2.is_empty());
    }

    #[test]
    fn test_set_and_find() {
        let mut table = HashTable::with_hasher(SipHashBuilder::default());

        assert_eq!(table.set(1, s("hello")), None);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());

        assert_eq!(table.find(&1), Some(&s("hello")));
        assert_eq!(table.find(&2), None);
        assert_eq!(table.find_key_value(&1), Some((&1, &s("hello"))));
    }

    #[test]
    fn test_update_keeps_count() {
        let mut table = HashTable::with_hasher(SipHashBuilder::default());
        table.set(1, s("hello"));
        table.set(2, s("other"));
        assert_eq!(table.len(), 2);

        assert_eq!(table.set(1, s("world")), Some(s("hello")));
        assert_eq!(table.len(), 2);
        assert_eq!(table.find(&1), Some(&s("world")));
        assert_eq!(table.find(&2), Some(&s("other")));
    }

    #[test]
    fn test_find_mut() {
        let mut table = HashTable::with_hasher(SipHashBuilder::default());
        table.set(1, s("hello"));

        if let Some(value) = table.find_mut(&1) {
            value.push_str(" world");
        }

        assert_eq!(table.find(&1), Some(&s("hello world")));
        assert_eq!(table.find_mut(&2), None);
    }

    #[test]
    fn test_contains_key() {
        let mut table = HashTable::with_hasher(SipHashBuilder::default());
        assert!(!table.contains_key(&1));

        table.set(1, s("value"));
        assert!(table.contains_key(&1));
        assert!(!table.contains_key(&2));
    }

    #[test]
    fn test_remove_is_unsupported() {
        let mut table = HashTable::with_hasher(SipHashBuilder::default());
        for i in 0..20 {
            table.set(i, i * 10);
        }
        let before = table.clone();
        let capacity = table.capacity();

        assert_eq!(
            table.remove(&3),
            Err(Error::Unsupported {
                operation: "remove"
            })
        );
        assert_eq!(
            table.remove(&99),
            Err(Error::Unsupported {
                operation: "remove"
            })
        );

        assert_eq!(table.len(), 20);
        assert_eq!(table.capacity(), capacity);
        assert_eq!(table, before);
        assert_eq!(table.find(&3), Some(&30));
    }

    #[test]
    fn test_get_or_default() {
        let mut table: HashTable<String, Vec<u32>, SipHashBuilder> = HashTable::new();

        table.get_or_default(s("a")).push(1);
        table.get_or_default(s("a")).push(2);
        table.get_or_default(s("b")).push(3);
        assert!(table.get_or_default(s("c")).is_empty());

        assert_eq!(table.len(), 3);
        assert_eq!(table.find(&s("a")), Some(&alloc::vec![1, 2]));
        assert_eq!(table.find(&s("b")), Some(&alloc::vec![3]));
        assert_eq!(table.find(&s("c")), Some(&Vec::new()));
    }

    #[test]
    fn test_entry_api() {
        let mut table = HashTable::with_hasher(SipHashBuilder::default());

        *table.entry(1).or_insert(0) += 10;
        assert_eq!(table.find(&1), Some(&10));

        *table.entry(1).or_insert(0) += 5;
        assert_eq!(table.find(&1), Some(&15));

        let value = table.entry(2).or_insert_with(|| 42);
        assert_eq!(*value, 42);

        table.entry(1).and_modify(|v| *v *= 2).or_insert(0);
        assert_eq!(table.find(&1), Some(&30));

        table.entry(3).and_modify(|v| *v *= 2).or_insert(7);
        assert_eq!(table.find(&3), Some(&7));

        assert_eq!(*table.entry(4).key(), 4);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_entry_or_default() {
        let mut table: HashTable<i32, String, SipHashBuilder> = HashTable::new();

        table.entry(1).or_default().push_str("hello");
        assert_eq!(table.find(&1), Some(&s("hello")));

        table.entry(1).or_default().push_str(" world");
        assert_eq!(table.find(&1), Some(&s("hello world")));
    }

    #[test]
    fn test_occupied_entry() {
        let mut table = HashTable::with_hasher(SipHashBuilder::default());
        table.set(1, s("hello"));

        match table.entry(1) {
            Entry::Occupied(mut entry) => {
                assert_eq!(entry.key(), &1);
                assert_eq!(entry.get(), &s("hello"));
                assert_eq!(entry.displacement(), 0);

                entry.get_mut().push_str(" world");
                assert_eq!(entry.get(), &s("hello world"));

                let old = entry.insert(s("new value"));
                assert_eq!(old, s("hello world"));
                assert_eq!(entry.into_mut(), &s("new value"));
            }
            Entry::Vacant(_) => panic!("expected occupied entry"),
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_vacant_entry() {
        let mut table: HashTable<i32, String, SipHashBuilder> = HashTable::new();

        match table.entry(1) {
            Entry::Vacant(entry) => {
                assert_eq!(entry.key(), &1);
                let value = entry.insert(s("hello"));
                assert_eq!(value, &s("hello"));
            }
            Entry::Occupied(_) => panic!("expected vacant entry"),
        }
        assert_eq!(table.find(&1), Some(&s("hello")));

        match table.entry(2) {
            Entry::Vacant(entry) => assert_eq!(entry.into_key(), 2),
            Entry::Occupied(_) => panic!("expected vacant entry"),
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_iterators() {
        let mut table = HashTable::with_hasher(SipHashBuilder::default());
        table.set(1, s("one"));
        table.set(2, s("two"));
        table.set(3, s("three"));

        let mut items: Vec<_> = table.iter().collect();
        items.sort_by_key(|(k, _)| **k);
        assert_eq!(
            items,
            alloc::vec![(&1, &s("one")), (&2, &s("two")), (&3, &s("three"))]
        );
        assert_eq!(table.iter().len(), 3);

        let mut keys: Vec<_> = table.keys().copied().collect();
        keys.sort();
        assert_eq!(keys, alloc::vec![1, 2, 3]);

        for value in table.values_mut() {
            value.make_ascii_uppercase();
        }
        let mut values: Vec<_> = table.values().cloned().collect();
        values.sort();
        assert_eq!(values, alloc::vec![s("ONE"), s("THREE"), s("TWO")]);

        let mut owned: Vec<_> = table.into_iter().collect();
        owned.sort();
        assert_eq!(
            owned,
            alloc::vec![(1, s("ONE")), (2, s("TWO")), (3, s("THREE"))]
        );
    }

    #[test]
    fn test_growth_preserves_data() {
        for policy in POLICIES {
            let config = Config::default().probe_policy(policy);
            let mut table = HashTable::with_config_and_hasher(config, SipHashBuilder::default());

            let mut capacity = table.capacity();
            for i in 0..5000u64 {
                table.set(i, i * 3);

                if table.capacity() != capacity {
                    assert_eq!(table.capacity(), capacity * 2);
                    capacity = table.capacity();
                    for j in 0..=i {
                        assert_eq!(table.find(&j), Some(&(j * 3)), "{policy:?}");
                    }
                }
            }

            assert_eq!(table.len(), 5000);
            for i in 0..5000u64 {
                assert_eq!(table.find(&i), Some(&(i * 3)), "{policy:?}");
            }
            assert_eq!(table.find(&5000), None);
        }
    }

    #[test]
    fn test_load_factor_invariant() {
        for (load_factor, per_mille) in [(0.5f32, 500u128), (0.75, 750), (0.85, 850)] {
            let config = Config::default().load_factor(load_factor);
            let mut table = HashTable::with_config_and_hasher(config, SipHashBuilder::default());
            for i in 0..2000u32 {
                table.set(i, ());
                assert!(
                    (table.len() as u128) * 1000 < table.capacity() as u128 * per_mille,
                    "{} entries in {} slots",
                    table.len(),
                    table.capacity()
                );
                assert!(table.capacity().is_power_of_two());
            }
        }
    }

    #[test]
    fn test_cached_hash_is_digest_plus_one() {
        let table_hasher = SipHashBuilder::default();
        let mut table = HashTable::with_hasher(table_hasher.clone());
        for i in 0..100u64 {
            table.set(i, i);
        }

        for i in 0..100u64 {
            let (hash, _) = table.slot_meta(&i).unwrap();
            assert_eq!(hash, table_hasher.hash_one(i).wrapping_add(1));
            assert_ne!(hash, 0);
        }
        assert_eq!(table.slot_meta(&100), None);
    }

    #[test]
    fn test_string_length_collisions() {
        let config = Config::default()
            .initial_capacity(16)
            .probe_policy(ProbePolicy::RobinHood);
        let mut table = HashTable::with_config_and_hasher(config, StringLength);

        table.set(s("heeheee"), 123);
        table.set(s("foofoo"), 789);
        table.set(s("aaabbb"), 456);

        assert_eq!(table.len(), 3);
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.find(&s("heeheee")), Some(&123));
        assert_eq!(table.find(&s("foofoo")), Some(&789));
        assert_eq!(table.find(&s("aaabbb")), Some(&456));
        assert_eq!(table.find(&s("zzz")), None);

        // Both six-letter keys want slot 7; "aaabbb" evicts "heeheee" from
        // slot 8, which it reached with the larger displacement.
        assert_eq!(table.slot_meta(&s("foofoo")), Some((7, 0)));
        assert_eq!(table.slot_meta(&s("aaabbb")), Some((7, 1)));
        assert_eq!(table.slot_meta(&s("heeheee")), Some((8, 1)));

        assert!(table.remove(&s("heeheee")).is_err());
        assert_eq!(table.len(), 3);
        assert_eq!(table.find(&s("heeheee")), Some(&123));
        assert_eq!(table.find(&s("foofoo")), Some(&789));
        assert_eq!(table.find(&s("aaabbb")), Some(&456));
    }

    #[test]
    fn test_string_length_every_policy() {
        let words = [
            "a", "bb", "cc", "dd", "eee", "fff", "g", "hhhh", "iiii", "jj", "kkkkk", "ll",
            "mmmmmm", "n", "ooo", "pppppppp",
        ];
        for policy in POLICIES {
            let config = Config::default().probe_policy(policy);
            let mut table = HashTable::with_config_and_hasher(config, StringLength);
            for (i, word) in words.iter().enumerate() {
                table.set(s(word), i);
            }
            assert_eq!(table.len(), words.len());
            for (i, word) in words.iter().enumerate() {
                assert_eq!(table.find(&s(word)), Some(&i), "{policy:?}");
            }
            assert_eq!(table.find(&s("zz")), None);
            assert_eq!(table.find(&s("qqqqqqqqqqqq")), None);
        }
    }

    #[test]
    fn test_constant_hasher_stays_correct() {
        for policy in POLICIES {
            let config = Config::default().probe_policy(policy);
            let mut table = HashTable::with_config_and_hasher(config, Constant);
            for i in 0..300u32 {
                table.set(i, i + 1);
            }
            for i in 0..300u32 {
                assert_eq!(table.find(&i), Some(&(i + 1)), "{policy:?}");
            }
            assert_eq!(table.find(&300), None);
            assert_eq!(table.max_displacement(), 299);
        }
    }

    #[test]
    fn test_robin_hood_tighter_than_linear() {
        let hasher = SipHashBuilder::default();
        let config = Config::default().load_factor(0.85);
        let mut robin_hood = HashTable::with_config_and_hasher(
            config.probe_policy(ProbePolicy::RobinHood),
            hasher.clone(),
        );
        let mut linear =
            HashTable::with_config_and_hasher(config.probe_policy(ProbePolicy::Linear), hasher);

        for i in 0..20000u64 {
            robin_hood.set(i, ());
            linear.set(i, ());
            if i % 1000 == 999 {
                assert!(robin_hood.max_displacement() <= linear.max_displacement());
            }
        }
        let stats = robin_hood.debug_stats();
        assert!(stats.max_displacement < 64, "{stats:?}");
    }

    #[test]
    fn test_extend_and_from_iter() {
        let table: HashTable<i32, i32, SipHashBuilder> = (0..50).map(|i| (i, i * i)).collect();
        assert_eq!(table.len(), 50);
        assert_eq!(table.find(&7), Some(&49));

        let mut table = table;
        table.extend([(7, 0), (50, 2500)]);
        assert_eq!(table.len(), 51);
        assert_eq!(table.find(&7), Some(&0));
        assert_eq!(table.find(&50), Some(&2500));
    }

    #[test]
    fn test_clone_and_eq() {
        let mut original = HashTable::with_hasher(SipHashBuilder::default());
        for i in 0..40 {
            original.set(i, s("value"));
        }

        let mut cloned = original.clone();
        assert_eq!(cloned, original);

        cloned.set(0, s("changed"));
        assert_ne!(cloned, original);
        assert_eq!(original.find(&0), Some(&s("value")));
    }

    #[test]
    fn test_debug_format() {
        let mut table = HashTable::with_hasher(SipHashBuilder::default());
        table.set(1, "one");
        assert_eq!(alloc::format!("{table:?}"), "{1: \"one\"}");
    }

    #[test]
    fn test_complex_values() {
        #[derive(Debug, Clone, PartialEq)]
        struct ComplexValue {
            id: u32,
            name: String,
            tags: Vec<String>,
        }

        let mut table = HashTable::with_hasher(SipHashBuilder::default());
        let value = ComplexValue {
            id: 1,
            name: s("test"),
            tags: alloc::vec![s("tag1"), s("tag2")],
        };

        table.set(s("key1"), value.clone());
        assert_eq!(table.find(&s("key1")), Some(&value));

        if let Some(v) = table.find_mut(&s("key1")) {
            v.tags.push(s("tag3"));
        }
        assert_eq!(table.find(&s("key1")).unwrap().tags.len(), 3);
    }
}
