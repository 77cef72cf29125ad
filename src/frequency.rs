//! Byte frequency counting, the first stage of building a code.

/// Occurrence count of every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// Index is the symbol, value is how often it was seen.
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Create a table with every count at zero.
    pub fn new() -> Self {
        FrequencyTable { counts: [0; 256] }
    }

    /// Count the bytes of `data` in one go.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.count(data);
        table
    }

    /// Add the bytes of `data` to the counts already present.
    pub fn count(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts, which is the number of bytes counted so far.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of byte values seen at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// `(symbol, count)` for every symbol with a nonzero count, in ascending
    /// symbol order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::FrequencyTable;
    use alloc::vec::Vec;

    #[test]
    fn empty_input() {
        let table = FrequencyTable::from_bytes(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.entries().count(), 0);
    }

    #[test]
    fn counts_sum_to_length() {
        let data = b"abracadabra";
        let table = FrequencyTable::from_bytes(data);
        assert_eq!(table.total(), data.len() as u64);
        assert_eq!(table.distinct(), 5);
        assert_eq!(table.get(b'a'), 5);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.get(b'z'), 0);
    }

    #[test]
    fn entries_are_sorted_by_symbol() {
        let table = FrequencyTable::from_bytes(&[200, 3, 3, 0, 200, 200]);
        let entries: Vec<_> = table.entries().collect();
        assert_eq!(entries, [(0, 1), (3, 2), (200, 3)]);
    }

    #[test]
    fn count_accumulates() {
        let mut table = FrequencyTable::new();
        table.count(&[1, 2]);
        table.count(&[2, 255]);
        assert_eq!(table.get(2), 2);
        assert_eq!(table.get(255), 1);
        assert_eq!(table.total(), 4);
    }
}
