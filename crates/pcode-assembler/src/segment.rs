//! Append-only staging store for encoded bytes.
//!
//! Encoded instructions are written into a chain of fixed-capacity blocks.
//! Bytes are only ever appended at the end of the last block; reordering is
//! done by the node list, which refers to ranges of this store through
//! [`CodeSegment`]s. A segment may span several consecutive blocks.
//!
//! Blocks are recycled into a free pool when a compilation unit is flushed,
//! so a long compilation allocates only as many blocks as its largest unit.

/// Capacity of one staging block, in bytes.
pub const BLOCK_SIZE: usize = 4096;

/// A contiguous range of staged bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSegment {
    /// Block holding the first byte.
    pub block: usize,
    /// Offset of the first byte within that block.
    pub start: usize,
    /// Total length in bytes.
    pub len: usize,
}

/// Position in the store where the next appended byte lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePosition {
    pub block: usize,
    pub offset: usize,
}

/// Chain of staging blocks plus a pool of recycled ones.
#[derive(Debug, Default)]
pub struct SegmentStore {
    /// Blocks in allocation order; only the last one is written to.
    blocks: Vec<Vec<u8>>,
    /// Emptied blocks waiting for reuse.
    free: Vec<Vec<u8>>,
}

impl SegmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with `blocks` blocks allocated up front in the pool.
    pub fn with_capacity(blocks: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(blocks),
            free: (0..blocks).map(|_| Vec::with_capacity(BLOCK_SIZE)).collect(),
        }
    }

    /// Open a new tail block, reusing a pooled one if possible.
    fn allocate_block(&mut self) {
        let block = self
            .free
            .pop()
            .unwrap_or_else(|| Vec::with_capacity(BLOCK_SIZE));
        debug_assert!(block.is_empty());
        self.blocks.push(block);
    }

    /// Position of the next byte to be appended.
    ///
    /// Opens a block first when the tail is missing or full, so the returned
    /// position always addresses writable space.
    pub fn next_position(&mut self) -> StorePosition {
        if self.blocks.last().is_none_or(|block| block.len() == BLOCK_SIZE) {
            self.allocate_block();
        }
        let block = self.blocks.len() - 1;
        StorePosition {
            block,
            offset: self.blocks[block].len(),
        }
    }

    /// Append bytes to the tail, spilling into new blocks as needed.
    pub fn append(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            let position = self.next_position();
            let tail = &mut self.blocks[position.block];
            let room = BLOCK_SIZE - tail.len();
            let (now, rest) = bytes.split_at(room.min(bytes.len()));
            tail.extend_from_slice(now);
            bytes = rest;
        }
    }

    /// Iterate the byte slices making up `segment`, in order.
    pub fn chunks(&self, segment: CodeSegment) -> Chunks<'_> {
        Chunks {
            blocks: &self.blocks,
            block: segment.block,
            offset: segment.start,
            remaining: segment.len,
        }
    }

    /// Total bytes currently staged.
    pub fn staged_bytes(&self) -> usize {
        self.blocks.iter().map(Vec::len).sum()
    }

    /// Number of blocks in the active chain.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of blocks waiting in the free pool.
    pub fn free_blocks(&self) -> usize {
        self.free.len()
    }

    /// Move every block to the free pool, keeping its allocation.
    pub fn recycle(&mut self) {
        for mut block in self.blocks.drain(..) {
            block.clear();
            self.free.push(block);
        }
    }
}

/// Iterator over the slices of a [`CodeSegment`].
#[derive(Debug)]
pub struct Chunks<'a> {
    blocks: &'a [Vec<u8>],
    block: usize,
    offset: usize,
    remaining: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let block = self.blocks.get(self.block).unwrap_or_else(|| {
            panic!("code segment runs past the last staged block ({})", self.block)
        });
        let available = block.len().saturating_sub(self.offset);
        assert!(available > 0, "code segment covers unwritten bytes");
        let take = available.min(self.remaining);
        let chunk = &block[self.offset..self.offset + take];
        self.remaining -= take;
        self.block += 1;
        self.offset = 0;
        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(store: &SegmentStore, segment: CodeSegment) -> Vec<u8> {
        store.chunks(segment).flatten().copied().collect()
    }

    #[test]
    fn append_within_block() {
        let mut store = SegmentStore::new();
        let start = store.next_position();
        store.append(&[1, 2, 3]);

        let segment = CodeSegment {
            block: start.block,
            start: start.offset,
            len: 3,
        };
        assert_eq!(collect(&store, segment), vec![1, 2, 3]);
        assert_eq!(store.staged_bytes(), 3);
        assert_eq!(store.block_count(), 1);
    }

    #[test]
    fn append_spills_into_next_block() {
        let mut store = SegmentStore::new();
        store.append(&vec![0xAA; BLOCK_SIZE - 2]);

        let start = store.next_position();
        assert_eq!(start.offset, BLOCK_SIZE - 2);
        store.append(&[1, 2, 3, 4, 5]);
        assert_eq!(store.block_count(), 2);

        let segment = CodeSegment {
            block: start.block,
            start: start.offset,
            len: 5,
        };
        let chunks: Vec<&[u8]> = store.chunks(segment).collect();
        assert_eq!(chunks, vec![&[1u8, 2][..], &[3u8, 4, 5][..]]);
    }

    #[test]
    fn position_after_full_block_opens_new_block() {
        let mut store = SegmentStore::new();
        store.append(&vec![0; BLOCK_SIZE]);
        assert_eq!(store.block_count(), 1);

        let position = store.next_position();
        assert_eq!(position, StorePosition { block: 1, offset: 0 });
    }

    #[test]
    fn segment_spanning_many_blocks() {
        let mut store = SegmentStore::new();
        let bytes: Vec<u8> = (0..BLOCK_SIZE * 3 + 17).map(|i| i as u8).collect();
        let start = store.next_position();
        store.append(&bytes);

        let segment = CodeSegment {
            block: start.block,
            start: start.offset,
            len: bytes.len(),
        };
        assert_eq!(store.chunks(segment).count(), 4);
        assert_eq!(collect(&store, segment), bytes);
    }

    #[test]
    fn recycle_reuses_blocks() {
        let mut store = SegmentStore::with_capacity(2);
        assert_eq!(store.free_blocks(), 2);

        store.append(&vec![7; BLOCK_SIZE + 1]);
        assert_eq!(store.block_count(), 2);
        assert_eq!(store.free_blocks(), 0);

        store.recycle();
        assert_eq!(store.block_count(), 0);
        assert_eq!(store.free_blocks(), 2);
        assert_eq!(store.staged_bytes(), 0);

        store.append(&[1]);
        assert_eq!(store.free_blocks(), 1);
    }
}
