//! Assembler configuration.

use pcode_core::Profile;

use crate::Assembler;

/// Builder for [`Assembler`] settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerOptions {
    pub(crate) profile: Profile,
    pub(crate) block_capacity: usize,
    pub(crate) node_capacity: usize,
}

impl AssemblerOptions {
    /// Word-aligned output, one staging block and room for 64 nodes.
    pub fn new() -> Self {
        Self {
            profile: Profile::default(),
            block_capacity: 1,
            node_capacity: 64,
        }
    }

    /// Binary layout to emit.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Staging blocks to allocate up front.
    pub fn with_block_capacity(mut self, blocks: usize) -> Self {
        self.block_capacity = blocks;
        self
    }

    /// Emission nodes to reserve room for up front.
    pub fn with_node_capacity(mut self, nodes: usize) -> Self {
        self.node_capacity = nodes;
        self
    }

    /// Configured binary layout.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Number of staging blocks allocated up front.
    pub fn block_capacity(&self) -> usize {
        self.block_capacity
    }

    /// Number of emission nodes reserved up front.
    pub fn node_capacity(&self) -> usize {
        self.node_capacity
    }

    /// Create an assembler with these settings.
    pub fn build(self) -> Assembler {
        Assembler::with_options(self)
    }
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = AssemblerOptions::default();
        assert_eq!(options.profile(), Profile::WordAligned);
        assert_eq!(options.block_capacity(), 1);
        assert_eq!(options.node_capacity(), 64);
    }

    #[test]
    fn builder_chain() {
        let options = AssemblerOptions::new()
            .with_profile(Profile::ByteCompressed)
            .with_block_capacity(4)
            .with_node_capacity(512);
        assert_eq!(options.profile(), Profile::ByteCompressed);
        assert_eq!(options.block_capacity(), 4);
        assert_eq!(options.node_capacity(), 512);

        let assembler = options.build();
        assert_eq!(assembler.profile(), Profile::ByteCompressed);
    }
}
