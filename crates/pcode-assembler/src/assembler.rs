//! The assembler context.
//!
//! An [`Assembler`] owns every piece of per-unit emission state: the staged
//! bytes, the node list, the queue of pending constant pushes, the encoding
//! policy and the instruction currently receiving operands. Code generators
//! drive it through [`Assembler::emit`], [`Assembler::emit_pseudo`],
//! [`Assembler::push_immediate`] and the label operations, then call
//! [`Assembler::flush`] once per compilation unit.
//!
//! The operations are split across modules by concern:
//!
//! - `encoder`: opcode and operand encoding, direct-opcode substitution
//! - `optimizer`: draining queued constants into push instructions
//! - `flush`: offset assignment and reference patching
//! - `pseudo`: pseudo-operations for storage, branches and raw operands

use log::trace;
use pcode_core::{DirectTable, Opcode, Profile};

use crate::immediate::ImmediateQueue;
use crate::node::{Label, NodeId, NodeKind, NodeList};
use crate::options::AssemblerOptions;
use crate::policy::{EncodingPolicy, policy_for};
use crate::segment::SegmentStore;

/// Emission state for one stream of compilation units.
#[derive(Debug)]
pub struct Assembler {
    /// Profile-specific encoding decisions.
    pub(crate) policy: &'static dyn EncodingPolicy,
    /// Generic to direct opcode substitutions.
    pub(crate) direct: DirectTable,
    /// Staged instruction bytes.
    pub(crate) store: SegmentStore,
    /// Logical output order.
    pub(crate) nodes: NodeList,
    /// Constants not yet pushed.
    pub(crate) immediates: ImmediateQueue,
    /// Code node owning the most recently appended bytes.
    pub(crate) open_segment: Option<NodeId>,
    /// Instruction currently receiving operands.
    pub(crate) opcode: Option<Opcode>,
    /// Ordinal of the next operand of `opcode`.
    pub(crate) arg_index: usize,
    /// Compilation unit counter, bumped by every flush.
    pub(crate) generation: u32,
}

impl Assembler {
    /// Create an assembler for `profile` with default capacities.
    pub fn new(profile: Profile) -> Self {
        Self::with_options(AssemblerOptions::new().with_profile(profile))
    }

    /// Create an assembler from explicit options.
    pub fn with_options(options: AssemblerOptions) -> Self {
        Self {
            policy: policy_for(options.profile),
            direct: DirectTable::new(),
            store: SegmentStore::with_capacity(options.block_capacity),
            nodes: NodeList::with_capacity(options.node_capacity),
            immediates: ImmediateQueue::new(),
            open_segment: None,
            opcode: None,
            arg_index: 0,
            generation: 0,
        }
    }

    /// Active binary layout.
    pub fn profile(&self) -> Profile {
        self.policy.profile()
    }

    /// Largest script function index a call can encode in this profile.
    pub fn max_call_index(&self) -> u32 {
        self.policy.max_call_index()
    }

    /// Number of queued constants not yet emitted.
    pub fn pending_immediates(&self) -> usize {
        self.immediates.len()
    }

    /// Bytes staged for the current unit.
    pub fn staged_bytes(&self) -> usize {
        self.store.staged_bytes()
    }

    /// Number of emission nodes in the current unit.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Current compilation unit.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    // ==========================================================================
    // Immediates
    // ==========================================================================

    /// Queue a constant push.
    ///
    /// Nothing is encoded until the constant is consumed by a direct opcode
    /// or drained ahead of another instruction.
    pub fn push_immediate(&mut self, value: i32) {
        trace!("queue immediate {}", value);
        self.immediates.enqueue(value);
    }

    /// Emit every queued constant as push instructions.
    pub fn drain_all(&mut self) {
        self.drain(self.immediates.len());
    }

    // ==========================================================================
    // Labels
    // ==========================================================================

    /// Mark the current position.
    ///
    /// Queued constants are emitted first so the label lands after them.
    pub fn create_label(&mut self) -> Label {
        self.drain_all();
        let node = self.nodes.insert(NodeKind::Label {
            offset: None,
            first_ref: None,
        });
        Label::new(node, self.generation)
    }

    /// Add a reference to `label` as the next operand of the current
    /// instruction. The operand is always a 4-byte offset.
    ///
    /// # Panics
    ///
    /// Panics if no instruction is active, constants are still queued or the
    /// label is stale.
    pub fn reference(&mut self, label: Label) {
        let node = self.label_node(label);
        self.assert_no_pending("label operand");
        self.begin_arg();
        self.nodes.insert_reference(node);
    }

    /// Continue emitting right after `label`.
    ///
    /// Code emitted from here on is spliced in at the label; bytes already
    /// staged are not moved. Queued constants are emitted at the old
    /// position first.
    pub fn seek(&mut self, label: Label) {
        let node = self.label_node(label);
        self.drain_all();
        self.nodes.seek(node);
    }

    /// Continue emitting at the end of the unit.
    pub fn seek_end(&mut self) {
        self.drain_all();
        self.nodes.seek_end();
    }

    /// Pad the output to a 4-byte boundary at this point.
    ///
    /// Queued constants are emitted first so the next instruction starts on
    /// the boundary.
    pub fn align4(&mut self) {
        self.drain_all();
        self.nodes.insert(NodeKind::Align4);
    }

    /// Panic if an operand is about to be written ahead of queued constants.
    pub(crate) fn assert_no_pending(&self, what: &str) {
        assert!(
            self.immediates.is_empty(),
            "{} emitted with {} constants still queued",
            what,
            self.immediates.len()
        );
    }

    /// Resolve a label handle to its node.
    ///
    /// # Panics
    ///
    /// Panics if the label belongs to an earlier compilation unit.
    fn label_node(&self, label: Label) -> NodeId {
        assert!(
            label.generation() == self.generation,
            "label from compilation unit {} used in unit {}",
            label.generation(),
            self.generation
        );
        label.node()
    }

    /// Return to an empty unit, keeping allocations.
    pub(crate) fn reset(&mut self) {
        self.store.recycle();
        self.nodes.clear();
        self.immediates.clear();
        self.open_segment = None;
        self.opcode = None;
        self.arg_index = 0;
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}
