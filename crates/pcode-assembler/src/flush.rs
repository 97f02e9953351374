//! Finalizing a compilation unit.
//!
//! Flushing walks the node list once, in order, writing each node to the
//! sink. Labels take the sink position as their offset when reached and
//! immediately patch every earlier reference; later references are written
//! with the known offset directly. After the walk the unit's storage is
//! recycled for the next one.

use log::debug;
use rustc_hash::FxHashMap;

use crate::node::{Label, NodeId, NodeKind};
use crate::sink::OutputSink;
use crate::{Assembler, EmitError};

/// Outcome of flushing one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushReport {
    start: u32,
    end: u32,
    labels: FxHashMap<Label, u32>,
}

impl FlushReport {
    /// Sink offset of the first byte of the unit.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Sink offset just past the last byte of the unit.
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of bytes written.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the unit produced no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Resolved offset of a label created in the flushed unit.
    pub fn offset_of(&self, label: Label) -> Option<u32> {
        self.labels.get(&label).copied()
    }
}

fn offset32(offset: u64) -> Result<u32, EmitError> {
    u32::try_from(offset).map_err(|_| EmitError::OffsetOverflow { offset })
}

impl Assembler {
    /// Write the current unit to `sink` and start a new unit.
    ///
    /// Queued constants are emitted first. Labels of the flushed unit are
    /// invalid afterwards. The assembler is reset even when the sink fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails or an offset exceeds 32 bits.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn flush<S: OutputSink>(&mut self, mut sink: S) -> Result<FlushReport, EmitError> {
        self.drain_all();
        let result = self.write_nodes(&mut sink);
        self.reset();
        result
    }

    fn write_nodes<S: OutputSink>(&mut self, sink: &mut S) -> Result<FlushReport, EmitError> {
        let start = offset32(sink.position()?)?;
        let mut labels = FxHashMap::default();

        let mut current = self.nodes.head();
        while let Some(id) = current {
            current = self.nodes.next_of(id);
            match *self.nodes.kind(id) {
                NodeKind::Code(segment) => {
                    for chunk in self.store.chunks(segment) {
                        sink.write_bytes(chunk)?;
                    }
                }
                NodeKind::Label { offset, .. } => {
                    assert!(offset.is_none(), "label resolved twice");
                    let here = self.resolve_label(id, sink)?;
                    labels.insert(Label::new(id, self.generation), here);
                }
                NodeKind::Reference { label, .. } => {
                    let NodeKind::Label { offset: target, .. } = *self.nodes.kind(label) else {
                        panic!("reference to a non-label node");
                    };
                    match target {
                        Some(target) => sink.write_bytes(&target.to_le_bytes())?,
                        None => {
                            let here = offset32(sink.position()?)?;
                            if let NodeKind::Reference { offset, .. } = self.nodes.kind_mut(id) {
                                *offset = Some(here);
                            }
                            sink.write_word(0)?;
                        }
                    }
                }
                NodeKind::Align4 => {
                    let padding = (4 - sink.position()? % 4) % 4;
                    sink.fill(padding as usize)?;
                }
            }
        }

        let end = offset32(sink.position()?)?;
        debug!(
            "flushed unit {}: {} bytes at {}..{}, {} labels",
            self.generation,
            end - start,
            start,
            end,
            labels.len()
        );
        Ok(FlushReport { start, end, labels })
    }

    /// Give a label the current sink position and patch the references
    /// written before it.
    fn resolve_label<S: OutputSink>(&mut self, id: NodeId, sink: &mut S) -> Result<u32, EmitError> {
        let here = offset32(sink.position()?)?;
        if let NodeKind::Label { offset, .. } = self.nodes.kind_mut(id) {
            *offset = Some(here);
        }

        let mut patched = 0;
        for reference in self.nodes.references(id) {
            if let NodeKind::Reference {
                offset: Some(site), ..
            } = *self.nodes.kind(reference)
            {
                sink.seek(site as u64)?;
                sink.write_bytes(&here.to_le_bytes())?;
                patched += 1;
            }
        }
        if patched > 0 {
            sink.seek_end()?;
            debug!("label at {} patched {} earlier references", here, patched);
        }
        Ok(here)
    }
}
