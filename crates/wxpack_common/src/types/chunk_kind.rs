#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkKind {
  /// Per-entry application code.
  Entry { name: String },
  /// Modules hoisted by the chunk policy.
  Common,
  /// Bootstrap machinery only, isolated so application changes don't
  /// invalidate it.
  Runtime,
}
