/// Shared-code extraction policy. A module reached by at least `min_chunks`
/// entries whose source is at least `min_size` bytes is hoisted into the
/// chunk named `name`.
#[derive(Debug, Clone)]
pub struct ChunkPolicy {
  pub name: String,
  pub min_chunks: u32,
  pub min_size: u64,
}

impl Default for ChunkPolicy {
  fn default() -> Self {
    Self { name: "common".to_string(), min_chunks: 2, min_size: 0 }
  }
}
