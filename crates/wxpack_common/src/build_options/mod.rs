pub mod alias_item;
pub mod chunk_policy;
pub mod filename_template;
pub mod loader_rule;
pub mod mode;
pub mod normalized_build_options;
pub mod source_map_type;

use std::path::PathBuf;

use crate::{AliasItem, BuildEnv, ChunkPolicy, LoaderRule};

/// Raw build options. Everything is optional; `normalize_options` fills in
/// the defaults of the mini-program build and validates the invariants.
#[derive(Default, Debug, Clone)]
pub struct BuildOptions {
  // --- Input
  pub source_root: Option<PathBuf>,
  pub entry: Option<String>,
  pub alias: Option<Vec<AliasItem>>,

  // --- Output
  pub out_dir: Option<PathBuf>,
  pub entry_filenames: Option<String>,
  pub global_object: Option<String>,
  pub stale_exempt: Option<Vec<String>>,

  // --- Transformation
  pub loader_rules: Option<Vec<LoaderRule>>,
  pub inline_limit: Option<u64>,
  pub copy_from: Option<String>,

  // --- Chunking
  pub chunks: Option<ChunkPolicy>,
  pub runtime_chunk_name: Option<String>,

  /// Captured once at construction; the pipeline never re-reads ambient
  /// environment mid-build. `None` behaves like a fully unset environment.
  pub env: Option<BuildEnv>,
}
