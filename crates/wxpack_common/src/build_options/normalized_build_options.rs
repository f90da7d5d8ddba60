use std::path::PathBuf;

use rustc_hash::FxHashSet;

use crate::{
  AliasItem, BuildEnv, ChunkPolicy, FilenameTemplate, LoaderRule, Mode, SourceMapType,
  file_extension,
};

/// The Configuration Object: fully resolved, immutable after construction,
/// consumed exactly once per build.
#[derive(Debug)]
pub struct NormalizedBuildOptions {
  // --- Input
  pub source_root: PathBuf,
  pub entry: String,
  pub alias: Vec<AliasItem>,

  // --- Output
  pub out_dir: PathBuf,
  pub entry_filenames: FilenameTemplate,
  pub global_object: String,
  pub stale_exempt: Vec<String>,

  // --- Transformation
  pub loader_rules: Vec<LoaderRule>,
  pub inline_limit: u64,
  pub copy_from: String,
  /// Computed from the loader-rule table, never user supplied: every
  /// loader-claimed extension is excluded from the verbatim copy pass so no
  /// file is emitted twice.
  pub copy_ignore_extensions: FxHashSet<String>,

  // --- Chunking
  pub chunks: ChunkPolicy,
  pub runtime_chunk_name: String,

  // --- Environment
  pub env: BuildEnv,
  pub mode: Mode,
  pub source_map: SourceMapType,
}

impl NormalizedBuildOptions {
  /// First matching loader rule for a source-relative slash path.
  pub fn loader_for(&self, rel_path: &str) -> Option<&LoaderRule> {
    let extension = file_extension(rel_path)?;
    self.loader_rules.iter().find(|rule| rule.matches(rel_path, extension))
  }

  /// The Asset Copy Filter: a file not claimed by any loader rule is copied
  /// verbatim iff the copy glob matches and its extension is not excluded.
  pub fn should_copy(&self, rel_path: &str) -> bool {
    fast_glob::glob_match(&self.copy_from, rel_path)
      && file_extension(rel_path)
        .map_or(true, |extension| !self.copy_ignore_extensions.contains(extension))
  }

  #[inline]
  pub fn is_production(&self) -> bool {
    self.mode.is_production()
  }
}
