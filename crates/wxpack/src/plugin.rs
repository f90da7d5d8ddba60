use std::sync::Arc;

use wxpack_common::OutputAsset;
use wxpack_error::BuildResult;

/// Context handed to `build_start`. Plugins can register extra entry points
/// before anything is loaded.
#[derive(Default)]
pub struct BuildStartContext {
  added_entries: Vec<String>,
}

impl BuildStartContext {
  /// Registers an extra entry specifier, resolved with the same rules as the
  /// configured entry.
  pub fn add_entry(&mut self, specifier: impl Into<String>) {
    self.added_entries.push(specifier.into());
  }

  pub fn added_entries(&self) -> &[String] {
    &self.added_entries
  }
}

/// Build lifecycle hooks. Both hooks default to no-ops; a failing hook
/// aborts the build.
pub trait Plugin: Send + Sync {
  fn name(&self) -> &'static str;

  /// Runs after validation, before the source tree is scanned.
  fn build_start(&self, _ctx: &mut BuildStartContext) -> BuildResult<()> {
    Ok(())
  }

  /// Runs after chunks are rendered, before anything touches disk. The
  /// asset list is the final say on what gets written.
  fn generate_bundle(&self, _assets: &mut Vec<OutputAsset>) -> BuildResult<()> {
    Ok(())
  }
}

pub type SharedPlugin = Arc<dyn Plugin>;
