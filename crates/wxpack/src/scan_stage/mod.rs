use wxpack_common::{LoaderKind, NormalizedBuildOptions};
use wxpack_error::BuildResult;
use wxpack_fs::FileSystem;
use wxpack_utils::path_ext::PathExt;

use crate::utils::clean_output_dir::rel_of;

/// Source files bucketed by the loader rule that claimed them, as slash
/// paths relative to the source root.
#[derive(Debug, Default)]
pub struct ScanStageOutput {
  pub scripts: Vec<String>,
  pub stylesheets: Vec<String>,
  pub templates: Vec<String>,
  pub assets: Vec<String>,
  pub copies: Vec<String>,
}

/// Walks the source tree and classifies every file: first matching loader
/// rule wins, unclaimed files fall through to the Asset Copy Filter. A rule
/// or filter that matches nothing stays silently inert.
pub fn scan(
  fs: &dyn FileSystem,
  options: &NormalizedBuildOptions,
) -> BuildResult<ScanStageOutput> {
  let source_root = options.source_root.expect_to_slash();
  let mut output = ScanStageOutput::default();

  for file in fs.walk_files(&options.source_root).map_err(anyhow::Error::from)? {
    let Some(rel_path) = rel_of(&source_root, &file.expect_to_slash()) else { continue };
    match options.loader_for(&rel_path) {
      Some(rule) => {
        let bucket = match rule.kind {
          LoaderKind::Asset => &mut output.assets,
          LoaderKind::Script => &mut output.scripts,
          LoaderKind::Stylesheet => &mut output.stylesheets,
          LoaderKind::Template => &mut output.templates,
        };
        bucket.push(rel_path);
      }
      None if options.should_copy(&rel_path) => output.copies.push(rel_path),
      None => {}
    }
  }

  tracing::debug!(
    scripts = output.scripts.len(),
    stylesheets = output.stylesheets.len(),
    templates = output.templates.len(),
    assets = output.assets.len(),
    copies = output.copies.len(),
    "scanned source tree"
  );

  Ok(output)
}
