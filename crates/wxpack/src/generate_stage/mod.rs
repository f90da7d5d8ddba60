pub mod chunking;
pub mod render_chunk_to_assets;

use arcstr::ArcStr;
use itertools::Itertools;
use wxpack_common::OutputAsset;
use wxpack_error::BuildResult;

use crate::generate_stage::chunking::split_chunks;
use crate::generate_stage::render_chunk_to_assets::render_chunk_to_assets;
use crate::module_loader::ModuleLoaderOutput;
use crate::types::SharedOptions;

/// Turns the loaded module graph into output files: chunks for everything
/// the entries reach, standalone module files for inlined assets nothing
/// imported, and a warning per script no entry reaches.
pub fn generate(
  options: &SharedOptions,
  loader_output: &ModuleLoaderOutput,
  entries: &[ArcStr],
  warnings: &mut Vec<anyhow::Error>,
) -> BuildResult<Vec<OutputAsset>> {
  let graph = split_chunks(options, &loader_output.modules, entries)?;

  let mut assets = Vec::new();
  for chunk in &graph.chunks {
    assets.extend(render_chunk_to_assets(options, &loader_output.modules, chunk)?);
  }

  // An inlined asset nobody imports still has to exist on disk somehow, so
  // it gets its data URI module as a standalone file.
  for id in &loader_output.inlined_assets {
    if !graph.reached.contains(id) {
      let module = &loader_output.modules[id];
      assets.push(OutputAsset { filename: format!("{id}.js"), content: module.source.clone().into() });
    }
  }

  for id in loader_output.modules.keys().sorted() {
    if !graph.reached.contains(id)
      && !loader_output.inlined_assets.contains(id)
      && !loader_output.copied_assets.contains(id)
    {
      warnings.push(anyhow::anyhow!("{id} is not reachable from any entry and was not emitted"));
    }
  }

  tracing::debug!(chunks = graph.chunks.len(), assets = assets.len(), "generated chunks");
  Ok(assets)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use arcstr::ArcStr;
  use wxpack_common::BuildOptions;
  use wxpack_utils::indexmap::FxIndexMap;

  use super::generate;
  use crate::module_loader::ModuleLoaderOutput;
  use crate::module_loader::loaders::script::ScriptModule;
  use crate::utils::normalize_options::normalize_options;

  #[test]
  fn unreached_inlined_assets_become_standalone_files() {
    let modules: FxIndexMap<_, _> = [
      (ArcStr::from("app.js"), ScriptModule::leaf("app.js", "App({});".to_string())),
      (
        ArcStr::from("images/logo.png"),
        ScriptModule::leaf("images/logo.png", "module.exports = \"data:image/png;base64,AA\";".to_string()),
      ),
      (ArcStr::from("orphan.js"), ScriptModule::leaf("orphan.js", "1;".to_string())),
    ]
    .into_iter()
    .collect();

    let loader_output = ModuleLoaderOutput {
      modules,
      emitted: Vec::new(),
      inlined_assets: vec![ArcStr::from("images/logo.png")],
      copied_assets: Default::default(),
    };

    let options = Arc::new(normalize_options(BuildOptions::default()).unwrap());
    let mut warnings = Vec::new();
    let assets =
      generate(&options, &loader_output, &[ArcStr::from("app.js")], &mut warnings).unwrap();

    let filenames: Vec<_> = assets.iter().map(|a| a.filename.as_str()).collect();
    assert!(filenames.contains(&"runtime.js"));
    assert!(filenames.contains(&"app.js"));
    assert!(filenames.contains(&"images/logo.png.js"));

    // The orphan script warns instead of silently disappearing.
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].to_string().contains("orphan.js"));
  }
}
