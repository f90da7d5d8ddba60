pub mod loaders;

use std::sync::Arc;

use arcstr::ArcStr;
use rustc_hash::FxHashSet;
use wxpack_common::OutputAsset;
use wxpack_error::{BuildError, BuildResult};
use wxpack_utils::indexmap::FxIndexMap;

use crate::module_loader::loaders::{
  asset::{LoadedAsset, load_asset},
  script::{ScriptModule, load_script},
  stylesheet::load_stylesheet,
  template::load_template,
};
use crate::scan_stage::ScanStageOutput;
use crate::types::{SharedFileSystem, SharedOptions};

/// Everything the load stage produced: the script module graph, the assets
/// already rendered to their final form, and which modules are inlined
/// assets (they only earn a standalone file if nothing imports them).
#[derive(Debug)]
pub struct ModuleLoaderOutput {
  /// Keyed by module id, in the order the loaders finished folding back
  /// (scan order, so iteration is deterministic).
  pub modules: FxIndexMap<ArcStr, ScriptModule>,
  pub emitted: Vec<OutputAsset>,
  pub inlined_assets: Vec<ArcStr>,
  /// Asset modules whose file is already emitted verbatim. An unimported one
  /// is normal (templates reference it by path), not a reachability problem.
  pub copied_assets: FxHashSet<ArcStr>,
}

enum Loaded {
  Module(ScriptModule),
  Asset(LoadedAsset),
  Emitted(OutputAsset),
}

/// Runs every classified file through its loader concurrently. Results are
/// folded back in scan order so the output is deterministic regardless of
/// task scheduling; failures from all files are aggregated into one error.
pub async fn load_all(
  fs: &SharedFileSystem,
  options: &SharedOptions,
  scan_output: &ScanStageOutput,
) -> BuildResult<ModuleLoaderOutput> {
  let mut handles = Vec::new();

  for rel_path in &scan_output.scripts {
    let (fs, options, rel_path) = (Arc::clone(fs), Arc::clone(options), rel_path.clone());
    handles.push(tokio::spawn(async move {
      load_script(&*fs, &options, &rel_path).map(Loaded::Module)
    }));
  }
  for rel_path in &scan_output.assets {
    let (fs, options, rel_path) = (Arc::clone(fs), Arc::clone(options), rel_path.clone());
    handles.push(tokio::spawn(async move {
      load_asset(&*fs, &options, &rel_path).map(Loaded::Asset)
    }));
  }
  for rel_path in &scan_output.stylesheets {
    let (fs, options, rel_path) = (Arc::clone(fs), Arc::clone(options), rel_path.clone());
    handles.push(tokio::spawn(async move {
      load_stylesheet(&*fs, &options, &rel_path).map(Loaded::Emitted)
    }));
  }
  for rel_path in &scan_output.templates {
    let (fs, options, rel_path) = (Arc::clone(fs), Arc::clone(options), rel_path.clone());
    handles.push(tokio::spawn(async move {
      load_template(&*fs, &options, &rel_path).map(Loaded::Emitted)
    }));
  }
  for rel_path in &scan_output.copies {
    let (fs, options, rel_path) = (Arc::clone(fs), Arc::clone(options), rel_path.clone());
    handles.push(tokio::spawn(async move {
      let bytes = fs
        .read(&options.source_root.join(&rel_path))
        .map_err(|error| BuildError::transformation(&rel_path, error.to_string()))?;
      Ok(Loaded::Emitted(OutputAsset { filename: rel_path, content: bytes.into() }))
    }));
  }

  let mut output = ModuleLoaderOutput {
    modules: FxIndexMap::default(),
    emitted: Vec::new(),
    inlined_assets: Vec::new(),
    copied_assets: FxHashSet::default(),
  };
  let mut errors: Vec<anyhow::Error> = Vec::new();

  for handle in futures::future::join_all(handles).await {
    let result = handle.map_err(|join_error| BuildError::from(anyhow::Error::from(join_error)))?;
    match result {
      Ok(Loaded::Module(module)) => {
        output.modules.insert(module.id.clone(), module);
      }
      Ok(Loaded::Asset(LoadedAsset::Inlined(module))) => {
        output.inlined_assets.push(module.id.clone());
        output.modules.insert(module.id.clone(), module);
      }
      Ok(Loaded::Asset(LoadedAsset::Copied { module, file })) => {
        output.copied_assets.insert(module.id.clone());
        output.modules.insert(module.id.clone(), module);
        output.emitted.push(file);
      }
      Ok(Loaded::Emitted(asset)) => output.emitted.push(asset),
      Err(error) => errors.extend(error.into_vec()),
    }
  }

  if !errors.is_empty() {
    return Err(errors.into());
  }

  tracing::debug!(
    modules = output.modules.len(),
    emitted = output.emitted.len(),
    "loaded source files"
  );
  Ok(output)
}
