use arcstr::ArcStr;
use wxpack_common::{ChunkKind, OutputAsset, SourceMapType};
use wxpack_error::{BuildError, BuildResult};
use wxpack_sourcemap::SourceJoiner;
use wxpack_utils::indexmap::FxIndexMap;

use crate::generate_stage::chunking::Chunk;
use crate::module_loader::loaders::script::ScriptModule;
use crate::types::SharedOptions;

/// Renders one chunk into its output file, plus a `.map` companion when the
/// external source-map strategy is active.
pub fn render_chunk_to_assets(
  options: &SharedOptions,
  modules: &FxIndexMap<ArcStr, ScriptModule>,
  chunk: &Chunk,
) -> BuildResult<Vec<OutputAsset>> {
  let filename = options.entry_filenames.render(&chunk.name);
  let compact = options.is_production();
  let mut joiner = SourceJoiner::new();

  if chunk.kind == ChunkKind::Runtime {
    joiner.push_plain(&runtime_source(&options.global_object));
  }

  for id in &chunk.modules {
    let Some(module) = modules.get(id) else {
      return Err(BuildError::transformation(id, "module missing at render time".to_string()));
    };
    joiner.push_plain(&format!(
      "{}.__wxpack_define__(\"{id}\", function (module, exports, require) {{",
      options.global_object
    ));
    joiner.push_source(id, &module.source);
    joiner.push_plain("});");
    if !compact {
      joiner.push_plain("");
    }
  }

  if let ChunkKind::Entry { .. } = chunk.kind {
    let entry_id = chunk.modules.last().ok_or_else(|| {
      BuildError::transformation(&filename, "entry chunk rendered without modules".to_string())
    })?;
    joiner.push_plain(&format!(
      "{}.__wxpack_require__(\"{entry_id}\");",
      options.global_object
    ));
  }

  let (mut content, map) = joiner.join(Some(filename.clone()));
  let mut assets = Vec::with_capacity(2);

  match options.source_map {
    SourceMapType::Inline => {
      content.push_str(&format!("//# sourceMappingURL={}\n", map.to_data_uri()));
    }
    SourceMapType::External => {
      let map_filename = format!("{filename}.map");
      content.push_str(&format!("//# sourceMappingURL={map_filename}\n"));
      assets.push(OutputAsset { filename: map_filename, content: map.to_json().into() });
    }
    SourceMapType::None => {}
  }

  assets.insert(0, OutputAsset { filename, content: content.into() });
  Ok(assets)
}

/// The bootstrap installed on the host global: a module registry, a memoizing
/// `require`, and the `define` the chunk wrappers call. It must be loaded
/// before any other chunk.
fn runtime_source(global_object: &str) -> String {
  format!(
    r#"(function (global) {{
  var modules = (global.__wxpack_modules__ = global.__wxpack_modules__ || {{}});
  var cache = (global.__wxpack_cache__ = global.__wxpack_cache__ || {{}});
  global.__wxpack_define__ = function (id, factory) {{
    modules[id] = factory;
  }};
  global.__wxpack_require__ = function (id) {{
    if (cache[id]) return cache[id].exports;
    var module = (cache[id] = {{ exports: {{}} }});
    modules[id](module, module.exports, global.__wxpack_require__);
    return module.exports;
  }};
}})({global_object});"#
  )
}
