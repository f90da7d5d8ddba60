use std::path::Path;

use arcstr::ArcStr;
use rustc_hash::{FxHashMap, FxHashSet};
use wxpack_common::ChunkKind;
use wxpack_error::{BuildError, BuildResult};
use wxpack_utils::indexmap::{FxIndexMap, FxIndexSet};
use wxpack_utils::{path_ext::PathExt, sanitize_file_name::sanitize_file_name};

use crate::module_loader::loaders::script::ScriptModule;
use crate::types::SharedOptions;

#[derive(Debug)]
pub struct Chunk {
  pub kind: ChunkKind,
  pub name: String,
  /// Module ids in import postorder, so every module's dependencies are
  /// defined before its own body runs.
  pub modules: Vec<ArcStr>,
}

#[derive(Debug)]
pub struct ChunkGraph {
  /// Runtime first, then the shared chunk when the policy hoisted anything,
  /// then one chunk per entry in entry order.
  pub chunks: Vec<Chunk>,
  /// Every module some entry reaches. The rest never make it into a chunk.
  pub reached: FxHashSet<ArcStr>,
}

/// Assigns reachable modules to chunks: each entry gets its own chunk, and
/// modules reached by enough entries are hoisted into the shared chunk once
/// instead of being duplicated per entry.
pub fn split_chunks(
  options: &SharedOptions,
  modules: &FxIndexMap<ArcStr, ScriptModule>,
  entries: &[ArcStr],
) -> BuildResult<ChunkGraph> {
  let mut reached = FxHashSet::default();
  let mut reaching_entries: FxHashMap<ArcStr, u32> = FxHashMap::default();
  let mut entry_orders = Vec::with_capacity(entries.len());

  for entry in entries {
    let mut order = Vec::new();
    let mut visited = FxHashSet::default();
    postorder(modules, entry, &mut visited, &mut order)?;
    for id in &order {
      *reaching_entries.entry(id.clone()).or_default() += 1;
      reached.insert(id.clone());
    }
    entry_orders.push(order);
  }

  // Entries keep their own chunk even when another entry imports them.
  let hoisted: FxHashSet<ArcStr> = reaching_entries
    .iter()
    .filter(|(id, count)| {
      !entries.contains(*id)
        && **count >= options.chunks.min_chunks
        && modules[*id].source.len() as u64 >= options.chunks.min_size
    })
    .map(|(id, _)| id.clone())
    .collect();

  let mut chunks = vec![Chunk {
    kind: ChunkKind::Runtime,
    name: options.runtime_chunk_name.clone(),
    modules: Vec::new(),
  }];

  if !hoisted.is_empty() {
    // First-appearance order across entries keeps the shared chunk stable.
    let mut common_modules = FxIndexSet::default();
    for order in &entry_orders {
      for id in order {
        if hoisted.contains(id) {
          common_modules.insert(id.clone());
        }
      }
    }
    chunks.push(Chunk {
      kind: ChunkKind::Common,
      name: options.chunks.name.clone(),
      modules: common_modules.into_iter().collect(),
    });
  }

  let mut taken_names: FxIndexSet<String> =
    chunks.iter().map(|chunk| chunk.name.clone()).collect();
  for (entry, order) in entries.iter().zip(entry_orders) {
    let name = entry_chunk_name(entry, &mut taken_names);
    let modules = order.into_iter().filter(|id| !hoisted.contains(id)).collect();
    chunks.push(Chunk { kind: ChunkKind::Entry { name: name.clone() }, name, modules });
  }

  Ok(ChunkGraph { chunks, reached })
}

fn postorder(
  modules: &FxIndexMap<ArcStr, ScriptModule>,
  id: &ArcStr,
  visited: &mut FxHashSet<ArcStr>,
  order: &mut Vec<ArcStr>,
) -> BuildResult<()> {
  if !visited.insert(id.clone()) {
    return Ok(());
  }
  let Some(module) = modules.get(id) else {
    return Err(BuildError::transformation(id, "imported module was never loaded".to_string()));
  };
  for import in &module.imports {
    postorder(modules, import, visited, order)?;
  }
  order.push(id.clone());
  Ok(())
}

fn entry_chunk_name(entry: &ArcStr, taken: &mut FxIndexSet<String>) -> String {
  let base = sanitize_file_name(&Path::new(entry.as_str()).representative_file_name());
  let mut name = base.clone();
  let mut suffix = 1;
  while !taken.insert(name.clone()) {
    suffix += 1;
    name = format!("{base}-{suffix}");
  }
  name
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use arcstr::ArcStr;
  use wxpack_common::{BuildOptions, ChunkKind};
  use wxpack_utils::indexmap::FxIndexMap;

  use super::split_chunks;
  use crate::module_loader::loaders::script::ScriptModule;
  use crate::utils::normalize_options::normalize_options;

  fn module(id: &str, imports: &[&str]) -> (ArcStr, ScriptModule) {
    (
      ArcStr::from(id),
      ScriptModule {
        id: ArcStr::from(id),
        source: format!("// {id}"),
        imports: imports.iter().map(|i| ArcStr::from(*i)).collect(),
      },
    )
  }

  #[test]
  fn hoists_modules_reached_by_two_entries() {
    let modules: FxIndexMap<_, _> = [
      module("app.js", &["utils/util.js"]),
      module("pages/home/home.js", &["utils/util.js", "pages/home/data.js"]),
      module("utils/util.js", &[]),
      module("pages/home/data.js", &[]),
    ]
    .into_iter()
    .collect();

    let options = Arc::new(normalize_options(BuildOptions::default()).unwrap());
    let entries = [ArcStr::from("app.js"), ArcStr::from("pages/home/home.js")];
    let graph = split_chunks(&options, &modules, &entries).unwrap();

    assert_eq!(graph.chunks.len(), 4);
    assert_eq!(graph.chunks[0].kind, ChunkKind::Runtime);
    assert!(graph.chunks[0].modules.is_empty());

    assert_eq!(graph.chunks[1].kind, ChunkKind::Common);
    assert_eq!(graph.chunks[1].modules, ["utils/util.js"]);

    assert_eq!(graph.chunks[2].name, "app");
    assert_eq!(graph.chunks[2].modules, ["app.js"]);

    // Single-entry modules stay in their entry chunk.
    assert_eq!(graph.chunks[3].name, "home");
    assert_eq!(graph.chunks[3].modules, ["pages/home/data.js", "pages/home/home.js"]);

    assert_eq!(graph.reached.len(), 4);
  }

  #[test]
  fn single_entry_produces_no_common_chunk() {
    let modules: FxIndexMap<_, _> =
      [module("app.js", &["utils/util.js"]), module("utils/util.js", &[])].into_iter().collect();

    let options = Arc::new(normalize_options(BuildOptions::default()).unwrap());
    let graph = split_chunks(&options, &modules, &[ArcStr::from("app.js")]).unwrap();

    assert_eq!(graph.chunks.len(), 2);
    assert_eq!(graph.chunks[0].kind, ChunkKind::Runtime);
    assert_eq!(graph.chunks[1].modules, ["utils/util.js", "app.js"]);
  }

  #[test]
  fn entries_imported_by_other_entries_are_not_hoisted() {
    let modules: FxIndexMap<_, _> = [
      module("app.js", &["pages/home/home.js"]),
      module("pages/home/home.js", &["utils/util.js"]),
      module("utils/util.js", &[]),
    ]
    .into_iter()
    .collect();

    let options = Arc::new(normalize_options(BuildOptions::default()).unwrap());
    let entries = [ArcStr::from("app.js"), ArcStr::from("pages/home/home.js")];
    let graph = split_chunks(&options, &modules, &entries).unwrap();

    // util is shared and hoists; the imported entry keeps its own chunk.
    assert_eq!(graph.chunks[1].kind, ChunkKind::Common);
    assert_eq!(graph.chunks[1].modules, ["utils/util.js"]);
    assert_eq!(graph.chunks[2].name, "app");
    assert_eq!(graph.chunks[2].modules, ["pages/home/home.js", "app.js"]);
    assert_eq!(graph.chunks[3].name, "home");
    assert_eq!(graph.chunks[3].modules, ["pages/home/home.js"]);
  }

  #[test]
  fn colliding_entry_names_get_suffixes() {
    let modules: FxIndexMap<_, _> =
      [module("pages/home/index.js", &[]), module("home.js", &[])].into_iter().collect();

    let options = Arc::new(normalize_options(BuildOptions::default()).unwrap());
    let entries = [ArcStr::from("pages/home/index.js"), ArcStr::from("home.js")];
    let graph = split_chunks(&options, &modules, &entries).unwrap();

    assert_eq!(graph.chunks[1].name, "home");
    assert_eq!(graph.chunks[2].name, "home-2");
  }

  #[test]
  fn import_cycles_terminate() {
    let modules: FxIndexMap<_, _> =
      [module("a.js", &["b.js"]), module("b.js", &["a.js"])].into_iter().collect();

    let options = Arc::new(normalize_options(BuildOptions::default()).unwrap());
    let graph = split_chunks(&options, &modules, &[ArcStr::from("a.js")]).unwrap();
    assert_eq!(graph.chunks[1].modules, ["b.js", "a.js"]);
  }
}
