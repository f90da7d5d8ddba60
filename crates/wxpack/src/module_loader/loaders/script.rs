use std::sync::LazyLock;

use arcstr::ArcStr;
use regex::{Captures, Regex};
use wxpack_common::NormalizedBuildOptions;
use wxpack_error::{BuildError, BuildResult};
use wxpack_fs::FileSystem;

use crate::utils::resolve_id::resolve_id;

/// A script (or asset) module participating in the chunk graph. `source` is
/// the transformed body: env references baked in, specifiers rewritten to
/// module ids.
#[derive(Debug, Clone)]
pub struct ScriptModule {
  pub id: ArcStr,
  pub source: String,
  pub imports: Vec<ArcStr>,
}

impl ScriptModule {
  /// A module with no imports (inlined or copied assets).
  pub fn leaf(id: &str, source: String) -> Self {
    Self { id: ArcStr::from(id), source, imports: Vec::new() }
  }
}

static IMPORT_STAR: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?m)^(\s*)import\s*\*\s*as\s+(\w+)\s+from\s*['"]([^'"]+)['"]\s*;?"#).unwrap()
});
static IMPORT_NAMED: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?m)^(\s*)import\s*(\{[^}]*\})\s*from\s*['"]([^'"]+)['"]\s*;?"#).unwrap()
});
static IMPORT_DEFAULT: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?m)^(\s*)import\s+(\w+)\s+from\s*['"]([^'"]+)['"]\s*;?"#).unwrap()
});
static IMPORT_BARE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?m)^(\s*)import\s*['"]([^'"]+)['"]\s*;?"#).unwrap()
});
static EXPORT_DEFAULT: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^(\s*)export\s+default\s+").unwrap());
static REQUIRE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"\brequire\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());

pub fn load_script(
  fs: &dyn FileSystem,
  options: &NormalizedBuildOptions,
  rel_path: &str,
) -> BuildResult<ScriptModule> {
  let source = fs
    .read_to_string(&options.source_root.join(rel_path))
    .map_err(|error| BuildError::transformation(rel_path, error.to_string()))?;

  let mut source = inject_env(options, source);
  source = rewrite_esm_to_cjs(&source);

  let mut imports = Vec::new();
  let mut errors = Vec::new();
  let source = REQUIRE
    .replace_all(&source, |caps: &Captures| {
      match resolve_id(fs, options, &caps[1], Some(rel_path)) {
        Ok(id) => {
          let rewritten = format!("require(\"{id}\")");
          if !imports.contains(&id) {
            imports.push(id);
          }
          rewritten
        }
        Err(error) => {
          errors.extend(error.into_vec());
          caps[0].to_string()
        }
      }
    })
    .into_owned();

  if !errors.is_empty() {
    return Err(errors.into());
  }

  Ok(ScriptModule { id: ArcStr::from(rel_path), source, imports })
}

/// Bakes the captured environment into the code, replacing every variable
/// reference with its JSON-encoded value.
fn inject_env(options: &NormalizedBuildOptions, mut source: String) -> String {
  for (reference, value) in options.env.injected_values() {
    source = source.replace(reference, &value);
  }
  source
}

/// The transpilation subset: top-level ESM imports become `require` calls
/// and `export default` becomes a `module.exports` assignment. Everything
/// else passes through untouched.
fn rewrite_esm_to_cjs(source: &str) -> String {
  let source = IMPORT_STAR.replace_all(source, "${1}var $2 = require(\"$3\");");
  let source = IMPORT_NAMED.replace_all(&source, "${1}var $2 = require(\"$3\");");
  let source = IMPORT_DEFAULT.replace_all(&source, "${1}var $2 = require(\"$3\");");
  let source = IMPORT_BARE.replace_all(&source, "${1}require(\"$2\");");
  EXPORT_DEFAULT.replace_all(&source, "${1}module.exports = ").into_owned()
}
