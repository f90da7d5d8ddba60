use std::sync::LazyLock;

use regex::{Captures, Regex};
use wxpack_common::{NormalizedBuildOptions, OutputAsset};
use wxpack_error::{BuildError, BuildResult};
use wxpack_fs::FileSystem;

static SRC_ATTR: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"\bsrc\s*=\s*("([^"]*)"|'([^']*)')"#).unwrap());

/// Emits a template at its relative path with every relative `src` reference
/// rewritten root-relative, so a page moved between directories keeps
/// resolving its images.
pub fn load_template(
  fs: &dyn FileSystem,
  options: &NormalizedBuildOptions,
  rel_path: &str,
) -> BuildResult<OutputAsset> {
  let source = fs
    .read_to_string(&options.source_root.join(rel_path))
    .map_err(|error| BuildError::transformation(rel_path, error.to_string()))?;

  let rewritten = rewrite_src_refs(&source, rel_path);
  Ok(OutputAsset { filename: rel_path.to_string(), content: rewritten.into() })
}

fn rewrite_src_refs(source: &str, rel_path: &str) -> String {
  let dir = match rel_path.rsplit_once('/') {
    Some((dir, _)) => dir,
    None => "",
  };

  SRC_ATTR
    .replace_all(source, |caps: &Captures| {
      let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
      match rebase(value, dir) {
        Some(rebased) => format!("src=\"{rebased}\""),
        None => caps[0].to_string(),
      }
    })
    .into_owned()
}

/// Root-relative form of a relative reference, or `None` when the value is
/// already absolute, remote, a data URI, or bound at runtime.
fn rebase(value: &str, dir: &str) -> Option<String> {
  if value.is_empty()
    || value.starts_with('/')
    || value.starts_with("data:")
    || value.starts_with("http")
    || value.contains("{{")
  {
    return None;
  }

  let mut segments: Vec<&str> = if dir.is_empty() { Vec::new() } else { dir.split('/').collect() };
  for segment in value.split('/') {
    match segment {
      "" | "." => {}
      ".." => {
        // References escaping the source root are left for the host to flag.
        segments.pop()?;
      }
      _ => segments.push(segment),
    }
  }
  Some(format!("/{}", segments.join("/")))
}
