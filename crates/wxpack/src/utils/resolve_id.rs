use std::path::{Path, PathBuf};

use arcstr::ArcStr;
use sugar_path::SugarPath;
use wxpack_common::NormalizedBuildOptions;
use wxpack_error::{BuildError, BuildResult};
use wxpack_fs::FileSystem;
use wxpack_utils::path_ext::PathExt;

/// Resolves an import specifier to a module id: the slash path of the target
/// file relative to the source root. Supports alias prefixes, relative
/// specifiers and root-relative specifiers, with `.js` and `/index.js`
/// completion. Bare (package-style) specifiers are not resolvable here.
pub fn resolve_id(
  fs: &dyn FileSystem,
  options: &NormalizedBuildOptions,
  specifier: &str,
  importer: Option<&str>,
) -> BuildResult<ArcStr> {
  let candidate = if let Some(rest) = strip_alias(options, specifier) {
    rest
  } else if specifier.starts_with("./") || specifier.starts_with("../") {
    match importer {
      Some(importer) => Path::new(importer)
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(specifier)
        .normalize(),
      // The configured entry resolves against the source root itself.
      None => Path::new(specifier).normalize(),
    }
  } else if let Some(rest) = specifier.strip_prefix('/') {
    PathBuf::from(rest).normalize()
  } else {
    return Err(unresolved(specifier, importer, "bare specifiers are not supported"));
  };

  if candidate.starts_with("..") {
    return Err(unresolved(specifier, importer, "the specifier escapes the source root"));
  }

  complete_extension(fs, options, &candidate)
    .map(|resolved| ArcStr::from(resolved.expect_to_slash()))
    .ok_or_else(|| unresolved(specifier, importer, "no matching file under the source root"))
}

fn strip_alias(options: &NormalizedBuildOptions, specifier: &str) -> Option<PathBuf> {
  options.alias.iter().find_map(|item| {
    let rest = specifier
      .strip_prefix(item.token.as_str())
      .and_then(|rest| rest.strip_prefix('/').or(if rest.is_empty() { Some("") } else { None }))?;
    Some(item.target.join(rest).normalize())
  })
}

/// Tries the path verbatim, then with `.js`, then as a directory import.
fn complete_extension(
  fs: &dyn FileSystem,
  options: &NormalizedBuildOptions,
  candidate: &Path,
) -> Option<PathBuf> {
  if fs.is_file(&options.source_root.join(candidate)) {
    return Some(candidate.to_path_buf());
  }
  let with_js = PathBuf::from(format!("{}.js", candidate.expect_to_slash()));
  if fs.is_file(&options.source_root.join(&with_js)) {
    return Some(with_js);
  }
  let index = candidate.join("index.js");
  if fs.is_file(&options.source_root.join(&index)) {
    return Some(index);
  }
  None
}

fn unresolved(specifier: &str, importer: Option<&str>, reason: &str) -> BuildError {
  match importer {
    Some(importer) => BuildError::transformation(
      importer,
      format!("cannot resolve \"{specifier}\": {reason}"),
    ),
    None => BuildError::configuration(format!("cannot resolve \"{specifier}\": {reason}")),
  }
}
