use std::path::PathBuf;

use rustc_hash::FxHashSet;
use wxpack_common::{
  BuildOptions, FilenameTemplate, NormalizedBuildOptions, default_loader_rules,
};
use wxpack_error::{BuildError, BuildResult};

/// The Configuration Builder. Pure given its inputs: no filesystem access,
/// no ambient environment reads (the caller captures `BuildEnv` explicitly).
/// Filesystem-facing checks live in `validate_options`.
pub fn normalize_options(mut raw: BuildOptions) -> BuildResult<NormalizedBuildOptions> {
  let env = raw.env.take().unwrap_or_default();
  let mode = env.mode();
  let source_map = env.source_map_type();

  let entry_filenames = raw
    .entry_filenames
    .map_or_else(|| Ok(FilenameTemplate::default()), FilenameTemplate::new)
    .map_err(BuildError::configuration)?;

  let global_object = raw.global_object.unwrap_or_else(|| "wx".to_string());
  if global_object.is_empty() {
    return Err(BuildError::configuration("global object must be a non-empty identifier"));
  }

  let loader_rules = raw.loader_rules.unwrap_or_else(default_loader_rules);
  // The copy exclusion list is derived from the rule table instead of being
  // maintained by hand, so it cannot drift out of sync with the loaders.
  let copy_ignore_extensions = loader_rules
    .iter()
    .flat_map(|rule| rule.extensions.iter().cloned())
    .collect::<FxHashSet<String>>();

  let chunks = raw.chunks.unwrap_or_default();
  if chunks.min_chunks < 2 {
    return Err(BuildError::configuration(format!(
      "chunk policy requires min_chunks >= 2 to justify extraction, got {}",
      chunks.min_chunks
    )));
  }

  let runtime_chunk_name = raw.runtime_chunk_name.unwrap_or_else(|| "runtime".to_string());
  if runtime_chunk_name == chunks.name {
    return Err(BuildError::configuration(format!(
      "runtime chunk name \"{runtime_chunk_name}\" must differ from the common chunk name"
    )));
  }

  let alias = raw.alias.unwrap_or_else(|| vec![("@", "").into(), ("@img", "images").into()]);
  for item in &alias {
    let starts_like_a_path = item
      .token
      .chars()
      .next()
      .map_or(true, |first| first.is_ascii_alphanumeric() || matches!(first, '.' | '/'));
    if starts_like_a_path {
      return Err(BuildError::configuration(format!(
        "alias token \"{}\" must start with a non-path character",
        item.token
      )));
    }
  }

  let normalized = NormalizedBuildOptions {
    source_root: raw.source_root.unwrap_or_else(|| PathBuf::from("src")),
    entry: raw.entry.unwrap_or_else(|| "./app.js".to_string()),
    alias,
    out_dir: raw.out_dir.unwrap_or_else(|| PathBuf::from("dist")),
    entry_filenames,
    global_object,
    stale_exempt: raw.stale_exempt.unwrap_or_default(),
    loader_rules,
    inline_limit: raw.inline_limit.unwrap_or(50_000),
    copy_from: raw.copy_from.unwrap_or_else(|| "**".to_string()),
    copy_ignore_extensions,
    chunks,
    runtime_chunk_name,
    env,
    mode,
    source_map,
  };

  debug_assert!(
    normalized
      .loader_rules
      .iter()
      .flat_map(|rule| rule.extensions.iter())
      .all(|extension| normalized.copy_ignore_extensions.contains(extension)),
    "copy exclusion list must cover every loader-claimed extension"
  );

  Ok(normalized)
}

#[cfg(test)]
mod tests {
  use wxpack_common::{BuildEnv, BuildOptions, ChunkPolicy, Mode, SourceMapType};

  use super::normalize_options;

  #[test]
  fn defaults_mirror_the_mini_program_build() {
    let options = normalize_options(BuildOptions::default()).unwrap();

    assert_eq!(options.entry, "./app.js");
    assert_eq!(options.global_object, "wx");
    assert_eq!(options.inline_limit, 50_000);
    assert_eq!(options.chunks.name, "common");
    assert_eq!(options.chunks.min_chunks, 2);
    assert_eq!(options.runtime_chunk_name, "runtime");
    assert_eq!(options.mode, Mode::Development);
    assert_eq!(options.source_map, SourceMapType::Inline);
  }

  #[test]
  fn release_env_flips_mode_and_source_maps() {
    let options = normalize_options(BuildOptions {
      env: Some(BuildEnv { build_type: Some("release".to_string()), node_env: None }),
      ..Default::default()
    })
    .unwrap();

    assert_eq!(options.mode, Mode::Production);
    assert_eq!(options.source_map, SourceMapType::External);
  }

  #[test]
  fn copy_ignore_is_computed_from_loader_rules() {
    let options = normalize_options(BuildOptions::default()).unwrap();

    for extension in ["js", "scss", "wxss", "wxml", "jpg", "jpeg", "png", "gif", "bmp"] {
      assert!(options.copy_ignore_extensions.contains(extension), "missing {extension}");
    }
    assert!(options.should_copy("app.json"));
    assert!(!options.should_copy("app.js"));
    assert!(!options.should_copy("images/logo.png"));
  }

  #[test]
  fn rejects_invalid_configuration() {
    assert!(normalize_options(BuildOptions {
      entry_filenames: Some("bundle.js".to_string()),
      ..Default::default()
    })
    .is_err());

    assert!(normalize_options(BuildOptions {
      chunks: Some(ChunkPolicy { min_chunks: 1, ..Default::default() }),
      ..Default::default()
    })
    .is_err());

    assert!(normalize_options(BuildOptions {
      runtime_chunk_name: Some("common".to_string()),
      ..Default::default()
    })
    .is_err());

    assert!(normalize_options(BuildOptions {
      alias: Some(vec![("src", "").into()]),
      ..Default::default()
    })
    .is_err());
  }
}
