use wxpack_common::NormalizedBuildOptions;
use wxpack_error::BuildResult;
use wxpack_fs::FileSystem;
use wxpack_utils::path_ext::PathExt;

/// Clears the output directory before a build, keeping entries that match a
/// stale-exempt glob. Creates the directory when it does not exist yet.
pub fn clean_output_dir(
  fs: &dyn FileSystem,
  options: &NormalizedBuildOptions,
) -> BuildResult<()> {
  if !fs.is_dir(&options.out_dir) {
    fs.create_dir_all(&options.out_dir).map_err(anyhow::Error::from)?;
    return Ok(());
  }

  let out_root = options.out_dir.expect_to_slash();
  for file in fs.walk_files(&options.out_dir).map_err(anyhow::Error::from)? {
    let file_slash = file.expect_to_slash();
    let Some(rel) = rel_of(&out_root, &file_slash) else { continue };
    if options.stale_exempt.iter().any(|glob| fast_glob::glob_match(glob, &rel)) {
      continue;
    }
    fs.remove_file(&file).map_err(anyhow::Error::from)?;
  }

  Ok(())
}

pub fn rel_of(root: &str, file: &str) -> Option<String> {
  let root = root.trim_start_matches('/').trim_end_matches('/');
  let file = file.trim_start_matches('/');
  let rel = file.strip_prefix(root)?;
  if rel.is_empty() {
    return Some(String::new());
  }
  // Guard against prefix matches across path component boundaries.
  rel.strip_prefix('/').map(ToString::to_string)
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use wxpack_common::BuildOptions;
  use wxpack_fs::{FileSystem, MemoryFileSystem};

  use super::{clean_output_dir, rel_of};
  use crate::utils::normalize_options::normalize_options;

  #[test]
  fn test_rel_of() {
    assert_eq!(rel_of("/tmp/dist", "/tmp/dist/a/b.js").as_deref(), Some("a/b.js"));
    assert_eq!(rel_of("dist", "/dist/app.js").as_deref(), Some("app.js"));
    assert_eq!(rel_of("/tmp/dist", "/tmp/other/a.js"), None);
    assert_eq!(rel_of("dist", "distx/a.js"), None);
  }

  #[test]
  fn keeps_stale_exempt_assets() {
    let fs = MemoryFileSystem::new();
    fs.write(Path::new("dist/app.js"), b"old").unwrap();
    fs.write(Path::new("dist/keep/cache.bin"), b"cache").unwrap();

    let options = normalize_options(BuildOptions {
      stale_exempt: Some(vec!["keep/**".to_string()]),
      ..Default::default()
    })
    .unwrap();

    clean_output_dir(&fs, &options).unwrap();
    assert!(!fs.exists(Path::new("dist/app.js")));
    assert!(fs.exists(Path::new("dist/keep/cache.bin")));
  }
}
