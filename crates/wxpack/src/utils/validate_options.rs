use wxpack_common::NormalizedBuildOptions;
use wxpack_error::{BuildError, BuildResult};
use wxpack_fs::FileSystem;
use wxpack_utils::path_ext::PathExt;

/// Filesystem-facing configuration checks. These are fatal and run before
/// any compilation work starts.
pub fn validate_options(
  fs: &dyn FileSystem,
  options: &NormalizedBuildOptions,
) -> BuildResult<()> {
  if !fs.is_dir(&options.source_root) {
    return Err(BuildError::unresolved_source_root(&options.source_root.expect_to_slash()));
  }

  let entry_path = options.source_root.join(options.entry.trim_start_matches("./"));
  if !fs.is_file(&entry_path) {
    return Err(BuildError::unresolved_entry(&options.entry));
  }

  Ok(())
}
