use wxpack_common::{NormalizedBuildOptions, OutputAsset, file_extension};
use wxpack_error::{BuildError, BuildResult};
use wxpack_fs::FileSystem;

use crate::module_loader::loaders::script::ScriptModule;

/// What the asset loader produced for one raster image.
pub enum LoadedAsset {
  /// Below the inline threshold: a JS module exporting the data URI. No
  /// file is emitted unless nothing ever imports the module.
  Inlined(ScriptModule),
  /// At or above the threshold: the bytes are emitted verbatim at their
  /// relative path, and a module exporting that root-relative path keeps
  /// script imports working.
  Copied { module: ScriptModule, file: OutputAsset },
}

pub fn load_asset(
  fs: &dyn FileSystem,
  options: &NormalizedBuildOptions,
  rel_path: &str,
) -> BuildResult<LoadedAsset> {
  let bytes = fs
    .read(&options.source_root.join(rel_path))
    .map_err(|error| BuildError::transformation(rel_path, error.to_string()))?;

  if (bytes.len() as u64) < options.inline_limit {
    let encoded = base64_simd::STANDARD.encode_to_string(&bytes);
    let source = format!(
      "module.exports = \"data:{};base64,{encoded}\";",
      mime_of(rel_path)
    );
    Ok(LoadedAsset::Inlined(ScriptModule::leaf(rel_path, source)))
  } else {
    let module = ScriptModule::leaf(rel_path, format!("module.exports = \"/{rel_path}\";"));
    let file = OutputAsset { filename: rel_path.to_string(), content: bytes.into() };
    Ok(LoadedAsset::Copied { module, file })
  }
}

fn mime_of(rel_path: &str) -> mime::Mime {
  match file_extension(rel_path) {
    Some("png") => mime::IMAGE_PNG,
    Some("gif") => mime::IMAGE_GIF,
    Some("bmp") => mime::IMAGE_BMP,
    // The rule table only matches raster extensions; jpg/jpeg is the rest.
    _ => mime::IMAGE_JPEG,
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use wxpack_common::BuildOptions;
  use wxpack_fs::{FileSystem, MemoryFileSystem};

  use super::{LoadedAsset, load_asset};
  use crate::utils::normalize_options::normalize_options;

  #[test]
  fn inlines_below_threshold_and_copies_above() {
    let fs = MemoryFileSystem::new();
    fs.write(Path::new("src/images/small.png"), &vec![0u8; 40 * 1024]).unwrap();
    fs.write(Path::new("src/images/large.png"), &vec![0u8; 60 * 1024]).unwrap();

    let options = normalize_options(BuildOptions::default()).unwrap();

    match load_asset(&fs, &options, "images/small.png").unwrap() {
      LoadedAsset::Inlined(module) => {
        assert!(module.source.contains("data:image/png;base64,"));
      }
      LoadedAsset::Copied { .. } => panic!("40KB should inline under the 50000 byte limit"),
    }

    match load_asset(&fs, &options, "images/large.png").unwrap() {
      LoadedAsset::Copied { module, file } => {
        assert_eq!(file.filename, "images/large.png");
        assert_eq!(file.content_as_bytes().len(), 60 * 1024);
        assert!(module.source.contains("\"/images/large.png\""));
      }
      LoadedAsset::Inlined(_) => panic!("60KB exceeds the 50000 byte limit"),
    }
  }
}
