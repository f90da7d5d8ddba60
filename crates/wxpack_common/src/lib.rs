mod build_options;
mod env;
mod types;

pub use build_options::{
  BuildOptions, alias_item::AliasItem, chunk_policy::ChunkPolicy,
  filename_template::FilenameTemplate, loader_rule::default_loader_rules,
  loader_rule::file_extension, loader_rule::LoaderKind, loader_rule::LoaderRule, mode::Mode,
  normalized_build_options::NormalizedBuildOptions, source_map_type::SourceMapType,
};

pub use crate::{
  env::BuildEnv,
  types::{chunk_kind::ChunkKind, output_asset::OutputAsset, str_or_bytes::StrOrBytes},
};
