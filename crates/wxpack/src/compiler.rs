use std::sync::Arc;

use arcstr::ArcStr;
use wxpack_common::{BuildOptions, NormalizedBuildOptions};
use wxpack_error::BuildResult;
use wxpack_fs::OsFileSystem;

use crate::generate_stage::generate;
use crate::module_loader::load_all;
use crate::plugin::{BuildStartContext, SharedPlugin};
use crate::scan_stage::scan;
use crate::types::bundle_output::BundleOutput;
use crate::types::{SharedFileSystem, SharedOptions};
use crate::utils::clean_output_dir::clean_output_dir;
use crate::utils::normalize_options::normalize_options;
use crate::utils::resolve_id::resolve_id;
use crate::utils::validate_options::validate_options;

pub struct Compiler {
  fs: SharedFileSystem,
  options: SharedOptions,
  plugins: Vec<SharedPlugin>,
}

impl Compiler {
  pub fn new(options: BuildOptions) -> BuildResult<Self> {
    Self::with_fs(options, Arc::new(OsFileSystem), Vec::new())
  }

  /// The test seam: any filesystem, any plugin list. Configuration errors
  /// surface here, before a build is ever attempted.
  pub fn with_fs(
    options: BuildOptions,
    fs: SharedFileSystem,
    plugins: Vec<SharedPlugin>,
  ) -> BuildResult<Self> {
    let options = normalize_options(options)?;
    Ok(Self { fs, options: Arc::new(options), plugins })
  }

  pub fn options(&self) -> &NormalizedBuildOptions {
    &self.options
  }

  /// Runs the build in memory and returns the assets without touching the
  /// output directory.
  pub async fn generate(&self) -> BuildResult<BundleOutput> {
    self.bundle().await
  }

  /// Runs the build and writes every asset under the output directory,
  /// clearing stale files from previous builds first.
  pub async fn write(&self) -> BuildResult<BundleOutput> {
    validate_options(&*self.fs, &self.options)?;
    clean_output_dir(&*self.fs, &self.options)?;

    let output = self.bundle().await?;
    for asset in &output.assets {
      self
        .fs
        .write(&self.options.out_dir.join(&asset.filename), asset.content.as_bytes())
        .map_err(anyhow::Error::from)?;
    }

    tracing::info!(assets = output.assets.len(), out_dir = ?self.options.out_dir, "build written");
    Ok(output)
  }

  async fn bundle(&self) -> BuildResult<BundleOutput> {
    tracing::debug!(mode = %self.options.mode, entry = %self.options.entry, "starting build");
    validate_options(&*self.fs, &self.options)?;

    let mut ctx = BuildStartContext::default();
    for plugin in &self.plugins {
      plugin.build_start(&mut ctx)?;
    }

    let entries = self.resolve_entries(&ctx)?;
    let scan_output = scan(&*self.fs, &self.options)?;
    let loader_output = load_all(&self.fs, &self.options, &scan_output).await?;

    let mut warnings = Vec::new();
    let mut assets = generate(&self.options, &loader_output, &entries, &mut warnings)?;
    assets.extend(loader_output.emitted);

    for plugin in &self.plugins {
      plugin.generate_bundle(&mut assets)?;
    }

    Ok(BundleOutput { assets, warnings })
  }

  fn resolve_entries(&self, ctx: &BuildStartContext) -> BuildResult<Vec<ArcStr>> {
    let mut entries = vec![resolve_id(&*self.fs, &self.options, &self.options.entry, None)?];
    for specifier in ctx.added_entries() {
      let id = resolve_id(&*self.fs, &self.options, specifier, None)?;
      if !entries.contains(&id) {
        entries.push(id);
      }
    }
    Ok(entries)
  }
}
