#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoaderKind {
  /// Raster images: inlined as a data URI below the size threshold, copied
  /// with their relative path preserved otherwise.
  Asset,
  /// Scripts: env injection, import rewriting, chunk graph membership.
  Script,
  /// `scss`/`wxss` sources compiled to flat `wxss`.
  Stylesheet,
  /// `wxml` markup copied with internal references rewritten root-relative.
  Template,
}

/// Pairs a file-type matcher with the loader applied to matching files.
/// Rules are ordered; the first match wins for overlapping patterns.
#[derive(Debug, Clone)]
pub struct LoaderRule {
  pub kind: LoaderKind,
  /// Extensions without the leading dot.
  pub extensions: Vec<String>,
  /// Glob over the slash-separated source-relative path. A rule without an
  /// include filter matches everywhere.
  pub include: Option<String>,
  pub exclude: Vec<String>,
}

impl LoaderRule {
  pub fn new(kind: LoaderKind, extensions: &[&str]) -> Self {
    Self {
      kind,
      extensions: extensions.iter().map(ToString::to_string).collect(),
      include: None,
      exclude: Vec::new(),
    }
  }

  #[must_use]
  pub fn with_include(mut self, glob: impl Into<String>) -> Self {
    self.include = Some(glob.into());
    self
  }

  #[must_use]
  pub fn with_exclude(mut self, glob: impl Into<String>) -> Self {
    self.exclude.push(glob.into());
    self
  }

  pub fn matches(&self, rel_path: &str, extension: &str) -> bool {
    self.extensions.iter().any(|candidate| candidate == extension)
      && self.include.as_ref().map_or(true, |glob| fast_glob::glob_match(glob, rel_path))
      && !self.exclude.iter().any(|glob| fast_glob::glob_match(glob, rel_path))
  }
}

/// The rule table of the mini-program build. A filter that ends up matching
/// nothing is silently inert, not an error; the template rule deliberately
/// carries no include filter.
pub fn default_loader_rules() -> Vec<LoaderRule> {
  vec![
    LoaderRule::new(LoaderKind::Asset, &["jpg", "png", "gif", "bmp", "jpeg"]),
    LoaderRule::new(LoaderKind::Script, &["js"])
      .with_include("**")
      .with_exclude("node_modules/**"),
    LoaderRule::new(LoaderKind::Stylesheet, &["scss", "wxss"]).with_include("**"),
    LoaderRule::new(LoaderKind::Template, &["wxml"]),
  ]
}

/// The extension of a slash-separated relative path, if it has one.
pub fn file_extension(rel_path: &str) -> Option<&str> {
  let file_name = rel_path.rsplit('/').next().unwrap_or(rel_path);
  file_name.rsplit('.').next().filter(|ext| *ext != file_name)
}

#[test]
fn test_first_match_and_filters() {
  let rules = default_loader_rules();

  let rule = |path: &str| {
    let ext = file_extension(path).unwrap_or_default();
    rules.iter().find(|rule| rule.matches(path, ext)).map(|rule| rule.kind)
  };

  assert_eq!(rule("images/logo.png"), Some(LoaderKind::Asset));
  assert_eq!(rule("app.js"), Some(LoaderKind::Script));
  assert_eq!(rule("node_modules/dep/index.js"), None);
  assert_eq!(rule("components/x/style.scss"), Some(LoaderKind::Stylesheet));
  assert_eq!(rule("app.wxss"), Some(LoaderKind::Stylesheet));
  assert_eq!(rule("pages/home/home.wxml"), Some(LoaderKind::Template));
  assert_eq!(rule("app.json"), None);
}

#[test]
fn test_file_extension() {
  assert_eq!(file_extension("a/b/c.wxss"), Some("wxss"));
  assert_eq!(file_extension("a.b/README"), None);
  assert_eq!(file_extension("Makefile"), None);
}
