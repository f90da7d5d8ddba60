use std::path::PathBuf;

/// A symbolic import prefix. `target` is relative to the source root, so
/// `("@", "")` maps `@/a.js` onto `<source_root>/a.js`.
#[derive(Debug, Clone)]
pub struct AliasItem {
  pub token: String,
  pub target: PathBuf,
}

impl From<(&str, &str)> for AliasItem {
  fn from((token, target): (&str, &str)) -> Self {
    Self { token: token.to_string(), target: PathBuf::from(target) }
  }
}
