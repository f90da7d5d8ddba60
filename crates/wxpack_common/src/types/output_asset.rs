use crate::StrOrBytes;

/// A file the build emits under the output root. `filename` is the
/// output-relative slash path.
#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub filename: String,
  pub content: StrOrBytes,
}

impl OutputAsset {
  pub fn filename(&self) -> &str {
    &self.filename
  }

  pub fn content_as_bytes(&self) -> &[u8] {
    self.content.as_bytes()
  }
}
