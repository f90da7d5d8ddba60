#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrOrBytes {
  Str(String),
  Bytes(Vec<u8>),
}

impl StrOrBytes {
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      Self::Str(content) => content.as_bytes(),
      Self::Bytes(content) => content,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Str(content) => Some(content),
      Self::Bytes(_) => None,
    }
  }
}

impl From<String> for StrOrBytes {
  fn from(content: String) -> Self {
    Self::Str(content)
  }
}

impl From<Vec<u8>> for StrOrBytes {
  fn from(content: Vec<u8>) -> Self {
    Self::Bytes(content)
  }
}
