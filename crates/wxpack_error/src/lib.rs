use std::ops::{Deref, DerefMut};

/// Accumulated build failures. A build either finishes cleanly or carries
/// one or more errors back to the caller; there is no partial recovery.
#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// A configuration error: the build is rejected before any compilation
  /// work starts.
  pub fn configuration(message: impl Into<String>) -> Self {
    Self(vec![anyhow::anyhow!("Configuration error: {}", message.into())])
  }

  /// A transformation error: a loader failed on a specific file, which
  /// aborts the whole build.
  pub fn transformation(file: &str, message: impl Into<String>) -> Self {
    Self(vec![anyhow::anyhow!("Failed to transform \"{file}\": {}", message.into())])
  }

  pub fn unresolved_entry(entry: &str) -> Self {
    Self::configuration(format!("entry \"{entry}\" does not resolve to an existing script"))
  }

  pub fn unresolved_source_root(root: &str) -> Self {
    Self::configuration(format!("source root \"{root}\" does not exist"))
  }

  pub fn into_vec(self) -> Vec<anyhow::Error> {
    self.0
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (index, error) in self.0.iter().enumerate() {
      if index > 0 {
        writeln!(f)?;
      }
      write!(f, "{error}")?;
    }
    Ok(())
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;
