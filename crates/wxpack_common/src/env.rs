use crate::{Mode, SourceMapType};

/// Build-affecting environment, captured exactly once at configuration time.
/// The pipeline passes this around explicitly and never re-reads ambient
/// process state mid-build.
#[derive(Debug, Clone, Default)]
pub struct BuildEnv {
  pub build_type: Option<String>,
  pub node_env: Option<String>,
}

impl BuildEnv {
  pub fn from_process() -> Self {
    Self { build_type: std::env::var("BUILD_TYPE").ok(), node_env: std::env::var("NODE_ENV").ok() }
  }

  /// `BUILD_TYPE` is free-form but the switch is binary: exactly "release"
  /// produces a release build, every other value (or unset) a debug build.
  pub fn mode(&self) -> Mode {
    if self.build_type.as_deref() == Some("release") { Mode::Production } else { Mode::Development }
  }

  pub fn source_map_type(&self) -> SourceMapType {
    match self.mode() {
      Mode::Development => SourceMapType::Inline,
      Mode::Production => SourceMapType::External,
    }
  }

  /// Variable references substituted into emitted scripts, JSON-encoded and
  /// falling back to the documented defaults.
  pub fn injected_values(&self) -> Vec<(&'static str, String)> {
    let encode = |value: &str| serde_json::Value::String(value.to_string()).to_string();
    vec![
      ("process.env.NODE_ENV", encode(self.node_env.as_deref().unwrap_or("development"))),
      ("process.env.BUILD_TYPE", encode(self.build_type.as_deref().unwrap_or("debug"))),
    ]
  }
}

#[test]
fn test_mode_precedence() {
  let env = |build_type: Option<&str>| BuildEnv {
    build_type: build_type.map(ToString::to_string),
    node_env: None,
  };

  assert_eq!(env(Some("release")).mode(), Mode::Production);
  assert_eq!(env(Some("release")).source_map_type(), SourceMapType::External);

  // Anything other than exactly "release" stays a debug build.
  for other in [None, Some(""), Some("debug"), Some("Release"), Some("production")] {
    assert_eq!(env(other).mode(), Mode::Development);
    assert_eq!(env(other).source_map_type(), SourceMapType::Inline);
  }
}

#[test]
fn test_injected_values_defaults() {
  let injected = BuildEnv::default().injected_values();
  assert_eq!(injected[0], ("process.env.NODE_ENV", "\"development\"".to_string()));
  assert_eq!(injected[1], ("process.env.BUILD_TYPE", "\"debug\"".to_string()));
}
