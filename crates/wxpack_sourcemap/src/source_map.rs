use serde::Serialize;

/// A source map v3 document. Mappings produced by this crate are
/// line-grained: every generated line that originated from a module maps to
/// the corresponding line of that module's source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceMap {
  pub version: u8,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file: Option<String>,
  pub sources: Vec<String>,
  #[serde(rename = "sourcesContent")]
  pub sources_content: Vec<String>,
  pub names: Vec<String>,
  pub mappings: String,
}

impl SourceMap {
  pub fn to_json(&self) -> String {
    serde_json::to_string(self).expect("source map serialization should not fail")
  }

  /// The `data:` URI form used by the inline source-map strategy.
  pub fn to_data_uri(&self) -> String {
    let encoded = base64_simd::STANDARD.encode_to_string(self.to_json());
    format!("data:application/json;charset=utf-8;base64,{encoded}")
  }
}

#[test]
fn test_json_shape() {
  let map = SourceMap {
    version: 3,
    file: Some("app.js".to_string()),
    sources: vec!["app.js".to_string()],
    sources_content: vec!["let a = 1;".to_string()],
    names: vec![],
    mappings: "AAAA".to_string(),
  };
  let json = map.to_json();
  assert!(json.contains("\"version\":3"));
  assert!(json.contains("\"sourcesContent\""));
  assert!(map.to_data_uri().starts_with("data:application/json;charset=utf-8;base64,"));
}
