use crate::lines_count;
use crate::source_map::SourceMap;
use crate::vlq;

enum LineMapping {
  None,
  Source { source_idx: u32, source_line: u32 },
}

/// Concatenates module sources into chunk content while recording which
/// output line came from which source line.
pub struct SourceJoiner {
  content: String,
  sources: Vec<String>,
  sources_content: Vec<String>,
  line_mappings: Vec<LineMapping>,
}

impl SourceJoiner {
  pub fn new() -> Self {
    Self {
      content: String::new(),
      sources: Vec::new(),
      sources_content: Vec::new(),
      line_mappings: Vec::new(),
    }
  }

  /// Appends generated text that has no original source (runtime preamble,
  /// module wrappers). A trailing newline is ensured.
  pub fn push_plain(&mut self, text: &str) {
    self.content.push_str(text);
    self.content.push('\n');
    for _ in 0..=lines_count(text) {
      self.line_mappings.push(LineMapping::None);
    }
  }

  /// Appends a module source, mapping every emitted line back to it.
  pub fn push_source(&mut self, name: &str, source: &str) {
    let source_idx = u32::try_from(self.sources.len()).expect("source count fits in u32");
    self.sources.push(name.to_string());
    self.sources_content.push(source.to_string());

    self.content.push_str(source);
    self.content.push('\n');
    for source_line in 0..=lines_count(source) {
      self.line_mappings.push(LineMapping::Source { source_idx, source_line });
    }
  }

  pub fn join(self, file: Option<String>) -> (String, SourceMap) {
    let mut mappings = String::new();
    let mut prev_source_idx = 0i64;
    let mut prev_source_line = 0i64;

    for (idx, mapping) in self.line_mappings.iter().enumerate() {
      if idx > 0 {
        mappings.push(';');
      }
      if let LineMapping::Source { source_idx, source_line } = mapping {
        // Segment deltas: generated column, source index, source line, source column.
        vlq::encode(0, &mut mappings);
        vlq::encode(i64::from(*source_idx) - prev_source_idx, &mut mappings);
        vlq::encode(i64::from(*source_line) - prev_source_line, &mut mappings);
        vlq::encode(0, &mut mappings);
        prev_source_idx = i64::from(*source_idx);
        prev_source_line = i64::from(*source_line);
      }
    }

    let map = SourceMap {
      version: 3,
      file,
      sources: self.sources,
      sources_content: self.sources_content,
      names: Vec::new(),
      mappings,
    };
    (self.content, map)
  }
}

impl Default for SourceJoiner {
  fn default() -> Self {
    Self::new()
  }
}

#[test]
fn test_join_maps_source_lines() {
  let mut joiner = SourceJoiner::new();
  joiner.push_plain("// banner");
  joiner.push_source("app.js", "let a = 1;\nlet b = 2;");
  let (content, map) = joiner.join(Some("app.js".to_string()));

  assert_eq!(content, "// banner\nlet a = 1;\nlet b = 2;\n");
  assert_eq!(map.sources, ["app.js"]);
  // Line 0 is unmapped, lines 1-2 map to source lines 0-1.
  assert_eq!(map.mappings, ";AAAA;AACA");
}
