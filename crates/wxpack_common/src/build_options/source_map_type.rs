/// How rendered chunks reference their source maps. Development builds use
/// `Inline`, release builds use `External`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMapType {
  Inline,
  External,
  None,
}
