use std::path::Path;

use rustc_hash::FxHashMap;
use wxpack_common::{NormalizedBuildOptions, OutputAsset};
use wxpack_error::{BuildError, BuildResult};
use wxpack_fs::FileSystem;
use wxpack_utils::path_ext::PathExt;

/// Compiles a stylesheet to flat `wxss` at the file's relative path. Both
/// accepted syntaxes go through the same pipeline; plain `wxss` input simply
/// has nothing to flatten.
pub fn load_stylesheet(
  fs: &dyn FileSystem,
  options: &NormalizedBuildOptions,
  rel_path: &str,
) -> BuildResult<OutputAsset> {
  let source = fs
    .read_to_string(&options.source_root.join(rel_path))
    .map_err(|error| BuildError::transformation(rel_path, error.to_string()))?;

  let compiled = compile(&source, options.is_production())
    .map_err(|message| BuildError::transformation(rel_path, message))?;

  let filename = Path::new(rel_path).with_extension("wxss").expect_to_slash();
  Ok(OutputAsset { filename, content: compiled.into() })
}

/// The supported nested dialect: `//` line comments, top-level `$variable`
/// declarations, nested rules with `&` parent references. Output is the
/// conventional expanded style with 2-space indentation, or compacted in
/// production.
fn compile(source: &str, compact: bool) -> Result<String, String> {
  let source = strip_block_comments(source);
  let source = strip_line_comments(&source);
  let (source, variables) = collect_variables(&source);
  let source = substitute_variables(&source, &variables);

  let root = parse_block(&mut source.chars(), true)?;

  let mut out = String::new();
  flatten(&root, None, compact, &mut out);
  if compact {
    Ok(out)
  } else {
    Ok(out.trim_end().to_string() + "\n")
  }
}

struct Rule {
  selector: String,
  block: Block,
}

#[derive(Default)]
struct Block {
  declarations: Vec<String>,
  children: Vec<Rule>,
}

fn parse_block(chars: &mut std::str::Chars, top_level: bool) -> Result<Block, String> {
  let mut block = Block::default();
  let mut buffer = String::new();

  while let Some(char) = chars.next() {
    match char {
      '{' => {
        let selector = normalize_whitespace(&buffer);
        buffer.clear();
        if selector.is_empty() {
          return Err("rule with an empty selector".to_string());
        }
        block.children.push(Rule { selector, block: parse_block(chars, false)? });
      }
      '}' => {
        if top_level {
          return Err("unbalanced closing brace".to_string());
        }
        push_declaration(&mut block, &buffer);
        return Ok(block);
      }
      ';' => {
        if top_level && !normalize_whitespace(&buffer).is_empty() {
          return Err(format!("declaration outside any rule: \"{}\"", buffer.trim()));
        }
        push_declaration(&mut block, &buffer);
        buffer.clear();
      }
      _ => buffer.push(char),
    }
  }

  if !top_level {
    return Err("unexpected end of input inside a block".to_string());
  }
  if !normalize_whitespace(&buffer).is_empty() {
    return Err(format!("trailing content outside any rule: \"{}\"", buffer.trim()));
  }
  Ok(block)
}

/// Collapses runs of whitespace (including newlines inside a selector or
/// declaration) down to single spaces.
fn normalize_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_declaration(block: &mut Block, buffer: &str) {
  let declaration = normalize_whitespace(buffer);
  if !declaration.is_empty() {
    block.declarations.push(declaration);
  }
}

fn flatten(block: &Block, parent: Option<&str>, compact: bool, out: &mut String) {
  if let Some(selector) = parent {
    if !block.declarations.is_empty() {
      write_rule(selector, &block.declarations, compact, out);
    }
  }

  for rule in &block.children {
    // At-rules wrap their flattened children instead of joining selectors.
    if rule.selector.starts_with('@') {
      if compact {
        out.push_str(&rule.selector);
        out.push('{');
        flatten(&rule.block, None, compact, out);
        out.push('}');
      } else {
        out.push_str(&rule.selector);
        out.push_str(" {\n");
        let mut inner = String::new();
        flatten(&rule.block, None, compact, &mut inner);
        for line in inner.trim_end().lines() {
          out.push_str("  ");
          out.push_str(line);
          out.push('\n');
        }
        out.push_str("}\n\n");
      }
      continue;
    }

    let selector = combine_selectors(parent, &rule.selector);
    flatten(&rule.block, Some(&selector), compact, out);
  }
}

fn combine_selectors(parent: Option<&str>, child: &str) -> String {
  match parent {
    None => child.to_string(),
    Some(parent) if child.contains('&') => child.replace('&', parent),
    Some(parent) => format!("{parent} {child}"),
  }
}

fn write_rule(selector: &str, declarations: &[String], compact: bool, out: &mut String) {
  if compact {
    out.push_str(selector);
    out.push('{');
    out.push_str(&declarations.join(";"));
    out.push('}');
  } else {
    out.push_str(selector);
    out.push_str(" {\n");
    for declaration in declarations {
      out.push_str("  ");
      out.push_str(declaration);
      out.push_str(";\n");
    }
    out.push_str("}\n\n");
  }
}

/// Drops `/* … */` comments, quoted strings left alone. Comments do not
/// nest; an unterminated comment swallows the rest of the input.
fn strip_block_comments(source: &str) -> String {
  let mut out = String::with_capacity(source.len());
  let mut chars = source.chars().peekable();
  let mut in_quote: Option<char> = None;
  while let Some(char) = chars.next() {
    match in_quote {
      Some(quote) => {
        if char == quote {
          in_quote = None;
        }
        out.push(char);
      }
      None if matches!(char, '"' | '\'') => {
        in_quote = Some(char);
        out.push(char);
      }
      None if char == '/' && chars.peek() == Some(&'*') => {
        chars.next();
        let mut previous = '\0';
        for char in chars.by_ref() {
          if previous == '*' && char == '/' {
            break;
          }
          previous = char;
        }
      }
      None => out.push(char),
    }
  }
  out
}

/// Drops `// …` comments, leaving protocol separators like `url(http://…)`
/// and quoted strings alone.
fn strip_line_comments(source: &str) -> String {
  let mut out = String::with_capacity(source.len());
  for line in source.split('\n') {
    let mut in_quote: Option<char> = None;
    let mut previous = '\0';
    let mut cut = line.len();
    for (idx, char) in line.char_indices() {
      match in_quote {
        Some(quote) if char == quote => in_quote = None,
        None if matches!(char, '"' | '\'') => in_quote = Some(char),
        None if char == '/' && previous == '/' => {
          cut = idx - 1;
          break;
        }
        _ => {}
      }
      previous = if previous == ':' && char == '/' { '\0' } else { char };
    }
    out.push_str(line[..cut].trim_end());
    out.push('\n');
  }
  out
}

/// Top-level `$name: value;` declarations, removed from the source.
fn collect_variables(source: &str) -> (String, FxHashMap<String, String>) {
  let mut variables = FxHashMap::default();
  let mut out = String::with_capacity(source.len());
  for line in source.split('\n') {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix('$') {
      if let Some((name, value)) = rest.split_once(':') {
        if !name.trim().is_empty() && value.trim_end().ends_with(';') {
          let value = value.trim().trim_end_matches(';').trim().to_string();
          variables.insert(format!("${}", name.trim()), value);
          continue;
        }
      }
    }
    out.push_str(line);
    out.push('\n');
  }
  (out, variables)
}

fn substitute_variables(source: &str, variables: &FxHashMap<String, String>) -> String {
  // Longest names first so `$color-dark` is not clobbered by `$color`.
  let mut names = variables.keys().collect::<Vec<_>>();
  names.sort_by_key(|name| std::cmp::Reverse(name.len()));

  let mut out = source.to_string();
  for name in names {
    out = out.replace(name.as_str(), &variables[name]);
  }
  out
}
