#![allow(clippy::print_stdout)]

use std::path::Path;
use std::sync::Arc;

use wxpack::{BuildError, BuildOptions, Compiler, FileSystem, MemoryFileSystem};

#[tokio::main]
async fn main() -> Result<(), BuildError> {
  let fs = MemoryFileSystem::new();
  let files: &[(&str, &str)] = &[
    ("src/app.js", "import util from '@/utils/util';\nApp({ onLaunch: util.hello });\n"),
    ("src/utils/util.js", "export default { hello: function () {} };\n"),
    ("src/app.scss", "$accent: #07c160;\n.page {\n  color: $accent;\n}\n"),
    ("src/app.json", "{ \"pages\": [\"pages/home/home\"] }\n"),
  ];
  for (path, content) in files {
    fs.write(Path::new(path), content.as_bytes()).map_err(anyhow::Error::from)?;
  }

  let compiler = Compiler::with_fs(BuildOptions::default(), Arc::new(fs), Vec::new())?;
  let output = compiler.generate().await?;

  for asset in &output.assets {
    println!("--- {} ({} bytes)", asset.filename, asset.content_as_bytes().len());
  }
  Ok(())
}
