use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use wxpack::{
  BuildEnv, BuildOptions, BuildResult, BuildStartContext, Compiler, FileSystem, LoaderKind,
  LoaderRule, MemoryFileSystem, OsFileSystem, Plugin, SharedPlugin,
};

fn write_fixture(fs: &MemoryFileSystem) {
  let files: &[(&str, &str)] = &[
    (
      "src/app.js",
      "import util from '@/utils/util';\nconsole.log(process.env.BUILD_TYPE);\nApp({ onLaunch: util.hello });\n",
    ),
    ("src/utils/util.js", "export default { hello: function () {} };\n"),
    ("src/pages/home/home.js", "import util from '../../utils/util';\nPage({ data: util });\n"),
    ("src/app.scss", "$accent: #07c160;\n.page {\n  color: $accent;\n}\n"),
    ("src/pages/home/home.wxml", "<image src=\"../../images/logo.png\" />\n"),
    ("src/app.json", "{ \"pages\": [\"pages/home/home\"] }\n"),
  ];
  for (path, content) in files {
    fs.write(Path::new(path), content.as_bytes()).unwrap();
  }
  fs.write(Path::new("src/images/logo.png"), &[137u8; 128]).unwrap();
}

fn dist_snapshot(fs: &MemoryFileSystem) -> BTreeMap<String, Vec<u8>> {
  fs.walk_files(Path::new("dist"))
    .unwrap()
    .into_iter()
    .map(|path| {
      let content = fs.read(&path).unwrap();
      let name = path.to_string_lossy().trim_start_matches('/').trim_start_matches("dist/").to_string();
      (name, content)
    })
    .collect()
}

fn compiler(fs: &MemoryFileSystem, options: BuildOptions) -> Compiler {
  Compiler::with_fs(options, Arc::new(fs.clone()), Vec::new()).unwrap()
}

struct HomePage;

impl Plugin for HomePage {
  fn name(&self) -> &'static str {
    "home-page"
  }

  fn build_start(&self, ctx: &mut BuildStartContext) -> BuildResult<()> {
    ctx.add_entry("./pages/home/home.js");
    Ok(())
  }
}

#[tokio::test]
async fn development_build_end_to_end() {
  let fs = MemoryFileSystem::new();
  write_fixture(&fs);

  compiler(&fs, BuildOptions::default()).write().await.unwrap();
  let dist = dist_snapshot(&fs);

  let app = std::str::from_utf8(&dist["app.js"]).unwrap();
  assert!(app.contains("wx.__wxpack_define__(\"app.js\""));
  assert!(app.contains("wx.__wxpack_define__(\"utils/util.js\""));
  assert!(app.contains("wx.__wxpack_require__(\"app.js\");"));
  // Env defaults are baked in, JSON encoded.
  assert!(app.contains("console.log(\"debug\");"));
  // Development builds carry inline maps, never `.map` companions.
  assert!(app.contains("//# sourceMappingURL=data:application/json"));
  assert!(!dist.keys().any(|name| name.ends_with(".map")));

  let runtime = std::str::from_utf8(&dist["runtime.js"]).unwrap();
  assert!(runtime.contains("})(wx);"));

  // The stylesheet compiles to `wxss` in place, expanded with 2-space indent.
  assert_eq!(std::str::from_utf8(&dist["app.wxss"]).unwrap(), ".page {\n  color: #07c160;\n}\n");

  // Template refs become root-relative; unclaimed files are copied verbatim.
  assert!(std::str::from_utf8(&dist["pages/home/home.wxml"])
    .unwrap()
    .contains("src=\"/images/logo.png\""));
  assert_eq!(dist["app.json"], b"{ \"pages\": [\"pages/home/home\"] }\n");

  // The unimported small image survives as its data URI module, and its
  // source file is never copied verbatim.
  assert!(std::str::from_utf8(&dist["images/logo.png.js"])
    .unwrap()
    .starts_with("module.exports = \"data:image/png;base64,"));
  assert!(!dist.contains_key("images/logo.png"));
}

#[tokio::test]
async fn release_build_emits_external_maps_and_compact_output() {
  let fs = MemoryFileSystem::new();
  write_fixture(&fs);

  let options = BuildOptions {
    env: Some(BuildEnv { build_type: Some("release".to_string()), node_env: None }),
    ..Default::default()
  };
  compiler(&fs, options).write().await.unwrap();
  let dist = dist_snapshot(&fs);

  let app = std::str::from_utf8(&dist["app.js"]).unwrap();
  assert!(app.contains("//# sourceMappingURL=app.js.map"));
  assert!(!app.contains("data:application/json"));
  assert!(std::str::from_utf8(&dist["app.js.map"]).unwrap().contains("\"version\":3"));
  assert!(dist.contains_key("runtime.js.map"));

  assert_eq!(std::str::from_utf8(&dist["app.wxss"]).unwrap(), ".page{color: #07c160}");
}

#[tokio::test]
async fn release_switch_requires_the_exact_value() {
  let fs = MemoryFileSystem::new();
  write_fixture(&fs);

  // `NODE_ENV` alone never flips the build into release mode, but its value
  // is still the one injected.
  let options = BuildOptions {
    env: Some(BuildEnv {
      build_type: None,
      node_env: Some("production".to_string()),
    }),
    ..Default::default()
  };
  compiler(&fs, options).write().await.unwrap();
  let dist = dist_snapshot(&fs);

  let app = std::str::from_utf8(&dist["app.js"]).unwrap();
  assert!(app.contains("//# sourceMappingURL=data:application/json"));
  assert!(app.contains("console.log(\"debug\");"));
  assert!(!dist.contains_key("app.js.map"));
}

#[tokio::test]
async fn inline_threshold_partitions_assets() {
  let fs = MemoryFileSystem::new();
  write_fixture(&fs);
  fs.write(Path::new("src/images/small.png"), &vec![1u8; 40 * 1024]).unwrap();
  fs.write(Path::new("src/images/large.png"), &vec![2u8; 60 * 1024]).unwrap();
  fs.write(
    Path::new("src/app.js"),
    b"var small = require('@img/small.png');\nvar large = require('@img/large.png');\n",
  )
  .unwrap();

  compiler(&fs, BuildOptions::default()).write().await.unwrap();
  let dist = dist_snapshot(&fs);

  let app = std::str::from_utf8(&dist["app.js"]).unwrap();
  // 40KB is under the 50000 byte limit: inlined into the chunk, no file.
  assert!(app.contains("data:image/png;base64,"));
  assert!(!dist.contains_key("images/small.png"));
  assert!(!dist.contains_key("images/small.png.js"));

  // 60KB is over the limit: copied verbatim, module exports the path.
  assert_eq!(dist["images/large.png"], vec![2u8; 60 * 1024]);
  assert!(app.contains("module.exports = \"/images/large.png\";"));
}

#[tokio::test]
async fn shared_modules_are_hoisted_into_the_common_chunk() {
  let fs = MemoryFileSystem::new();
  write_fixture(&fs);

  let plugins: Vec<SharedPlugin> = vec![Arc::new(HomePage)];
  let compiler =
    Compiler::with_fs(BuildOptions::default(), Arc::new(fs.clone()), plugins).unwrap();
  compiler.write().await.unwrap();
  let dist = dist_snapshot(&fs);

  // `utils/util.js` is reached by both entries, so it lives in the common
  // chunk and in neither entry chunk.
  let common = std::str::from_utf8(&dist["common.js"]).unwrap();
  assert!(common.contains("wx.__wxpack_define__(\"utils/util.js\""));

  let app = std::str::from_utf8(&dist["app.js"]).unwrap();
  let home = std::str::from_utf8(&dist["home.js"]).unwrap();
  assert!(!app.contains("wx.__wxpack_define__(\"utils/util.js\""));
  assert!(!home.contains("wx.__wxpack_define__(\"utils/util.js\""));
  assert!(home.contains("wx.__wxpack_require__(\"pages/home/home.js\");"));
}

#[tokio::test]
async fn an_entry_required_by_another_entry_keeps_its_chunk() {
  let fs = MemoryFileSystem::new();
  fs.write(Path::new("src/app.js"), b"require('./pages/home/home');\nApp({});\n").unwrap();
  fs.write(Path::new("src/pages/home/home.js"), b"Page({});\n").unwrap();

  let plugins: Vec<SharedPlugin> = vec![Arc::new(HomePage)];
  let compiler =
    Compiler::with_fs(BuildOptions::default(), Arc::new(fs.clone()), plugins).unwrap();
  compiler.write().await.unwrap();
  let dist = dist_snapshot(&fs);

  // The imported entry stays an entry: its chunk defines and requires it.
  let home = std::str::from_utf8(&dist["home.js"]).unwrap();
  assert!(home.contains("wx.__wxpack_define__(\"pages/home/home.js\""));
  assert!(home.contains("wx.__wxpack_require__(\"pages/home/home.js\");"));

  // The importing entry bundles its own copy instead of hoisting it.
  let app = std::str::from_utf8(&dist["app.js"]).unwrap();
  assert!(app.contains("wx.__wxpack_define__(\"pages/home/home.js\""));
  assert!(app.contains("wx.__wxpack_require__(\"app.js\");"));
  assert!(!dist.contains_key("common.js"));
}

#[tokio::test]
async fn alias_and_relative_imports_produce_identical_chunks() {
  let aliased = MemoryFileSystem::new();
  write_fixture(&aliased);

  let relative = MemoryFileSystem::new();
  write_fixture(&relative);
  let source = aliased.read_to_string(Path::new("src/app.js")).unwrap();
  relative
    .write(
      Path::new("src/app.js"),
      source.replace("'@/utils/util'", "'./utils/util'").as_bytes(),
    )
    .unwrap();

  compiler(&aliased, BuildOptions::default()).write().await.unwrap();
  compiler(&relative, BuildOptions::default()).write().await.unwrap();

  assert_eq!(dist_snapshot(&aliased)["app.js"], dist_snapshot(&relative)["app.js"]);
}

#[tokio::test]
async fn rebuilds_are_byte_identical() {
  let fs = MemoryFileSystem::new();
  write_fixture(&fs);

  compiler(&fs, BuildOptions::default()).write().await.unwrap();
  let first = dist_snapshot(&fs);

  compiler(&fs, BuildOptions::default()).write().await.unwrap();
  let second = dist_snapshot(&fs);

  assert_eq!(first, second);
}

#[tokio::test]
async fn stale_outputs_are_cleared_except_exempt_globs() {
  let fs = MemoryFileSystem::new();
  write_fixture(&fs);
  fs.write(Path::new("dist/stale.js"), b"left over").unwrap();
  fs.write(Path::new("dist/keep/cache.bin"), b"cache").unwrap();

  let options = BuildOptions {
    stale_exempt: Some(vec!["keep/**".to_string()]),
    ..Default::default()
  };
  compiler(&fs, options).write().await.unwrap();
  let dist = dist_snapshot(&fs);

  assert!(!dist.contains_key("stale.js"));
  assert_eq!(dist["keep/cache.bin"], b"cache");
}

#[tokio::test]
async fn unmatched_filters_stay_silently_inert() {
  let fs = MemoryFileSystem::new();
  write_fixture(&fs);

  // A template rule scoped to a directory that holds no templates claims the
  // extension but matches no file. The build succeeds and the templates
  // quietly vanish: not emitted by the loader, not copied verbatim either
  // because the extension stays on the exclusion list.
  let mut rules = wxpack::default_loader_rules();
  for rule in &mut rules {
    if rule.kind == LoaderKind::Template {
      *rule = LoaderRule::new(LoaderKind::Template, &["wxml"]).with_include("components/**");
    }
  }

  let options = BuildOptions { loader_rules: Some(rules), ..Default::default() };
  compiler(&fs, options).write().await.unwrap();
  let dist = dist_snapshot(&fs);

  assert!(!dist.keys().any(|name| name.ends_with(".wxml")));
  assert!(dist.contains_key("app.js"));
}

#[tokio::test]
async fn builds_against_the_real_filesystem() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  std::fs::create_dir_all(root.join("src")).unwrap();
  std::fs::write(root.join("src/app.js"), "App({});\n").unwrap();
  std::fs::write(root.join("src/app.json"), "{}\n").unwrap();

  let options = BuildOptions {
    source_root: Some(root.join("src")),
    out_dir: Some(root.join("dist")),
    ..Default::default()
  };
  let compiler = Compiler::with_fs(options, Arc::new(OsFileSystem), Vec::new()).unwrap();
  let output = compiler.write().await.unwrap();

  assert!(root.join("dist/runtime.js").is_file());
  assert!(root.join("dist/app.js").is_file());
  assert!(root.join("dist/app.json").is_file());
  assert_eq!(
    output.assets.iter().filter(|a| PathBuf::from(&a.filename).extension().is_some()).count(),
    output.assets.len()
  );
}
