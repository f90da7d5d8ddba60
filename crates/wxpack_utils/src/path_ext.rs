use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::Path;

use sugar_path::SugarPath;

pub trait PathExt {
  fn expect_to_str(&self) -> &str;

  fn expect_to_slash(&self) -> String;

  fn representative_file_name(&self) -> Cow<str>;
}

impl PathExt for Path {
  fn expect_to_str(&self) -> &str {
    self.to_str().unwrap_or_else(|| {
      panic!("Failed to convert {:?} to valid utf8 str", self.display());
    })
  }

  fn expect_to_slash(&self) -> String {
    self
      .to_slash()
      .unwrap_or_else(|| panic!("Failed to convert {:?} to slash str", self.display()))
      .into_owned()
  }

  /// The name a chunk derives from its entry file. `index` files take the
  /// parent directory name so `pages/home/index.js` becomes `home`.
  fn representative_file_name(&self) -> Cow<str> {
    let file_name =
      self.file_stem().map_or_else(|| self.to_string_lossy(), |stem| stem.to_string_lossy());

    match &*file_name {
      "index" => self
        .parent()
        .and_then(Path::file_stem)
        .map(OsStr::to_string_lossy)
        .map_or(file_name, |parent_dir_name| parent_dir_name),
      _ => file_name,
    }
  }
}

#[test]
fn test_representative_file_name() {
  use std::path::Path;

  let src = Path::new("src");
  assert_eq!(src.join("app.js").representative_file_name(), "app");
  assert_eq!(src.join("pages/home/index.js").representative_file_name(), "home");
  assert_eq!(src.join("pages/home/home.js").representative_file_name(), "home");
}
