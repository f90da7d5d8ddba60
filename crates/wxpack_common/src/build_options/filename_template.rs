/// Output file naming template. Must contain a `[name]` placeholder.
#[derive(Debug, Clone)]
pub struct FilenameTemplate {
  template: String,
}

impl FilenameTemplate {
  pub fn new(template: impl Into<String>) -> Result<Self, String> {
    let template = template.into();
    if template.contains("[name]") {
      Ok(Self { template })
    } else {
      Err(format!("filename template \"{template}\" is missing the [name] placeholder"))
    }
  }

  pub fn render(&self, name: &str) -> String {
    self.template.replace("[name]", name)
  }

  pub fn as_str(&self) -> &str {
    &self.template
  }
}

impl Default for FilenameTemplate {
  fn default() -> Self {
    Self { template: "[name].js".to_string() }
  }
}

#[test]
fn test_render() {
  let template = FilenameTemplate::new("[name].js").unwrap();
  assert_eq!(template.render("runtime"), "runtime.js");

  assert!(FilenameTemplate::new("bundle.js").is_err());
}
