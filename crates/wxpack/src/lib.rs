mod compiler;
mod generate_stage;
mod module_loader;
mod plugin;
mod scan_stage;
mod types;
mod utils;

pub use crate::compiler::Compiler;
pub use crate::plugin::{BuildStartContext, Plugin, SharedPlugin};
pub use crate::types::bundle_output::BundleOutput;
pub use wxpack_common::*;
pub use wxpack_error::{BuildError, BuildResult};
pub use wxpack_fs::{FileSystem, MemoryFileSystem, OsFileSystem};
