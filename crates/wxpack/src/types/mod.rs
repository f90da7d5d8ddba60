pub mod bundle_output;

use std::sync::Arc;

use wxpack_common::NormalizedBuildOptions;
use wxpack_fs::FileSystem;

pub type SharedOptions = Arc<NormalizedBuildOptions>;
pub type SharedFileSystem = Arc<dyn FileSystem>;
