pub mod clean_output_dir;
pub mod normalize_options;
pub mod resolve_id;
pub mod validate_options;
