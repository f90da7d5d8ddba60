pub mod asset;
pub mod script;
pub mod stylesheet;
pub mod template;
