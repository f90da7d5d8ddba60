pub mod chunk_kind;
pub mod output_asset;
pub mod str_or_bytes;
