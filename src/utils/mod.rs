pub mod constants;
pub mod string_utils;
pub mod url_utils;

pub use constants::*;
pub use string_utils::slugify;
pub use url_utils::{is_fetchable_url, resolve_candidate_url, upgrade_size_marker};
