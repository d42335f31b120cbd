//! Rule engines for catalog maintenance: text normalization, keyword
//! classification, partition sorting and data-quality checks.
//!
//! Every function takes its rule tables as parameters, so the same logic runs
//! against the built-in rules or a user-supplied rules directory.

pub mod classify;
pub mod error;
pub mod normalize;
pub mod quality;
pub mod settings;
pub mod sort;

pub use classify::{assigned_icon, classify, generic_icon_fix, pick_icon};
pub use error::RuleError;
pub use normalize::{Normalizer, clean_brand};
pub use quality::looks_garbled;
pub use sort::{brand_rank, category_rank, sort_by_name, sort_key, sort_products};
