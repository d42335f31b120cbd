//! Product catalog data model types, JSON partition I/O, and YAML rule loading.
//!
//! This crate defines the persistent data model for the product catalog and
//! the rule tables that drive the maintenance tools. It has no opinion on how
//! the rules are applied; see `salsheli-lib` and `salsheli-import` for that.

pub mod json;
pub mod types;
pub mod yaml;

pub use json::{
    JsonError, Partition, list_partitions, load_catalog_dir, load_partition,
    load_partition_or_empty, partition_path, save_partition, to_partition_string,
};
pub use types::*;
pub use yaml::{YamlError, builtin_rules, load_rules, rules_to_string};
