//! Hierarchy data structures and construction.
//!
//! Flat records (an id plus an optional parent id) are read from CSV and
//! linked into a single rooted tree held in an arena.

mod builder;
mod ingest;
mod node;

pub use builder::Hierarchy;
pub use ingest::{ColumnConfig, parse_records};
pub use node::{NodeId, Record, TreeNode};
