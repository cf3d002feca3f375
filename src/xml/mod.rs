//! Generic XML tree: parse, query, mutate, serialize.

pub mod parser;
pub mod path;
pub mod tree;
pub mod writer;

pub use parser::parse;
pub use tree::{Attribute, NodeData, NodeId, XmlTree};
pub use writer::{serialize, serialize_node};
