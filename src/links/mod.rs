//! Metadata reference handling: parsing, formatting and key normalization.
//!
//! - [`parser`] turns one raw `contents`/`part_of` entry into a [`ContentLink`]
//!   and back, and flattens string-or-list fields into entry lists.
//! - [`normalize`] produces the lookup keys shared by indexing and searching.

pub mod normalize;
pub mod parser;

pub use normalize::{normalize_title, normalize_variants};
pub use parser::{ContentLink, format_link, normalize_list, parse_link};
