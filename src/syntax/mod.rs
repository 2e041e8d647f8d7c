//! Parsed files and literal evaluation on top of the parser.

pub mod file;
pub mod literals;

pub use file::SyntaxFile;
pub use literals::{
    decode_string_token, dict_entries, dict_value, first_dict_literal, str_list_value,
    string_expr_value, string_value,
};
