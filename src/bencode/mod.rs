mod decoder;
mod error;
mod value;

pub use decoder::{
    decode, decode_byte_string, decode_dictionary, decode_integer, decode_item, decode_list,
    decode_with, DecodeOptions, MAX_DEPTH,
};
pub use error::BencodeError;
pub use value::Value;
