//! Value codecs: layered decoding and scalar coercion.

mod coerce;
mod decode;

pub use coerce::{Coercion, strtobool};
pub use decode::{
    DecodeFlags, DecodeType, decode, decode_base64, decode_json, decode_text, decode_yaml,
    is_nothing,
};
