use super::{BencodeError, Value};
use bytes::Bytes;
use indexmap::IndexMap;

/// Default bound on container nesting before decoding aborts.
pub const MAX_DEPTH: usize = 256;

/// Knobs for the decoder.
///
/// `strict_integers` rejects `i-0e` and leading zeros (`i007e`). The default
/// is lenient: such forms parse through the normal integer path, which is the
/// historical behavior of this tool.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    pub strict_integers: bool,
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict_integers: false,
            max_depth: MAX_DEPTH,
        }
    }
}

/// Decode a single bencoded value from the front of `data`.
///
/// Trailing bytes after the value are ignored; use [`decode_item`] when the
/// consumed length matters to the caller.
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    decode_with(data, &DecodeOptions::default())
}

/// Decode a single bencoded value with explicit options.
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Value, BencodeError> {
    let (value, _) = decode_item_with(data, options, 0)?;
    Ok(value)
}

/// Decode any bencoded item, dispatching on its first byte.
///
/// Returns the value together with the number of input bytes it occupied,
/// so a caller iterating over consecutive items can advance its own cursor.
pub fn decode_item(data: &[u8]) -> Result<(Value, usize), BencodeError> {
    decode_item_with(data, &DecodeOptions::default(), 0)
}

fn decode_item_with(
    data: &[u8],
    options: &DecodeOptions,
    depth: usize,
) -> Result<(Value, usize), BencodeError> {
    if depth > options.max_depth {
        return Err(BencodeError::DepthExceeded);
    }

    match data.first() {
        Some(b'i') => {
            let (n, used) = decode_integer_with(data, options)?;
            Ok((Value::Integer(n), used))
        }
        Some(b'l') => {
            let (items, used) = decode_list_with(data, options, depth)?;
            Ok((Value::List(items), used))
        }
        Some(b'd') => {
            let (entries, used) = decode_dictionary_with(data, options, depth)?;
            Ok((Value::Dictionary(entries), used))
        }
        Some(b) if b.is_ascii_digit() => {
            let (bytes, used) = decode_byte_string(data)?;
            Ok((Value::ByteString(bytes), used))
        }
        _ => Err(BencodeError::UnrecognizedItem),
    }
}

/// Decode a byte string of the form `<length>:<bytes>`.
///
/// The length prefix must be decimal digits; leading zeros are accepted
/// as-is (a known laxity, kept for compatibility). The payload is opaque:
/// no escaping, no encoding validation.
pub fn decode_byte_string(data: &[u8]) -> Result<(Bytes, usize), BencodeError> {
    let colon = data
        .iter()
        .position(|&b| b == b':')
        .ok_or(BencodeError::ByteString("missing colon"))?;

    let digits = &data[..colon];
    if digits.is_empty() || !digits.iter().all(|b| b.is_ascii_digit()) {
        return Err(BencodeError::ByteString("non-numeric length"));
    }

    // All-digit prefix, so from_utf8 cannot fail; parse can (usize overflow).
    let len = std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or(BencodeError::ByteString("malformed length"))?;

    let start = colon + 1;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or(BencodeError::ByteString("missing data"))?;

    Ok((Bytes::copy_from_slice(&data[start..end]), end))
}

/// Decode an integer of the form `i<digits>e`.
pub fn decode_integer(data: &[u8]) -> Result<(i128, usize), BencodeError> {
    decode_integer_with(data, &DecodeOptions::default())
}

fn decode_integer_with(
    data: &[u8],
    options: &DecodeOptions,
) -> Result<(i128, usize), BencodeError> {
    if data.first() != Some(&b'i') {
        return Err(BencodeError::Integer("not an integer"));
    }

    let end = data[1..]
        .iter()
        .position(|&b| b == b'e')
        .map(|p| p + 1)
        .ok_or(BencodeError::Integer("missing terminator"))?;

    let digits = &data[1..end];
    if digits.is_empty() {
        return Err(BencodeError::Integer("missing value"));
    }

    let unsigned = digits.strip_prefix(b"-").unwrap_or(digits);
    if unsigned.is_empty() || !unsigned.iter().all(|b| b.is_ascii_digit()) {
        return Err(BencodeError::Integer("not a number"));
    }

    if options.strict_integers {
        if digits.starts_with(b"-0") {
            return Err(BencodeError::Integer("negative zero"));
        }
        if unsigned.len() > 1 && unsigned[0] == b'0' {
            return Err(BencodeError::Integer("leading zero"));
        }
    }

    // Validated above as ASCII digits with an optional sign. A value past
    // the i128 range is reported, never truncated.
    let value = std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<i128>().ok())
        .ok_or(BencodeError::Integer("out of range"))?;

    Ok((value, end + 1))
}

/// Decode a list of the form `l<item>*e`.
pub fn decode_list(data: &[u8]) -> Result<(Vec<Value>, usize), BencodeError> {
    decode_list_with(data, &DecodeOptions::default(), 0)
}

fn decode_list_with(
    data: &[u8],
    options: &DecodeOptions,
    depth: usize,
) -> Result<(Vec<Value>, usize), BencodeError> {
    if data.first() != Some(&b'l') {
        return Err(BencodeError::List("not a list"));
    }

    let mut items = Vec::new();
    let mut cursor = 1;

    loop {
        match data.get(cursor) {
            None => return Err(BencodeError::List("missing data")),
            Some(b'e') => return Ok((items, cursor + 1)),
            Some(_) => {
                let (item, used) = decode_item_with(&data[cursor..], options, depth + 1)?;
                items.push(item);
                cursor += used;
            }
        }
    }
}

/// Decode a dictionary of the form `d<key><value>*e`.
///
/// Keys must be byte strings. A repeated key keeps its original position
/// and takes the last value seen.
pub fn decode_dictionary(data: &[u8]) -> Result<(IndexMap<Bytes, Value>, usize), BencodeError> {
    decode_dictionary_with(data, &DecodeOptions::default(), 0)
}

fn decode_dictionary_with(
    data: &[u8],
    options: &DecodeOptions,
    depth: usize,
) -> Result<(IndexMap<Bytes, Value>, usize), BencodeError> {
    if data.first() != Some(&b'd') {
        return Err(BencodeError::Dictionary("not a dictionary"));
    }

    let mut entries = IndexMap::new();
    let mut cursor = 1;

    loop {
        match data.get(cursor) {
            None => return Err(BencodeError::Dictionary("missing data")),
            Some(b'e') => return Ok((entries, cursor + 1)),
            Some(b) if !b.is_ascii_digit() => {
                return Err(BencodeError::Dictionary("invalid key type"));
            }
            Some(_) => {
                let (key, used) = decode_byte_string(&data[cursor..])?;
                cursor += used;

                if cursor >= data.len() {
                    // Key with no paired value.
                    return Err(BencodeError::Dictionary("missing data"));
                }

                let (value, used) = decode_item_with(&data[cursor..], options, depth + 1)?;
                cursor += used;

                entries.insert(key, value);
            }
        }
    }
}
