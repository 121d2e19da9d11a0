use bytes::Bytes;
use indexmap::IndexMap;

/// A decoded bencode value.
///
/// The four variants are a closed set; the wire format defines no others,
/// so the dispatcher matches on them exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Byte string: <length>:<contents>. Raw bytes, not guaranteed UTF-8.
    ByteString(Bytes),
    /// Integer: i<number>e
    Integer(i128),
    /// List: l<values>e
    List(Vec<Value>),
    /// Dictionary: d<key-value pairs>e (insertion order preserved)
    Dictionary(IndexMap<Bytes, Value>),
}

impl Value {
    /// Try to get this value as an integer
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a byte string
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::ByteString(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a UTF-8 string
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes()
            .and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Try to get this value as a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Try to get this value as a dictionary
    pub fn as_dict(&self) -> Option<&IndexMap<Bytes, Value>> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Get a value from a dictionary by key
    pub fn dict_get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }

    /// Get a string value from a dictionary by key
    pub fn dict_get_str(&self, key: &[u8]) -> Option<&str> {
        self.dict_get(key)?.as_str()
    }

    /// Get an integer value from a dictionary by key
    pub fn dict_get_int(&self, key: &[u8]) -> Option<i128> {
        self.dict_get(key)?.as_integer()
    }
}
