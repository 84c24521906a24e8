use serde::Deserialize;
use std::borrow::Cow;
use thiserror::Error;

/// How byte keys that are not valid UTF-8 are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDecoding {
    #[default]
    Strict,
    Lossy,
}

/// Anything that can be used to address an entry of a [`crate::GeoCoordsMap`].
///
/// Text and byte representations of the same characters collapse to one canonical key, so `b"x"` and
/// `"x"` address the same entry.
pub trait KeyInput {
    fn canonical_key(&self, decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError>;
}

/// Coerces `key` to its canonical string form.
pub fn canonical_key<K: KeyInput + ?Sized>(key: &K, decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError> {
    key.canonical_key(decoding)
}

fn decode_bytes(bytes: &[u8], decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError> {
    match decoding {
        KeyDecoding::Strict => std::str::from_utf8(bytes).map(Cow::Borrowed).map_err(|_| KeyError::InvalidUtf8 {
            key: String::from_utf8_lossy(bytes).into_owned(),
        }),
        KeyDecoding::Lossy => Ok(String::from_utf8_lossy(bytes)),
    }
}

impl KeyInput for str {
    fn canonical_key(&self, _decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError> {
        Ok(Cow::Borrowed(self))
    }
}

impl KeyInput for String {
    fn canonical_key(&self, _decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError> {
        Ok(Cow::Borrowed(self.as_str()))
    }
}

impl KeyInput for Cow<'_, str> {
    fn canonical_key(&self, _decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError> {
        Ok(Cow::Borrowed(self.as_ref()))
    }
}

impl KeyInput for char {
    fn canonical_key(&self, _decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError> {
        Ok(Cow::Owned(self.to_string()))
    }
}

impl KeyInput for [u8] {
    fn canonical_key(&self, decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError> {
        decode_bytes(self, decoding)
    }
}

impl KeyInput for Vec<u8> {
    fn canonical_key(&self, decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError> {
        decode_bytes(self, decoding)
    }
}

impl<const N: usize> KeyInput for [u8; N] {
    fn canonical_key(&self, decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError> {
        decode_bytes(self, decoding)
    }
}

impl<K: KeyInput + ?Sized> KeyInput for &K {
    fn canonical_key(&self, decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError> {
        (**self).canonical_key(decoding)
    }
}

macro_rules! impl_key_input_for_integers {
    ($($t:ty)*) => ($(
        impl KeyInput for $t {
            fn canonical_key(&self, _decoding: KeyDecoding) -> Result<Cow<'_, str>, KeyError> {
                Ok(Cow::Owned(self.to_string()))
            }
        }
    )*)
}

impl_key_input_for_integers! { u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize }

#[derive(Error, Debug, PartialEq)]
pub enum KeyError {
    #[error("key '{key}' is not valid UTF-8")]
    InvalidUtf8 { key: String },
}
