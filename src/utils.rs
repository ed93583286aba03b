pub(crate) fn u32_to_bytes(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

pub(crate) fn u64_to_bytes(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Interprets up to 8 big-endian bytes as an unsigned integer.
pub(crate) fn bytes_to_ull(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    bytes
        .iter()
        .fold(0_u64, |acc, &byte| (acc << 8) | u64::from(byte))
}

/// Writes the low `out.len()` bytes of `value` into `out`, big-endian.
pub(crate) fn ull_to_bytes(out: &mut [u8], mut value: u64) {
    for byte in out.iter_mut().rev() {
        *byte = value as u8;
        value >>= 8;
    }
}

pub(crate) fn set_byte_at(array: &mut [u8], value: u8, index: usize) {
    array[index] = value;
}

pub(crate) fn set_u32_at(array: &mut [u8], value: u32, start_index: usize) {
    array[start_index..start_index + 4].copy_from_slice(&u32_to_bytes(value));
}

pub(crate) fn set_u64_at(array: &mut [u8], value: u64, start_index: usize) {
    array[start_index..start_index + 8].copy_from_slice(&u64_to_bytes(value));
}

pub(crate) fn get_u32_at(array: &[u8], start_index: usize) -> u32 {
    bytes_to_ull(&array[start_index..start_index + 4]) as u32
}

pub(crate) fn get_u64_at(array: &[u8], start_index: usize) -> u64 {
    bytes_to_ull(&array[start_index..start_index + 8])
}

/// Public arrays up to this size are printed in full by `Debug`.
pub(crate) const DEBUG_FULL_HEX_BYTES: usize = 64;
/// Leading bytes printed by `Debug` for longer public arrays.
pub(crate) const DEBUG_PREFIX_BYTES: usize = 16;

macro_rules! array_struct {
    (@common $type: ident, $size: expr) => {
        impl AsRef<[u8]> for $type {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $size]> for $type {
            fn from(value: [u8; $size]) -> Self {
                Self(value)
            }
        }

        impl $type {
            /// Byte size of this type.
            pub const BYTES: usize = $size;

            /// Returns a copy of the inner byte array.
            pub fn to_bytes(&self) -> [u8; $size] {
                self.0
            }
        }

        impl PartialEq for $type {
            /// Constant-time comparison.
            fn eq(&self, other: &Self) -> bool {
                ::subtle::ConstantTimeEq::ct_eq(&self.0[..], &other.0[..]).into()
            }
        }

        impl Eq for $type {}
    };

    (@try_from $type: ident, $size: expr, $err: ident) => {
        impl TryFrom<&[u8]> for $type {
            type Error = $crate::Error;
            fn try_from(data: &[u8]) -> ::core::result::Result<$type, $crate::Error> {
                if data.len() != $size {
                    Err($crate::Error::$err($size, data.len()))
                } else {
                    let mut array = [0u8; $size];
                    array.copy_from_slice(data);
                    Ok($type(array))
                }
            }
        }
    };

    (secret $type: ident, $size: expr, $err: ident) => {
        /// Securely holds secret data, using a `u8` array as an internal field.
        /// This struct implements `Zeroize`, but wiping is left to the owner: call
        /// `zeroize()` once the material is no longer needed.
        /// Cloning is supported but should be done cautiously, as it duplicates sensitive
        /// information in memory.
        /// It also provides serialization via the `serialization` feature.
        #[derive(Clone, ::zeroize::Zeroize)]
        #[cfg_attr(
            feature = "serialization",
            derive(::serde::Serialize, ::serde::Deserialize)
        )]
        pub struct $type(
            #[cfg_attr(feature = "serialization", serde(with = "serde_big_array::BigArray"))]
            pub(crate) [u8; $size],
        );

        $crate::utils::array_struct!(@common $type, $size);
        $crate::utils::array_struct!(@try_from $type, $size, $err);

        impl ::core::fmt::Debug for $type {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}(<{} bytes redacted>)", stringify!($type), $size)
            }
        }
    };

    ($type: ident, $size: expr, $err: ident) => {
        /// Holds public data, using a `u8` array as an internal field.
        /// It also provides serialization via the `serialization` feature.
        #[derive(Clone, ::zeroize::Zeroize)]
        #[cfg_attr(
            feature = "serialization",
            derive(::serde::Serialize, ::serde::Deserialize)
        )]
        pub struct $type(
            #[cfg_attr(feature = "serialization", serde(with = "serde_big_array::BigArray"))]
            pub(crate) [u8; $size],
        );

        $crate::utils::array_struct!(@common $type, $size);
        $crate::utils::array_struct!(@try_from $type, $size, $err);

        impl ::core::fmt::Debug for $type {
            /// Arrays longer than `DEBUG_FULL_HEX_BYTES` show only their first
            /// `DEBUG_PREFIX_BYTES` bytes and their length.
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                if $size <= $crate::utils::DEBUG_FULL_HEX_BYTES {
                    write!(f, "{}({})", stringify!($type), ::hex::encode(self.0))
                } else {
                    write!(
                        f,
                        "{}({}..<{} bytes>)",
                        stringify!($type),
                        ::hex::encode(&self.0[..$crate::utils::DEBUG_PREFIX_BYTES]),
                        $size
                    )
                }
            }
        }
    };
}

pub(crate) use array_struct;
