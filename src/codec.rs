//! Stable byte encoding for handles, for the persistence contract (§6): the
//! core commits that handles are stable and that a persistence layer may
//! encode/decode them for storage without the core depending on any
//! particular storage format.

use byteorder::{BigEndian, ByteOrder};

use crate::handle::Handle;

/// The encoded width of a [`Handle`] in bytes.
pub const HANDLE_BYTE_LEN: usize = 8;

/// Encodes a handle as 8 big-endian bytes.
#[must_use]
pub fn encode_handle(handle: Handle) -> [u8; HANDLE_BYTE_LEN] {
    let mut buf = [0_u8; HANDLE_BYTE_LEN];
    BigEndian::write_u64(&mut buf, handle.index());
    buf
}

/// Decodes a handle previously produced by [`encode_handle`].
///
/// # Panics
///
/// Panics if `bytes` is shorter than [`HANDLE_BYTE_LEN`].
#[must_use]
pub fn decode_handle(bytes: &[u8]) -> Handle {
    Handle::from_index(BigEndian::read_u64(bytes))
}
