/*!
A DHCPv6 message encoder and decoder.

Messages are decoded into owned values: a [`Packet`] or a
[`RelayMessage`] holding an [`Options`] multimap from option code to
the raw option payloads. Typed accessors on [`Options`] validate and
interpret individual options, including options nested inside IA_NA
and IA Address options.

# Examples

```
use dhcp6::{Decode as _, Encode as _, MessageType, OptionCode, Options, Packet};

let mut options = Options::new();
options.add_raw(OptionCode::ELAPSED_TIME, vec![0x00, 0x2a]);
options.add_raw(OptionCode::RAPID_COMMIT, Vec::new());

let packet = Packet {
    message_type: MessageType::Solicit,
    transaction_id: [0x00, 0x01, 0x02],
    options,
};
let bytes = packet.to_vec()?;
assert_eq!(&bytes[..4], [1, 0x00, 0x01, 0x02]);

let decoded = Packet::decode(&bytes)?;
assert_eq!(decoded, packet);
assert_eq!(decoded.options.elapsed_time()?, 42);
assert!(decoded.options.rapid_commit()?);
# Ok::<(), dhcp6::Error>(())
```

See:
 * [RFC3315]: Dynamic Host Configuration Protocol for IPv6 (DHCPv6)
 * [RFC3646]: DNS Configuration options for DHCPv6
 * [RFC5970]: DHCPv6 Options for Network Boot

[RFC3315]: https://datatracker.ietf.org/doc/html/rfc3315
[RFC3646]: https://datatracker.ietf.org/doc/html/rfc3646
[RFC5970]: https://datatracker.ietf.org/doc/html/rfc5970
 */

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use byteorder::{ByteOrder, NetworkEndian};
use core::convert::{TryFrom, TryInto};
use core::fmt;
use ref_cast::RefCast;

#[macro_use]
mod macros;

mod accessors;
pub mod client;
pub mod duid;
pub mod ia;
pub mod options;
pub mod packet;
pub mod relay;

pub use accessors::{BootFileParam, OptionRequest, Status, StatusCode};
pub use duid::Duid;
pub use ia::{IaAddr, IaNa, IaTa};
pub use options::{OptionCode, Options, RawOptions};
pub use packet::{MessageType, Packet};
pub use relay::RelayMessage;

/// The UDP port where clients listen for messages.
pub const CLIENT_PORT: u16 = 546;
/// The UDP port where servers and relay agents listen for messages.
pub const SERVER_PORT: u16 = 547;

/// The type of errors that may be produced by this crate.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Source buffer ended before a required fixed-size field.
    UnexpectedEndOfData,
    /// The message was structurally present but malformed.
    InvalidPacket,
    /// A required option was absent.
    OptionNotPresent,
    /// Data is longer than can fit in the length field.
    TooLong,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Error::UnexpectedEndOfData => "source buffer ended too soon",
            Error::InvalidPacket => "invalid packet",
            Error::OptionNotPresent => "option not present",
            Error::TooLong => "data is too long to fit in a single entity",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Types with a DHCPv6 wire encoding.
pub trait Encode {
    /// Appends the wire encoding of `self` to the cursor.
    fn encode(&self, cursor: &mut Cursor<Vec<u8>>) -> Result<(), Error>;

    /// Allocates a new buffer holding the wire encoding of `self`.
    fn to_vec(&self) -> Result<Vec<u8>, Error> {
        let mut cursor = Cursor::new(Vec::new());
        self.encode(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

/// Types that can be decoded from their DHCPv6 wire encoding.
///
/// Decoded values own their data and never borrow from the source
/// buffer.
pub trait Decode: Sized {
    fn decode(b: &[u8]) -> Result<Self, Error>;
}

/// A sequential, forward-only cursor over a byte buffer.
///
/// A `Cursor<&[u8]>` reads fields, failing with
/// [`Error::UnexpectedEndOfData`] when the buffer runs out, and a
/// `Cursor<Vec<u8>>` appends fields to a growing buffer.
#[derive(Clone, Debug)]
pub struct Cursor<T> {
    buffer: T,
    index: usize,
}

impl<T> Cursor<T> {
    #[inline]
    pub fn new(buffer: T) -> Self {
        Self { buffer, index: 0 }
    }

    /// Consumes the cursor and returns the underlying buffer.
    #[inline]
    pub fn into_inner(self) -> T {
        self.buffer
    }
}

impl<'a> Cursor<&'a [u8]> {
    /// Returns the number of unread bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len() - self.index
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let b = *self
            .buffer
            .get(self.index)
            .ok_or(Error::UnexpectedEndOfData)?;
        self.index += 1;
        Ok(b)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, Error> {
        self.consume(2).map(NetworkEndian::read_u16)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, Error> {
        self.consume(4).map(NetworkEndian::read_u32)
    }

    /// Reads the next `n` bytes.
    pub fn consume(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let buffer = self.buffer;
        let b = buffer[self.index..]
            .get(..n)
            .ok_or(Error::UnexpectedEndOfData)?;
        self.index += n;
        Ok(b)
    }

    /// Reads the next `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut x = [0; N];
        x.copy_from_slice(self.consume(N)?);
        Ok(x)
    }

    /// Reads an IPv6 address.
    pub fn read_addr(&mut self) -> Result<Addr, Error> {
        let addr: &Addr = self.consume(16)?.try_into()?;
        Ok(*addr)
    }

    /// Reads all remaining bytes.
    pub fn rest(&mut self) -> &'a [u8] {
        let buffer = self.buffer;
        let b = &buffer[self.index..];
        self.index = buffer.len();
        b
    }
}

impl Cursor<Vec<u8>> {
    /// Returns the bytes written so far.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    #[inline]
    pub fn write_u8(&mut self, b: u8) {
        self.buffer.push(b);
    }

    #[inline]
    pub fn write_u16(&mut self, x: u16) {
        self.write(&x.to_be_bytes());
    }

    #[inline]
    pub fn write_u32(&mut self, x: u32) {
        self.write(&x.to_be_bytes());
    }

    #[inline]
    pub fn write(&mut self, bs: &[u8]) {
        self.buffer.extend_from_slice(bs);
    }

    /// Appends `n` zeroed bytes and returns them for the caller to fill.
    pub fn write_n(&mut self, n: usize) -> &mut [u8] {
        let start = self.buffer.len();
        self.buffer.resize(start + n, 0);
        &mut self.buffer[start..]
    }

    /// Writes a 2-byte length prefix followed by `bs`.
    pub(crate) fn write_with_len(&mut self, bs: &[u8]) -> Result<(), Error> {
        self.write_u16(bs.len().try_into().map_err(|_| Error::TooLong)?);
        self.write(bs);
        Ok(())
    }
}

/// An IPv6 address.
///
/// This is similar to [std::net::Ipv6Addr], but has an explicit
/// representation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, RefCast, Debug)]
#[repr(transparent)]
pub struct Addr(pub [u8; 16]);

impl Addr {
    /// The unspecified address `::`.
    pub const UNSPECIFIED: Addr = Addr([0; 16]);
}

impl<'a> TryFrom<&'a [u8]> for &'a Addr {
    type Error = Error;

    #[inline]
    fn try_from(b: &'a [u8]) -> Result<Self, Self::Error> {
        let b = b.get(..16).ok_or(Error::UnexpectedEndOfData)?;
        <&[u8; 16]>::try_from(b)
            .map(Addr::ref_cast)
            .map_err(|_| Error::InvalidPacket)
    }
}

impl From<[u8; 16]> for Addr {
    #[inline]
    fn from(x: [u8; 16]) -> Addr {
        Addr(x)
    }
}

#[cfg(feature = "std")]
impl From<Addr> for std::net::Ipv6Addr {
    #[inline]
    fn from(Addr(x): Addr) -> Self {
        x.into()
    }
}

#[cfg(feature = "std")]
impl From<std::net::Ipv6Addr> for Addr {
    #[inline]
    fn from(x: std::net::Ipv6Addr) -> Addr {
        Addr(x.octets())
    }
}
