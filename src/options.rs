/*!
The generic DHCPv6 option stream.

Options are a flat multimap from [`OptionCode`] to the raw payloads
carrying that code, in the order they were added or read. The same
routines encode and decode top-level options and options nested inside
IA_NA, IA_TA and IA Address payloads.

```text
 0                   1                   2                   3
 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|          option-code          |           option-len          |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|                          option-data                          |
|                      (option-len octets)                      |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
```
 */

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;
use core::iter::FusedIterator;

use crate::{Cursor, Decode, Encode, Error};

/// A DHCPv6 option code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionCode(pub u16);

impl OptionCode {
    pub const CLIENT_ID: OptionCode = OptionCode(1);
    pub const SERVER_ID: OptionCode = OptionCode(2);
    pub const IA_NA: OptionCode = OptionCode(3);
    pub const IA_TA: OptionCode = OptionCode(4);
    pub const IA_ADDR: OptionCode = OptionCode(5);
    pub const ORO: OptionCode = OptionCode(6);
    pub const PREFERENCE: OptionCode = OptionCode(7);
    pub const ELAPSED_TIME: OptionCode = OptionCode(8);
    pub const RELAY_MSG: OptionCode = OptionCode(9);
    pub const AUTH: OptionCode = OptionCode(11);
    pub const UNICAST: OptionCode = OptionCode(12);
    pub const STATUS_CODE: OptionCode = OptionCode(13);
    pub const RAPID_COMMIT: OptionCode = OptionCode(14);
    pub const USER_CLASS: OptionCode = OptionCode(15);
    pub const VENDOR_CLASS: OptionCode = OptionCode(16);
    pub const VENDOR_OPTS: OptionCode = OptionCode(17);
    pub const INTERFACE_ID: OptionCode = OptionCode(18);
    pub const RECONF_MSG: OptionCode = OptionCode(19);
    pub const RECONF_ACCEPT: OptionCode = OptionCode(20);
    pub const DNS_SERVERS: OptionCode = OptionCode(23);
    pub const DOMAIN_LIST: OptionCode = OptionCode(24);
    pub const BOOTFILE_URL: OptionCode = OptionCode(59);
    pub const BOOTFILE_PARAM: OptionCode = OptionCode(60);
}

impl From<u16> for OptionCode {
    fn from(x: u16) -> Self {
        Self(x)
    }
}

impl From<OptionCode> for u16 {
    fn from(OptionCode(x): OptionCode) -> Self {
        x
    }
}

impl fmt::Debug for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            OptionCode::CLIENT_ID => "CLIENT_ID",
            OptionCode::SERVER_ID => "SERVER_ID",
            OptionCode::IA_NA => "IA_NA",
            OptionCode::IA_TA => "IA_TA",
            OptionCode::IA_ADDR => "IA_ADDR",
            OptionCode::ORO => "ORO",
            OptionCode::PREFERENCE => "PREFERENCE",
            OptionCode::ELAPSED_TIME => "ELAPSED_TIME",
            OptionCode::RELAY_MSG => "RELAY_MSG",
            OptionCode::AUTH => "AUTH",
            OptionCode::UNICAST => "UNICAST",
            OptionCode::STATUS_CODE => "STATUS_CODE",
            OptionCode::RAPID_COMMIT => "RAPID_COMMIT",
            OptionCode::USER_CLASS => "USER_CLASS",
            OptionCode::VENDOR_CLASS => "VENDOR_CLASS",
            OptionCode::VENDOR_OPTS => "VENDOR_OPTS",
            OptionCode::INTERFACE_ID => "INTERFACE_ID",
            OptionCode::RECONF_MSG => "RECONF_MSG",
            OptionCode::RECONF_ACCEPT => "RECONF_ACCEPT",
            OptionCode::DNS_SERVERS => "DNS_SERVERS",
            OptionCode::DOMAIN_LIST => "DOMAIN_LIST",
            OptionCode::BOOTFILE_URL => "BOOTFILE_URL",
            OptionCode::BOOTFILE_PARAM => "BOOTFILE_PARAM",
            Self(x) => return f.debug_tuple("OptionCode").field(&x).finish(),
        };
        f.write_str(name)
    }
}

/// A typed option payload belonging to a single option code.
pub trait OptionData: Encode + Decode {
    const CODE: OptionCode;
}

/// Iterator over the raw options of an encoded option stream.
///
/// Yields an error and then stops if the stream is truncated.
#[derive(Clone, Debug)]
pub struct RawOptions<'a>(&'a [u8]);

impl<'a> RawOptions<'a> {
    pub fn new(b: &'a [u8]) -> Self {
        Self(b)
    }
}

impl<'a> Iterator for RawOptions<'a> {
    type Item = Result<(OptionCode, &'a [u8]), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match *self.0 {
            [] => None,
            [c0, c1, l0, l1, ref rest @ ..] => {
                let code = NetworkEndian::read_u16(&[c0, c1]);
                let len = NetworkEndian::read_u16(&[l0, l1]).into();
                if rest.len() < len {
                    self.0 = &[];
                    return Some(Err(Error::InvalidPacket));
                }
                let (data, next) = rest.split_at(len);
                self.0 = next;
                Some(Ok((OptionCode(code), data)))
            }
            _ => {
                self.0 = &[];
                Some(Err(Error::InvalidPacket))
            }
        }
    }
}

impl FusedIterator for RawOptions<'_> {}

/// A mapping from option codes to their payloads.
///
/// An option code may repeat; the payloads of a repeated code keep
/// their relative order.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Options(BTreeMap<OptionCode, Vec<Vec<u8>>>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw payload for the given option code.
    pub fn add_raw(&mut self, code: OptionCode, data: impl Into<Vec<u8>>) {
        self.0.entry(code).or_default().push(data.into());
    }

    /// Encodes a typed payload and appends it under its option code.
    pub fn add<T: OptionData>(&mut self, value: &T) -> Result<(), Error> {
        self.add_raw(T::CODE, value.to_vec()?);
        Ok(())
    }

    /// Returns all payloads of the given option code.
    pub fn get(&self, code: OptionCode) -> Result<&[Vec<u8>], Error> {
        self.0
            .get(&code)
            .map(Vec::as_slice)
            .ok_or(Error::OptionNotPresent)
    }

    /// Returns the payload of an option that must appear exactly once.
    ///
    /// Fails with [`Error::InvalidPacket`] if the option repeats.
    pub fn get_one(&self, code: OptionCode) -> Result<&[u8], Error> {
        match self.get(code)? {
            [x] => Ok(x.as_slice()),
            _ => Err(Error::InvalidPacket),
        }
    }

    pub fn contains(&self, code: OptionCode) -> bool {
        self.0.contains_key(&code)
    }

    /// Removes every payload of the given option code.
    pub fn remove(&mut self, code: OptionCode) -> Option<Vec<Vec<u8>>> {
        self.0.remove(&code)
    }

    /// Returns an iterator over all options, ordered by option code.
    pub fn iter(&self) -> impl Iterator<Item = (OptionCode, &[u8])> + '_ {
        self.0
            .iter()
            .flat_map(|(&code, xs)| xs.iter().map(move |x| (code, x.as_slice())))
    }

    /// Returns the total number of options, counting repeats.
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn get_one_as<T: OptionData>(&self) -> Result<T, Error> {
        T::decode(self.get_one(T::CODE)?)
    }

    pub(crate) fn get_all_as<T: OptionData>(&self) -> Result<Vec<T>, Error> {
        self.get(T::CODE)?.iter().map(|x| T::decode(x)).collect()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl Encode for Options {
    fn encode(&self, cursor: &mut Cursor<Vec<u8>>) -> Result<(), Error> {
        for (code, data) in self.iter() {
            cursor.write_u16(code.into());
            cursor.write_with_len(data)?;
        }
        Ok(())
    }
}

impl Decode for Options {
    fn decode(b: &[u8]) -> Result<Self, Error> {
        let mut options = Options::new();
        for x in RawOptions::new(b) {
            let (code, data) = x.map_err(|e| {
                net_trace!("DHCPv6 truncated option stream of {} bytes", b.len());
                e
            })?;
            options.add_raw(code, data);
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn encode_options() -> Result<(), Error> {
        let mut options = Options::new();
        options.add_raw(OptionCode::RAPID_COMMIT, Vec::new());
        options.add_raw(OptionCode::CLIENT_ID, vec![0x00, 0x03, 0x00, 0x01]);
        options.add_raw(OptionCode::IA_NA, vec![1; 12]);
        options.add_raw(OptionCode::IA_NA, vec![2; 12]);

        let mut expected = vec![0x00, 0x01, 0x00, 0x04, 0x00, 0x03, 0x00, 0x01];
        expected.extend_from_slice(&[0x00, 0x03, 0x00, 0x0c]);
        expected.extend_from_slice(&[1; 12]);
        expected.extend_from_slice(&[0x00, 0x03, 0x00, 0x0c]);
        expected.extend_from_slice(&[2; 12]);
        expected.extend_from_slice(&[0x00, 0x0e, 0x00, 0x00]);
        assert_eq!(options.to_vec()?, expected);
        Ok(())
    }

    #[test]
    fn decode_preserves_repeat_order() -> Result<(), Error> {
        let b = [
            0x00, 0x17, 0x00, 0x01, 0xaa, // DNS servers
            0x00, 0x03, 0x00, 0x01, 0x02, // IA_NA
            0x00, 0x17, 0x00, 0x02, 0xbb, 0xcc, // DNS servers
            0x00, 0x0e, 0x00, 0x00, // rapid commit
        ];
        let options = Options::decode(&b)?;
        assert_eq!(options.len(), 4);
        assert_eq!(
            options.get(OptionCode::DNS_SERVERS)?,
            [vec![0xaa], vec![0xbb, 0xcc]]
        );
        assert!(options.get_one(OptionCode::RAPID_COMMIT)?.is_empty());
        assert_eq!(Options::decode(&options.to_vec()?)?, options);
        Ok(())
    }

    #[test]
    fn empty_stream() -> Result<(), Error> {
        let options = Options::decode(&[])?;
        assert!(options.is_empty());
        assert!(options.to_vec()?.is_empty());
        Ok(())
    }

    #[test]
    fn truncated_stream() {
        // Header cut short
        assert_eq!(
            Options::decode(&[0x00, 0x01, 0x00]),
            Err(Error::InvalidPacket)
        );
        // Declared length exceeds remaining data
        assert_eq!(
            Options::decode(&[0x00, 0x01, 0x00, 0x04, 0xaa, 0xbb]),
            Err(Error::InvalidPacket)
        );
        // Valid first option followed by garbage
        assert_eq!(
            Options::decode(&[0x00, 0x0e, 0x00, 0x00, 0x01]),
            Err(Error::InvalidPacket)
        );
    }

    #[test]
    fn raw_options_stop_after_error() {
        let mut iter = RawOptions::new(&[0x00, 0x01, 0x00, 0x09, 0x00]);
        assert_eq!(iter.next(), Some(Err(Error::InvalidPacket)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn get_missing_and_repeated() {
        let mut options = Options::new();
        assert_eq!(
            options.get(OptionCode::CLIENT_ID),
            Err(Error::OptionNotPresent)
        );
        options.add_raw(OptionCode::CLIENT_ID, vec![1]);
        options.add_raw(OptionCode::CLIENT_ID, vec![2]);
        assert_eq!(
            options.get_one(OptionCode::CLIENT_ID),
            Err(Error::InvalidPacket)
        );
        assert_eq!(
            options.remove(OptionCode::CLIENT_ID),
            Some(vec![vec![1], vec![2]])
        );
        assert!(!options.contains(OptionCode::CLIENT_ID));
    }

    #[test]
    fn oversized_payload() {
        let mut options = Options::new();
        options.add_raw(OptionCode::USER_CLASS, vec![0; 0x10000]);
        assert_eq!(options.to_vec(), Err(Error::TooLong));
    }

    #[cfg(feature = "std")]
    #[test]
    fn option_code_debug() {
        assert_eq!(format!("{:?}", OptionCode::IA_ADDR), "IA_ADDR");
        assert_eq!(format!("{:?}", OptionCode(1234)), "OptionCode(1234)");
    }
}
