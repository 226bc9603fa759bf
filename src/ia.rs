/*!
Identity Association options and the IA Address option.

Each carries a fixed header followed by an encapsulated option stream,
which is encoded and decoded by the same routines as top-level
[`Options`].
 */

use alloc::vec::Vec;

use crate::options::OptionData;
use crate::{Addr, Cursor, Decode, Encode, Error, OptionCode, Options};

/// A lifetime or timer value meaning "infinity".
pub const INFINITY: u32 = u32::MAX;

/// Identity Association for Non-temporary Addresses (IA_NA).
///
/// ```text
/// [4B IAID][4B T1][4B T2][IA_NA-options...]
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IaNa {
    /// Unique among the IAs of a client.
    pub iaid: [u8; 4],
    /// Seconds until the client contacts the server that assigned the
    /// addresses to extend their lifetimes.
    pub t1: u32,
    /// Seconds until the client contacts any available server to
    /// extend the lifetimes.
    pub t2: u32,
    pub options: Options,
}

impl IaNa {
    pub fn new(iaid: [u8; 4], t1: u32, t2: u32, options: Options) -> Self {
        Self {
            iaid,
            t1,
            t2,
            options,
        }
    }
}

impl OptionData for IaNa {
    const CODE: OptionCode = OptionCode::IA_NA;
}

impl Encode for IaNa {
    fn encode(&self, cursor: &mut Cursor<Vec<u8>>) -> Result<(), Error> {
        cursor.write(&self.iaid);
        cursor.write_u32(self.t1);
        cursor.write_u32(self.t2);
        self.options.encode(cursor)
    }
}

impl Decode for IaNa {
    fn decode(b: &[u8]) -> Result<Self, Error> {
        if b.len() < 12 {
            return Err(Error::InvalidPacket);
        }
        let mut cursor = Cursor::new(b);
        Ok(Self {
            iaid: cursor.read_array()?,
            t1: cursor.read_u32()?,
            t2: cursor.read_u32()?,
            options: Options::decode(cursor.rest())?,
        })
    }
}

/// Identity Association for Temporary Addresses (IA_TA).
///
/// ```text
/// [4B IAID][IA_TA-options...]
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IaTa {
    pub iaid: [u8; 4],
    pub options: Options,
}

impl OptionData for IaTa {
    const CODE: OptionCode = OptionCode::IA_TA;
}

impl Encode for IaTa {
    fn encode(&self, cursor: &mut Cursor<Vec<u8>>) -> Result<(), Error> {
        cursor.write(&self.iaid);
        self.options.encode(cursor)
    }
}

impl Decode for IaTa {
    fn decode(b: &[u8]) -> Result<Self, Error> {
        if b.len() < 4 {
            return Err(Error::InvalidPacket);
        }
        let mut cursor = Cursor::new(b);
        Ok(Self {
            iaid: cursor.read_array()?,
            options: Options::decode(cursor.rest())?,
        })
    }
}

/// The IA Address option, specifying an address associated with an
/// [IA_NA](IaNa) or [IA_TA](IaTa).
///
/// ```text
/// [16B address][4B preferred-lifetime][4B valid-lifetime][IAaddr-options...]
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IaAddr {
    pub addr: Addr,
    /// The preferred lifetime in seconds for the address in this option.
    pub preferred_lifetime: u32,
    /// The valid lifetime in seconds for the address in this option.
    pub valid_lifetime: u32,
    pub options: Options,
}

impl IaAddr {
    /// Constructs a new IA Address.
    ///
    /// Fails if the preferred lifetime exceeds the valid lifetime.
    pub fn new(
        addr: Addr,
        preferred_lifetime: u32,
        valid_lifetime: u32,
        options: Options,
    ) -> Result<Self, Error> {
        if preferred_lifetime > valid_lifetime {
            return Err(Error::InvalidPacket);
        }
        Ok(Self {
            addr,
            preferred_lifetime,
            valid_lifetime,
            options,
        })
    }
}

impl OptionData for IaAddr {
    const CODE: OptionCode = OptionCode::IA_ADDR;
}

impl Encode for IaAddr {
    fn encode(&self, cursor: &mut Cursor<Vec<u8>>) -> Result<(), Error> {
        cursor.write_n(16).copy_from_slice(&self.addr.0);
        cursor.write_u32(self.preferred_lifetime);
        cursor.write_u32(self.valid_lifetime);
        self.options.encode(cursor)
    }
}

impl Decode for IaAddr {
    fn decode(b: &[u8]) -> Result<Self, Error> {
        if b.len() < 24 {
            return Err(Error::InvalidPacket);
        }
        let mut cursor = Cursor::new(b);
        Ok(Self {
            addr: cursor.read_addr()?,
            preferred_lifetime: cursor.read_u32()?,
            valid_lifetime: cursor.read_u32()?,
            options: Options::decode(cursor.rest())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn example_addr() -> Addr {
        let mut x = [0; 16];
        x[..2].copy_from_slice(&[0x20, 0x01]);
        x[15] = 0x42;
        Addr(x)
    }

    #[test]
    fn encode_ia_na() -> Result<(), Error> {
        let ia_na = IaNa::new(*b"root", 0, 0, Options::new());
        assert_eq!(
            ia_na.to_vec()?,
            [0x72, 0x6f, 0x6f, 0x74, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        Ok(())
    }

    #[test]
    fn nested_ia_addr() -> Result<(), Error> {
        let mut status = Options::new();
        status.add_raw(OptionCode::STATUS_CODE, vec![0x00, 0x00]);
        let ia_addr = IaAddr::new(example_addr(), 3600, 7200, status)?;

        let mut nested = Options::new();
        nested.add(&ia_addr)?;
        let ia_na = IaNa::new([0, 0, 0, 1], 1800, 2880, nested);

        let mut options = Options::new();
        options.add(&ia_na)?;
        let options = Options::decode(&options.to_vec()?)?;

        let decoded = options.ia_na()?;
        assert_eq!(decoded, [ia_na]);
        assert_eq!(decoded[0].t1, 1800);
        assert_eq!(decoded[0].options.ia_addr()?, [ia_addr]);
        Ok(())
    }

    #[test]
    fn short_payloads() {
        assert_eq!(IaNa::decode(&[0; 11]), Err(Error::InvalidPacket));
        assert_eq!(IaTa::decode(&[0; 3]), Err(Error::InvalidPacket));
        assert_eq!(IaAddr::decode(&[0; 23]), Err(Error::InvalidPacket));
    }

    #[test]
    fn invalid_nested_options() {
        let mut b = vec![0; 12];
        b.extend_from_slice(&[0x00, 0x05, 0x00, 0x18, 0x00]);
        assert_eq!(IaNa::decode(&b), Err(Error::InvalidPacket));
    }

    #[test]
    fn ia_ta() -> Result<(), Error> {
        let b = [0xde, 0xad, 0xbe, 0xef, 0x00, 0x0e, 0x00, 0x00];
        let ia_ta = IaTa::decode(&b)?;
        assert_eq!(ia_ta.iaid, [0xde, 0xad, 0xbe, 0xef]);
        assert!(ia_ta.options.contains(OptionCode::RAPID_COMMIT));
        assert_eq!(ia_ta.to_vec()?, b);
        Ok(())
    }

    #[test]
    fn lifetimes() {
        assert_eq!(
            IaAddr::new(example_addr(), 7200, 3600, Options::new()),
            Err(Error::InvalidPacket)
        );
        assert!(IaAddr::new(example_addr(), INFINITY, INFINITY, Options::new()).is_ok());
    }
}
