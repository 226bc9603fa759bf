//! Typed views over [`Options`].
//!
//! Accessors never modify the option map. Options that may appear at
//! most once fail with [`Error::InvalidPacket`] when repeated.

use alloc::string::String;
use alloc::vec::Vec;
use byteorder::{ByteOrder, NetworkEndian};
use core::convert::TryInto;
use core::fmt;

use crate::options::OptionData;
use crate::{Addr, Cursor, Decode, Duid, Encode, Error, IaAddr, IaNa, IaTa, OptionCode, Options};

/// The data of the Option Request option.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OptionRequest(pub Vec<OptionCode>);

impl OptionData for OptionRequest {
    const CODE: OptionCode = OptionCode::ORO;
}

impl Encode for OptionRequest {
    fn encode(&self, cursor: &mut Cursor<Vec<u8>>) -> Result<(), Error> {
        for &code in &self.0 {
            cursor.write_u16(code.into());
        }
        Ok(())
    }
}

impl Decode for OptionRequest {
    fn decode(b: &[u8]) -> Result<Self, Error> {
        if b.len() % 2 != 0 {
            return Err(Error::InvalidPacket);
        }
        Ok(Self(
            b.chunks(2)
                .map(|x| OptionCode(NetworkEndian::read_u16(x)))
                .collect(),
        ))
    }
}

/// A status code carried in a Status Code option.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(pub u16);

impl Status {
    pub const SUCCESS: Status = Status(0);
    pub const UNSPEC_FAIL: Status = Status(1);
    pub const NO_ADDRS_AVAIL: Status = Status(2);
    pub const NO_BINDING: Status = Status(3);
    pub const NOT_ON_LINK: Status = Status(4);
    pub const USE_MULTICAST: Status = Status(5);
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Status::SUCCESS => "Success",
            Status::UNSPEC_FAIL => "UnspecFail",
            Status::NO_ADDRS_AVAIL => "NoAddrsAvail",
            Status::NO_BINDING => "NoBinding",
            Status::NOT_ON_LINK => "NotOnLink",
            Status::USE_MULTICAST => "UseMulticast",
            Self(x) => return f.debug_tuple("Status").field(&x).finish(),
        };
        f.write_str(name)
    }
}

/// The Status Code option.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StatusCode {
    pub status: Status,
    /// A UTF-8 message for display to an end user.
    pub message: String,
}

impl OptionData for StatusCode {
    const CODE: OptionCode = OptionCode::STATUS_CODE;
}

impl Encode for StatusCode {
    fn encode(&self, cursor: &mut Cursor<Vec<u8>>) -> Result<(), Error> {
        cursor.write_u16(self.status.0);
        cursor.write(self.message.as_bytes());
        Ok(())
    }
}

impl Decode for StatusCode {
    fn decode(b: &[u8]) -> Result<Self, Error> {
        let mut cursor = Cursor::new(b);
        let status = Status(cursor.read_u16().map_err(|_| Error::InvalidPacket)?);
        let message = core::str::from_utf8(cursor.rest()).map_err(|_| Error::InvalidPacket)?;
        Ok(Self {
            status,
            message: message.into(),
        })
    }
}

/// The Boot File Parameters option.
///
/// Each parameter is encoded with a 2-byte length prefix.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct BootFileParam(pub Vec<String>);

impl OptionData for BootFileParam {
    const CODE: OptionCode = OptionCode::BOOTFILE_PARAM;
}

impl Encode for BootFileParam {
    fn encode(&self, cursor: &mut Cursor<Vec<u8>>) -> Result<(), Error> {
        self.0
            .iter()
            .try_for_each(|param| cursor.write_with_len(param.as_bytes()))
    }
}

impl Decode for BootFileParam {
    fn decode(b: &[u8]) -> Result<Self, Error> {
        let mut cursor = Cursor::new(b);
        let mut params = Vec::new();
        while !cursor.is_empty() {
            let len = cursor.read_u16().map_err(|_| Error::InvalidPacket)?;
            let param = cursor
                .consume(len.into())
                .map_err(|_| Error::InvalidPacket)?;
            let param = core::str::from_utf8(param).map_err(|_| Error::InvalidPacket)?;
            params.push(param.into());
        }
        Ok(Self(params))
    }
}

/// Checks that an option carrying no data is present at most once and
/// has an empty payload.
fn read_flag(options: &Options, code: OptionCode) -> Result<bool, Error> {
    match options.get_one(code) {
        Ok([]) => Ok(true),
        Ok(_) => Err(Error::InvalidPacket),
        Err(Error::OptionNotPresent) => Ok(false),
        Err(e) => Err(e),
    }
}

impl Options {
    /// Returns the DUID of the client.
    pub fn client_id(&self) -> Result<Duid, Error> {
        Duid::decode(self.get_one(OptionCode::CLIENT_ID)?)
    }

    /// Returns the DUID of the server.
    pub fn server_id(&self) -> Result<Duid, Error> {
        Duid::decode(self.get_one(OptionCode::SERVER_ID)?)
    }

    /// Returns every IA_NA option, with nested options decoded.
    pub fn ia_na(&self) -> Result<Vec<IaNa>, Error> {
        self.get_all_as()
    }

    /// Returns every IA_TA option, with nested options decoded.
    pub fn ia_ta(&self) -> Result<Vec<IaTa>, Error> {
        self.get_all_as()
    }

    /// Returns every IA Address option, with nested options decoded.
    ///
    /// IA Address options are normally found in the options of an
    /// [`IaNa`] or [`IaTa`].
    pub fn ia_addr(&self) -> Result<Vec<IaAddr>, Error> {
        self.get_all_as()
    }

    /// Returns the codes listed in the Option Request option.
    pub fn option_request(&self) -> Result<Vec<OptionCode>, Error> {
        self.get_one_as::<OptionRequest>().map(|x| x.0)
    }

    pub fn preference(&self) -> Result<u8, Error> {
        match *self.get_one(OptionCode::PREFERENCE)? {
            [x] => Ok(x),
            _ => Err(Error::InvalidPacket),
        }
    }

    /// Returns the amount of time in hundredths of a second since the
    /// client began its current DHCP transaction.
    pub fn elapsed_time(&self) -> Result<u16, Error> {
        match *self.get_one(OptionCode::ELAPSED_TIME)? {
            [a, b] => Ok(NetworkEndian::read_u16(&[a, b])),
            _ => Err(Error::InvalidPacket),
        }
    }

    /// Returns the encapsulated message of a Relay Message option.
    pub fn relay_message(&self) -> Result<&[u8], Error> {
        self.get_one(OptionCode::RELAY_MSG)
    }

    /// Returns the server address the client may unicast to.
    pub fn unicast(&self) -> Result<Addr, Error> {
        let b = self.get_one(OptionCode::UNICAST)?;
        if b.len() != 16 {
            return Err(Error::InvalidPacket);
        }
        let addr: &Addr = b.try_into()?;
        Ok(*addr)
    }

    pub fn status_code(&self) -> Result<StatusCode, Error> {
        self.get_one_as()
    }

    /// Returns whether the Rapid Commit option is present.
    pub fn rapid_commit(&self) -> Result<bool, Error> {
        read_flag(self, OptionCode::RAPID_COMMIT)
    }

    /// Returns whether the Reconfigure Accept option is present.
    pub fn reconfigure_accept(&self) -> Result<bool, Error> {
        read_flag(self, OptionCode::RECONF_ACCEPT)
    }

    pub fn interface_id(&self) -> Result<&[u8], Error> {
        self.get_one(OptionCode::INTERFACE_ID)
    }

    pub fn boot_file_url(&self) -> Result<&str, Error> {
        core::str::from_utf8(self.get_one(OptionCode::BOOTFILE_URL)?)
            .map_err(|_| Error::InvalidPacket)
    }

    pub fn boot_file_param(&self) -> Result<Vec<String>, Error> {
        self.get_one_as::<BootFileParam>().map(|x| x.0)
    }
}
