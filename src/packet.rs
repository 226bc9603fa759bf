/*!
Client/server DHCPv6 messages.

```text
 0                   1                   2                   3
 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|    msg-type   |               transaction-id                  |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|                                                               |
.                            options                            .
.                 (variable number and length)                  .
|                                                               |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
```
 */

use alloc::vec::Vec;
use core::fmt;

use crate::{Cursor, Decode, Encode, Error, Options};

/// DHCPv6 message type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[non_exhaustive]
pub enum MessageType {
    Solicit,
    Advertise,
    Request,
    Confirm,
    Renew,
    Rebind,
    Reply,
    Release,
    Decline,
    Reconfigure,
    InformationRequest,
    RelayForward,
    RelayReply,
    Other(u8),
}

impl MessageType {
    /// Returns whether this is a relay agent message type.
    pub fn is_relay(self) -> bool {
        matches!(self, MessageType::RelayForward | MessageType::RelayReply)
    }
}

impl From<u8> for MessageType {
    fn from(x: u8) -> Self {
        use MessageType::*;
        match x {
            1 => Solicit,
            2 => Advertise,
            3 => Request,
            4 => Confirm,
            5 => Renew,
            6 => Rebind,
            7 => Reply,
            8 => Release,
            9 => Decline,
            10 => Reconfigure,
            11 => InformationRequest,
            12 => RelayForward,
            13 => RelayReply,
            _ => Other(x),
        }
    }
}

impl From<MessageType> for u8 {
    fn from(x: MessageType) -> u8 {
        use MessageType::*;
        match x {
            Solicit => 1,
            Advertise => 2,
            Request => 3,
            Confirm => 4,
            Renew => 5,
            Rebind => 6,
            Reply => 7,
            Release => 8,
            Decline => 9,
            Reconfigure => 10,
            InformationRequest => 11,
            RelayForward => 12,
            RelayReply => 13,
            Other(x) => x,
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use MessageType::*;
        f.write_str(match *self {
            Solicit => "SOLICIT",
            Advertise => "ADVERTISE",
            Request => "REQUEST",
            Confirm => "CONFIRM",
            Renew => "RENEW",
            Rebind => "REBIND",
            Reply => "REPLY",
            Release => "RELEASE",
            Decline => "DECLINE",
            Reconfigure => "RECONFIGURE",
            InformationRequest => "INFORMATION-REQUEST",
            RelayForward => "RELAY-FORW",
            RelayReply => "RELAY-REPL",
            Other(x) => return write!(f, "unknown({})", x),
        })
    }
}

/// A client/server DHCPv6 message.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Packet {
    pub message_type: MessageType,
    /// Correlates a reply with the request that caused it.
    pub transaction_id: [u8; 3],
    pub options: Options,
}

impl Encode for Packet {
    fn encode(&self, cursor: &mut Cursor<Vec<u8>>) -> Result<(), Error> {
        cursor.write_u8(self.message_type.into());
        cursor.write(&self.transaction_id);
        self.options.encode(cursor)
    }
}

impl Decode for Packet {
    fn decode(b: &[u8]) -> Result<Self, Error> {
        let mut cursor = Cursor::new(b);
        if cursor.len() < 4 {
            return Err(Error::UnexpectedEndOfData);
        }
        let message_type: MessageType = cursor.read_u8()?.into();
        let transaction_id = cursor.read_array::<3>()?;
        let options = Options::decode(cursor.rest()).map_err(|_| {
            net_trace!("DHCPv6 {} packet has invalid options", message_type);
            Error::InvalidPacket
        })?;
        Ok(Self {
            message_type,
            transaction_id,
            options,
        })
    }
}
