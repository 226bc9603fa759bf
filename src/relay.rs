/*!
Relay agent messages.

A relay agent wraps the message it forwards in a Relay-forward message,
and a server answers with a Relay-reply message. The relayed message
travels in a Relay Message option.

```text
 0                   1                   2                   3
 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|    msg-type   |   hop-count   |                               |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               |
|                                                               |
|                         link-address                          |
|                                                               |
|                               +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|                               |                               |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               |
|                                                               |
|                         peer-address                          |
|                                                               |
|                               +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|                               |                               |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               |
.                                                               .
.            options (variable number and length)   ....        .
|                                                               |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
```
 */

use alloc::vec::Vec;

use crate::{Addr, Cursor, Decode, Encode, Error, MessageType, OptionCode, Options, Packet};

/// The length of the fixed fields of a relay agent message.
const HEADER_LEN: usize = 34;

/// A Relay-forward or Relay-reply message.
///
/// The options should include a Relay Message option. This is not
/// checked when encoding or decoding.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RelayMessage {
    /// Either [`MessageType::RelayForward`] or [`MessageType::RelayReply`].
    pub message_type: MessageType,
    /// Number of relay agents that have relayed this message.
    pub hop_count: u8,
    /// An address used by the server to identify the link on which the
    /// client is located.
    pub link_address: Addr,
    /// The address of the client or relay agent from which the message
    /// to be relayed was received.
    pub peer_address: Addr,
    pub options: Options,
}

impl RelayMessage {
    /// Constructs a relay agent message encapsulating `inner`.
    ///
    /// Fails with [`Error::InvalidPacket`] unless `message_type` is a
    /// relay message type.
    pub fn new<T: Encode>(
        message_type: MessageType,
        hop_count: u8,
        link_address: Addr,
        peer_address: Addr,
        inner: &T,
    ) -> Result<Self, Error> {
        if !message_type.is_relay() {
            return Err(Error::InvalidPacket);
        }
        let mut options = Options::new();
        options.add_raw(OptionCode::RELAY_MSG, inner.to_vec()?);
        Ok(Self {
            message_type,
            hop_count,
            link_address,
            peer_address,
            options,
        })
    }

    /// Decodes the encapsulated client/server message.
    pub fn inner_packet(&self) -> Result<Packet, Error> {
        Packet::decode(self.options.relay_message()?)
    }

    /// Decodes the encapsulated message of a relay chain.
    pub fn inner_relay(&self) -> Result<RelayMessage, Error> {
        RelayMessage::decode(self.options.relay_message()?)
    }
}

impl Encode for RelayMessage {
    fn encode(&self, cursor: &mut Cursor<Vec<u8>>) -> Result<(), Error> {
        cursor.write_u8(self.message_type.into());
        cursor.write_u8(self.hop_count);
        cursor.write_n(16).copy_from_slice(&self.link_address.0);
        cursor.write_n(16).copy_from_slice(&self.peer_address.0);
        self.options.encode(cursor)
    }
}

impl Decode for RelayMessage {
    fn decode(b: &[u8]) -> Result<Self, Error> {
        let mut cursor = Cursor::new(b);
        if cursor.len() < HEADER_LEN {
            return Err(Error::UnexpectedEndOfData);
        }
        let message_type: MessageType = cursor.read_u8()?.into();
        let hop_count = cursor.read_u8()?;
        let link_address = cursor.read_addr()?;
        let peer_address = cursor.read_addr()?;
        let options = Options::decode(cursor.rest()).map_err(|_| {
            net_trace!("DHCPv6 {} relay message has invalid options", message_type);
            Error::InvalidPacket
        })?;
        Ok(Self {
            message_type,
            hop_count,
            link_address,
            peer_address,
            options,
        })
    }
}
