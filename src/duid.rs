/*!
DHCP Unique Identifiers.

Each client and server has a DUID, carried in the Client Identifier and
Server Identifier options. The first two bytes hold the DUID type.
 */

use alloc::vec::Vec;

use crate::{Cursor, Decode, Encode, Error};

/// The ARP hardware type of Ethernet.
pub const HARDWARE_TYPE_ETHERNET: u16 = 1;
/// The ARP hardware type of IEEE 802 networks.
pub const HARDWARE_TYPE_IEEE802: u16 = 6;

/// A DHCP Unique Identifier.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[non_exhaustive]
pub enum Duid {
    /// 1 Link-layer address plus time
    LinkLayerTime {
        hardware_type: u16,
        /// Seconds since midnight (UTC), January 1, 2000, modulo 2^32.
        time: u32,
        link_layer_address: Vec<u8>,
    },
    /// 2 Vendor-assigned unique ID based on Enterprise Number
    Enterprise {
        enterprise_number: u32,
        identifier: Vec<u8>,
    },
    /// 3 Link-layer address
    LinkLayer {
        hardware_type: u16,
        link_layer_address: Vec<u8>,
    },
    /// 4 Universally Unique Identifier
    Uuid([u8; 16]),
}

impl Duid {
    /// Constructs a DUID-LL from a hardware type and address.
    pub fn link_layer(hardware_type: u16, link_layer_address: &[u8]) -> Self {
        Duid::LinkLayer {
            hardware_type,
            link_layer_address: link_layer_address.into(),
        }
    }

    /// Returns the value of the DUID type field.
    pub fn duid_type(&self) -> u16 {
        match *self {
            Duid::LinkLayerTime { .. } => 1,
            Duid::Enterprise { .. } => 2,
            Duid::LinkLayer { .. } => 3,
            Duid::Uuid(_) => 4,
        }
    }
}

impl Encode for Duid {
    fn encode(&self, cursor: &mut Cursor<Vec<u8>>) -> Result<(), Error> {
        cursor.write_u16(self.duid_type());
        match self {
            Duid::LinkLayerTime {
                hardware_type,
                time,
                link_layer_address,
            } => {
                cursor.write_u16(*hardware_type);
                cursor.write_u32(*time);
                cursor.write(link_layer_address);
            }
            Duid::Enterprise {
                enterprise_number,
                identifier,
            } => {
                cursor.write_u32(*enterprise_number);
                cursor.write(identifier);
            }
            Duid::LinkLayer {
                hardware_type,
                link_layer_address,
            } => {
                cursor.write_u16(*hardware_type);
                cursor.write(link_layer_address);
            }
            Duid::Uuid(uuid) => cursor.write(uuid),
        }
        Ok(())
    }
}

impl Decode for Duid {
    fn decode(b: &[u8]) -> Result<Self, Error> {
        let min_len = match *b {
            [0, 1, ..] => 8,
            [0, 2, ..] => 6,
            [0, 3, ..] => 4,
            [0, 4, ..] => 18,
            _ => return Err(Error::InvalidPacket),
        };
        if b.len() < min_len {
            return Err(Error::InvalidPacket);
        }

        let mut cursor = Cursor::new(b);
        Ok(match cursor.read_u16()? {
            1 => Duid::LinkLayerTime {
                hardware_type: cursor.read_u16()?,
                time: cursor.read_u32()?,
                link_layer_address: cursor.rest().into(),
            },
            2 => Duid::Enterprise {
                enterprise_number: cursor.read_u32()?,
                identifier: cursor.rest().into(),
            },
            3 => Duid::LinkLayer {
                hardware_type: cursor.read_u16()?,
                link_layer_address: cursor.rest().into(),
            },
            _ => {
                if b.len() != min_len {
                    return Err(Error::InvalidPacket);
                }
                Duid::Uuid(cursor.read_array()?)
            }
        })
    }
}
