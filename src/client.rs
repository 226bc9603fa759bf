/*!
Building a Solicit message and checking the Advertise sent in reply.

Only the message contents are handled here. Sending, retransmission
and server selection are left to the caller.

# Examples

```
use dhcp6::client::Solicit;
use dhcp6::{Encode as _, MessageType};

let mac = [0xb8, 0xae, 0xed, 0x7a, 0x10, 0x66];
let packet = Solicit::default().packet(&mac)?;
assert_eq!(packet.message_type, MessageType::Solicit);
assert!(packet.options.rapid_commit()?);
let bytes = packet.to_vec()?;
# let _ = bytes;
# Ok::<(), dhcp6::Error>(())
```
 */

use alloc::vec;
use alloc::vec::Vec;

use crate::accessors::OptionRequest;
use crate::duid::HARDWARE_TYPE_IEEE802;
use crate::{Decode, Duid, Encode, Error, IaNa, MessageType, OptionCode, Options, Packet};

/// Parameters of a Solicit message.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Solicit {
    pub transaction_id: [u8; 3],
    /// The IAID of the requested IA_NA.
    pub iaid: [u8; 4],
    /// The hardware type recorded in the client's DUID-LL.
    pub hardware_type: u16,
    /// Options listed in the Option Request option.
    pub requested_options: Vec<OptionCode>,
}

impl Default for Solicit {
    fn default() -> Self {
        Self {
            transaction_id: [0x00, 0x01, 0x02],
            iaid: *b"root",
            hardware_type: HARDWARE_TYPE_IEEE802,
            requested_options: vec![
                OptionCode::DNS_SERVERS,
                OptionCode::DOMAIN_LIST,
                OptionCode::BOOTFILE_URL,
                OptionCode::BOOTFILE_PARAM,
            ],
        }
    }
}

impl Solicit {
    /// Returns the options of a Solicit sent from `hardware_address`.
    pub fn options(&self, hardware_address: &[u8]) -> Result<Options, Error> {
        let mut options = Options::new();
        let duid = Duid::link_layer(self.hardware_type, hardware_address);
        options.add_raw(OptionCode::CLIENT_ID, duid.to_vec()?);
        options.add(&IaNa::new(self.iaid, 0, 0, Options::new()))?;
        options.add_raw(OptionCode::RAPID_COMMIT, Vec::new());
        options.add_raw(OptionCode::ELAPSED_TIME, 0u16.to_be_bytes());
        options.add(&OptionRequest(self.requested_options.clone()))?;
        Ok(options)
    }

    /// Builds a Solicit message sent from `hardware_address`.
    pub fn packet(&self, hardware_address: &[u8]) -> Result<Packet, Error> {
        Ok(Packet {
            message_type: MessageType::Solicit,
            transaction_id: self.transaction_id,
            options: self.options(hardware_address)?,
        })
    }
}

/// Builds a Solicit message with the default parameters.
pub fn new_solicit_packet(hardware_address: &[u8]) -> Result<Packet, Error> {
    Solicit::default().packet(hardware_address)
}

/// Decodes a reply to a Solicit and checks that it is an Advertise
/// offering addresses.
///
/// Every IA_NA option must decode and carry at least one IA Address
/// option. Decoding errors are returned unchanged.
pub fn validate_advertise(b: &[u8]) -> Result<Packet, Error> {
    let packet = Packet::decode(b)?;
    if packet.message_type != MessageType::Advertise {
        net_debug!(
            "DHCPv6 expected advertise but got {}",
            packet.message_type
        );
        return Err(Error::InvalidPacket);
    }

    let ia_na = packet.options.ia_na().map_err(|e| {
        net_debug!("DHCPv6 advertise has no usable IA_NA: {:?}", e);
        e
    })?;
    for ia in &ia_na {
        ia.options.ia_addr().map_err(|e| {
            net_debug!("DHCPv6 advertise IA_NA {:?} has no usable address: {:?}", ia.iaid, e);
            e
        })?;
    }
    Ok(packet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duid::HARDWARE_TYPE_ETHERNET;
    use crate::{Addr, IaAddr};

    const MAC: [u8; 6] = [0xb8, 0xae, 0xed, 0x7a, 0x10, 0x66];

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn assigned_addr() -> Addr {
        let mut x = [0; 16];
        x[..4].copy_from_slice(&[0x20, 0x01, 0x0d, 0xb8]);
        x[15] = 0x01;
        Addr(x)
    }

    /// Answers a Solicit with an Advertise offering a single address
    /// for every requested IA_NA.
    fn serve(solicit: &[u8]) -> Result<Vec<u8>, Error> {
        let solicit = Packet::decode(solicit)?;
        let mut options = Options::new();
        options.add_raw(OptionCode::CLIENT_ID, solicit.options.client_id()?.to_vec()?);
        let server_id = Duid::link_layer(HARDWARE_TYPE_ETHERNET, &[0x02, 0, 0, 0, 0, 0x01]);
        options.add_raw(OptionCode::SERVER_ID, server_id.to_vec()?);
        for ia in solicit.options.ia_na()? {
            let mut nested = Options::new();
            nested.add(&IaAddr::new(assigned_addr(), 3600, 7200, Options::new())?)?;
            options.add(&IaNa::new(ia.iaid, 1800, 2880, nested))?;
        }
        Packet {
            message_type: MessageType::Advertise,
            transaction_id: solicit.transaction_id,
            options,
        }
        .to_vec()
    }

    #[test]
    fn solicit_options() -> Result<(), Error> {
        let options = Solicit::default().options(&MAC)?;

        let mut expected = Options::new();
        expected.add_raw(
            OptionCode::IA_NA,
            vec![0x72, 0x6f, 0x6f, 0x74, 0, 0, 0, 0, 0, 0, 0, 0],
        );
        expected.add_raw(OptionCode::RAPID_COMMIT, Vec::new());
        expected.add_raw(OptionCode::ELAPSED_TIME, vec![0x00, 0x00]);
        expected.add_raw(
            OptionCode::ORO,
            vec![0x00, 23, 0x00, 24, 0x00, 59, 0x00, 60],
        );
        expected.add_raw(
            OptionCode::CLIENT_ID,
            vec![0x00, 0x03, 0x00, 0x06, 0xb8, 0xae, 0xed, 0x7a, 0x10, 0x66],
        );
        assert_eq!(options, expected);

        assert_eq!(
            options.client_id()?,
            Duid::link_layer(HARDWARE_TYPE_IEEE802, &MAC)
        );
        assert_eq!(options.elapsed_time()?, 0);
        assert!(options.rapid_commit()?);
        assert_eq!(
            options.option_request()?,
            [
                OptionCode::DNS_SERVERS,
                OptionCode::DOMAIN_LIST,
                OptionCode::BOOTFILE_URL,
                OptionCode::BOOTFILE_PARAM
            ]
        );
        assert_eq!(options.ia_na()?, [IaNa::new(*b"root", 0, 0, Options::new())]);
        Ok(())
    }

    #[test]
    fn solicit_packet() -> Result<(), Error> {
        let packet = new_solicit_packet(&MAC)?;
        assert_eq!(
            packet,
            Packet {
                message_type: MessageType::Solicit,
                transaction_id: [0x00, 0x01, 0x02],
                options: Solicit::default().options(&MAC)?,
            }
        );
        assert_eq!(Packet::decode(&packet.to_vec()?)?, packet);
        Ok(())
    }

    #[test]
    fn solicit_and_advertise() -> Result<(), Error> {
        init_logger();
        let solicit = new_solicit_packet(&MAC)?;
        let reply = validate_advertise(&serve(&solicit.to_vec()?)?)?;

        assert_eq!(reply.message_type, MessageType::Advertise);
        assert_eq!(reply.transaction_id, [0x00, 0x01, 0x02]);
        assert_eq!(reply.options.client_id()?, solicit.options.client_id()?);

        let ia_na = reply.options.ia_na()?;
        assert_eq!(ia_na[0].iaid, *b"root");
        let ia_addr = ia_na[0].options.ia_addr()?;
        assert_eq!(ia_addr[0].addr, assigned_addr());
        assert_eq!(ia_addr[0].valid_lifetime, 7200);
        Ok(())
    }

    #[test]
    fn advertise_without_ia_na() -> Result<(), Error> {
        init_logger();
        let mut options = Options::new();
        options.add_raw(OptionCode::RAPID_COMMIT, Vec::new());
        let reply = Packet {
            message_type: MessageType::Advertise,
            transaction_id: [0x00, 0x01, 0x02],
            options,
        };
        assert_eq!(
            validate_advertise(&reply.to_vec()?),
            Err(Error::OptionNotPresent)
        );
        Ok(())
    }

    #[test]
    fn advertise_without_address() -> Result<(), Error> {
        init_logger();
        let mut options = Options::new();
        options.add(&IaNa::new(*b"root", 0, 0, Options::new()))?;
        let reply = Packet {
            message_type: MessageType::Advertise,
            transaction_id: [0x00, 0x01, 0x02],
            options,
        };
        assert_eq!(
            validate_advertise(&reply.to_vec()?),
            Err(Error::OptionNotPresent)
        );
        Ok(())
    }

    #[test]
    fn not_an_advertise() -> Result<(), Error> {
        init_logger();
        let reply = serve(&new_solicit_packet(&MAC)?.to_vec()?)?;
        let mut reply = Packet::decode(&reply)?;
        reply.message_type = MessageType::Reply;
        assert_eq!(
            validate_advertise(&reply.to_vec()?),
            Err(Error::InvalidPacket)
        );
        Ok(())
    }

    #[test]
    fn malformed_advertise() -> Result<(), Error> {
        init_logger();
        let reply = serve(&new_solicit_packet(&MAC)?.to_vec()?)?;
        assert_eq!(
            validate_advertise(&reply[..3]),
            Err(Error::UnexpectedEndOfData)
        );
        assert_eq!(
            validate_advertise(&reply[..reply.len() - 1]),
            Err(Error::InvalidPacket)
        );
        Ok(())
    }
}
