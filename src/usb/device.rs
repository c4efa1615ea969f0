//! USB device side of the CAT link
//!
//! Descriptor configuration and the packet pump between a CDC ACM class and
//! a [`CdcBridge`].

use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::driver::{Driver, EndpointError};

use super::cdc::{CdcBridge, Packet, UsbDeviceInfo};
use crate::config::USB_CDC_PACKET_SIZE;

/// Device configuration for a CDC ACM serial port
#[must_use]
pub fn usb_config(info: &UsbDeviceInfo) -> embassy_usb::Config<'static> {
    let mut config = embassy_usb::Config::new(info.vid, info.pid);
    config.manufacturer = Some(info.manufacturer);
    config.product = Some(info.product);
    config.serial_number = Some(info.serial);
    config.max_power = 100;
    config.max_packet_size_0 = 64;
    config
}

/// Serve one host connection.
///
/// Every received packet is queued in `bridge` and `service` is called until
/// the bridge has no readable input left; each pass's output is sent before
/// the next pass. Returns when the host disconnects.
///
/// # Errors
///
/// Returns the endpoint error that ended the connection.
pub async fn pump<'d, D, F>(
    class: &mut CdcAcmClass<'d, D>,
    bridge: &mut CdcBridge,
    mut service: F,
) -> Result<(), EndpointError>
where
    D: Driver<'d>,
    F: FnMut(&mut CdcBridge),
{
    let mut rx = [0_u8; USB_CDC_PACKET_SIZE];
    let mut tx: Packet = [0; USB_CDC_PACKET_SIZE];

    loop {
        let n = class.read_packet(&mut rx).await?;
        bridge.receive(&rx[..n]);

        loop {
            service(bridge);
            send_pending(class, bridge, &mut tx).await?;
            if bridge.pending_rx() == 0 {
                break;
            }
        }
    }
}

async fn send_pending<'d, D: Driver<'d>>(
    class: &mut CdcAcmClass<'d, D>,
    bridge: &mut CdcBridge,
    packet: &mut Packet,
) -> Result<(), EndpointError> {
    let mut last = 0;
    loop {
        let n = bridge.take_packet(packet);
        if n == 0 {
            break;
        }
        class.write_packet(&packet[..n]).await?;
        last = n;
    }
    // A full last packet needs a zero-length packet to end the transfer
    if last == USB_CDC_PACKET_SIZE {
        class.write_packet(&[]).await?;
    }
    Ok(())
}
