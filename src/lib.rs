#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`CC1101::new()`](fn@crate::radio::CC1101::new)
//! - [`CC1101::init()`](fn@crate::radio::CC1101::init)
//! - [`CC1101::as_rx()`](fn@crate::radio::CC1101::as_rx)
//! - [`CC1101::as_idle()`](fn@crate::radio::CC1101::as_idle)
//! - [`CC1101::get_state()`](fn@crate::radio::CC1101::get_state)
//! - [`CC1101::send()`](fn@crate::radio::CC1101::send)
//! - [`CC1101::read()`](fn@crate::radio::CC1101::read)
//! - [`CC1101::crc_ok()`](fn@crate::radio::CC1101::crc_ok)
//! - [`CC1101::rssi_dbm()`](fn@crate::radio::CC1101::rssi_dbm)
//! - [`CC1101::lqi()`](fn@crate::radio::CC1101::lqi)
//!
//! ## Advanced API
//!
//! - [`CC1101::send_preloaded()`](fn@crate::radio::CC1101::send_preloaded)
//! - [`CC1101::send_fmt()`](fn@crate::radio::CC1101::send_fmt)
//! - [`CC1101::strobe()`](fn@crate::radio::CC1101::strobe)
//! - [`CC1101::read_register()`](fn@crate::radio::CC1101::read_register)
//! - [`CC1101::flush_rx()`](fn@crate::radio::CC1101::flush_rx)
//! - [`CC1101::flush_tx()`](fn@crate::radio::CC1101::flush_tx)
//! - [`CC1101::rx_bytes()`](fn@crate::radio::CC1101::rx_bytes)
//! - [`CC1101::tx_bytes()`](fn@crate::radio::CC1101::tx_bytes)
//! - [`CC1101::get_receive_status()`](fn@crate::radio::CC1101::get_receive_status)
//! - [`CC1101::part_number()`](fn@crate::radio::CC1101::part_number)
//! - [`CC1101::version()`](fn@crate::radio::CC1101::version)
//! - [`CC1101::print_details()`](fn@crate::radio::CC1101::print_details)
//!
//! ## Configuration API
//!
//! - [`CC1101::with_config()`](fn@crate::radio::CC1101::with_config)
//! - [`CC1101::set_frequency()`](fn@crate::radio::CC1101::set_frequency)
//! - [`CC1101::get_frequency()`](fn@crate::radio::CC1101::get_frequency)
//! - [`CC1101::set_data_rate()`](fn@crate::radio::CC1101::set_data_rate)
//! - [`CC1101::set_modem_tuning()`](fn@crate::radio::CC1101::set_modem_tuning)
//! - [`CC1101::set_pa_level()`](fn@crate::radio::CC1101::set_pa_level)
//! - [`CC1101::set_address_filter()`](fn@crate::radio::CC1101::set_address_filter)
//! - [`CC1101::set_sync_word()`](fn@crate::radio::CC1101::set_sync_word)
//! - [`CC1101::set_max_packet_size()`](fn@crate::radio::CC1101::set_max_packet_size)
//! - [`CC1101::set_whitening()`](fn@crate::radio::CC1101::set_whitening)
//! - [`CC1101::power_down()`](fn@crate::radio::CC1101::power_down)
//! - [`CC1101::wor()`](fn@crate::radio::CC1101::wor)
//! - [`CC1101::wor_to_rx()`](fn@crate::radio::CC1101::wor_to_rx)
//! - [`CC1101::poll_limit`](crate::radio::CC1101::poll_limit)
//!
#![no_std]

mod types;
pub use types::{
    AddressFilter, ChipState, DataRate, ModemTuning, PaLevel, ReceiveStatus, StatusByte,
    MAX_PACKET_LEN,
};
pub mod radio;
