//! A module to encapsulate all things related to radio operation.
mod cc1101;
pub use cc1101::{
    commands, frequency_to_word, mnemonics, registers, status_registers, wor_event_timeout,
    wor_timeout_limits, word_to_frequency, Cc1101Error, RadioResult, CC1101, DEFAULT_POLL_LIMIT,
    POLL_INTERVAL_US,
};

mod config;
pub use config::{RadioConfig, DEFAULT_CRYSTAL_HZ};
