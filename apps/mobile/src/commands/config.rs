//! # Config Commands
//!
//! Commands for retrieving application configuration.

use serde::Serialize;
use tracing::debug;

use crate::state::ConfigState;
use shelf_core::BrazilianState;

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (header, form limits)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// One entry of the state-of-origin picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateOptionDto {
    pub code: &'static str,
    pub name: &'static str,
}

/// The 27 federative units, in picker order.
pub fn list_states() -> Vec<StateOptionDto> {
    BrazilianState::ALL
        .iter()
        .map(|s| StateOptionDto {
            code: s.code(),
            name: s.name(),
        })
        .collect()
}
