//! Connection state, type and rule encodings.

use core::ffi::c_int;

/// `sp_connectionstate`
pub type sp_connectionstate = c_int;

pub const SP_CONNECTION_STATE_LOGGED_OUT: sp_connectionstate = 0;
pub const SP_CONNECTION_STATE_LOGGED_IN: sp_connectionstate = 1;
pub const SP_CONNECTION_STATE_DISCONNECTED: sp_connectionstate = 2;
pub const SP_CONNECTION_STATE_UNDEFINED: sp_connectionstate = 3;
pub const SP_CONNECTION_STATE_OFFLINE: sp_connectionstate = 4;

/// `sp_connection_type`
pub type sp_connection_type = c_int;

pub const SP_CONNECTION_TYPE_UNKNOWN: sp_connection_type = 0;
pub const SP_CONNECTION_TYPE_NONE: sp_connection_type = 1;
pub const SP_CONNECTION_TYPE_MOBILE: sp_connection_type = 2;
pub const SP_CONNECTION_TYPE_MOBILE_ROAMING: sp_connection_type = 3;
pub const SP_CONNECTION_TYPE_WIFI: sp_connection_type = 4;
pub const SP_CONNECTION_TYPE_WIRED: sp_connection_type = 5;

/// `sp_connection_rules`, a bitmask.
pub type sp_connection_rules = c_int;

pub const SP_CONNECTION_RULE_NETWORK: sp_connection_rules = 0x1;
pub const SP_CONNECTION_RULE_NETWORK_IF_ROAMING: sp_connection_rules = 0x2;
pub const SP_CONNECTION_RULE_ALLOW_SYNC_OVER_MOBILE: sp_connection_rules = 0x4;
pub const SP_CONNECTION_RULE_ALLOW_SYNC_OVER_WIFI: sp_connection_rules = 0x8;
