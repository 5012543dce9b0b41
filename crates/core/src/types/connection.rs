use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use hallon_sys as sys;

use crate::error::{Error, Result};

/// One flag of the connection-rules bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionRule {
	Network,
	NetworkIfRoaming,
	AllowSyncOverMobile,
	AllowSyncOverWifi,
}

impl ConnectionRule {
	pub const ALL: [ConnectionRule; 4] = [
		Self::Network,
		Self::NetworkIfRoaming,
		Self::AllowSyncOverMobile,
		Self::AllowSyncOverWifi,
	];

	pub fn bit(self) -> sys::sp_connection_rules {
		match self {
			Self::Network => sys::SP_CONNECTION_RULE_NETWORK,
			Self::NetworkIfRoaming => sys::SP_CONNECTION_RULE_NETWORK_IF_ROAMING,
			Self::AllowSyncOverMobile => sys::SP_CONNECTION_RULE_ALLOW_SYNC_OVER_MOBILE,
			Self::AllowSyncOverWifi => sys::SP_CONNECTION_RULE_ALLOW_SYNC_OVER_WIFI,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Network => "network",
			Self::NetworkIfRoaming => "network_if_roaming",
			Self::AllowSyncOverMobile => "allow_sync_over_mobile",
			Self::AllowSyncOverWifi => "allow_sync_over_wifi",
		}
	}
}

impl FromStr for ConnectionRule {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|rule| rule.as_str() == s)
			.ok_or_else(|| Error::validation(format!("unknown connection rule {s:?}")))
	}
}

impl fmt::Display for ConnectionRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Bitwise OR of [`ConnectionRule`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConnectionRules(sys::sp_connection_rules);

impl ConnectionRules {
	pub const fn empty() -> Self {
		Self(0)
	}

	/// Validates every name before encoding any of them.
	pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
		names
			.iter()
			.map(|name| name.as_ref().parse::<ConnectionRule>())
			.collect()
	}

	pub fn with(self, rule: ConnectionRule) -> Self {
		Self(self.0 | rule.bit())
	}

	pub fn contains(self, rule: ConnectionRule) -> bool {
		self.0 & rule.bit() != 0
	}

	pub fn bits(self) -> sys::sp_connection_rules {
		self.0
	}

	pub fn iter(self) -> impl Iterator<Item = ConnectionRule> {
		ConnectionRule::ALL.into_iter().filter(move |rule| self.contains(*rule))
	}
}

impl From<ConnectionRule> for ConnectionRules {
	fn from(rule: ConnectionRule) -> Self {
		Self::empty().with(rule)
	}
}

impl BitOr for ConnectionRule {
	type Output = ConnectionRules;

	fn bitor(self, rhs: Self) -> ConnectionRules {
		ConnectionRules::from(self).with(rhs)
	}
}

impl BitOr<ConnectionRule> for ConnectionRules {
	type Output = ConnectionRules;

	fn bitor(self, rhs: ConnectionRule) -> ConnectionRules {
		self.with(rhs)
	}
}

impl FromIterator<ConnectionRule> for ConnectionRules {
	fn from_iter<I: IntoIterator<Item = ConnectionRule>>(iter: I) -> Self {
		iter.into_iter().fold(Self::empty(), Self::with)
	}
}

/// Network type the device is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionType {
	Unknown,
	None,
	Mobile,
	MobileRoaming,
	Wifi,
	Wired,
}

impl ConnectionType {
	const NAMES: [(ConnectionType, &'static str); 6] = [
		(Self::Unknown, "unknown"),
		(Self::None, "none"),
		(Self::Mobile, "mobile"),
		(Self::MobileRoaming, "mobile_roaming"),
		(Self::Wifi, "wifi"),
		(Self::Wired, "wired"),
	];

	pub fn as_raw(self) -> sys::sp_connection_type {
		match self {
			Self::Unknown => sys::SP_CONNECTION_TYPE_UNKNOWN,
			Self::None => sys::SP_CONNECTION_TYPE_NONE,
			Self::Mobile => sys::SP_CONNECTION_TYPE_MOBILE,
			Self::MobileRoaming => sys::SP_CONNECTION_TYPE_MOBILE_ROAMING,
			Self::Wifi => sys::SP_CONNECTION_TYPE_WIFI,
			Self::Wired => sys::SP_CONNECTION_TYPE_WIRED,
		}
	}

	pub fn as_str(self) -> &'static str {
		Self::NAMES
			.iter()
			.find(|(kind, _)| *kind == self)
			.map_or("unknown", |(_, name)| name)
	}
}

impl FromStr for ConnectionType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::NAMES
			.iter()
			.find(|(_, name)| *name == s)
			.map(|(kind, _)| *kind)
			.ok_or_else(|| Error::validation(format!("unknown connection type {s:?}")))
	}
}

impl fmt::Display for ConnectionType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Session connection status as reported by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
	LoggedOut,
	LoggedIn,
	Disconnected,
	Undefined,
	Offline,
}

impl ConnectionState {
	pub fn from_raw(raw: sys::sp_connectionstate) -> Result<Self> {
		match raw {
			sys::SP_CONNECTION_STATE_LOGGED_OUT => Ok(Self::LoggedOut),
			sys::SP_CONNECTION_STATE_LOGGED_IN => Ok(Self::LoggedIn),
			sys::SP_CONNECTION_STATE_DISCONNECTED => Ok(Self::Disconnected),
			sys::SP_CONNECTION_STATE_UNDEFINED => Ok(Self::Undefined),
			sys::SP_CONNECTION_STATE_OFFLINE => Ok(Self::Offline),
			value => Err(Error::UnknownValue {
				kind: "connection state",
				value,
			}),
		}
	}

	pub fn as_raw(self) -> sys::sp_connectionstate {
		match self {
			Self::LoggedOut => sys::SP_CONNECTION_STATE_LOGGED_OUT,
			Self::LoggedIn => sys::SP_CONNECTION_STATE_LOGGED_IN,
			Self::Disconnected => sys::SP_CONNECTION_STATE_DISCONNECTED,
			Self::Undefined => sys::SP_CONNECTION_STATE_UNDEFINED,
			Self::Offline => sys::SP_CONNECTION_STATE_OFFLINE,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rules_encode_as_bitmask() {
		let rules = ConnectionRules::from_names(&["network", "allow_sync_over_mobile"]).unwrap();
		assert_eq!(rules.bits(), 0x1 | 0x4);
		assert_eq!(
			rules.iter().collect::<Vec<_>>(),
			vec![ConnectionRule::Network, ConnectionRule::AllowSyncOverMobile]
		);
		assert_eq!(ConnectionRule::Network | ConnectionRule::AllowSyncOverMobile, rules);
	}

	#[test]
	fn one_bad_rule_rejects_the_whole_set() {
		let err = ConnectionRules::from_names(&["network", "bluetooth"]).unwrap_err();
		assert!(err.is_validation());
		assert!(err.to_string().contains("bluetooth"));
	}

	#[test]
	fn empty_rule_set_is_zero() {
		let names: [&str; 0] = [];
		assert_eq!(ConnectionRules::from_names(&names).unwrap().bits(), 0);
	}

	#[test]
	fn connection_type_whitelist() {
		assert_eq!("mobile_roaming".parse::<ConnectionType>().unwrap().as_raw(), 3);
		assert_eq!("wired".parse::<ConnectionType>().unwrap(), ConnectionType::Wired);
		assert_eq!(ConnectionType::Wifi.to_string(), "wifi");
		assert!("ethernet".parse::<ConnectionType>().unwrap_err().is_validation());
	}

	#[test]
	fn connection_state_decoding() {
		for state in [
			ConnectionState::LoggedOut,
			ConnectionState::LoggedIn,
			ConnectionState::Disconnected,
			ConnectionState::Undefined,
			ConnectionState::Offline,
		] {
			assert_eq!(ConnectionState::from_raw(state.as_raw()).unwrap(), state);
		}
		assert!(matches!(
			ConnectionState::from_raw(42),
			Err(Error::UnknownValue { value: 42, .. })
		));
	}
}
