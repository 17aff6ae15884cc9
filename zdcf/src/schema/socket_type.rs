//! Socket roles understood by the messaging runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};

/// The role of a socket, written in upper case in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SocketType {
    /// Exclusive pair.
    Pair,
    /// Publisher.
    Pub,
    /// Subscriber.
    Sub,
    /// Request.
    Req,
    /// Reply.
    Rep,
    /// Asynchronous request.
    Dealer,
    /// Asynchronous reply.
    Router,
    /// Pipeline consumer.
    Pull,
    /// Pipeline producer.
    Push,
    /// Publisher that sees subscriptions.
    XPub,
    /// Subscriber that sends raw subscriptions.
    XSub,
    /// Legacy alias of `DEALER`.
    XReq,
    /// Legacy alias of `ROUTER`.
    XRep,
    /// Legacy alias of `PULL`.
    Upstream,
    /// Legacy alias of `PUSH`.
    Downstream,
}

impl SocketType {
    /// Every socket type, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::Pair,
        Self::Pub,
        Self::Sub,
        Self::Req,
        Self::Rep,
        Self::Dealer,
        Self::Router,
        Self::Pull,
        Self::Push,
        Self::XPub,
        Self::XSub,
        Self::XReq,
        Self::XRep,
        Self::Upstream,
        Self::Downstream,
    ];

    /// The configuration spelling of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pair => "PAIR",
            Self::Pub => "PUB",
            Self::Sub => "SUB",
            Self::Req => "REQ",
            Self::Rep => "REP",
            Self::Dealer => "DEALER",
            Self::Router => "ROUTER",
            Self::Pull => "PULL",
            Self::Push => "PUSH",
            Self::XPub => "XPUB",
            Self::XSub => "XSUB",
            Self::XReq => "XREQ",
            Self::XRep => "XREP",
            Self::Upstream => "UPSTREAM",
            Self::Downstream => "DOWNSTREAM",
        }
    }
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known socket type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown socket type '{0}'")]
pub struct UnknownSocketType(pub String);

impl FromStr for SocketType {
    type Err = UnknownSocketType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| UnknownSocketType(s.to_owned()))
    }
}

/// Deserialize an optional socket type, reading an empty string as absent.
pub(super) fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<SocketType>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|raw| !raw.is_empty())
        .map(|raw| raw.parse().map_err(de::Error::custom))
        .transpose()
}
