use crate::codec::Codec;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Values that carry a request correlation id.
pub trait Correlated {
    fn request_id(&self) -> Option<&str>;
}

/// Inbound request objects exposing the address of the remote peer.
pub trait RemoteOrigin {
    fn remote_addr(&self) -> Option<String>;
}

type EncodeFn<'a> = Box<dyn Fn(&Codec) -> Option<String> + Send + Sync + 'a>;

enum Kind<'a> {
    Value {
        encode: EncodeFn<'a>,
        request_id: Option<String>,
    },
    Inbound {
        remote_addr: Option<String>,
    },
    Outbound,
    Null,
}

/// Loggable view of one argument of an intercepted call.
///
/// Values are borrowed and only encoded when a line is rendered.
pub struct Argument<'a> {
    kind: Kind<'a>,
}

impl<'a> Argument<'a> {
    /// A plain serializable argument.
    ///
    /// A value that encodes to `null` is skipped like [`Argument::null`].
    pub fn value<T: Serialize + Sync + ?Sized>(value: &'a T) -> Self {
        Self {
            kind: Kind::Value {
                encode: Box::new(move |codec: &Codec| codec.encode(value)),
                request_id: None,
            },
        }
    }

    /// A serializable argument that also carries a request correlation id.
    pub fn correlated<T: Serialize + Correlated + Sync>(value: &'a T) -> Self {
        Self {
            kind: Kind::Value {
                encode: Box::new(move |codec: &Codec| codec.encode(value)),
                request_id: value.request_id().map(str::to_string),
            },
        }
    }

    /// An inbound request; only its remote address is logged.
    pub fn inbound<T: RemoteOrigin + ?Sized>(request: &T) -> Self {
        Self {
            kind: Kind::Inbound {
                remote_addr: request.remote_addr(),
            },
        }
    }

    /// An outbound response channel; never logged.
    pub fn outbound() -> Self {
        Self { kind: Kind::Outbound }
    }

    /// An absent value; never logged.
    pub fn null() -> Self {
        Self { kind: Kind::Null }
    }

    /// `value` when present, `null` otherwise.
    pub fn optional<T: Serialize + Sync>(value: Option<&'a T>) -> Self {
        value.map(Self::value).unwrap_or_else(Self::null)
    }

    /// Request id carried by a correlated value.
    pub fn request_id(&self) -> Option<&str> {
        match &self.kind {
            Kind::Value { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Remote address of an inbound request.
    pub fn remote_addr(&self) -> Option<&str> {
        match &self.kind {
            Kind::Inbound { remote_addr } => remote_addr.as_deref(),
            _ => None,
        }
    }

    /// Whether this is a transport carrier (inbound request or outbound response).
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, Kind::Inbound { .. } | Kind::Outbound)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind, Kind::Null)
    }

    /// Encoded text, for plain values only.
    pub fn render(&self, codec: &Codec) -> Option<String> {
        match &self.kind {
            Kind::Value { encode, .. } => encode(codec),
            _ => None,
        }
    }
}

impl fmt::Debug for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Value { request_id, .. } => f
                .debug_struct("Value")
                .field("request_id", request_id)
                .finish_non_exhaustive(),
            Kind::Inbound { remote_addr } => {
                f.debug_struct("Inbound").field("remote_addr", remote_addr).finish()
            }
            Kind::Outbound => write!(f, "Outbound"),
            Kind::Null => write!(f, "Null"),
        }
    }
}

/// Zero-based argument positions omitted from log lines.
///
/// Positions beyond the argument count are simply never hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    positions: BTreeSet<usize>,
}

impl ExclusionSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
}

impl FromIterator<usize> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Dto {
        req_id: Option<String>,
        amount: u32,
    }

    impl Correlated for Dto {
        fn request_id(&self) -> Option<&str> {
            self.req_id.as_deref()
        }
    }

    struct Request(&'static str);

    impl RemoteOrigin for Request {
        fn remote_addr(&self) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn test_value_renders_through_codec() {
        let amount = 12;
        let arg = Argument::value(&amount);
        assert_eq!(arg.render(Codec::shared()).as_deref(), Some("12"));
        assert!(arg.request_id().is_none());
        assert!(!arg.is_transport());
    }

    #[test]
    fn test_str_value() {
        let arg = Argument::value("payload");
        assert_eq!(arg.render(Codec::shared()).as_deref(), Some("\"payload\""));
    }

    #[test]
    fn test_correlated_exposes_request_id() {
        let dto = Dto {
            req_id: Some("abc".to_string()),
            amount: 3,
        };
        let arg = Argument::correlated(&dto);
        assert_eq!(arg.request_id(), Some("abc"));
        assert_eq!(
            arg.render(Codec::shared()).as_deref(),
            Some(r#"{"amount":3,"req_id":"abc"}"#)
        );
    }

    #[test]
    fn test_correlated_without_id() {
        let dto = Dto { req_id: None, amount: 1 };
        assert!(Argument::correlated(&dto).request_id().is_none());
    }

    #[test]
    fn test_inbound_is_never_rendered() {
        let arg = Argument::inbound(&Request("10.0.0.5"));
        assert_eq!(arg.remote_addr(), Some("10.0.0.5"));
        assert!(arg.is_transport());
        assert!(arg.render(Codec::shared()).is_none());
    }

    #[test]
    fn test_outbound_and_null() {
        assert!(Argument::outbound().is_transport());
        assert!(Argument::outbound().render(Codec::shared()).is_none());
        assert!(Argument::null().is_null());
        assert!(Argument::null().render(Codec::shared()).is_none());
    }

    #[test]
    fn test_optional() {
        let present = 5;
        assert!(!Argument::optional(Some(&present)).is_null());
        assert!(Argument::optional::<u8>(None).is_null());
    }

    #[test]
    fn test_exclusion_set() {
        let set: ExclusionSet = [2, 0, 2].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(0));
        assert!(set.contains(2));
        assert!(!set.contains(1));
        assert!(ExclusionSet::none().is_empty());
    }
}
