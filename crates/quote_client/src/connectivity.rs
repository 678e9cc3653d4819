use std::{
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};

use tracing::debug;

/// Seam for the platform reachability check performed before each fetch.
/// The fetcher fails fast with `NoConnection` when this reports offline,
/// without issuing any HTTP request.
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Skips the reachability check entirely.
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// Cheap TCP reachability probe against a well-known endpoint, typically
/// the quote API host itself. DNS failure counts as offline.
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }
}

impl Connectivity for TcpProbe {
    fn is_online(&self) -> bool {
        let Ok(addrs) = self.addr.to_socket_addrs() else {
            debug!(addr = %self.addr, "connectivity probe: address resolution failed");
            return false;
        };
        for addr in addrs {
            if TcpStream::connect_timeout(&addr, self.timeout).is_ok() {
                return true;
            }
        }
        debug!(addr = %self.addr, "connectivity probe: no address reachable");
        false
    }
}
