//! Hostname resolution through the system resolver.

use crate::error::{ProbeError, Result};
use std::net::IpAddr;

/// Result of resolving one hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    /// The name that was looked up.
    pub query: String,
    /// Canonical name reported by the resolver, if any.
    pub canonical_name: Option<String>,
    /// Resolved addresses, deduplicated, in resolver order.
    pub addresses: Vec<IpAddr>,
}

impl HostEntry {
    /// Canonical name when the resolver returned a non-empty one.
    pub fn display_name(&self) -> Option<&str> {
        self.canonical_name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Resolves `host` to its canonical name and addresses.
pub fn resolve_host(host: &str) -> Result<HostEntry> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ProbeError::InvalidInput(
            "hostname must not be empty".to_string(),
        ));
    }

    let (canonical_name, mut addresses) = sys::lookup(host)?;
    let mut seen = std::collections::HashSet::new();
    addresses.retain(|a| seen.insert(*a));
    if addresses.is_empty() {
        return Err(ProbeError::Resolution {
            host: host.to_string(),
            reason: "no addresses returned".to_string(),
        });
    }

    tracing::info!(
        host,
        canonical = canonical_name.as_deref().unwrap_or(""),
        addresses = addresses.len(),
        "resolved"
    );
    Ok(HostEntry {
        query: host.to_string(),
        canonical_name,
        addresses,
    })
}

#[cfg(unix)]
mod sys {
    use crate::error::{ProbeError, Result};
    use std::ffi::{CStr, CString};
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    use std::ptr;

    /// getaddrinfo with AI_CANONNAME.
    pub(super) fn lookup(host: &str) -> Result<(Option<String>, Vec<IpAddr>)> {
        let c_host = CString::new(host)
            .map_err(|_| ProbeError::InvalidInput("hostname contains NUL".to_string()))?;

        // SAFETY: zeroed addrinfo is the documented way to build hints.
        let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
        hints.ai_flags = libc::AI_CANONNAME;
        hints.ai_family = libc::AF_UNSPEC;
        hints.ai_socktype = libc::SOCK_STREAM;

        let mut res: *mut libc::addrinfo = ptr::null_mut();
        // SAFETY: all pointers are valid for the duration of the call.
        let rc = unsafe { libc::getaddrinfo(c_host.as_ptr(), ptr::null(), &hints, &mut res) };
        if rc != 0 {
            // SAFETY: gai_strerror returns a static NUL-terminated string.
            let reason = unsafe { CStr::from_ptr(libc::gai_strerror(rc)) }
                .to_string_lossy()
                .into_owned();
            return Err(ProbeError::Resolution {
                host: host.to_string(),
                reason,
            });
        }

        let mut canonical = None;
        let mut addrs = Vec::new();
        let mut cur = res;
        while !cur.is_null() {
            // SAFETY: cur is a node of the list returned by getaddrinfo, freed below.
            let ai = unsafe { &*cur };
            if canonical.is_none() && !ai.ai_canonname.is_null() {
                // SAFETY: ai_canonname is NUL-terminated when non-null.
                let name = unsafe { CStr::from_ptr(ai.ai_canonname) };
                canonical = Some(name.to_string_lossy().into_owned());
            }
            if !ai.ai_addr.is_null() {
                match ai.ai_family {
                    libc::AF_INET => {
                        // SAFETY: family says the address is a sockaddr_in.
                        let sa = unsafe { &*(ai.ai_addr as *const libc::sockaddr_in) };
                        addrs.push(IpAddr::V4(Ipv4Addr::from(u32::from_be(
                            sa.sin_addr.s_addr,
                        ))));
                    }
                    libc::AF_INET6 => {
                        // SAFETY: family says the address is a sockaddr_in6.
                        let sa = unsafe { &*(ai.ai_addr as *const libc::sockaddr_in6) };
                        addrs.push(IpAddr::V6(Ipv6Addr::from(sa.sin6_addr.s6_addr)));
                    }
                    _ => {}
                }
            }
            cur = ai.ai_next;
        }
        // SAFETY: res came from a successful getaddrinfo and is freed once.
        unsafe { libc::freeaddrinfo(res) };

        Ok((canonical, addrs))
    }
}

#[cfg(not(unix))]
mod sys {
    use crate::error::{ProbeError, Result};
    use std::net::{IpAddr, ToSocketAddrs};

    /// No canonical-name query available; the looked-up name stands in.
    pub(super) fn lookup(host: &str) -> Result<(Option<String>, Vec<IpAddr>)> {
        let addrs = (host, 0u16)
            .to_socket_addrs()
            .map_err(|e| ProbeError::Resolution {
                host: host.to_string(),
                reason: e.to_string(),
            })?
            .map(|sa| sa.ip())
            .collect();
        Ok((Some(host.to_string()), addrs))
    }
}
