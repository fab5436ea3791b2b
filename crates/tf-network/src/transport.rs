//! The send primitive packets leave through.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

/// Fire-and-forget delivery of one payload.
///
/// Errors are reported to the emulator, which logs and counts them; the
/// packet is not retried.
pub trait Transport {
    fn deliver(&mut self, payload: &[u8]) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn deliver(&mut self, payload: &[u8]) -> io::Result<()> {
        (**self).deliver(payload)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn deliver(&mut self, payload: &[u8]) -> io::Result<()> {
        (**self).deliver(payload)
    }
}

// ── UdpTransport ──────────────────────────────────────────────────────────────

/// One datagram per payload over a socket connected to a fixed destination.
///
/// A connected socket only accepts datagrams from the destination and
/// reports ICMP unreachable errors on later sends; those are counted as
/// send failures like any other.
pub struct UdpTransport {
    socket: UdpSocket,
    dest:   SocketAddr,
}

impl UdpTransport {
    /// Resolve `dest`, bind an ephemeral local socket of the same family,
    /// and connect it to `dest`.
    pub fn connect<A: ToSocketAddrs>(dest: A) -> io::Result<Self> {
        let dest = dest
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no address resolved"))?;
        let local: SocketAddr = if dest.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let socket = UdpSocket::bind(local)?;
        socket.connect(dest)?;
        Ok(Self { socket, dest })
    }

    pub fn destination(&self) -> SocketAddr {
        self.dest
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl Transport for UdpTransport {
    fn deliver(&mut self, payload: &[u8]) -> io::Result<()> {
        self.socket.send(payload).map(|_| ())
    }
}

// ── MemoryTransport ───────────────────────────────────────────────────────────

/// Records payloads in memory.  Used by tests and dry runs.
#[derive(Default, Debug)]
pub struct MemoryTransport {
    pub delivered: Vec<Vec<u8>>,
    /// Number of upcoming deliveries that fail before sends succeed again.
    pub fail_next: usize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivered payloads as UTF-8 lines (lossy).
    pub fn lines(&self) -> Vec<String> {
        self.delivered
            .iter()
            .map(|p| String::from_utf8_lossy(p).into_owned())
            .collect()
    }
}

impl Transport for MemoryTransport {
    fn deliver(&mut self, payload: &[u8]) -> io::Result<()> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "simulated send failure"));
        }
        self.delivered.push(payload.to_vec());
        Ok(())
    }
}
