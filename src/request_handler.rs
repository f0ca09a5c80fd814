use std::{
    io::{self, ErrorKind, Read, Write},
    net::{Shutdown, TcpStream},
};

use log::{debug, warn};

use crate::{error::MonitorError, sensors::SensorSource, snapshot::SensorSnapshot};

pub const END_OF_LINE: u8 = b'\n';
pub const RAIN_NOTIFICATION: &str = "It is raining outside!";

const MAX_DRAIN: usize = 4096;

const RESPONSE_HEADERS: &str = "HTTP/1.1 200 OK\r\n\
    Content-Type: application/json\r\n\
    Access-Control-Allow-Origin: *\r\n\
    Connection: close\r\n\
    \r\n";

pub trait Client: Read + Write {
    fn close(&mut self) -> io::Result<()>;
}

impl Client for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        self.flush()?;

        // Unread request bytes would turn the close into a reset.
        self.set_nonblocking(true)?;
        let drained = drain_pending(self);
        if drained > 0 {
            debug!("Discarded {drained} unread byte(s)");
        }

        match self.shutdown(Shutdown::Both) {
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            r => r,
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, content: &str);
}

pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, content: &str) {
        warn!("{content}");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Reading,
    Responding,
    Closed,
}

pub fn wait_for_request<R: Read>(reader: &mut R) -> Result<usize, MonitorError> {
    let mut byte = [0u8; 1];
    let mut consumed = 0;

    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Err(MonitorError::ConnectionClosedPrematurely),
            Ok(_) => {
                consumed += 1;
                if byte[0] == END_OF_LINE {
                    return Ok(consumed);
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

pub fn drain_pending<R: Read>(reader: &mut R) -> usize {
    let mut buf = [0u8; 256];
    let mut drained = 0;

    while drained < MAX_DRAIN {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => drained += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }

    drained
}

pub fn format_response(snapshot: &SensorSnapshot) -> Result<String, MonitorError> {
    let body = snapshot.to_json()?;
    Ok(format!("{RESPONSE_HEADERS}{body}\r\n"))
}

pub fn write_response<W: Write>(writer: &mut W, snapshot: &SensorSnapshot) -> Result<(), MonitorError> {
    writer.write_all(format_response(snapshot)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub struct RequestHandler<N: Notifier> {
    notifier: N,
    state: ConnectionState,
}

impl<N: Notifier> RequestHandler<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            state: ConnectionState::Idle,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn handle<C: Client, S: SensorSource>(
        &mut self,
        client: &mut C,
        sensors: &mut S,
    ) -> Result<SensorSnapshot, MonitorError> {
        self.transition(ConnectionState::Reading);
        let served = self.exchange(client, sensors);

        let closed = client.close();
        self.transition(ConnectionState::Closed);

        if sensors.is_raining() {
            self.notifier.notify(RAIN_NOTIFICATION);
        }

        let snapshot = served?;
        closed?;
        Ok(snapshot)
    }

    fn exchange<C: Client, S: SensorSource>(
        &mut self,
        client: &mut C,
        sensors: &mut S,
    ) -> Result<SensorSnapshot, MonitorError> {
        let consumed = wait_for_request(client)?;
        debug!("End of request after {consumed} byte(s)");

        self.transition(ConnectionState::Responding);
        let snapshot = sensors.snapshot();
        write_response(client, &snapshot)?;

        Ok(snapshot)
    }

    fn transition(&mut self, next: ConnectionState) {
        debug!("Connection {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
