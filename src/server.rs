use std::{
    io::{self, ErrorKind},
    net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs},
    thread,
    time::Duration,
};

use log::{info, warn};

use crate::{
    configuration::MonitorConfig,
    error::MonitorError,
    request_handler::{Client, Notifier, RequestHandler},
    sensors::SensorSource,
    snapshot::SensorSnapshot,
};

// Source of connected clients. `accept_client` must not block.
pub trait Listener {
    type Client: Client;

    fn accept_client(&mut self) -> io::Result<Option<Self::Client>>;
}

pub struct TcpClientListener {
    listener: TcpListener,
    read_timeout: Duration,
}

impl TcpClientListener {
    pub fn bind<A: ToSocketAddrs>(addr: A, read_timeout: Duration) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;

        Ok(Self {
            listener,
            read_timeout,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl Listener for TcpClientListener {
    type Client = TcpStream;

    fn accept_client(&mut self) -> io::Result<Option<TcpStream>> {
        match self.listener.accept() {
            Ok((stream, peer)) => {
                info!("Client connected: {peer}");
                stream.set_nonblocking(false)?;
                stream.set_read_timeout(Some(self.read_timeout))?;
                Ok(Some(stream))
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[derive(Debug)]
pub enum PollOutcome {
    NoClient,
    Served(SensorSnapshot),
    ClientFailed(MonitorError),
}

pub struct Server<L: Listener, S: SensorSource, N: Notifier> {
    listener: L,
    sensors: S,
    handler: RequestHandler<N>,
    iteration_interval: Duration,
    poll_interval: Duration,
}

impl<L: Listener, S: SensorSource, N: Notifier> Server<L, S, N> {
    pub fn new(listener: L, sensors: S, handler: RequestHandler<N>, config: &MonitorConfig) -> Self {
        Self {
            listener,
            sensors,
            handler,
            iteration_interval: config.iteration_interval,
            poll_interval: config.poll_interval,
        }
    }

    pub fn handler(&self) -> &RequestHandler<N> {
        &self.handler
    }

    pub fn poll_once(&mut self) -> Result<PollOutcome, MonitorError> {
        let mut client = match self.listener.accept_client()? {
            Some(client) => client,
            None => return Ok(PollOutcome::NoClient),
        };

        match self.handler.handle(&mut client, &mut self.sensors) {
            Ok(snapshot) => {
                info!(
                    "Served {:.2} C, moisture {}%, raindrop {}%",
                    snapshot.temperature_c, snapshot.moisture, snapshot.raindrop
                );
                Ok(PollOutcome::Served(snapshot))
            }
            Err(e) => {
                warn!("Client failed: {e}");
                Ok(PollOutcome::ClientFailed(e))
            }
        }
    }

    pub fn run(&mut self) -> Result<(), MonitorError> {
        loop {
            match self.poll_once()? {
                PollOutcome::NoClient => thread::sleep(self.poll_interval),
                _ => thread::sleep(self.iteration_interval),
            }
        }
    }
}
