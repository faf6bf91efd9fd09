//! Async driver for a sky map session
//!
//! Messages are processed one at a time. Scans run as spawned tasks and
//! report back through the session's channel; they are never cancelled.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::core::app::App;
use crate::core::scan::{ScanError, ScanService};
use crate::session::{Command, Msg, ScanTicket};

pub struct Session<S: ScanService> {
    app: App,
    service: Arc<S>,
    tx: UnboundedSender<Msg>,
    rx: UnboundedReceiver<Msg>,
}

impl<S: ScanService> Session<S> {
    pub fn new(app: App, service: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            app,
            service: Arc::new(service),
            tx,
            rx,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Handle for feeding input from elsewhere, e.g. a UI event loop
    pub fn sender(&self) -> UnboundedSender<Msg> {
        self.tx.clone()
    }

    /// Process one message and start any scan it asks for
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, msg: Msg) {
        match self.app.update(msg) {
            Command::None => {}
            Command::Scan(ticket) => self.spawn_scan(ticket),
        }
    }

    fn spawn_scan(&self, ticket: ScanTicket) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let ScanTicket { seq, request } = ticket;
        let scan = tokio::spawn(async move { service.scan(request).await });
        // Every issued scan resolves, even when its task panics
        tokio::spawn(async move {
            let outcome = match scan.await {
                Ok(outcome) => outcome,
                Err(err) => Err(ScanError::Transport(format!("scan task failed: {err}"))),
            };
            if tx.send(Msg::ScanFinished { seq, outcome }).is_err() {
                log::debug!("Session closed before scan #{} finished", seq);
            }
        });
    }

    /// Wait for the next queued message and process it
    pub async fn next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Process messages until no scan is outstanding
    pub async fn settle(&mut self) {
        while self.app.state().scan_in_flight() {
            if !self.next().await {
                break;
            }
        }
    }

    pub fn into_app(self) -> App {
        self.app
    }
}
