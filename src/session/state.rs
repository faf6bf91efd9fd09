//! View/result store for a sky map session
//!
//! Single mutable source of truth: the current view, the last scan result,
//! the highlighted anomaly, the hover tooltip and the scan status line.

use crate::core::scan::{ScanError, ScanRequest};
use crate::domain::{ObjectId, ScanResult, ScreenPoint, View};

/// Status line shown to the operator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanStatus {
    #[default]
    Idle,
    Loading,
    Success(String),
    Failed,
}

impl ScanStatus {
    pub fn message(&self) -> &str {
        match self {
            ScanStatus::Idle => "Ready to scan.",
            ScanStatus::Loading => "Querying live catalog...",
            ScanStatus::Success(message) => message,
            ScanStatus::Failed => "Failed to fetch data from backend.",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScanStatus::Loading)
    }
}

/// Hover tooltip content and placement, in viewport coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub content: String,
    pub x: f64,
    pub y: f64,
}

/// A scan the store has issued and is waiting on
#[derive(Debug, Clone, PartialEq)]
pub struct ScanTicket {
    /// Monotonically increasing per store
    pub seq: u64,
    pub request: ScanRequest,
}

#[derive(Debug, Clone, Default)]
pub struct SkyMapState {
    view: View,
    /// View the current result was scanned for, restored when a scan fails
    settled_view: View,
    result: Option<ScanResult>,
    highlighted: Option<ObjectId>,
    tooltip: Tooltip,
    status: ScanStatus,
    /// Sequence number of the most recently issued scan
    latest_seq: u64,
    /// Sequence number of the most recently applied scan response
    settled_seq: u64,
}

impl SkyMapState {
    pub fn new(view: View) -> Self {
        Self {
            view,
            settled_view: view,
            ..Default::default()
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn result(&self) -> Option<&ScanResult> {
        self.result.as_ref()
    }

    pub fn highlighted(&self) -> Option<&ObjectId> {
        self.highlighted.as_ref()
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn status(&self) -> &ScanStatus {
        &self.status
    }

    /// Whether the latest issued scan has not resolved yet
    pub fn scan_in_flight(&self) -> bool {
        self.latest_seq > self.settled_seq
    }

    /// Make `view` current and issue a scan for it
    pub fn begin_scan(&mut self, view: View, limit: u32) -> ScanTicket {
        self.view = view;
        self.latest_seq += 1;
        self.status = ScanStatus::Loading;
        ScanTicket {
            seq: self.latest_seq,
            request: ScanRequest::for_view(&view, limit),
        }
    }

    /// Apply a scan outcome
    ///
    /// Only the response to the most recently issued scan is applied; older
    /// responses are dropped. Returns whether the store changed.
    pub fn finish_scan(&mut self, seq: u64, outcome: Result<ScanResult, ScanError>) -> bool {
        if seq != self.latest_seq || !self.scan_in_flight() {
            log::warn!(
                "Dropping stale scan response #{} (latest is #{})",
                seq,
                self.latest_seq
            );
            return false;
        }
        self.settled_seq = seq;

        match outcome {
            Ok(result) => {
                log::info!(
                    "Scan #{} returned {} field stars and {} anomalies",
                    seq,
                    result.field_stars.len(),
                    result.anomalies.len()
                );
                self.status = ScanStatus::Success(result.message.clone());
                self.settled_view = self.view;
                self.replace_result(result);
            }
            Err(err) => {
                log::warn!("Scan #{} failed: {}", seq, err);
                self.status = ScanStatus::Failed;
                self.view = self.settled_view;
            }
        }
        true
    }

    /// Replace the result wholesale, dropping a highlight the new result lacks
    pub fn replace_result(&mut self, result: ScanResult) {
        if let Some(id) = &self.highlighted
            && !result.has_anomaly(id)
        {
            self.highlighted = None;
        }
        self.result = Some(result);
    }

    /// Highlight an anomaly of the current result, or clear the highlight
    ///
    /// Ids not present in the current result clear the highlight.
    pub fn highlight(&mut self, id: Option<ObjectId>) -> bool {
        let next = id.filter(|id| self.result.as_ref().is_some_and(|r| r.has_anomaly(id)));
        if next == self.highlighted {
            return false;
        }
        self.highlighted = next;
        true
    }

    pub fn show_tooltip(&mut self, content: String, at: ScreenPoint) {
        self.tooltip = Tooltip {
            visible: true,
            content,
            x: at.x,
            y: at.y,
        };
    }

    /// Hide the tooltip; returns whether it was visible
    pub fn clear_tooltip(&mut self) -> bool {
        let was_visible = self.tooltip.visible;
        self.tooltip = Tooltip::default();
        was_visible
    }
}
