//! Handoff to the external messaging channel
//!
//! Orders, reservations and contact messages leave the storefront as a
//! prefilled WhatsApp link. Delivery is fire-and-forget: the sink reports
//! nothing back and nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::validation::{ContactRequest, ReservationRequest};

const WA_BASE_URL: &str = "https://wa.me";

// ============================================================
// LINK COMPOSER
// ============================================================

/// Builds `https://wa.me/{number}?text={encoded}` links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppLink {
    number: String,
}

impl WhatsAppLink {
    /// `number` in international form without `+`, e.g. `6281234567890`.
    /// Non-digits are dropped.
    pub fn new(number: &str) -> Self {
        Self {
            number: number.chars().filter(|c| c.is_ascii_digit()).collect(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn compose(&self, text: &str) -> String {
        format!(
            "{}/{}?text={}",
            WA_BASE_URL,
            self.number,
            urlencoding::encode(text)
        )
    }
}

// ============================================================
// MESSAGE BODIES
// ============================================================

pub fn reservation_message(req: &ReservationRequest) -> String {
    let notes = req
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("None");
    format!(
        "Reservation Request:\n\nName: {}\nPhone: {}\nDate: {}\nTime: {}\nGuests: {}\nNotes: {}",
        req.name.trim(),
        req.phone.trim(),
        req.date.trim(),
        req.time.trim(),
        req.guests.trim(),
        notes
    )
}

pub fn contact_message(req: &ContactRequest) -> String {
    format!(
        "Contact Message:\n\nName: {}\nEmail: {}\nSubject: {}\nMessage: {}",
        req.name.trim(),
        req.email.trim(),
        req.subject.trim(),
        req.message.trim()
    )
}

// ============================================================
// SINKS
// ============================================================

/// Receiver of composed links (opens a browser tab in the web build)
#[async_trait]
pub trait HandoffSink: Send + Sync {
    async fn deliver(&self, url: &str);
}

/// Prints the link on stdout and logs it
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

#[async_trait]
impl HandoffSink for ConsoleSink {
    async fn deliver(&self, url: &str) {
        tracing::info!(url, "handoff link ready");
        println!("{}", url);
    }
}

/// Keeps every delivered link; used by tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    delivered: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn delivered(&self) -> Vec<String> {
        self.delivered.lock().await.clone()
    }
}

#[async_trait]
impl HandoffSink for MemorySink {
    async fn deliver(&self, url: &str) {
        self.delivered.lock().await.push(url.to_string());
    }
}

// ============================================================
// HANDOFF
// ============================================================

/// Composer + sink + the cosmetic "processing" pause shown before opening
/// the link. The pause fires once and is never cancelled.
#[derive(Clone)]
pub struct Handoff {
    link: WhatsAppLink,
    delay: Duration,
    sink: Arc<dyn HandoffSink>,
}

impl Handoff {
    pub fn new(link: WhatsAppLink, delay: Duration, sink: Arc<dyn HandoffSink>) -> Self {
        Self { link, delay, sink }
    }

    /// Wait out the delay, compose the link, deliver it. Returns the link.
    pub async fn send(&self, text: &str) -> String {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let url = self.link.compose(text);
        self.sink.deliver(&url).await;
        tracing::debug!(bytes = text.len(), "handoff delivered");
        url
    }
}

impl std::fmt::Debug for Handoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handoff")
            .field("link", &self.link)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
