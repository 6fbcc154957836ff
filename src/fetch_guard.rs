//! Drops responses that arrive after a newer request was issued.
//!
//! Each fetch takes a ticket before it starts and checks it when the
//! response lands; only the most recently issued ticket may write results.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchGuard {
    latest: u64,
}

impl FetchGuard {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}
