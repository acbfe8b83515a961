//! Message passing between the ranks of a run.
//!
//! Ranks share nothing mutable; everything they exchange goes through a
//! [`Communicator`]. Only point-to-point `send` and `recv` are required from a
//! transport, broadcast and barrier are built on top of them.

mod local;

pub use local::{launch, world, LocalComm};

use crate::utils::error::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Matrix { cities: usize, distances: Vec<f64> },
    Distance(f64),
    Tour(Vec<usize>),
    Token,
}

impl Message {
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Matrix { .. } => "matrix",
            Message::Distance(_)   => "distance",
            Message::Tour(_)       => "tour",
            Message::Token         => "token",
        }
    }
}

pub trait Communicator {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;
    /// Blocks until the message is handed to the transport.
    fn send(&self, dest: usize, message: Message) -> Result<()>;
    /// Blocks until the next message from `src` arrives. Messages from one
    /// source arrive in the order they were sent.
    fn recv(&self, src: usize) -> Result<Message>;

    /// Root hands `message` to every other rank in rank order; every rank
    /// returns the root's message.
    fn broadcast(&self, root: usize, message: Option<Message>) -> Result<Message> {
        if self.rank() != root {
            return self.recv(root);
        }
        let message = message.ok_or(Error::Protocol {
            rank: root, expected: "message to broadcast", found: "nothing",
        })?;
        for dest in (0..self.size()).filter(|&dest| dest != root) {
            self.send(dest, message.clone())?;
        }
        Ok(message)
    }

    /// Linear barrier: root waits for a token from every rank, then releases them.
    fn barrier(&self, root: usize) -> Result<()> {
        if self.rank() != root {
            self.send(root, Message::Token)?;
            return expect_token(root, self.recv(root)?);
        }
        for src in (0..self.size()).filter(|&src| src != root) {
            expect_token(src, self.recv(src)?)?;
        }
        for dest in (0..self.size()).filter(|&dest| dest != root) {
            self.send(dest, Message::Token)?;
        }
        Ok(())
    }
}

fn expect_token(rank: usize, message: Message) -> Result<()> {
    match message {
        Message::Token => Ok(()),
        other => Err(Error::Protocol { rank, expected: "token", found: other.kind() }),
    }
}
