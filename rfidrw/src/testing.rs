//! In-memory transport replaying scripted reader replies

use std::collections::VecDeque;
use std::time::Duration;

use bytes::BytesMut;

use rfidrw_core::{Frame, Opcode};
use rfidrw_transport::{Result, Transport};

/// Encode a response frame the way the reader does
pub fn reply(opcode: Opcode, status: u8, data: &[u8]) -> Vec<u8> {
    let mut payload = vec![status];
    payload.extend_from_slice(data);
    Frame::with_payload(opcode, payload)
        .expect("test payload fits in a frame")
        .encode()
        .to_vec()
}

enum Step {
    Reply(Vec<Vec<u8>>),
    Silence,
}

/// Answers each write with the next scripted step
///
/// A reply split into chunks makes one more chunk available after every
/// read, like a reader whose answer trickles in over the serial line.
#[derive(Default)]
pub struct ScriptedTransport {
    script: VecDeque<Step>,
    available: VecDeque<u8>,
    incoming: VecDeque<Vec<u8>>,
    sent: Vec<Vec<u8>>,
    timeout: Duration,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, frame: Vec<u8>) -> Self {
        self.reply_in_chunks(vec![frame])
    }

    pub fn reply_in_chunks(mut self, chunks: Vec<Vec<u8>>) -> Self {
        self.script.push_back(Step::Reply(chunks));
        self
    }

    pub fn silence(mut self) -> Self {
        self.script.push_back(Step::Silence);
        self
    }

    /// Frames written so far
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.clone()
    }

    /// Opcodes of the frames written so far
    pub fn sent_opcodes(&self) -> Vec<[u8; 2]> {
        self.sent.iter().map(|f| [f[4], f[5]]).collect()
    }

    /// Steps not consumed yet
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Transport for ScriptedTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.sent.push(data.to_vec());
        self.available.clear();
        self.incoming.clear();

        if let Some(Step::Reply(chunks)) = self.script.pop_front() {
            self.incoming.extend(chunks);
            if let Some(first) = self.incoming.pop_front() {
                self.available.extend(first);
            }
        }

        Ok(())
    }

    fn read_available(&mut self, max: usize) -> Result<BytesMut> {
        let n = max.min(self.available.len());
        let chunk: Vec<u8> = self.available.drain(..n).collect();

        if let Some(next) = self.incoming.pop_front() {
            self.available.extend(next);
        }

        Ok(BytesMut::from(&chunk[..]))
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.timeout = timeout;
        Ok(())
    }

    fn endpoint(&self) -> String {
        "scripted".to_string()
    }
}
