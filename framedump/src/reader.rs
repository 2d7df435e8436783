/*!
    Pull-style frame reader over a packet source and a step-wise decoder.
*/

use ffmpeg_decode::SendStatus;
use ffmpeg_types::{Error, Packet, Result};
use log::{debug, trace, warn};

use crate::stages::{FrameDecoder, PacketSource};

/**
    Where the reader is in the submit/receive protocol.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReaderState {
    /// The decoder has no frame ready; the next packet must be submitted.
    AwaitingPacket,
    /// A packet was just accepted; the decoder may have frames to hand out.
    FrameReady,
    /// The decoder refused a packet until it is drained; the packet is held.
    Backpressured,
    /// End of stream was signalled; remaining buffered frames are collected.
    Draining,
    /// Source and decoder are both exhausted.
    Finished,
}

/**
    Yields decoded frames one at a time.

    A decoder may need several packets before its first frame, and may hand
    out several frames for one packet. The reader hides that behind
    [`decode_next`](Self::decode_next).

    Decoding errors on a single packet or frame are logged and counted, and
    reading continues with the next packet.
*/
pub struct FrameReader<S, D> {
    source: S,
    decoder: D,
    state: ReaderState,
    pending: Option<Packet>,
    drained_while_full: bool,
    last_receive_failed: bool,
    packets_sent: u64,
    packets_rejected: u64,
    frames_decoded: u64,
    frames_failed: u64,
}

impl<S: PacketSource, D: FrameDecoder> FrameReader<S, D> {
    pub fn new(source: S, decoder: D) -> Self {
        Self {
            source,
            decoder,
            state: ReaderState::AwaitingPacket,
            pending: None,
            drained_while_full: false,
            last_receive_failed: false,
            packets_sent: 0,
            packets_rejected: 0,
            frames_decoded: 0,
            frames_failed: 0,
        }
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn packets_sent(&self) -> u64 {
        self.packets_sent
    }

    /// Packets the decoder failed on and that were dropped.
    pub fn packets_rejected(&self) -> u64 {
        self.packets_rejected
    }

    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    /// Frames the decoder reported an error for instead of producing them.
    pub fn frames_failed(&self) -> u64 {
        self.frames_failed
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /**
        Returns the next decoded frame, or `None` once the source is exhausted
        and the decoder has been drained.

        Only errors from the source and from signalling end of stream end
        the read.
    */
    pub fn decode_next(&mut self) -> Result<Option<D::Frame>> {
        loop {
            match self.state {
                ReaderState::AwaitingPacket => {
                    let packet = match self.pending.take() {
                        Some(packet) => Some(packet),
                        None => self.source.next_packet()?,
                    };

                    let Some(packet) = packet else {
                        debug!("end of stream after {} packets, draining", self.packets_sent);
                        self.decoder.send_eof()?;
                        self.state = ReaderState::Draining;
                        continue;
                    };

                    match self.decoder.send_packet(&packet) {
                        Ok(SendStatus::Accepted) => {
                            self.packets_sent += 1;
                            trace!("packet {} accepted ({} bytes)", self.packets_sent, packet.len());
                            self.state = ReaderState::FrameReady;
                        }
                        Ok(SendStatus::Full) => {
                            self.pending = Some(packet);
                            self.drained_while_full = false;
                            self.state = ReaderState::Backpressured;
                        }
                        // A corrupt packet costs at most its own frame
                        Err(e) => {
                            self.packets_rejected += 1;
                            warn!("dropping packet the decoder rejected: {e}");
                        }
                    }
                }
                ReaderState::FrameReady => match self.decoder.receive_frame() {
                    Ok(Some(frame)) => return Ok(Some(self.emit(frame))),
                    Ok(None) => self.state = ReaderState::AwaitingPacket,
                    Err(e) => {
                        self.record_failure(&e);
                        self.state = ReaderState::AwaitingPacket;
                    }
                },
                ReaderState::Backpressured => match self.decoder.receive_frame() {
                    Ok(Some(frame)) => {
                        self.drained_while_full = true;
                        return Ok(Some(self.emit(frame)));
                    }
                    // Full but nothing to drain: resubmitting would spin forever
                    Ok(None) if !self.drained_while_full => {
                        return Err(Error::codec(
                            "decoder refused input without producing a frame",
                        ));
                    }
                    Ok(None) => self.state = ReaderState::AwaitingPacket,
                    Err(e) => {
                        self.record_failure(&e);
                        // Without any progress the held packet is given up
                        if !self.drained_while_full
                            && let Some(packet) = self.pending.take()
                        {
                            self.packets_rejected += 1;
                            warn!("dropping held packet ({} bytes)", packet.len());
                        }
                        self.state = ReaderState::AwaitingPacket;
                    }
                },
                ReaderState::Draining => match self.decoder.receive_frame() {
                    Ok(Some(frame)) => return Ok(Some(self.emit(frame))),
                    Ok(None) => {
                        debug!("decoder drained after {} frames", self.frames_decoded);
                        self.state = ReaderState::Finished;
                    }
                    // Two failures in a row: the decoder is not making progress
                    Err(e) if self.last_receive_failed => {
                        self.record_failure(&e);
                        debug!("giving up draining after repeated errors");
                        self.state = ReaderState::Finished;
                    }
                    Err(e) => self.record_failure(&e),
                },
                ReaderState::Finished => return Ok(None),
            }
        }
    }

    fn emit(&mut self, frame: D::Frame) -> D::Frame {
        self.frames_decoded += 1;
        self.last_receive_failed = false;
        trace!("frame {} decoded", self.frames_decoded);
        frame
    }

    fn record_failure(&mut self, error: &Error) {
        self.frames_failed += 1;
        self.last_receive_failed = true;
        warn!("skipping frame the decoder failed on: {error}");
    }
}
