// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::SerializationError;
use lz4_flex::frame::FrameEncoder;
use prost::Message;
use std::io::Write;

/// Encodes protobuf messages for pprof and compresses them into an lz4
/// frame.
pub struct CompressedProfileSerializer {
    buffer: Vec<u8>,
    zipper: FrameEncoder<Vec<u8>>,
}

impl CompressedProfileSerializer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            zipper: FrameEncoder::new(Vec::with_capacity(capacity)),
        }
    }

    /// Encodes the message in its in-wire protobuf format, and compresses it.
    pub fn encode(&mut self, message: &impl Message) -> Result<(), SerializationError> {
        self.buffer.clear();
        message.encode(&mut self.buffer)?;
        self.zipper.write_all(&self.buffer)?;
        Ok(())
    }

    pub fn finish(self) -> Result<Vec<u8>, SerializationError> {
        Ok(self.zipper.finish()?)
    }
}
