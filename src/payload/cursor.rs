//! Forward-only reader over an uplink payload.
//!
//! Each read consumes a fixed number of bytes with a nom number parser and
//! advances the position; a read that does not fit leaves the cursor
//! untouched and reports how many bytes the payload would have needed.

use crate::error::PayloadError;
use nom::number::complete::{be_i16, le_f32, le_i32, le_u16, le_u24, le_u32, u8 as parse_u8};
use nom::IResult;

#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Total payload length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Whether `width` more bytes can be read
    pub fn has(&self, width: usize) -> bool {
        self.remaining() >= width
    }

    fn take<T>(
        &mut self,
        width: usize,
        parser: impl FnOnce(&'a [u8]) -> IResult<&'a [u8], T>,
    ) -> Result<T, PayloadError> {
        let input = &self.data[self.position..];
        match parser(input) {
            Ok((rest, value)) => {
                self.position = self.data.len() - rest.len();
                Ok(value)
            }
            Err(_) => Err(PayloadError::Truncated {
                got: self.data.len(),
                expected: self.position + width,
            }),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, PayloadError> {
        self.take(1, parse_u8)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, PayloadError> {
        self.take(2, le_u16)
    }

    pub fn read_i16_be(&mut self) -> Result<i16, PayloadError> {
        self.take(2, be_i16)
    }

    pub fn read_u24_le(&mut self) -> Result<u32, PayloadError> {
        self.take(3, le_u24)
    }

    pub fn read_u32_le(&mut self) -> Result<u32, PayloadError> {
        self.take(4, le_u32)
    }

    pub fn read_i32_le(&mut self) -> Result<i32, PayloadError> {
        self.take(4, le_i32)
    }

    pub fn read_f32_le(&mut self) -> Result<f32, PayloadError> {
        self.take(4, le_f32)
    }
}
